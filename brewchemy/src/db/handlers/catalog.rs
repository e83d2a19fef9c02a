//! Generic repository for the inventory tables.
//!
//! Equipment, fermentables, hops, misc and yeasts share one ownership model: every row belongs to a
//! user, and rows belonging to the official user form a catalog that everyone can read. A user
//! "personalizes" a catalog row by editing it, which forks a private copy carrying the catalog row's
//! id in `official_id`. From then on the catalog row is hidden from that user's listings.
//!
//! [`Catalog`] implements this once for any [`CatalogItem`].

use std::marker::PhantomData;

use sqlx::{FromRow, PgConnection, QueryBuilder, postgres::PgRow};
use tracing::instrument;

use crate::db::{
    errors::{DbError, Result},
    handlers::{
        columns::{Assign, Columns, insert_into, update_set},
        repository::Repository,
    },
};
use crate::types::{UserId, escape_like};

/// A row type stored in one of the inventory tables.
pub trait CatalogItem: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Table name
    const TABLE: &'static str;
    /// Human-readable name used in messages and spans, e.g. `"Equipment"`
    const LABEL: &'static str;
    /// Data columns copied when a catalog row is forked. Excludes `id`, `user_id`, `official_id`
    /// and database-managed timestamps.
    const DATA_COLUMNS: &'static [&'static str];

    type CreateRequest: Send + Sync;
    type UpdateRequest: Send + Sync;

    fn id(&self) -> i32;
    fn owner(&self) -> UserId;

    /// Columns for an insert, including `user_id`
    fn create_columns(request: &Self::CreateRequest) -> Columns;
    /// Columns touched by an update; omitted fields are left out
    fn update_columns(request: &Self::UpdateRequest) -> Columns;
}

/// Which rows a listing should show.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    pub user_id: UserId,
    pub official_user_id: UserId,
    /// Case-insensitive substring match on `name`
    pub search: Option<String>,
    pub limit: i64,
}

impl CatalogFilter {
    pub fn new(user_id: UserId, official_user_id: UserId, limit: i64) -> Self {
        Self {
            user_id,
            official_user_id,
            search: None,
            limit,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// Result of an ownership-aware update
#[derive(Debug)]
pub enum UpdateOutcome<T> {
    /// The caller's own row was updated in place
    Updated(T),
    /// A catalog row was copied into the caller's inventory and the copy updated
    Forked(T),
    /// No row with that id is visible to the caller
    NotFound,
}

/// Result of an ownership-aware delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The row belongs to the official catalog, which can't be deleted through the API
    Official,
    NotFound,
}

pub struct Catalog<'c, T> {
    db: &'c mut PgConnection,
    _item: PhantomData<T>,
}

impl<'c, T: CatalogItem> Catalog<'c, T> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db, _item: PhantomData }
    }

    /// Fetch a row the user can see: their own, or a catalog row.
    #[instrument(skip(self), fields(item = T::LABEL), err)]
    pub async fn resolve(&mut self, id: i32, user_id: UserId, official_user_id: UserId) -> Result<Option<T>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1 AND (user_id = $2 OR user_id = $3)", T::TABLE);
        let item = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(official_user_id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(item)
    }

    /// Update the user's own row in place, or fork a catalog row into the user's inventory and
    /// apply the update to the copy. Run inside a transaction: a fork is two statements.
    #[instrument(skip(self, request), fields(item = T::LABEL), err)]
    pub async fn update_for_user(
        &mut self,
        id: i32,
        user_id: UserId,
        official_user_id: UserId,
        request: &T::UpdateRequest,
    ) -> Result<UpdateOutcome<T>> {
        let Some(existing) = self.get_by_id(id).await? else {
            return Ok(UpdateOutcome::NotFound);
        };

        if existing.owner() == user_id {
            let updated = self.update(id, request).await?;
            Ok(UpdateOutcome::Updated(updated))
        } else if existing.owner() == official_user_id {
            let fork = self.fork(id, user_id).await?;
            let updated = self.update(fork.id(), request).await?;
            Ok(UpdateOutcome::Forked(updated))
        } else {
            Ok(UpdateOutcome::NotFound)
        }
    }

    /// Delete the user's own row. Catalog rows are never deleted, whoever asks.
    #[instrument(skip(self), fields(item = T::LABEL), err)]
    pub async fn delete_for_user(&mut self, id: i32, user_id: UserId, official_user_id: UserId) -> Result<DeleteOutcome> {
        let Some(existing) = self.get_by_id(id).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        if existing.owner() == official_user_id {
            return Ok(DeleteOutcome::Official);
        }
        if existing.owner() != user_id {
            return Ok(DeleteOutcome::NotFound);
        }

        if self.delete(id).await? {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    /// Copy a catalog row into `user_id`'s inventory, recording its id as `official_id`.
    #[instrument(skip(self), fields(item = T::LABEL), err)]
    async fn fork(&mut self, official_id: i32, user_id: UserId) -> Result<T> {
        let columns = T::DATA_COLUMNS.join(", ");
        let sql = format!(
            "INSERT INTO {table} (official_id, user_id, {columns}) \
             SELECT id, $1, {columns} FROM {table} WHERE id = $2 RETURNING *",
            table = T::TABLE,
        );
        let item = sqlx::query_as::<_, T>(&sql)
            .bind(user_id)
            .bind(official_id)
            .fetch_one(&mut *self.db)
            .await?;
        Ok(item)
    }
}

#[async_trait::async_trait]
impl<'c, T: CatalogItem> Repository for Catalog<'c, T> {
    type CreateRequest = T::CreateRequest;
    type UpdateRequest = T::UpdateRequest;
    type Response = T;
    type Id = i32;
    type Filter = CatalogFilter;

    #[instrument(skip(self, request), fields(item = T::LABEL), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let mut query = insert_into(T::TABLE, T::create_columns(request));
        let item = query.build_query_as::<T>().fetch_one(&mut *self.db).await?;
        Ok(item)
    }

    #[instrument(skip(self), fields(item = T::LABEL), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        let item = sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(&mut *self.db).await?;
        Ok(item)
    }

    /// The user's own rows plus every catalog row they haven't personalized.
    #[instrument(skip(self, filter), fields(item = T::LABEL, user_id = filter.user_id, limit = filter.limit), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::new(format!("SELECT * FROM {} WHERE (user_id = ", T::TABLE));
        query.push_bind(filter.user_id);
        query.push(" OR (user_id = ");
        query.push_bind(filter.official_user_id);
        query.push(format!(
            " AND id NOT IN (SELECT official_id FROM {} WHERE official_id IS NOT NULL AND user_id = ",
            T::TABLE
        ));
        query.push_bind(filter.user_id);
        query.push(")))");

        if let Some(term) = &filter.search {
            query.push(" AND name ILIKE ");
            query.push_bind(format!("%{}%", escape_like(term)));
            query.push(" ESCAPE '\\'");
        }

        query.push(" ORDER BY name, id LIMIT ");
        query.push_bind(filter.limit);

        let items = query.build_query_as::<T>().fetch_all(&mut *self.db).await?;
        Ok(items)
    }

    #[instrument(skip(self), fields(item = T::LABEL), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&mut *self.db).await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(item = T::LABEL), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let columns = T::update_columns(request);
        if columns.is_empty() {
            return self.get_by_id(id).await?.ok_or(DbError::NotFound);
        }

        let mut query = update_set(T::TABLE, columns, Assign::Overwrite);
        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(" RETURNING *");

        query
            .build_query_as::<T>()
            .fetch_optional(&mut *self.db)
            .await?
            .ok_or(DbError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::handlers::Hops;
    use crate::db::models::hops::{HopCreateDBRequest, HopDBResponse, HopUpdateDBRequest};
    use crate::test_utils::create_test_user;
    use rust_decimal::Decimal;
    use sqlx::PgPool;

    fn hop(user_id: UserId, name: &str) -> HopCreateDBRequest {
        HopCreateDBRequest {
            user_id,
            name: name.to_string(),
            supplier: None,
            alpha_acid_content: Some(Decimal::new(120, 1)),
            beta_acid_content: None,
            r#type: Some("Bittering".to_string()),
            country_of_origin: Some("US".to_string()),
            description: Some("Resinous".to_string()),
            use_type: None,
        }
    }

    fn names(items: &[HopDBResponse]) -> Vec<&str> {
        items.iter().map(|h| h.name.as_str()).collect()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_merges_catalog_and_own_rows(pool: PgPool) {
        let official = create_test_user(&pool).await;
        let user = create_test_user(&pool).await;
        let stranger = create_test_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Hops::new(&mut conn);

        repo.create(&hop(official.id, "Columbus")).await.unwrap();
        repo.create(&hop(user.id, "Backyard Cascade")).await.unwrap();
        repo.create(&hop(stranger.id, "Secret Hop")).await.unwrap();

        let listed = repo.list(&CatalogFilter::new(user.id, official.id, 12)).await.unwrap();
        assert_eq!(names(&listed), vec!["Backyard Cascade", "Columbus"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_fork_hides_catalog_row_and_keeps_data(pool: PgPool) {
        let official = create_test_user(&pool).await;
        let user = create_test_user(&pool).await;
        let mut tx = pool.begin().await.unwrap();
        let mut repo = Hops::new(&mut tx);

        let columbus = repo.create(&hop(official.id, "Columbus")).await.unwrap();
        let update = HopUpdateDBRequest {
            description: Some(None),
            alpha_acid_content: Some(Some(Decimal::new(145, 1))),
            ..Default::default()
        };
        let UpdateOutcome::Forked(fork) = repo.update_for_user(columbus.id, user.id, official.id, &update).await.unwrap() else {
            panic!("expected a fork");
        };
        assert_ne!(fork.id, columbus.id);
        assert_eq!(fork.official_id, Some(columbus.id));
        assert_eq!(fork.user_id, user.id);
        assert_eq!(fork.name, "Columbus");
        assert_eq!(fork.country_of_origin.as_deref(), Some("US"));
        assert_eq!(fork.description, None);
        assert_eq!(fork.alpha_acid_content, Some(Decimal::new(145, 1)));

        // The catalog row is untouched
        let original = repo.get_by_id(columbus.id).await.unwrap().unwrap();
        assert_eq!(original.description.as_deref(), Some("Resinous"));

        let listed = repo.list(&CatalogFilter::new(user.id, official.id, 12)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, fork.id);

        // Other users still see the catalog row
        let other = repo.list(&CatalogFilter::new(official.id + user.id + 1000, official.id, 12)).await.unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].id, columbus.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_own_row_in_place_and_foreign_row_not_found(pool: PgPool) {
        let official = create_test_user(&pool).await;
        let user = create_test_user(&pool).await;
        let stranger = create_test_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Hops::new(&mut conn);

        let own = repo.create(&hop(user.id, "Nugget")).await.unwrap();
        let theirs = repo.create(&hop(stranger.id, "Mystery")).await.unwrap();
        let update = HopUpdateDBRequest {
            name: Some("Nugget (2024)".to_string()),
            ..Default::default()
        };

        match repo.update_for_user(own.id, user.id, official.id, &update).await.unwrap() {
            UpdateOutcome::Updated(updated) => {
                assert_eq!(updated.id, own.id);
                assert_eq!(updated.name, "Nugget (2024)");
                assert_eq!(updated.r#type.as_deref(), Some("Bittering"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(
            repo.update_for_user(theirs.id, user.id, official.id, &update).await.unwrap(),
            UpdateOutcome::NotFound
        ));
        assert!(matches!(
            repo.update_for_user(i32::MAX, user.id, official.id, &update).await.unwrap(),
            UpdateOutcome::NotFound
        ));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_rules(pool: PgPool) {
        let official = create_test_user(&pool).await;
        let user = create_test_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Hops::new(&mut conn);

        let catalog = repo.create(&hop(official.id, "Magnum")).await.unwrap();
        let own = repo.create(&hop(user.id, "Homegrown")).await.unwrap();

        assert_eq!(repo.delete_for_user(catalog.id, user.id, official.id).await.unwrap(), DeleteOutcome::Official);
        assert_eq!(repo.delete_for_user(catalog.id, official.id, official.id).await.unwrap(), DeleteOutcome::Official);
        assert_eq!(repo.delete_for_user(own.id, official.id, official.id).await.unwrap(), DeleteOutcome::NotFound);
        assert_eq!(repo.delete_for_user(own.id, user.id, official.id).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(repo.delete_for_user(own.id, user.id, official.id).await.unwrap(), DeleteOutcome::NotFound);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_resolve_and_search(pool: PgPool) {
        let official = create_test_user(&pool).await;
        let user = create_test_user(&pool).await;
        let stranger = create_test_user(&pool).await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Hops::new(&mut conn);

        let catalog = repo.create(&hop(official.id, "Citra")).await.unwrap();
        let foreign = repo.create(&hop(stranger.id, "Citra 100%")).await.unwrap();
        repo.create(&hop(user.id, "Citra_clone")).await.unwrap();

        assert!(repo.resolve(catalog.id, user.id, official.id).await.unwrap().is_some());
        assert!(repo.resolve(foreign.id, user.id, official.id).await.unwrap().is_none());

        let filter = CatalogFilter::new(user.id, official.id, 12);
        let found = repo.list(&filter.clone().with_search("CITRA")).await.unwrap();
        assert_eq!(names(&found), vec!["Citra", "Citra_clone"]);
        let found = repo.list(&filter.clone().with_search("a_c")).await.unwrap();
        assert_eq!(names(&found), vec!["Citra_clone"]);
        let found = repo.list(&filter.with_search("%")).await.unwrap();
        assert!(found.is_empty());
    }
}
