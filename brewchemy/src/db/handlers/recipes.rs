//! Database repository for recipes.
//!
//! A recipe is stored as one parent row plus rows in five child tables. Writes to the aggregate run
//! in a transaction opened on the repository's connection (a savepoint if the caller is already
//! inside one).

use std::collections::{HashMap, HashSet};

use sqlx::{Connection, PgConnection, QueryBuilder};
use tracing::instrument;

use crate::db::{
    errors::{DbError, Result},
    handlers::{
        columns::{Assign, insert_into, update_set},
        repository::Repository,
    },
    models::recipes::{
        RecipeChild, RecipeCreateDBRequest, RecipeDBResponse, RecipeEquipmentRow, RecipeFermentableRow, RecipeHopRow,
        RecipeMiscRow, RecipeUpdateDBRequest, RecipeYeastRow,
    },
};
use crate::types::{RecipeId, UserId, escape_like};

/// Filter for listing recipes. Recipes are private, so a filter is always scoped to one owner.
#[derive(Debug, Clone)]
pub struct RecipeFilter {
    pub user_id: UserId,
    /// Case-insensitive substring match on `name`
    pub search: Option<String>,
}

impl RecipeFilter {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id, search: None }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub struct Recipes<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Recipes<'c> {
    type CreateRequest = RecipeCreateDBRequest;
    type UpdateRequest = RecipeUpdateDBRequest;
    type Response = RecipeDBResponse;
    type Id = RecipeId;
    type Filter = RecipeFilter;

    #[instrument(skip(self, request), fields(user_id = request.user_id, name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let mut tx = self.db.begin().await?;

        let mut recipe = sqlx::query_as::<_, RecipeDBResponse>(
            r#"
            INSERT INTO recipes (user_id, name, style, description, notes, author, type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(&request.name)
        .bind(&request.style)
        .bind(&request.description)
        .bind(&request.notes)
        .bind(&request.author)
        .bind(&request.r#type)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(equipment) = &request.equipment {
            recipe.equipment = Some(insert_child::<RecipeEquipmentRow>(&mut tx, recipe.id, recipe.user_id, equipment).await?);
        }
        for item in &request.fermentables {
            let row = insert_child::<RecipeFermentableRow>(&mut tx, recipe.id, recipe.user_id, item).await?;
            recipe.fermentables.push(row);
        }
        for item in &request.hops {
            let row = insert_child::<RecipeHopRow>(&mut tx, recipe.id, recipe.user_id, item).await?;
            recipe.hops.push(row);
        }
        for item in &request.misc {
            let row = insert_child::<RecipeMiscRow>(&mut tx, recipe.id, recipe.user_id, item).await?;
            recipe.misc.push(row);
        }
        for item in &request.yeasts {
            let row = insert_child::<RecipeYeastRow>(&mut tx, recipe.id, recipe.user_id, item).await?;
            recipe.yeasts.push(row);
        }

        tx.commit().await?;
        Ok(recipe)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let recipe = sqlx::query_as::<_, RecipeDBResponse>("SELECT * FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        match recipe {
            Some(recipe) => {
                let mut recipes = vec![recipe];
                self.load_children(&mut recipes).await?;
                Ok(recipes.pop())
            }
            None => Ok(None),
        }
    }

    /// The owner's recipes, newest first.
    #[instrument(skip(self, filter), fields(user_id = filter.user_id), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::new("SELECT * FROM recipes WHERE user_id = ");
        query.push_bind(filter.user_id);

        if let Some(term) = &filter.search {
            query.push(" AND name ILIKE ");
            query.push_bind(format!("%{}%", escape_like(term)));
            query.push(" ESCAPE '\\'");
        }

        query.push(" ORDER BY creation_date DESC, id DESC");

        let mut recipes = query.build_query_as::<RecipeDBResponse>().fetch_all(&mut *self.db).await?;
        self.load_children(&mut recipes).await?;

        Ok(recipes)
    }

    /// Children go with the parent through `ON DELETE CASCADE`.
    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1").bind(id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let mut tx = self.db.begin().await?;

        let columns = request.parent_columns();
        let recipe = if columns.is_empty() {
            sqlx::query_as::<_, RecipeDBResponse>("SELECT * FROM recipes WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        } else {
            let mut query = update_set("recipes", columns, Assign::Overwrite);
            query.push(" WHERE id = ");
            query.push_bind(id);
            query.push(" RETURNING *");
            query.build_query_as::<RecipeDBResponse>().fetch_optional(&mut *tx).await?
        };
        let recipe = recipe.ok_or(DbError::NotFound)?;

        if let Some(equipment) = &request.equipment {
            upsert_single_child::<RecipeEquipmentRow>(&mut tx, recipe.id, recipe.user_id, equipment).await?;
        }
        reconcile_children::<RecipeFermentableRow>(&mut tx, recipe.id, recipe.user_id, &request.fermentables).await?;
        reconcile_children::<RecipeHopRow>(&mut tx, recipe.id, recipe.user_id, &request.hops).await?;
        reconcile_children::<RecipeMiscRow>(&mut tx, recipe.id, recipe.user_id, &request.misc).await?;
        reconcile_children::<RecipeYeastRow>(&mut tx, recipe.id, recipe.user_id, &request.yeasts).await?;

        let mut recipes = vec![recipe];
        load_children_into(&mut tx, &mut recipes).await?;
        tx.commit().await?;

        recipes.pop().ok_or(DbError::NotFound)
    }
}

impl<'c> Recipes<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Duplicate a recipe and all of its children into `target_user_id`'s account.
    #[instrument(skip(self, name_suffix), err)]
    pub async fn copy(&mut self, id: RecipeId, target_user_id: UserId, name_suffix: &str) -> Result<RecipeDBResponse> {
        let mut tx = self.db.begin().await?;

        // name is VARCHAR(40); trim the original so the suffix always fits
        let copy = sqlx::query_as::<_, RecipeDBResponse>(
            r#"
            INSERT INTO recipes (user_id, name, style, description, notes, author, type)
            SELECT $2, LEFT(name, 40 - LENGTH($3)) || $3, style, description, notes, author, type
            FROM recipes WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(target_user_id)
        .bind(name_suffix)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

        copy_children::<RecipeEquipmentRow>(&mut tx, id, copy.id, target_user_id).await?;
        copy_children::<RecipeFermentableRow>(&mut tx, id, copy.id, target_user_id).await?;
        copy_children::<RecipeHopRow>(&mut tx, id, copy.id, target_user_id).await?;
        copy_children::<RecipeMiscRow>(&mut tx, id, copy.id, target_user_id).await?;
        copy_children::<RecipeYeastRow>(&mut tx, id, copy.id, target_user_id).await?;

        let mut recipes = vec![copy];
        load_children_into(&mut tx, &mut recipes).await?;
        tx.commit().await?;

        recipes.pop().ok_or(DbError::NotFound)
    }

    async fn load_children(&mut self, recipes: &mut [RecipeDBResponse]) -> Result<()> {
        load_children_into(&mut *self.db, recipes).await
    }
}

/// Fill in the child collections of `recipes`, one query per child table.
async fn load_children_into(conn: &mut PgConnection, recipes: &mut [RecipeDBResponse]) -> Result<()> {
    if recipes.is_empty() {
        return Ok(());
    }
    let ids: Vec<RecipeId> = recipes.iter().map(|r| r.id).collect();

    let mut equipment = group_by_recipe(load::<RecipeEquipmentRow>(conn, &ids).await?);
    let mut fermentables = group_by_recipe(load::<RecipeFermentableRow>(conn, &ids).await?);
    let mut hops = group_by_recipe(load::<RecipeHopRow>(conn, &ids).await?);
    let mut misc = group_by_recipe(load::<RecipeMiscRow>(conn, &ids).await?);
    let mut yeasts = group_by_recipe(load::<RecipeYeastRow>(conn, &ids).await?);

    for recipe in recipes.iter_mut() {
        recipe.equipment = equipment.remove(&recipe.id).and_then(|rows| rows.into_iter().next());
        recipe.fermentables = fermentables.remove(&recipe.id).unwrap_or_default();
        recipe.hops = hops.remove(&recipe.id).unwrap_or_default();
        recipe.misc = misc.remove(&recipe.id).unwrap_or_default();
        recipe.yeasts = yeasts.remove(&recipe.id).unwrap_or_default();
    }
    Ok(())
}

fn group_by_recipe<C: RecipeChild>(rows: Vec<C>) -> HashMap<RecipeId, Vec<C>> {
    let mut grouped: HashMap<RecipeId, Vec<C>> = HashMap::new();
    for row in rows {
        grouped.entry(row.recipe_id()).or_default().push(row);
    }
    grouped
}

async fn load<C: RecipeChild>(conn: &mut PgConnection, recipe_ids: &[RecipeId]) -> Result<Vec<C>> {
    let sql = format!("SELECT * FROM {} WHERE recipe_id = ANY($1) ORDER BY id", C::TABLE);
    let rows = sqlx::query_as::<_, C>(&sql).bind(recipe_ids).fetch_all(&mut *conn).await?;
    Ok(rows)
}

async fn insert_child<C: RecipeChild>(conn: &mut PgConnection, recipe_id: RecipeId, user_id: UserId, input: &C::Input) -> Result<C> {
    let mut columns = C::columns(input);
    columns = columns.set("recipe_id", recipe_id).set("user_id", user_id);
    let mut query = insert_into(C::TABLE, columns);
    let row = query.build_query_as::<C>().fetch_one(&mut *conn).await?;
    Ok(row)
}

/// Update a stored child. With [`Assign::KeepExisting`] every field the input leaves empty keeps its
/// stored value; with [`Assign::Overwrite`] it is cleared.
async fn write_child<C: RecipeChild>(conn: &mut PgConnection, recipe_id: RecipeId, id: i32, input: &C::Input, assign: Assign) -> Result<C> {
    let mut query = update_set(C::TABLE, C::columns(input), assign);
    query.push(" WHERE id = ");
    query.push_bind(id);
    query.push(" AND recipe_id = ");
    query.push_bind(recipe_id);
    query.push(" RETURNING *");
    let row = query.build_query_as::<C>().fetch_one(&mut *conn).await?;
    Ok(row)
}

/// Make a child collection match `incoming`.
///
/// Items whose id matches a stored row update that row, items without a known id are inserted,
/// and stored rows whose id does not appear in `incoming` are deleted. A stored id may appear only
/// once. Returns the collection in `incoming` order.
#[instrument(skip(conn, incoming), fields(table = C::TABLE, count = incoming.len()), err)]
pub(crate) async fn reconcile_children<C: RecipeChild>(
    conn: &mut PgConnection,
    recipe_id: RecipeId,
    user_id: UserId,
    incoming: &[C::Input],
) -> Result<Vec<C>> {
    let existing: HashSet<i32> = load::<C>(conn, &[recipe_id]).await?.iter().map(|row| row.id()).collect();

    let mut kept = HashSet::new();
    let mut rows = Vec::with_capacity(incoming.len());
    for input in incoming {
        let row = match C::input_id(input).filter(|id| existing.contains(id)) {
            Some(id) => {
                if !kept.insert(id) {
                    return Err(DbError::InvalidValue {
                        message: format!("{} row {id} appears more than once", C::TABLE),
                    });
                }
                write_child::<C>(conn, recipe_id, id, input, Assign::KeepExisting).await?
            }
            None => insert_child::<C>(conn, recipe_id, user_id, input).await?,
        };
        rows.push(row);
    }

    let stale: Vec<i32> = existing.difference(&kept).copied().collect();
    if !stale.is_empty() {
        let sql = format!("DELETE FROM {} WHERE recipe_id = $1 AND id = ANY($2)", C::TABLE);
        sqlx::query(&sql).bind(recipe_id).bind(stale.as_slice()).execute(&mut *conn).await?;
    }

    Ok(rows)
}

/// Overwrite every column of a recipe's single child row if it has one, otherwise insert it.
#[instrument(skip(conn, input), fields(table = C::TABLE), err)]
pub(crate) async fn upsert_single_child<C: RecipeChild>(
    conn: &mut PgConnection,
    recipe_id: RecipeId,
    user_id: UserId,
    input: &C::Input,
) -> Result<C> {
    match load::<C>(conn, &[recipe_id]).await?.first() {
        Some(existing) => write_child::<C>(conn, recipe_id, existing.id(), input, Assign::Overwrite).await,
        None => insert_child::<C>(conn, recipe_id, user_id, input).await,
    }
}

async fn copy_children<C: RecipeChild>(conn: &mut PgConnection, from: RecipeId, to: RecipeId, user_id: UserId) -> Result<()> {
    let columns = C::DATA_COLUMNS.join(", ");
    let sql = format!(
        "INSERT INTO {table} (recipe_id, user_id, {columns}) \
         SELECT $1, $2, {columns} FROM {table} WHERE recipe_id = $3 ORDER BY id",
        table = C::TABLE,
    );
    sqlx::query(&sql)
        .bind(to)
        .bind(user_id)
        .bind(from)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
