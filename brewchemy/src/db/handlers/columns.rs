//! Column lists for statements whose shape depends on the request.
//!
//! The catalog and recipe repositories share a handful of tables that differ only in their data
//! columns. Each model describes its writable columns as a [`Columns`] list, and the builders here
//! turn that list into an `INSERT` or `UPDATE` with every value bound as a parameter.

use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};

/// A bindable column value. `None` binds SQL `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(Option<String>),
    Int(Option<i32>),
    Decimal(Option<Decimal>),
}

impl Value {
    fn push_bind(self, query: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Value::Text(v) => query.push_bind(v),
            Value::Int(v) => query.push_bind(v),
            Value::Decimal(v) => query.push_bind(v),
        };
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Some(v))
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        Value::Text(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(Some(v))
    }
}

impl From<Option<i32>> for Value {
    fn from(v: Option<i32>) -> Self {
        Value::Int(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(Some(v))
    }
}

impl From<Option<Decimal>> for Value {
    fn from(v: Option<Decimal>) -> Self {
        Value::Decimal(v)
    }
}

/// Ordered `(column, value)` pairs for one statement.
///
/// Column names are always `&'static str` taken from model definitions, never from request data.
#[derive(Debug, Clone, Default)]
pub struct Columns(Vec<(&'static str, Value)>);

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always include `column`.
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((column, value.into()));
        self
    }

    /// Include `column` only when a value was supplied.
    ///
    /// For nullable columns pass an `Option<Option<T>>`: `Some(None)` sets the column to `NULL`.
    pub fn set_if<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.iter().find(|(name, _)| *name == column).map(|(_, value)| value)
    }
}

/// How `UPDATE` assignments treat a `NULL` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assign {
    /// `column = $n`: a `NULL` clears the column.
    Overwrite,
    /// `column = COALESCE($n, column)`: a `NULL` keeps the stored value.
    KeepExisting,
}

/// `INSERT INTO table (...) VALUES (...) RETURNING *`
pub fn insert_into(table: &'static str, columns: Columns) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("INSERT INTO {table} ("));
    query.push(columns.names().collect::<Vec<_>>().join(", "));
    query.push(") VALUES (");
    for (i, (_, value)) in columns.0.into_iter().enumerate() {
        if i > 0 {
            query.push(", ");
        }
        value.push_bind(&mut query);
    }
    query.push(") RETURNING *");
    query
}

/// `UPDATE table SET ... ` with no `WHERE` clause; the caller appends one, followed by
/// `RETURNING *` if rows are wanted back.
///
/// `columns` must not be empty.
pub fn update_set(table: &'static str, columns: Columns, assign: Assign) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("UPDATE {table} SET "));
    for (i, (name, value)) in columns.0.into_iter().enumerate() {
        if i > 0 {
            query.push(", ");
        }
        match assign {
            Assign::Overwrite => {
                query.push(format!("{name} = "));
                value.push_bind(&mut query);
            }
            Assign::KeepExisting => {
                query.push(format!("{name} = COALESCE("));
                value.push_bind(&mut query);
                query.push(format!(", {name})"));
            }
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_if_skips_missing_values() {
        let columns = Columns::new()
            .set("name", "Pilsner".to_string())
            .set_if("ebc", None::<Decimal>)
            .set_if("description", Some(None::<String>));

        assert_eq!(columns.names().collect::<Vec<_>>(), vec!["name", "description"]);
        assert_eq!(columns.get("description"), Some(&Value::Text(None)));
        assert!(columns.get("ebc").is_none());
    }

    #[test]
    fn test_insert_into_binds_every_column() {
        let columns = Columns::new()
            .set("user_id", 7)
            .set("name", "Cascade".to_string())
            .set("alpha_acid_content", Decimal::new(55, 1));

        let query = insert_into("hops", columns);
        assert_eq!(
            query.sql(),
            "INSERT INTO hops (user_id, name, alpha_acid_content) VALUES ($1, $2, $3) RETURNING *"
        );
    }

    #[test]
    fn test_update_set_overwrite() {
        let columns = Columns::new().set("name", "Pale".to_string()).set("ebc", None::<Decimal>);
        let query = update_set("fermentables", columns, Assign::Overwrite);
        assert_eq!(query.sql(), "UPDATE fermentables SET name = $1, ebc = $2");
    }

    #[test]
    fn test_update_set_keep_existing() {
        let columns = Columns::new().set("quantity", None::<Decimal>);
        let query = update_set("recipe_hops", columns, Assign::KeepExisting);
        assert_eq!(query.sql(), "UPDATE recipe_hops SET quantity = COALESCE($1, quantity)");
    }
}
