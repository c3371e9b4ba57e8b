//! Typed query construction
//!
//! [`ItemQuery`] is the provider-native equivalent of a selector/predicate
//! pair: a projection over item fields plus a [`Filter`] tree, rendered to
//! Cosmos SQL text. The SDK performs no expression translation of its own,
//! so queries are built here and handed to the container's query API as SQL.
//!
//! Field paths are restricted to dotted identifier segments and string
//! literals are single-quote escaped before rendering.

use crate::domain::{RepositoryError, Result};

/// A literal value a field is compared against
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// String literal
    String(String),
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Float(f64),
    /// Boolean literal
    Bool(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Integer(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl FilterValue {
    fn write_sql(&self, out: &mut String) -> Result<()> {
        match self {
            FilterValue::String(s) => {
                // Escape single quotes
                let escaped = s.replace('\'', "''");
                out.push('\'');
                out.push_str(&escaped);
                out.push('\'');
            }
            FilterValue::Integer(i) => {
                out.push_str(&i.to_string());
            }
            FilterValue::Float(f) => {
                if !f.is_finite() {
                    return Err(RepositoryError::InvalidQuery(format!(
                        "non-finite number {f} cannot be used in a query"
                    )));
                }
                out.push_str(&f.to_string());
            }
            FilterValue::Bool(b) => {
                out.push_str(&b.to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    fn operator(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
        }
    }
}

/// A predicate over item fields
///
/// Leaves compare a field path against a literal; nodes combine predicates
/// with `and`, `or` and `not`.
///
/// # Examples
///
/// ```
/// use cosmos_repository::handlers::Filter;
///
/// let filter = Filter::eq("pk", "o1").and(Filter::gt("total", 5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Filter(FilterKind);

#[derive(Debug, Clone, PartialEq)]
enum FilterKind {
    Compare {
        field: String,
        op: Comparison,
        value: FilterValue,
    },
    Contains { field: String, value: String },
    IsDefined { field: String },
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    fn compare(field: impl Into<String>, op: Comparison, value: impl Into<FilterValue>) -> Self {
        Filter(FilterKind::Compare {
            field: field.into(),
            op,
            value: value.into(),
        })
    }

    /// `field = value`
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Comparison::Eq, value)
    }

    /// `field != value`
    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Comparison::Ne, value)
    }

    /// `field > value`
    pub fn gt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Comparison::Gt, value)
    }

    /// `field >= value`
    pub fn gte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Comparison::Gte, value)
    }

    /// `field < value`
    pub fn lt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Comparison::Lt, value)
    }

    /// `field <= value`
    pub fn lte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, Comparison::Lte, value)
    }

    /// `CONTAINS(field, value)`
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter(FilterKind::Contains {
            field: field.into(),
            value: value.into(),
        })
    }

    /// `IS_DEFINED(field)`
    pub fn is_defined(field: impl Into<String>) -> Self {
        Filter(FilterKind::IsDefined {
            field: field.into(),
        })
    }

    /// Combines two predicates with `AND`
    pub fn and(self, other: Filter) -> Self {
        match self.0 {
            FilterKind::And(mut filters) => {
                filters.push(other);
                Filter(FilterKind::And(filters))
            }
            first => Filter(FilterKind::And(vec![Filter(first), other])),
        }
    }

    /// Combines two predicates with `OR`
    pub fn or(self, other: Filter) -> Self {
        match self.0 {
            FilterKind::Or(mut filters) => {
                filters.push(other);
                Filter(FilterKind::Or(filters))
            }
            first => Filter(FilterKind::Or(vec![Filter(first), other])),
        }
    }

    /// Negates this predicate
    pub fn not(self) -> Self {
        Filter(FilterKind::Not(Box::new(self)))
    }

    fn write_sql(&self, out: &mut String) -> Result<()> {
        match &self.0 {
            FilterKind::Compare { field, op, value } => {
                write_field_path(field, out)?;
                out.push(' ');
                out.push_str(op.operator());
                out.push(' ');
                value.write_sql(out)?;
            }
            FilterKind::Contains { field, value } => {
                out.push_str("CONTAINS(");
                write_field_path(field, out)?;
                out.push_str(", ");
                FilterValue::String(value.clone()).write_sql(out)?;
                out.push(')');
            }
            FilterKind::IsDefined { field } => {
                out.push_str("IS_DEFINED(");
                write_field_path(field, out)?;
                out.push(')');
            }
            FilterKind::And(filters) => write_joined(filters, " AND ", out)?,
            FilterKind::Or(filters) => write_joined(filters, " OR ", out)?,
            FilterKind::Not(inner) => {
                out.push_str("NOT (");
                inner.write_sql(out)?;
                out.push(')');
            }
        }
        Ok(())
    }
}

fn write_joined(filters: &[Filter], separator: &str, out: &mut String) -> Result<()> {
    if filters.is_empty() {
        return Err(RepositoryError::InvalidQuery(
            "a combined predicate requires at least one operand".to_string(),
        ));
    }

    out.push('(');
    for (index, filter) in filters.iter().enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        filter.write_sql(out)?;
    }
    out.push(')');
    Ok(())
}

/// Validates a dotted field path and renders it rooted at the item alias.
fn write_field_path(field: &str, out: &mut String) -> Result<()> {
    if field.is_empty() {
        return Err(RepositoryError::InvalidQuery(
            "field path cannot be empty".to_string(),
        ));
    }

    for segment in field.split('.') {
        let mut chars = segment.chars();
        let valid_start = chars
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false);
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid_start || !valid_rest {
            return Err(RepositoryError::InvalidQuery(format!(
                "invalid field path '{field}'"
            )));
        }
    }

    out.push_str("c.");
    out.push_str(field);
    Ok(())
}

/// A typed item query: projection, predicate, optional partition scope and
/// optional server-side offset/limit.
///
/// # Examples
///
/// ```
/// use cosmos_repository::handlers::{Filter, ItemQuery};
///
/// let query = ItemQuery::new()
///     .select(["id", "total"])
///     .filter(Filter::gt("total", 5));
///
/// assert_eq!(
///     query.to_sql().unwrap(),
///     "SELECT c.id, c.total FROM c WHERE c.total > 5"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    projection: Vec<String>,
    filter: Option<Filter>,
    partition_key_value: Option<String>,
    offset_limit: Option<(u64, u64)>,
}

impl ItemQuery {
    /// A query selecting every field of every item
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects the result down to the named field paths
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts results to items matching the predicate
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Scopes the query to a single partition
    pub fn in_partition(mut self, partition_key_value: impl Into<String>) -> Self {
        self.partition_key_value = Some(partition_key_value.into());
        self
    }

    /// Skips `offset` items and returns at most `limit`, server-side
    pub fn offset_limit(mut self, offset: u64, limit: u64) -> Self {
        self.offset_limit = Some((offset, limit));
        self
    }

    /// The partition-key value this query is scoped to, if any
    pub fn partition_key_value(&self) -> Option<&str> {
        self.partition_key_value.as_deref()
    }

    /// The predicate of this query, if any
    pub fn filter_ref(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Renders the query as Cosmos SQL
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidQuery`] for malformed field paths or
    /// non-finite numeric literals.
    pub fn to_sql(&self) -> Result<String> {
        let mut sql = String::from("SELECT ");

        if self.projection.is_empty() {
            sql.push('*');
        } else {
            for (index, field) in self.projection.iter().enumerate() {
                if index > 0 {
                    sql.push_str(", ");
                }
                write_field_path(field, &mut sql)?;
            }
        }

        sql.push_str(" FROM c");

        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.write_sql(&mut sql)?;
        }

        if let Some((offset, limit)) = self.offset_limit {
            sql.push_str(&format!(" OFFSET {offset} LIMIT {limit}"));
        }

        Ok(sql)
    }

    /// Renders a `SELECT VALUE COUNT(1)` query over the same predicate
    pub fn to_count_sql(&self) -> Result<String> {
        let mut sql = String::from("SELECT VALUE COUNT(1) FROM c");

        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.write_sql(&mut sql)?;
        }

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all() {
        let sql = ItemQuery::new().to_sql().unwrap();
        assert_eq!(sql, "SELECT * FROM c");
    }

    #[test]
    fn test_projection() {
        let sql = ItemQuery::new().select(["id", "pk", "total"]).to_sql().unwrap();
        assert_eq!(sql, "SELECT c.id, c.pk, c.total FROM c");
    }

    #[test]
    fn test_nested_field_projection() {
        let sql = ItemQuery::new().select(["address.city"]).to_sql().unwrap();
        assert_eq!(sql, "SELECT c.address.city FROM c");
    }

    #[test]
    fn test_comparison_filters() {
        let sql = ItemQuery::new()
            .filter(Filter::gt("total", 5))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM c WHERE c.total > 5");

        let sql = ItemQuery::new()
            .filter(Filter::eq("status", "open"))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM c WHERE c.status = 'open'");

        let sql = ItemQuery::new()
            .filter(Filter::lte("price", 9.5))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM c WHERE c.price <= 9.5");

        let sql = ItemQuery::new()
            .filter(Filter::ne("archived", true))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM c WHERE c.archived != true");
    }

    #[test]
    fn test_string_literal_escaping() {
        let sql = ItemQuery::new()
            .filter(Filter::eq("name", "o'brien"))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM c WHERE c.name = 'o''brien'");
    }

    #[test]
    fn test_combined_filters() {
        let sql = ItemQuery::new()
            .filter(Filter::eq("pk", "o1").and(Filter::gt("total", 5)))
            .to_sql()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM c WHERE (c.pk = 'o1' AND c.total > 5)");

        let sql = ItemQuery::new()
            .filter(
                Filter::eq("status", "open")
                    .or(Filter::eq("status", "pending"))
                    .and(Filter::is_defined("total")),
            )
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM c WHERE ((c.status = 'open' OR c.status = 'pending') AND IS_DEFINED(c.total))"
        );
    }

    #[test]
    fn test_and_flattens_chained_operands() {
        let sql = ItemQuery::new()
            .filter(
                Filter::gt("total", 1)
                    .and(Filter::lt("total", 10))
                    .and(Filter::ne("status", "void")),
            )
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM c WHERE (c.total > 1 AND c.total < 10 AND c.status != 'void')"
        );
    }

    #[test]
    fn test_not_filter() {
        let sql = ItemQuery::new()
            .filter(Filter::contains("name", "test").not())
            .to_sql()
            .unwrap();
        assert_eq!(sql, "SELECT * FROM c WHERE NOT (CONTAINS(c.name, 'test'))");
    }

    #[test]
    fn test_offset_limit() {
        let sql = ItemQuery::new()
            .filter(Filter::gt("total", 5))
            .offset_limit(20, 10)
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM c WHERE c.total > 5 OFFSET 20 LIMIT 10"
        );
    }

    #[test]
    fn test_count_sql() {
        let sql = ItemQuery::new()
            .filter(Filter::gt("total", 5))
            .to_count_sql()
            .unwrap();
        assert_eq!(sql, "SELECT VALUE COUNT(1) FROM c WHERE c.total > 5");

        let sql = ItemQuery::new().to_count_sql().unwrap();
        assert_eq!(sql, "SELECT VALUE COUNT(1) FROM c");
    }

    #[test]
    fn test_invalid_field_paths_rejected() {
        for field in ["", "1total", "total; DROP", "a.b-c", "a..b", "c['x']"] {
            let result = ItemQuery::new().filter(Filter::eq(field, 1)).to_sql();
            assert!(
                matches!(result, Err(RepositoryError::InvalidQuery(_))),
                "field path '{field}' should be rejected"
            );
        }
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let result = ItemQuery::new()
            .filter(Filter::gt("total", f64::NAN))
            .to_sql();
        assert!(matches!(result, Err(RepositoryError::InvalidQuery(_))));
    }

    #[test]
    fn test_partition_scope_is_carried() {
        let query = ItemQuery::new().in_partition("o1");
        assert_eq!(query.partition_key_value(), Some("o1"));
    }
}
