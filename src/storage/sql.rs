//! SQL generation for the Postgres source
//!
//! Pure: turns a `QueryPlan` into parameterized statements without touching
//! a database. Every user-supplied value is bound; only catalog column names
//! and the configured table name are spliced into the text.

use sqlx::{Postgres, QueryBuilder};

use crate::executor::PageInfo;
use crate::model::{FieldKind, SalesField};
use crate::planner::{SalesFilter, SortDirection, SortSpec};

/// Table used when none is configured
pub const DEFAULT_TABLE: &str = "sales_transactions";

/// Builds statements against one table
#[derive(Debug, Clone)]
pub struct SalesSqlBuilder {
    table: String,
}

impl SalesSqlBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// `name` or `schema.name`, each part `[A-Za-z_][A-Za-z0-9_]*`
    pub fn is_valid_table_name(name: &str) -> bool {
        let parts: Vec<&str> = name.split('.').collect();
        parts.len() <= 2
            && parts.iter().all(|part| {
                let mut chars = part.chars();
                matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            })
    }

    /// Row count and stats over the filtered set, in one statement
    pub fn stats_query(&self, filter: &SalesFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(
            "SELECT COUNT(*)::BIGINT AS total, \
             COALESCE(SUM(quantity), 0)::BIGINT AS total_units, \
             COALESCE(SUM(final_amount), 0)::NUMERIC AS total_amount, \
             COALESCE(SUM(COALESCE(total_amount, 0) - COALESCE(final_amount, 0)), 0)::NUMERIC \
             AS total_discount FROM ",
        );
        qb.push(&self.table);
        push_where(&mut qb, filter);
        qb
    }

    /// One sorted page of the filtered set
    pub fn page_query(
        &self,
        filter: &SalesFilter,
        sort: &SortSpec,
        page: &PageInfo,
    ) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        for (i, field) in SalesField::ALL.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(select_expr(*field));
        }
        qb.push(" FROM ");
        qb.push(&self.table);
        push_where(&mut qb, filter);

        qb.push(" ORDER BY ");
        qb.push(sort_expr(sort.field));
        qb.push(match sort.direction {
            SortDirection::Asc => " ASC NULLS LAST",
            SortDirection::Desc => " DESC NULLS LAST",
        });
        if sort.field != SalesField::TransactionId {
            qb.push(", transaction_id ASC");
        }

        qb.push(" LIMIT ");
        qb.push_bind(page.limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset as i64);
        qb
    }

    /// Distinct trimmed tags across the whole table
    pub fn tags_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT DISTINCT TRIM(t.tag) AS tag FROM ");
        qb.push(&self.table);
        qb.push(
            " CROSS JOIN LATERAL unnest(string_to_array(tags, ',')) AS t(tag) \
             WHERE TRIM(t.tag) <> ''",
        );
        qb
    }

    /// Unfiltered row count
    pub fn count_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*)::BIGINT AS total FROM ");
        qb.push(&self.table);
        qb
    }
}

fn push_where(qb: &mut QueryBuilder<'static, Postgres>, filter: &SalesFilter) {
    let mut first = true;
    let mut clause = |qb: &mut QueryBuilder<'static, Postgres>| {
        qb.push(if first { " WHERE " } else { " AND " });
        first = false;
    };

    for term in &filter.search_terms {
        clause(qb);
        let pattern = format!("%{}%", escape_like(term));
        qb.push("(");
        for (i, field) in SalesFilter::SEARCH_FIELDS.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(format!("LOWER({}) LIKE ", field.column()));
            qb.push_bind(pattern.clone());
        }
        qb.push(")");
    }

    for set in &filter.sets {
        clause(qb);
        qb.push(format!("{} = ANY(", set.field.column()));
        qb.push_bind(set.values.clone());
        qb.push(")");
    }

    if !filter.tags.is_empty() {
        clause(qb);
        qb.push(
            "EXISTS (SELECT 1 FROM unnest(string_to_array(tags, ',')) AS t(tag) \
             WHERE LOWER(TRIM(t.tag)) = ANY(",
        );
        qb.push_bind(filter.tags.clone());
        qb.push("))");
    }

    if let Some(min) = filter.min_age {
        clause(qb);
        qb.push("age >= ");
        qb.push_bind(min);
    }
    if let Some(max) = filter.max_age {
        clause(qb);
        qb.push("age <= ");
        qb.push_bind(max);
    }
    if let Some(start) = filter.start_date {
        clause(qb);
        qb.push("date >= ");
        qb.push_bind(start);
    }
    if let Some(end) = filter.end_date {
        clause(qb);
        qb.push("date <= ");
        qb.push_bind(end);
    }
}

/// Column projection with the types the row decoder expects
fn select_expr(field: SalesField) -> String {
    let column = field.column();
    match field.kind() {
        FieldKind::Text => format!("COALESCE({c}::TEXT, '') AS {c}", c = column),
        FieldKind::Integer => format!("COALESCE({c}, 0)::INTEGER AS {c}", c = column),
        FieldKind::Decimal => format!("COALESCE({c}, 0)::NUMERIC AS {c}", c = column),
        FieldKind::Date => format!("{c}::DATE AS {c}", c = column),
    }
}

fn sort_expr(field: SalesField) -> String {
    let column = field.column();
    match field.kind() {
        FieldKind::Text => format!("LOWER({})", column),
        FieldKind::Integer | FieldKind::Decimal => format!("COALESCE({}, 0)", column),
        FieldKind::Date => column.to_string(),
    }
}

/// Escapes LIKE metacharacters; backslash is Postgres' default escape
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
