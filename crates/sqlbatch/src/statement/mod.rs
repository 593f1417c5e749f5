//! DELETE and UPDATE statements derived from compiled SELECT text.
//!
//! ```text
//! SELECT [b].[Id], [b].[Name] FROM [Users] AS [b] WHERE [b].[Age] > 30
//! --
//! DELETE FROM [Users] WHERE [Age] > 30
//! UPDATE [Users] SET [Name] = 'Bob' WHERE [Age] > 30
//! ```
//!
//! Every statement keeps two forms: [`BatchStatement::sql`] with SET values
//! rendered as quoted literals, and [`BatchStatement::exec_sql`] where those values
//! are placeholders bound to [`BatchStatement::params`]. Execution always uses the
//! bound form.

use crate::alias::AliasNormalizer;
use crate::config::BatchConfig;
use crate::diff::{ColumnAssignment, build_assignments, render_set_clause};
use crate::error::{BatchError, BatchResult};
use crate::exec::ExecutionContext;
use crate::model::BatchModel;
use crate::param::ParamList;
use crate::quoted::scan_quoted_spans;
use crate::text::{Segmented, find_keyword};
use tokio_postgres::types::ToSql;

const FROM: &str = "FROM";

/// The kind of derived statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Delete,
    Update,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Update => "UPDATE",
        }
    }
}

/// A derived bulk statement.
#[derive(Debug, Clone)]
pub struct BatchStatement {
    kind: StatementKind,
    sql: String,
    exec_sql: String,
    params: ParamList,
    assignments: Vec<ColumnAssignment>,
}

impl BatchStatement {
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Statement text with SET values rendered as `'literal'`.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Statement text with SET values as placeholders.
    pub fn exec_sql(&self) -> &str {
        &self.exec_sql
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Parameters as references compatible with [`ExecutionContext::execute`].
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }

    /// SET assignments (empty for DELETE).
    pub fn assignments(&self) -> &[ColumnAssignment] {
        &self.assignments
    }

    /// Execute the bound form, returning the number of affected rows.
    pub async fn execute(&self, ctx: &impl ExecutionContext) -> BatchResult<u64> {
        let params = self.params_ref();
        ctx.execute(&self.exec_sql, &params).await
    }
}

impl std::fmt::Display for BatchStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Derives DELETE/UPDATE statements with a fixed configuration.
///
/// # Example
/// ```ignore
/// use sqlbatch::{BatchBuilder, BatchConfig, PlaceholderStyle};
///
/// let builder = BatchBuilder::with_config(
///     BatchConfig::new().with_placeholder(PlaceholderStyle::Dollar),
/// )?;
/// let stmt = builder.delete("SELECT [b].[Id] FROM [T] AS [b] WHERE [b].[Id] = 5")?;
/// assert_eq!(stmt.sql(), "DELETE FROM [T] WHERE [Id] = 5");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchBuilder {
    config: BatchConfig,
    normalizer: AliasNormalizer,
}

impl BatchBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from `config`, validating its canonical alias.
    pub fn with_config(config: BatchConfig) -> BatchResult<Self> {
        let normalizer = AliasNormalizer::new(config.canonical_alias.clone())?;
        Ok(Self { config, normalizer })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Derive `DELETE FROM <table> WHERE <cond>` from compiled SELECT text.
    pub fn delete(&self, compiled_sql: &str) -> BatchResult<BatchStatement> {
        let from = locate_from(compiled_sql)?;
        let (mut tail, alias) = self.normalized_tail(&compiled_sql[from..])?;

        tail.replace_first(&self.normalizer.introducer(), "");
        tail.replace_all(&self.normalizer.qualifier(), "");

        let sql = format!("{} {}", StatementKind::Delete.as_str(), tail.join());
        let stmt = BatchStatement {
            kind: StatementKind::Delete,
            exec_sql: sql.clone(),
            sql,
            params: ParamList::new(),
            assignments: Vec::new(),
        };
        self.log(&stmt, alias.as_deref());
        Ok(stmt)
    }

    /// Derive `UPDATE <table> SET ... WHERE <cond>` from compiled SELECT text.
    ///
    /// The SET clause holds every field of `values` that differs from
    /// `T::default()`, plus the fields named in `overrides`.
    pub fn update<T: BatchModel>(
        &self,
        compiled_sql: &str,
        values: &T,
        overrides: &[&str],
    ) -> BatchResult<BatchStatement> {
        let from = locate_from(compiled_sql)?;
        let after = skip_separator(compiled_sql, from + FROM.len());
        let (tail, alias) = self.normalized_tail(&compiled_sql[after..])?;

        let assignments = build_assignments(values, overrides)?;
        let mut params = ParamList::new();
        let bound: Vec<String> = assignments
            .iter()
            .map(|a| {
                let idx = params.push_param(a.param.clone());
                a.render_bound(&self.config.placeholder.render(idx))
            })
            .collect();

        let sql = self.splice_set_clause(tail.clone(), &render_set_clause(&assignments))?;
        let exec_sql = self.splice_set_clause(tail, &format!("SET {}", bound.join(", ")))?;

        let stmt = BatchStatement {
            kind: StatementKind::Update,
            sql,
            exec_sql,
            params,
            assignments,
        };
        self.log(&stmt, alias.as_deref());
        Ok(stmt)
    }

    /// Split the text after `FROM` around its literals and normalize its alias.
    fn normalized_tail(&self, tail: &str) -> BatchResult<(Segmented, Option<String>)> {
        let spans = scan_quoted_spans(tail)?;
        let mut segs = Segmented::split(tail, &spans);
        let alias = self.normalizer.normalize_segments(&mut segs);
        Ok((segs, alias))
    }

    /// Strip qualifiers, then put the SET clause where the alias introducer was.
    ///
    /// Qualifiers go first so values inside the SET clause are never rewritten.
    fn splice_set_clause(&self, mut tail: Segmented, set_clause: &str) -> BatchResult<String> {
        let introducer = self.normalizer.introducer();
        if !tail.contains(&introducer) {
            return Err(BatchError::format(
                "compiled query has no table alias (` AS [alias]`) to attach the SET clause to",
            ));
        }
        tail.replace_all(&self.normalizer.qualifier(), "");
        tail.replace_first(&introducer, &format!(" {set_clause}"));
        Ok(format!("{} {}", StatementKind::Update.as_str(), tail.join()))
    }

    #[cfg(feature = "tracing")]
    fn log(&self, stmt: &BatchStatement, source_alias: Option<&str>) {
        use crate::text::truncate_sql_bytes;
        use tracing::Level;

        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = match self.config.max_sql_length {
            Some(max) if stmt.sql.len() > max => {
                format!("{}...", truncate_sql_bytes(&stmt.sql, max))
            }
            _ => stmt.sql.clone(),
        };
        emit_at_level!(
            self.config.log_level,
            target: "sqlbatch.sql",
            kind = stmt.kind.as_str(),
            source_alias = ?source_alias,
            assignments = stmt.assignments.len(),
            param_count = stmt.params.len(),
            sql = %sql,
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn log(&self, _stmt: &BatchStatement, _source_alias: Option<&str>) {}
}

/// Derive a DELETE statement with the default configuration.
pub fn delete_statement(compiled_sql: &str) -> BatchResult<BatchStatement> {
    BatchBuilder::new().delete(compiled_sql)
}

/// Derive an UPDATE statement with the default configuration.
pub fn update_statement<T: BatchModel>(
    compiled_sql: &str,
    values: &T,
    overrides: &[&str],
) -> BatchResult<BatchStatement> {
    BatchBuilder::new().update(compiled_sql, values, overrides)
}

fn locate_from(sql: &str) -> BatchResult<usize> {
    let spans = scan_quoted_spans(sql)?;
    find_keyword(sql, &spans, FROM)
        .ok_or_else(|| BatchError::format("compiled query has no FROM keyword"))
}

/// Skip the single separator character after a keyword, if present.
fn skip_separator(sql: &str, pos: usize) -> usize {
    match sql[pos..].chars().next() {
        Some(c) if c.is_whitespace() => pos + c.len_utf8(),
        _ => pos,
    }
}
