//! Caller-supplied collaborators: where compiled SQL comes from and where derived
//! statements run.
//!
//! sqlbatch never discovers a connection on its own. The caller hands over an
//! [`ExecutionContext`] explicitly, usually the same session that compiled the
//! read query.
//!
//! # Example
//! ```ignore
//! let affected = sqlbatch::batch_update(
//!     &session,
//!     &compiled_query,
//!     &User { active: false, ..Default::default() },
//!     &["active"],
//! )
//! .await?;
//! ```

use crate::error::BatchResult;
use crate::model::BatchModel;
use crate::statement::BatchBuilder;
use tokio_postgres::types::ToSql;

/// A source of compiled SELECT text (typically a query builder or ORM query).
pub trait CompiledQuery {
    fn compiled_sql(&self) -> BatchResult<String>;
}

impl CompiledQuery for str {
    fn compiled_sql(&self) -> BatchResult<String> {
        Ok(self.to_string())
    }
}

impl CompiledQuery for String {
    fn compiled_sql(&self) -> BatchResult<String> {
        Ok(self.clone())
    }
}

impl<T: CompiledQuery + ?Sized> CompiledQuery for &T {
    fn compiled_sql(&self) -> BatchResult<String> {
        (**self).compiled_sql()
    }
}

/// A session able to run a derived statement.
pub trait ExecutionContext: Send + Sync {
    /// Execute `sql` with bound `params`, returning the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BatchResult<u64>> + Send;
}

impl<C: ExecutionContext + ?Sized> ExecutionContext for &C {
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = BatchResult<u64>> + Send {
        (**self).execute(sql, params)
    }
}

/// Derive a DELETE from `query` and run it on `ctx`.
pub async fn batch_delete<Q>(ctx: &impl ExecutionContext, query: &Q) -> BatchResult<u64>
where
    Q: CompiledQuery + ?Sized,
{
    let compiled = query.compiled_sql()?;
    let stmt = BatchBuilder::new().delete(&compiled)?;
    stmt.execute(ctx).await
}

/// Derive an UPDATE from `query` and run it on `ctx`.
pub async fn batch_update<Q, T>(
    ctx: &impl ExecutionContext,
    query: &Q,
    values: &T,
    overrides: &[&str],
) -> BatchResult<u64>
where
    Q: CompiledQuery + ?Sized,
    T: BatchModel,
{
    let compiled = query.compiled_sql()?;
    let stmt = BatchBuilder::new().update(&compiled, values, overrides)?;
    stmt.execute(ctx).await
}
