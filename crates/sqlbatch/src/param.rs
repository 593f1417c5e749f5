//! Typed SET values carried alongside the execution form of a statement.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// One bound SET value.
///
/// Shared through an `Arc` so a [`BatchStatement`](crate::BatchStatement) can be
/// cloned without copying the values it binds.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// The value as a driver argument.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&self.0).finish()
    }
}

/// Bound values of one statement, in placeholder order.
///
/// The value at position `i` binds placeholder `i + 1` (`@p1`/`$1` first).
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `param` and return the placeholder index it binds.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Borrow every value for an
    /// [`ExecutionContext::execute`](crate::ExecutionContext::execute) call.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_placeholder_index() {
        let mut list = ParamList::new();
        assert!(list.is_empty());
        assert_eq!(list.push_param(Param::new("Bob".to_string())), 1);
        assert_eq!(list.push_param(Param::new(30_i32)), 2);
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_refs().len(), 2);
    }
}
