//! Reports of proposed data changes.

use serde::{Deserialize, Serialize};

/// Overall outcome of a data transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResultKind {
    #[default]
    Undefined,
    Success,
    /// The change was refused; nothing was written.
    Failure,
    Error,
    Cancelled,
}

/// What a data change did: its outcome, plus the values that are now set,
/// the values they replaced or removed, and the values that were refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTransactionResult<V> {
    kind: ResultKind,
    success: Vec<V>,
    replaced: Vec<V>,
    rejected: Vec<V>,
}

impl<V> Default for DataTransactionResult<V> {
    fn default() -> Self {
        Self {
            kind: ResultKind::Undefined,
            success: Vec::new(),
            replaced: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<V> DataTransactionResult<V> {
    fn of_kind(kind: ResultKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Nothing changed because there was nothing to change.
    #[must_use]
    pub fn fail_no_data() -> Self {
        Self::of_kind(ResultKind::Failure)
    }

    /// `value` was set where nothing was before.
    #[must_use]
    pub fn success_result(value: V) -> Self {
        let mut result = Self::of_kind(ResultKind::Success);
        result.success.push(value);
        result
    }

    /// `value` replaced `replaced`.
    #[must_use]
    pub fn success_replace_result(value: V, replaced: V) -> Self {
        let mut result = Self::success_result(value);
        result.replaced.push(replaced);
        result
    }

    /// `removed` was taken off the container.
    #[must_use]
    pub fn success_remove(removed: V) -> Self {
        let mut result = Self::of_kind(ResultKind::Success);
        result.replaced.push(removed);
        result
    }

    /// `value` was refused.
    #[must_use]
    pub fn fail_result(value: V) -> Self {
        let mut result = Self::of_kind(ResultKind::Failure);
        result.rejected.push(value);
        result
    }

    /// Writing `value` hit an error.
    #[must_use]
    pub fn error_result(value: V) -> Self {
        let mut result = Self::of_kind(ResultKind::Error);
        result.rejected.push(value);
        result
    }

    #[must_use]
    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.kind == ResultKind::Success
    }

    /// True for a failure that carries no values at all.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        self.kind == ResultKind::Failure
            && self.success.is_empty()
            && self.replaced.is_empty()
            && self.rejected.is_empty()
    }

    #[must_use]
    pub fn success_data(&self) -> &[V] {
        &self.success
    }

    #[must_use]
    pub fn replaced_data(&self) -> &[V] {
        &self.replaced
    }

    #[must_use]
    pub fn rejected_data(&self) -> &[V] {
        &self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_no_data() {
        let result = DataTransactionResult::<i32>::fail_no_data();
        assert_eq!(result.kind(), ResultKind::Failure);
        assert!(result.is_no_data());
        assert!(!result.is_successful());
    }

    #[test]
    fn test_success_remove_lists_replaced() {
        let result = DataTransactionResult::success_remove(8);
        assert!(result.is_successful());
        assert_eq!(result.replaced_data(), &[8]);
        assert!(result.success_data().is_empty());
    }

    #[test]
    fn test_replace_and_reject() {
        let result = DataTransactionResult::success_replace_result(5, 8);
        assert_eq!(result.success_data(), &[5]);
        assert_eq!(result.replaced_data(), &[8]);

        let result = DataTransactionResult::fail_result(0);
        assert_eq!(result.kind(), ResultKind::Failure);
        assert_eq!(result.rejected_data(), &[0]);
        assert!(!result.is_no_data());

        let result = DataTransactionResult::error_result(3);
        assert_eq!(result.kind(), ResultKind::Error);
    }

    #[test]
    fn test_default_is_undefined() {
        let result = DataTransactionResult::<i32>::default();
        assert_eq!(result.kind(), ResultKind::Undefined);
    }
}
