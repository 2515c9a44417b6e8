//! Matrix policies and algorithm selection

/// How column indices are checked on insertion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Accept any column index, including ones past the declared column count
    #[default]
    Permissive,
    /// Reject insertions holding a column index `>= ncols`
    Strict,
}

/// Per-row grouping used by `compress`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupStrategy {
    /// Accumulate into an ordered map keyed by column
    #[default]
    OrderedMap,
    /// Stable sort by column, then merge runs of equal columns
    SortMerge,
}

/// How scaled addition combines operand rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddStrategy {
    /// Concatenate both scaled rows and let compression merge columns
    #[default]
    ConcatCompress,
    /// Merge canonicalized operand rows by column before insertion
    SortedMerge,
}

/// Configuration carried by every [`CrsMatrix`](crate::CrsMatrix)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CrsConfig {
    /// Column index checking on insertion
    pub columns: ColumnPolicy,
    /// Grouping algorithm for compression
    pub dedup: DedupStrategy,
    /// Row combination algorithm for addition
    pub add: AddStrategy,
}

impl CrsConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column policy
    pub fn with_columns(mut self, policy: ColumnPolicy) -> Self {
        self.columns = policy;
        self
    }

    /// Set the compression grouping strategy
    pub fn with_dedup(mut self, strategy: DedupStrategy) -> Self {
        self.dedup = strategy;
        self
    }

    /// Set the addition strategy
    pub fn with_add(mut self, strategy: AddStrategy) -> Self {
        self.add = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrsConfig::new();
        assert_eq!(config.columns, ColumnPolicy::Permissive);
        assert_eq!(config.dedup, DedupStrategy::OrderedMap);
        assert_eq!(config.add, AddStrategy::ConcatCompress);
    }

    #[test]
    fn test_builder() {
        let config = CrsConfig::new()
            .with_columns(ColumnPolicy::Strict)
            .with_dedup(DedupStrategy::SortMerge)
            .with_add(AddStrategy::SortedMerge);
        assert_eq!(config.columns, ColumnPolicy::Strict);
        assert_eq!(config.dedup, DedupStrategy::SortMerge);
        assert_eq!(config.add, AddStrategy::SortedMerge);
    }
}
