/// Visible adapter positions reported by a list container
use serde::{Deserialize, Serialize};

/// Inclusive range of adapter positions currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    /// First visible position
    pub first: usize,
    /// Last visible position (inclusive)
    pub last: usize,
}

impl VisibleRange {
    /// Create a new range
    pub const fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Conservative outer bound of several ranges
    ///
    /// Grid-like containers report one range per span. The result runs from
    /// the smallest `first` to the largest `last`. Returns `None` when no
    /// range is given or the combined bound is inverted.
    pub fn union_of(ranges: &[VisibleRange]) -> Option<VisibleRange> {
        let first = ranges.iter().map(|r| r.first).min()?;
        let last = ranges.iter().map(|r| r.last).max()?;

        if first > last {
            return None;
        }
        Some(VisibleRange::new(first, last))
    }

    /// Iterate the positions in this range
    pub fn positions(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_spans_all_columns() {
        let columns = [
            VisibleRange::new(4, 9),
            VisibleRange::new(3, 8),
            VisibleRange::new(5, 10),
        ];
        assert_eq!(
            VisibleRange::union_of(&columns),
            Some(VisibleRange::new(3, 10))
        );
    }

    #[test]
    fn union_of_nothing_is_none() {
        assert_eq!(VisibleRange::union_of(&[]), None);
        assert_eq!(VisibleRange::union_of(&[VisibleRange::new(5, 2)]), None);
    }
}
