use serde::{Deserialize, Serialize};

use crate::error::{CompscopeError, Result};

/// Inclusive year window applied to each listing's effective date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct DateRange {
    start: i32,
    end: i32,
}

impl DateRange {
    /// Earliest year the generator produces
    pub const EARLIEST: i32 = 1965;
    /// Latest year the timeline offers
    pub const LATEST: i32 = 2024;

    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(CompscopeError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self { start: Self::EARLIEST, end: Self::LATEST }
    }
}

impl TryFrom<(i32, i32)> for DateRange {
    type Error = CompscopeError;

    fn try_from((start, end): (i32, i32)) -> Result<Self> {
        Self::new(start, end)
    }
}

impl From<DateRange> for (i32, i32) {
    fn from(range: DateRange) -> Self {
        (range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_range() {
        assert!(DateRange::new(2024, 2020).is_err());
        assert!(DateRange::new(2020, 2020).is_ok());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(2000, 2010).unwrap();
        assert!(range.contains(2000));
        assert!(range.contains(2010));
        assert!(!range.contains(1999));
        assert!(!range.contains(2011));
    }

    #[test]
    fn test_serializes_as_pair() {
        let range = DateRange::new(1965, 2024).unwrap();
        assert_eq!(serde_json::to_string(&range).unwrap(), "[1965,2024]");

        let parsed: DateRange = serde_json::from_str("[1990,2000]").unwrap();
        assert_eq!(parsed.start(), 1990);
        assert!(serde_json::from_str::<DateRange>("[2000,1990]").is_err());
    }
}
