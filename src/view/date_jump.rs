use chrono::NaiveDate;

use crate::error::{Result, ViewerError};
use crate::models::{DateIndex, DateLocation};

/// Parse user input in `YYYY-MM-DD` form
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ViewerError::InvalidDate(trimmed.to_string()))
}

/// Resolves a calendar day to the page and offset of its first message
#[derive(Debug, Clone, Default)]
pub struct DateJumpResolver {
    index: DateIndex,
}

impl DateJumpResolver {
    pub fn new(index: DateIndex) -> Self {
        Self { index }
    }

    pub fn resolve(&self, date: NaiveDate) -> Result<DateLocation> {
        self.index.get(&date).ok_or_else(|| ViewerError::DateNotFound(date.to_string()))
    }

    pub fn resolve_str(&self, input: &str) -> Result<DateLocation> {
        self.resolve(parse_date(input)?)
    }

    pub fn index(&self) -> &DateIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn resolver() -> DateJumpResolver {
        let mut entries = BTreeMap::new();
        entries.insert(
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            DateLocation { page: 0, offset: 0 },
        );
        entries.insert(
            NaiveDate::from_ymd_opt(2021, 3, 8).unwrap(),
            DateLocation { page: 2, offset: 41 },
        );
        DateJumpResolver::new(DateIndex::new(entries))
    }

    #[test]
    fn test_resolve_known_date() {
        assert_eq!(resolver().resolve_str("2021-03-08").unwrap(), DateLocation { page: 2, offset: 41 });
        assert_eq!(resolver().resolve_str(" 2021-01-01 ").unwrap(), DateLocation { page: 0, offset: 0 });
    }

    #[test]
    fn test_unknown_date_is_date_not_found() {
        let err = resolver().resolve_str("2030-01-01").unwrap_err();
        assert!(matches!(err, ViewerError::DateNotFound(ref d) if d == "2030-01-01"));
    }

    #[test]
    fn test_malformed_date_is_invalid() {
        for input in ["", "2021-13-01", "01.03.2021", "yesterday"] {
            let err = resolver().resolve_str(input).unwrap_err();
            assert!(matches!(err, ViewerError::InvalidDate(_)), "input {:?}", input);
        }
    }
}
