use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::NaiveDate;
use tracing::warn;

use super::json_file::read_json_file;
use crate::error::{Result, ViewerError};
use crate::models::{DateIndex, DateLocation};

/// Parse `date_index.json` into a [`DateIndex`].
///
/// Keys that are not `YYYY-MM-DD` are logged and skipped. If more than half of
/// the keys are unusable the file is treated as corrupted.
pub fn parse_date_index_file(path: &Path) -> Result<DateIndex> {
    let raw: HashMap<String, DateLocation> = read_json_file(path)?;
    let total = raw.len();
    let mut entries = BTreeMap::new();
    let mut skipped = 0usize;

    for (key, location) in raw {
        match NaiveDate::parse_from_str(&key, "%Y-%m-%d") {
            Ok(date) => {
                entries.insert(date, location);
            }
            Err(e) => {
                warn!(key = %key, error = %e, "skipping malformed date index key");
                skipped += 1;
            }
        }
    }

    if total > 0 && skipped * 2 > total {
        return Err(ViewerError::missing(
            path,
            format!("{} of {} date keys are malformed", skipped, total),
        ));
    }

    Ok(DateIndex::new(entries))
}
