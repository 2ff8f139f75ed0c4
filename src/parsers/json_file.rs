use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, ViewerError};
use crate::utils::validate_file_size;

/// Read and deserialize one export JSON file.
///
/// Any failure (absent file, oversize file, malformed JSON, schema mismatch)
/// is reported as [`ViewerError::ResourceMissing`] for that path.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    // Open first, then check size on the handle to avoid a TOCTOU window
    let file = File::open(path).map_err(|e| ViewerError::missing(path, e))?;
    validate_file_size(&file, path).map_err(|e| ViewerError::missing(path, e))?;

    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader).map_err(|e| ViewerError::missing(path, e))?;
    debug!(path = %path.display(), "parsed export file");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::models::ExportMeta;

    #[test]
    fn test_read_valid_meta() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.json");
        fs::write(&path, r#"{"total_pages": 3, "total_messages": 250, "page_size": 100}"#).unwrap();

        let meta: ExportMeta = read_json_file(&path).unwrap();
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total_messages, Some(250));
    }

    #[test]
    fn test_missing_file_is_resource_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.json");

        let err = read_json_file::<ExportMeta>(&path).unwrap_err();
        assert!(matches!(err, ViewerError::ResourceMissing { .. }));
    }

    #[test]
    fn test_malformed_json_is_resource_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json_file::<ExportMeta>(&path).unwrap_err();
        assert!(matches!(err, ViewerError::ResourceMissing { .. }));
    }

    #[test]
    fn test_wrong_shape_is_resource_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.json");
        fs::write(&path, r#"{"pages": 3}"#).unwrap();

        let err = read_json_file::<ExportMeta>(&path).unwrap_err();
        assert!(err.to_string().contains("total_pages"));
    }
}
