//! Data file (_data/*.yml) reading

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a data file
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Read and deserialize a YAML (or JSON) data file.
///
/// Returns `Ok(None)` when the file does not exist. An empty file
/// deserializes to `T::default()`.
pub fn read_data_file<T>(path: &Path) -> Result<Option<T>, DataError>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(Some(T::default()));
    }

    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|source| DataError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Like [`read_data_file`], but a missing or malformed file yields the
/// default value. Failures are logged, never returned.
pub fn load_data_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match read_data_file(path) {
        Ok(Some(value)) => {
            tracing::debug!("Loaded data file {:?}", path);
            value
        }
        Ok(None) => {
            tracing::debug!("Data file {:?} not found, using empty data", path);
            T::default()
        }
        Err(e) => {
            tracing::warn!("{}, using empty data", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result: Option<IndexMap<String, String>> =
            read_data_file(&dir.path().join("nope.yml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yml");
        fs::write(&path, "\n").unwrap();
        let result: Option<IndexMap<String, String>> = read_data_file(&path).unwrap();
        assert_eq!(result, Some(IndexMap::new()));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "a: [1, 2\n").unwrap();
        let result: Result<Option<IndexMap<String, Vec<u32>>>, _> = read_data_file(&path);
        assert!(matches!(result, Err(DataError::Parse { .. })));

        let fallback: IndexMap<String, Vec<u32>> = load_data_or_default(&path);
        assert!(fallback.is_empty());
    }

    #[test]
    fn test_json_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.json");
        fs::write(&path, r#"{"a": "Short A"}"#).unwrap();
        let result: IndexMap<String, String> = load_data_or_default(&path);
        assert_eq!(result.get("a").map(String::as_str), Some("Short A"));
    }
}
