//! Verbatim persistence of top-level listing responses.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;

use crate::error::MigrateError;

/// Writes `response` as pretty JSON to `<dir>/<kind>_response_<YYYYMMDD_HHMMSS>.json`,
/// creating `dir` if needed.
pub fn dump_response(dir: &Path, kind: &str, response: &Value) -> Result<PathBuf, MigrateError> {
    fs::create_dir_all(dir)?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_response_{}.json", kind, stamp));
    let body = serde_json::to_string_pretty(response)?;
    fs::write(&path, body)?;
    tracing::info!("Saved {} response to {}", kind, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dump_writes_pretty_json_under_kind_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("json_dump");
        let body = json!({"data": [{"id": "1"}]});

        let path = dump_response(&nested, "groups", &body).unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("groups_response_"));
        assert!(file_name.ends_with(".json"));
        // groups_response_ + YYYYMMDD_HHMMSS + .json
        assert_eq!(file_name.len(), "groups_response_".len() + 15 + ".json".len());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains('\n'));
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, body);
    }
}
