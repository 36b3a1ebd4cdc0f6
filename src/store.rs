// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Persist contributor records (one collection file + one file per record) and read the collection back
// role: storage/json
// inputs: output directory, Vec<ContributorRecord>; raw collection bytes on read
// outputs: contributors.json and <sanitized name-email>.json files; Vec<serde_json::Value> on read
// side_effects: Creates the output directory; overwrites files. Per-record files from earlier runs are never removed
// invariants:
// - The collection file always holds a JSON array in record order
// - A missing collection file reads as an empty collection
// errors: Write failures propagate (fatal for the batch run); malformed collection JSON propagates on read
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::model::ContributorRecord;
use crate::util::{prepare_out_dir, sanitize_filename, write_json_pretty};

pub const COLLECTION_FILE: &str = "contributors.json";
pub const DEFAULT_DIR: &str = "contributors";

pub fn collection_path(dir: &Path) -> PathBuf {
  dir.join(COLLECTION_FILE)
}

/// `<sanitized name-email>`, or the sanitized email when the combination sanitizes to nothing.
pub fn record_file_stem(record: &ContributorRecord) -> String {
  let combined = sanitize_filename(&format!("{}-{}", record.name, record.email));
  if combined.is_empty() {
    sanitize_filename(&record.email)
  } else {
    combined
  }
}

/// Write the collection file and every per-record file; returns the collection path.
pub fn write_records(dir: &str, records: &[ContributorRecord]) -> Result<PathBuf> {
  let dir = PathBuf::from(prepare_out_dir(dir)?);

  let combined = collection_path(&dir);
  write_json_pretty(&combined, records)?;

  for record in records {
    let path = dir.join(format!("{}.json", record_file_stem(record)));
    write_json_pretty(&path, record)?;
  }

  Ok(combined)
}

/// Parse a persisted collection; any JSON value that is not an array counts as empty.
pub fn parse_collection(bytes: &[u8]) -> Result<Vec<Value>> {
  let value: Value = serde_json::from_slice(bytes).context("parsing contributors collection")?;

  Ok(match value {
    Value::Array(items) => items,
    _ => Vec::new(),
  })
}

/// Load the collection from `dir`; a missing file is an empty collection.
pub async fn load_collection(dir: &Path) -> Result<Vec<Value>> {
  let path = collection_path(dir);

  match tokio::fs::read(&path).await {
    Ok(bytes) => parse_collection(&bytes).with_context(|| format!("reading {}", path.display())),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
    Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
  }
}
