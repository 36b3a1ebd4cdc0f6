// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, git subprocesses, filesystem-safe names, JSON files and man page rendering
// role: utilities/helpers
// inputs: Various primitives; paths; clap CommandFactory
// outputs: Canonicalized paths, git stdout, sanitized file stems, directories ensured, man page text
// side_effects: prepare_out_dir creates directories; write_json_pretty replaces files via temp file + rename; run_git invokes subprocesses
// invariants:
// - prepare_out_dir returns an existing directory
// - sanitize_filename only emits [A-Za-z0-9._-] and never starts or ends with '_'
// errors: run_git surfaces command + stderr; IO errors bubble with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::CommandFactory;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

pub fn run_git(repo: &str, args: &[String]) -> Result<String> {
  let out = Command::new("git")
    .args(args)
    .current_dir(repo)
    .output()
    .with_context(|| format!("spawning git {:?}", args))?;

  if out.status.success() {
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
  } else {
    let stderr = String::from_utf8_lossy(&out.stderr);
    anyhow::bail!("git {:?} failed: {}", args, stderr)
  }
}

/// Non-blank, trimmed lines of a command's output.
pub fn non_blank_lines(text: &str) -> Vec<String> {
  text.lines().map(|l| l.trim()).filter(|s| !s.is_empty()).map(|s| s.to_string()).collect()
}

/// Replace every run of characters outside `[A-Za-z0-9.-]` with `_`, then trim `_` from both ends.
pub fn sanitize_filename(s: &str) -> String {
  static RE_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9.-]+").unwrap());
  RE_UNSAFE.replace_all(s, "_").trim_matches('_').to_string()
}

/// Ensure `dir` exists (creating parents as needed) and return it.
pub fn prepare_out_dir(dir: &str) -> Result<String> {
  std::fs::create_dir_all(dir).with_context(|| format!("creating output directory {}", dir))?;

  Ok(dir.to_string())
}

/// Serialize `value` as 2-space indented JSON, replacing any existing file.
/// Writes a sibling `.<name>.tmp` and renames it over `path`, so readers never see a partial file.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
  let body = serde_json::to_string_pretty(value).context("serializing JSON")?;

  let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
  let tmp = path.with_file_name(format!(".{}.tmp", name));
  std::fs::write(&tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
  std::fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
