// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn Git history into per-author commit counts and merge them by case-insensitive name
// role: history/aggregation
// inputs: repo path; git shortlog and git log output
// outputs: Vec<AuthorEntry> (parsed) and Vec<AuthorGroup> (merged, first-seen order)
// side_effects: Spawns git subprocesses (read-only)
// invariants:
// - Sources are tried in order (summary, then log tally); a source with no output yields to the next
// - Unparseable lines are dropped silently
// - A group's commits equal the sum of every merged entry's commits
// errors: None propagated; git failures degrade to "no data" with a warning
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::gitio;
use crate::model::{AuthorEntry, AuthorGroup};

static RE_SUMMARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s+(.+)\s+<(.+)>$").unwrap());
static RE_NAME_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.+)\s+<(.+)>").unwrap());

pub type LineParser = fn(&str) -> Option<AuthorEntry>;

/// Strategies for one summary line, tried in order until one succeeds.
pub const SUMMARY_LINE_PARSERS: &[LineParser] = &[parse_summary_anchored, parse_summary_tab_split];

/// `<count> <name> <<email>>`, anchored on both ends.
pub fn parse_summary_anchored(line: &str) -> Option<AuthorEntry> {
  let c = RE_SUMMARY.captures(line)?;
  let commits = c.get(1)?.as_str().parse::<u64>().ok()?;
  let name = c.get(2)?.as_str().trim();
  let email = c.get(3)?.as_str().trim();

  Some(AuthorEntry::new(name, email, commits))
}

/// Split on tabs; the first field is the count (0 when not numeric), the second holds `Name <email>`.
pub fn parse_summary_tab_split(line: &str) -> Option<AuthorEntry> {
  let parts: Vec<&str> = line.split('\t').filter(|p| !p.is_empty()).collect();
  if parts.len() < 2 {
    return None;
  }

  let commits = parts[0].trim().parse::<u64>().unwrap_or(0);
  let (name, email) = parse_name_email(parts[1])?;

  Some(AuthorEntry::new(name, email, commits))
}

/// Loose `Name <email>` extraction; both sides trimmed.
pub fn parse_name_email(s: &str) -> Option<(String, String)> {
  let c = RE_NAME_EMAIL.captures(s)?;
  let name = c.get(1)?.as_str().trim().to_string();
  let email = c.get(2)?.as_str().trim().to_string();

  Some((name, email))
}

pub fn parse_summary_line(line: &str) -> Option<AuthorEntry> {
  let line = line.trim();
  SUMMARY_LINE_PARSERS.iter().find_map(|parse| parse(line))
}

pub fn parse_summary_lines(lines: &[String]) -> Vec<AuthorEntry> {
  lines.iter().filter_map(|l| parse_summary_line(l)).collect()
}

/// Count one commit per `Name <email>` log line, keyed by the exact pair, in first-seen order.
pub fn tally_log_lines(lines: &[String]) -> Vec<AuthorEntry> {
  let mut index: HashMap<String, usize> = HashMap::new();
  let mut out: Vec<AuthorEntry> = Vec::new();

  for line in lines {
    let Some((name, email)) = parse_name_email(line) else { continue };
    let key = format!("{} <{}>", name, email);

    match index.get(&key) {
      Some(&i) => out[i].commits += 1,
      None => {
        index.insert(key, out.len());
        out.push(AuthorEntry::new(name, email, 1));
      }
    }
  }

  out
}

/// Where authorship lines come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
  /// Condensed per-author summary (`git shortlog -sne`).
  Summary,
  /// Full log, one line per commit, tallied locally.
  LogTally,
}

impl HistorySource {
  pub const ORDER: [HistorySource; 2] = [HistorySource::Summary, HistorySource::LogTally];

  fn lines(self, repo: &str) -> anyhow::Result<Vec<String>> {
    match self {
      HistorySource::Summary => gitio::shortlog_summary(repo),
      HistorySource::LogTally => gitio::log_author_lines(repo),
    }
  }

  pub fn entries(self, lines: &[String]) -> Vec<AuthorEntry> {
    match self {
      HistorySource::Summary => parse_summary_lines(lines),
      HistorySource::LogTally => tally_log_lines(lines),
    }
  }
}

/// Resolve the work tree root; falls back to `repo` itself when git cannot tell.
pub fn resolve_root(repo: &str) -> String {
  match gitio::show_toplevel(repo) {
    Ok(top) => top,
    Err(e) => {
      tracing::warn!(repo, error = %e, "could not determine git root, using configured repository path");
      repo.to_string()
    }
  }
}

/// Read authorship entries from the first source that produces any output.
pub fn read_entries(root: &str) -> Vec<AuthorEntry> {
  read_entries_with(root, |source, root| source.lines(root))
}

/// Like [`read_entries`], with the raw lines of each source supplied by `read`.
pub fn read_entries_with<F>(root: &str, mut read: F) -> Vec<AuthorEntry>
where
  F: FnMut(HistorySource, &str) -> anyhow::Result<Vec<String>>,
{
  for source in HistorySource::ORDER {
    match read(source, root) {
      Ok(lines) if !lines.is_empty() => {
        let entries = source.entries(&lines);
        tracing::debug!(?source, lines = lines.len(), entries = entries.len(), "parsed history");
        return entries;
      }
      Ok(_) => tracing::warn!(?source, "history source produced no output; trying next"),
      Err(e) => tracing::warn!(?source, error = %e, "history source failed; trying next"),
    }
  }

  tracing::warn!(root, "no authorship data found");
  Vec::new()
}

/// Merge entries by trimmed, lower-cased name. Keeps the first-seen casing and email order.
pub fn merge_entries(entries: &[AuthorEntry]) -> Vec<AuthorGroup> {
  let mut index: HashMap<String, usize> = HashMap::new();
  let mut groups: Vec<AuthorGroup> = Vec::new();

  for entry in entries {
    let name = entry.name.trim();
    let key = name.to_lowercase();

    match index.get(&key) {
      Some(&i) => {
        let group = &mut groups[i];
        if !group.emails.contains(&entry.email) {
          group.emails.push(entry.email.clone());
        }
        group.commits += entry.commits;
      }
      None => {
        index.insert(key, groups.len());
        groups.push(AuthorGroup { name: name.to_string(), emails: vec![entry.email.clone()], commits: entry.commits });
      }
    }
  }

  groups
}

/// Resolve the root, read entries and merge them.
pub fn aggregate_groups(repo: &str) -> Vec<AuthorGroup> {
  let root = resolve_root(repo);
  merge_entries(&read_entries(&root))
}
