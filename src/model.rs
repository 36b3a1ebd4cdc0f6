// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the authorship and contributor types shared by history parsing, record building and the API
// role: model/types
// outputs: AuthorEntry/AuthorGroup (transient) and ContributorRecord (persisted JSON)
// invariants: ContributorRecord field names and order are stable; `username` is omitted when unknown
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

/// One (name, email, commits) tuple as parsed from history, before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorEntry {
  pub name: String,
  pub email: String,
  pub commits: u64,
}

impl AuthorEntry {
  pub fn new(name: impl Into<String>, email: impl Into<String>, commits: u64) -> Self {
    Self { name: name.into(), email: email.into(), commits }
  }
}

/// Entries merged under one case-insensitive, trimmed display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorGroup {
  /// First-seen casing of the name.
  pub name: String,
  /// Distinct emails in first-seen order.
  pub emails: Vec<String>,
  pub commits: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Maintainer,
  Contributor,
}

impl Role {
  /// `Maintainer` once `commits` reaches `threshold`.
  pub fn classify(commits: u64, threshold: u64) -> Self {
    if commits >= threshold {
      Role::Maintainer
    } else {
      Role::Contributor
    }
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContributorRecord {
  pub name: String,
  pub email: String,
  pub avatar: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  pub role: Role,
  pub commits: u64,
}
