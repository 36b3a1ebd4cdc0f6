// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Combine merged authorship groups with resolved identity and role into ContributorRecords
// role: records/builder
// inputs: Vec<AuthorGroup>, IdentityResolver, maintainer threshold
// outputs: Vec<ContributorRecord> in group order
// invariants:
// - Primary email is the first non-noreply email, else the first email seen, else ""
// - role depends only on commits and threshold; commits and identity fields never depend on threshold
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::identity::IdentityResolver;
use crate::model::{AuthorGroup, ContributorRecord, Role};

pub const DEFAULT_MAINTAINER_THRESHOLD: u64 = 5;

pub fn primary_email(emails: &[String], resolver: &IdentityResolver<'_>) -> String {
  emails
    .iter()
    .find(|e| !resolver.is_noreply(e))
    .or_else(|| emails.first())
    .cloned()
    .unwrap_or_default()
}

/// First handle any of the group's noreply addresses encodes.
pub fn known_handle(emails: &[String], resolver: &IdentityResolver<'_>) -> Option<String> {
  emails.iter().find_map(|e| resolver.username_from_noreply(e))
}

pub fn build_record(group: &AuthorGroup, resolver: &IdentityResolver<'_>, threshold: u64) -> ContributorRecord {
  let email = primary_email(&group.emails, resolver);
  let handle = known_handle(&group.emails, resolver);
  let identity = resolver.resolve(&email, handle.as_deref());

  ContributorRecord {
    name: group.name.clone(),
    email,
    avatar: identity.avatar,
    username: identity.username,
    role: Role::classify(group.commits, threshold),
    commits: group.commits,
  }
}

pub fn build_records(groups: &[AuthorGroup], resolver: &IdentityResolver<'_>, threshold: u64) -> Vec<ContributorRecord> {
  groups.iter().map(|g| build_record(g, resolver, threshold)).collect()
}
