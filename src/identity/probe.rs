// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Avatar existence probes behind a trait seam (HTTP, cached, static/offline, env fixtures)
// role: identity/probe
// inputs: Avatar URLs; env ICONTRIBUTE_TEST_AVATARS for fixture-backed runs
// outputs: bool "exists" per URL
// side_effects: HEAD requests to the hosting platform (HttpProbe only)
// invariants:
// - Never panic; any transport error, timeout or non-success status means "not found"
// - CachedProbe asks the inner probe at most once per URL
// errors: Swallowed; logged at debug
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::identity::profile_url;

/// Env var holding a JSON array of usernames whose profile image "exists".
pub const FIXTURE_AVATARS_ENV: &str = "ICONTRIBUTE_TEST_AVATARS";

// --- Trait seam for avatar probing ---
pub trait AvatarProbe {
  fn exists(&self, url: &str) -> bool;
}

pub struct HttpProbe {
  agent: ureq::Agent,
}

impl HttpProbe {
  pub fn new(timeout: Duration) -> Self {
    let agent: ureq::Agent = ureq::Agent::config_builder().timeout_global(Some(timeout)).build().into();
    Self { agent }
  }
}

impl AvatarProbe for HttpProbe {
  fn exists(&self, url: &str) -> bool {
    let resp = self.agent.head(url).header("User-Agent", "icontribute").call();

    match resp {
      Ok(r) => r.status().is_success(),
      Err(e) => {
        tracing::debug!(url, error = %e, "avatar probe failed");
        false
      }
    }
  }
}

/// Deterministic probe: only the listed URLs exist. Empty means offline.
#[derive(Debug, Default, Clone)]
pub struct StaticProbe {
  existing: HashSet<String>,
}

impl StaticProbe {
  pub fn offline() -> Self {
    Self::default()
  }

  pub fn with_users<S: AsRef<str>>(host: &str, usernames: &[S]) -> Self {
    let existing = usernames.iter().map(|u| profile_url(host, u.as_ref())).collect();
    Self { existing }
  }

  /// Build from `ICONTRIBUTE_TEST_AVATARS` when set; invalid JSON counts as an empty list.
  pub fn from_env(host: &str) -> Option<Self> {
    let raw = std::env::var(FIXTURE_AVATARS_ENV).ok()?;
    let users: Vec<String> = serde_json::from_str(&raw).unwrap_or_default();
    Some(Self::with_users(host, users.as_slice()))
  }
}

impl AvatarProbe for StaticProbe {
  fn exists(&self, url: &str) -> bool {
    self.existing.contains(url)
  }
}

// Memoizes answers per run; the same local-part is often probed for several authors.
pub struct CachedProbe {
  inner: Box<dyn AvatarProbe>,
  seen: RefCell<HashMap<String, bool>>,
}

impl CachedProbe {
  pub fn new(inner: Box<dyn AvatarProbe>) -> Self {
    Self { inner, seen: RefCell::new(HashMap::new()) }
  }
}

impl AvatarProbe for CachedProbe {
  fn exists(&self, url: &str) -> bool {
    if let Some(v) = self.seen.borrow().get(url).copied() {
      return v;
    }
    let v = self.inner.exists(url);
    self.seen.borrow_mut().insert(url.to_string(), v);

    v
  }
}

/// Pick the probe for a run: offline, env fixtures, or live HTTP; always cached.
pub fn build_probe(host: &str, offline: bool, timeout: Duration) -> Box<dyn AvatarProbe> {
  let inner: Box<dyn AvatarProbe> = if offline {
    Box::new(StaticProbe::offline())
  } else if let Some(fixture) = StaticProbe::from_env(host) {
    Box::new(fixture)
  } else {
    Box::new(HttpProbe::new(timeout))
  };

  Box::new(CachedProbe::new(inner))
}
