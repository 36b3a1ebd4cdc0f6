// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve an author's avatar URL and hosting-platform username from their email
// role: identity/resolver
// inputs: email, optional known handle, hosting host (e.g. github.com), an AvatarProbe
// outputs: Identity { avatar, username }
// side_effects: Whatever the injected probe does (network for HttpProbe)
// invariants:
// - avatar is never empty; the md5-keyed generated avatar is the final fallback
// - username is set only from a confirmed handle or back-derived from a platform avatar URL
// errors: None; probe failures mean "not found"
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod probe;

use regex::Regex;

use self::probe::AvatarProbe;

pub const DEFAULT_HOST: &str = "github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub avatar: String,
  pub username: Option<String>,
}

/// `https://<host>/<username>.png`
pub fn profile_url(host: &str, username: &str) -> String {
  format!("https://{}/{}.png", host, username)
}

/// Generated identicon keyed by the md5 of the trimmed, lower-cased email.
pub fn gravatar_url(email: &str) -> String {
  let digest = md5::compute(email.trim().to_lowercase().as_bytes());
  format!("https://www.gravatar.com/avatar/{:x}?s=200&d=identicon", digest)
}

pub struct IdentityResolver<'a> {
  host: String,
  probe: &'a dyn AvatarProbe,
  re_noreply: Regex,
  re_profile: Regex,
}

impl<'a> IdentityResolver<'a> {
  pub fn new(host: &str, probe: &'a dyn AvatarProbe) -> Self {
    let escaped = regex::escape(host);
    // both patterns are built from an escaped literal, so they always compile
    let re_noreply = Regex::new(&format!(r"(?i)^([^@]+)@users\.noreply\.{}$", escaped)).unwrap();
    let re_profile = Regex::new(&format!(r"^https://{}/([^/]+)\.png", escaped)).unwrap();

    Self { host: host.to_string(), probe, re_noreply, re_profile }
  }

  /// True for the platform's privacy-preserving `…@users.noreply.<host>` addresses.
  pub fn is_noreply(&self, email: &str) -> bool {
    self.re_noreply.is_match(email)
  }

  /// `id+handle@users.noreply.<host>` → handle; `handle@…` → handle; a bare numeric id → None.
  pub fn username_from_noreply(&self, email: &str) -> Option<String> {
    let local = self.re_noreply.captures(email)?.get(1)?.as_str();

    if let Some((_, handle)) = local.split_once('+') {
      return Some(handle.to_string());
    }
    if local.chars().all(|c| c.is_ascii_digit()) {
      return None;
    }

    Some(local.to_string())
  }

  pub fn username_from_profile_url(&self, url: &str) -> Option<String> {
    self.re_profile.captures(url).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
  }

  /// Resolve avatar and username for `email`, trying `known_handle` first when given.
  pub fn resolve(&self, email: &str, known_handle: Option<&str>) -> Identity {
    if let Some(handle) = known_handle {
      let url = profile_url(&self.host, handle);
      if self.probe.exists(&url) {
        return Identity { avatar: url, username: Some(handle.to_string()) };
      }
      tracing::debug!(handle, "no avatar for noreply handle; probing email local-part");
    }

    let avatar = self.detect_avatar(email);
    let username = self.username_from_profile_url(&avatar);

    Identity { avatar, username }
  }

  // local-part as-is, then with dots stripped, then the generated fallback
  fn detect_avatar(&self, email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    let stripped = local.replace('.', "");

    let mut candidates: Vec<&str> = Vec::with_capacity(2);
    for c in [local, stripped.as_str()] {
      if !c.is_empty() && !candidates.contains(&c) {
        candidates.push(c);
      }
    }

    for candidate in candidates {
      let url = profile_url(&self.host, candidate);
      if self.probe.exists(&url) {
        return url;
      }
    }

    gravatar_url(email)
  }
}
