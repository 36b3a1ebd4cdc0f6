//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```rust,no_run
//! use test_support::{init_tracing, repo_with_commits};
//!
//! init_tracing();
//! let repo = repo_with_commits(&[("Alice", "alice@x.com")]);
//! assert!(repo.path().join(".git").exists());
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::Path;
use std::process::Command;

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// Run git in `repo`, asserting success.
pub fn run(repo: &Path, args: &[&str]) {
    let status = Command::new("git").args(args).current_dir(repo).status().unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

/// Fresh repository on `main` with no commits.
pub fn init_repo() -> tempfile::TempDir {
    let dir = tempdir();
    run(dir.path(), &["init", "-q", "-b", "main"]);
    run(dir.path(), &["config", "commit.gpgsign", "false"]);
    dir
}

/// Record an empty commit authored (and committed) by `name <email>`.
pub fn commit_as(repo: &Path, name: &str, email: &str) {
    let status = Command::new("git")
        .args(["commit", "-q", "--allow-empty", "-m", "change"])
        .env("GIT_AUTHOR_NAME", name)
        .env("GIT_AUTHOR_EMAIL", email)
        .env("GIT_COMMITTER_NAME", name)
        .env("GIT_COMMITTER_EMAIL", email)
        .env("GIT_AUTHOR_DATE", "2025-08-12T14:03:00")
        .env("GIT_COMMITTER_DATE", "2025-08-12T14:03:00")
        .current_dir(repo)
        .status()
        .unwrap();
    assert!(status.success());
}

/// Repository with one commit per `(name, email)` pair, in order.
pub fn repo_with_commits(authors: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = init_repo();
    for (name, email) in authors {
        commit_as(dir.path(), name, email);
    }
    dir
}
