use anyhow::Result;
use crate::util::{non_blank_lines, run_git};

/// Absolute path of the work tree containing `repo`.
pub fn show_toplevel(repo: &str) -> Result<String> {
    let out = run_git(repo, &["rev-parse".into(), "--show-toplevel".into()])?;
    let top = out.trim();
    if top.is_empty() { anyhow::bail!("git rev-parse --show-toplevel returned nothing for {}", repo) }
    Ok(top.to_string())
}

/// `git shortlog -sne HEAD`: one `<count>\t<name> <<email>>` line per author identity.
///
/// HEAD is passed explicitly; without a revision shortlog reads a log from stdin when it is not a tty.
pub fn shortlog_summary(repo: &str) -> Result<Vec<String>> {
    let args: Vec<String> = vec![
        "-c".into(), "log.showSignature=false".into(),
        "shortlog".into(), "-s".into(), "-n".into(), "-e".into(), "HEAD".into(),
    ];
    let out = run_git(repo, &args)?;
    Ok(non_blank_lines(&out))
}

/// One `Name <email>` line per commit reachable from HEAD.
pub fn log_author_lines(repo: &str) -> Result<Vec<String>> {
    let args: Vec<String> = vec![
        "-c".into(), "log.showSignature=false".into(),
        "log".into(), "--pretty=format:%an <%ae>".into(),
    ];
    let out = run_git(repo, &args)?;
    Ok(non_blank_lines(&out))
}
