use predicates::prelude::*;
use serde_json::Value;
use test_support::{cmd_bin, repo_with_commits, tempdir};

fn read_json(path: &std::path::Path) -> Value {
  let data = std::fs::read(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
  serde_json::from_slice(&data).expect("valid JSON")
}

#[test]
fn collect_merges_case_differing_names() {
  let repo = repo_with_commits(&[
    ("Alice", "alice@x.com"),
    ("Alice", "alice@x.com"),
    ("alice", "alice@x.com"),
    ("Bob", "bob@x.com"),
  ]);
  let out = tempdir();

  cmd_bin("icontribute")
    .args(["collect", "--offline", "--repo"])
    .arg(repo.path())
    .arg("--out")
    .arg(out.path())
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let v = read_json(&out.path().join("contributors.json"));
  let list = v.as_array().unwrap();
  assert_eq!(list.len(), 2);
  assert_eq!(list[0]["name"], "Alice");
  assert_eq!(list[0]["commits"], 3);
  assert_eq!(list[0]["role"], "Contributor");
  assert!(list[0].get("username").is_none());
  assert!(list[0]["avatar"].as_str().unwrap().starts_with("https://www.gravatar.com/avatar/"));

  assert!(out.path().join("Alice-alice_x.com.json").exists());
  assert!(out.path().join("Bob-bob_x.com.json").exists());
}

#[test]
fn threshold_flag_promotes_to_maintainer() {
  let repo = repo_with_commits(&[("Ann", "ann@x.com"), ("Ann", "ann@x.com")]);
  let out = tempdir();

  cmd_bin("icontribute")
    .args(["collect", "--offline", "--threshold=2", "--repo"])
    .arg(repo.path())
    .arg("--out")
    .arg(out.path())
    .assert()
    .success();

  let v = read_json(&out.path().join("contributors.json"));
  assert_eq!(v[0]["role"], "Maintainer");
}

#[test]
fn fixture_avatars_resolve_noreply_and_local_part_usernames() {
  let repo = repo_with_commits(&[
    ("Octo Cat", "583231+octocat@users.noreply.github.com"),
    ("Octo Cat", "octo@corp.example"),
    ("Jane Doe", "jane.doe@corp.example"),
    ("Numeric", "12345@users.noreply.github.com"),
  ]);
  let out = tempdir();

  cmd_bin("icontribute")
    .env("ICONTRIBUTE_TEST_AVATARS", r#"["octocat","janedoe"]"#)
    .args(["collect", "--repo"])
    .arg(repo.path())
    .arg("--out")
    .arg(out.path())
    .assert()
    .success();

  let v = read_json(&out.path().join("contributors.json"));
  let by_name = |n: &str| v.as_array().unwrap().iter().find(|c| c["name"] == n).cloned().unwrap();

  let octo = by_name("Octo Cat");
  assert_eq!(octo["email"], "octo@corp.example");
  assert_eq!(octo["username"], "octocat");
  assert_eq!(octo["avatar"], "https://github.com/octocat.png");
  assert_eq!(octo["commits"], 2);

  let jane = by_name("Jane Doe");
  assert_eq!(jane["username"], "janedoe");

  let numeric = by_name("Numeric");
  assert!(numeric.get("username").is_none());
  assert_eq!(numeric["email"], "12345@users.noreply.github.com");
}

#[test]
fn outside_a_repository_writes_empty_collection() {
  let not_repo = tempdir();
  let out = tempdir();

  cmd_bin("icontribute")
    .args(["collect", "--offline", "--repo"])
    .arg(not_repo.path())
    .arg("--out")
    .arg(out.path())
    .assert()
    .success();

  assert_eq!(read_json(&out.path().join("contributors.json")), serde_json::json!([]));
}

#[test]
fn unwritable_output_fails_the_run() {
  let repo = repo_with_commits(&[("Ann", "ann@x.com")]);
  let scratch = tempdir();
  let blocker = scratch.path().join("blocker");
  std::fs::write(&blocker, "not a directory").unwrap();

  cmd_bin("icontribute")
    .args(["collect", "--offline", "--repo"])
    .arg(repo.path())
    .arg("--out")
    .arg(blocker.join("out"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("creating output directory"));
}

#[test]
fn missing_subcommand_fails() {
  cmd_bin("icontribute")
    .assert()
    .failure()
    .stderr(predicate::str::contains("collect | serve"));
}
