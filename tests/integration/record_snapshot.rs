use test_support::{cmd_bin, repo_with_commits, tempdir};

#[test]
fn offline_collection_snapshot() {
  let repo = repo_with_commits(&[("Bob", "bob@x.com")]);
  let out = tempdir();

  cmd_bin("icontribute")
    .args(["collect", "--offline", "--repo"])
    .arg(repo.path())
    .arg("--out")
    .arg(out.path())
    .assert()
    .success();

  let v: serde_json::Value =
    serde_json::from_slice(&std::fs::read(out.path().join("Bob-bob_x.com.json")).unwrap()).unwrap();

  insta::assert_json_snapshot!(v, @r###"
  {
    "avatar": "https://www.gravatar.com/avatar/5cb6a827a3eaf66640c2cbe61a94454b?s=200&d=identicon",
    "commits": 1,
    "email": "bob@x.com",
    "name": "Bob",
    "role": "Contributor"
  }
  "###);
}
