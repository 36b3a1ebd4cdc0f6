use jsonschema::validator_for;
use test_support::{cmd_bin, repo_with_commits, tempdir};

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

#[test]
fn persisted_files_conform_to_schema() {
  let repo = repo_with_commits(&[
    ("Jane Doe", "jane@x.com"),
    ("Jane Doe", "9+jdoe@users.noreply.github.com"),
    ("Ops Bot", "bot@x.com"),
  ]);
  let out = tempdir();

  cmd_bin("icontribute")
    .env("ICONTRIBUTE_TEST_AVATARS", r#"["jdoe"]"#)
    .args(["collect", "--threshold", "2", "--repo"])
    .arg(repo.path())
    .arg("--out")
    .arg(out.path())
    .assert()
    .success();

  let record_schema = compile_schema("contributor.schema.json");

  let combined: serde_json::Value =
    serde_json::from_slice(&std::fs::read(out.path().join("contributors.json")).unwrap()).unwrap();
  let items = combined.as_array().expect("collection is an array");
  assert_eq!(items.len(), 2);
  for item in items {
    record_schema.validate(item).expect("collection item conforms");
  }

  let mut per_record = 0;
  for entry in std::fs::read_dir(out.path()).unwrap() {
    let path = entry.unwrap().path();
    if path.file_name().unwrap() == "contributors.json" {
      continue;
    }
    let stem = path.file_stem().unwrap().to_string_lossy().to_string();
    assert!(stem.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
    assert!(!stem.starts_with('_') && !stem.ends_with('_'));

    let v: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    record_schema.validate(&v).expect("per-record file conforms");
    per_record += 1;
  }
  assert_eq!(per_record, 2);
}
