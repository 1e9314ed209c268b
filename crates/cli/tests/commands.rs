use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn blogmeta(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("blogmeta").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("BLOGMETA_ROOT")
        .env_remove("BLOGMETA_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn run_json(workdir: &TempDir, args: &[&str]) -> Value {
    let output = blogmeta(workdir)
        .arg("--json")
        .arg("--root")
        .arg(workdir.path().join("blog"))
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn list_reports_case_variants_but_not_exempt_pairs() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "a.md", "---\ntitle: A\ntags: [PHP, ssh]\n---\nA\n");
    write(&root, "b.md", "---\ntitle: B\ntags: [php, sshpass]\n---\nB\n");

    let response = run_json(&temp, &["list"]);

    assert_eq!(response["status"], "ok");
    assert_eq!(response["command"], "list");
    let groups = response["data"]["case_variants"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["identity"], "php");
    assert_eq!(groups[0]["canonical_hint"], "PHP");
    assert!(response["data"]["merge_suggestions"]
        .as_array()
        .unwrap()
        .is_empty());
    assert_eq!(response["summary"]["scanned"], 2);
}

#[test]
fn list_suggests_plural_merge_once() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "a.md", "---\ntags: [snippet]\n---\n");
    write(&root, "b.md", "---\ntags: [snippets]\n---\n");

    let response = run_json(&temp, &["list", "--sort", "name"]);
    let suggestions = response["data"]["merge_suggestions"].as_array().unwrap();

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["first"], "snippet");
    assert_eq!(suggestions[0]["second"], "snippets");
    assert_eq!(suggestions[0]["rule"], "plural");
}

#[test]
fn add_key_writes_once_then_is_a_noop() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "post.md", "---\ntitle: Hello\ntags: [rust]\n---\n# Body\n\ntext\n");
    write(&root, "other.md", "---\ntitle: Other\nlanguage: fr\n---\nOther\n");

    let first = run_json(&temp, &["add-key", "language,en"]);
    assert_eq!(first["summary"]["modified"], 1);
    assert_eq!(
        read(&root, "post.md"),
        "---\ntitle: Hello\ntags: [rust]\nlanguage: en\n---\n# Body\n\ntext\n"
    );
    assert_eq!(read(&root, "other.md"), "---\ntitle: Other\nlanguage: fr\n---\nOther\n");

    let second = run_json(&temp, &["add-key", "language,en"]);
    assert_eq!(second["summary"]["modified"], 0);
}

#[test]
fn cleanup_variants_keeps_first_variant_value() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(
        &root,
        "post.md",
        "---\ntitle: T\ncanonicalURL: A\ncanonical_url: B\n---\nbody\n",
    );

    let response = run_json(
        &temp,
        &["cleanup-variants", "canonicalUrl", "canonicalURL,canonical_url"],
    );

    assert_eq!(response["summary"]["modified"], 1);
    assert_eq!(read(&root, "post.md"), "---\ntitle: T\ncanonicalUrl: A\n---\nbody\n");
}

#[test]
fn cleanup_variants_without_other_keys_is_a_warning() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "post.md", "---\nstatus: draft\n---\n");

    let response = run_json(&temp, &["cleanup-variants", "status", "status"]);
    assert_eq!(response["status"], "warning");
    assert_eq!(read(&root, "post.md"), "---\nstatus: draft\n---\n");
}

#[test]
fn rename_never_leaves_case_duplicates() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "post.md", "---\ntags: [docker, Docker, linux]\n---\n");
    write(&root, "untouched.md", "---\ntags: [linux]\n---\n");

    let response = run_json(&temp, &["rename", "Docker,docker"]);

    assert_eq!(response["summary"]["modified"], 1);
    assert_eq!(read(&root, "post.md"), "---\ntags: [docker, linux]\n---\n");
    assert_eq!(read(&root, "untouched.md"), "---\ntags: [linux]\n---\n");
}

#[test]
fn reorder_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(
        &root,
        "post.md",
        "---\ntags: [b]\nzeta: 1\ntitle: T\nslug: t\n---\nbody\n",
    );

    let first = run_json(&temp, &["reorder"]);
    assert_eq!(first["summary"]["modified"], 1);
    let reordered = read(&root, "post.md");
    assert_eq!(reordered, "---\nslug: t\ntitle: T\ntags: [b]\nzeta: 1\n---\nbody\n");

    let second = run_json(&temp, &["reorder"]);
    assert_eq!(second["summary"]["modified"], 0);
    assert_eq!(read(&root, "post.md"), reordered);
}

#[test]
fn malformed_file_is_reported_while_others_are_processed() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "bad.md", "---\ntitle: [oops\n---\n");
    write(&root, "good.md", "---\ntitle: Good\n---\n");

    let response = run_json(&temp, &["remove-key", "title"]);

    assert_eq!(response["summary"]["scanned"], 2);
    assert_eq!(response["summary"]["modified"], 1);
    let failed = response["summary"]["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 1);
    assert!(failed[0]["path"].as_str().unwrap().ends_with("bad.md"));
    assert_eq!(read(&root, "bad.md"), "---\ntitle: [oops\n---\n");
}

#[test]
fn malformed_rename_argument_fails_before_touching_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "post.md", "---\ntags: [JS]\n---\n");

    blogmeta(&temp)
        .arg("--root")
        .arg(&root)
        .args(["rename", "js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OLD,NEW"));

    assert_eq!(read(&root, "post.md"), "---\ntags: [JS]\n---\n");
}

#[test]
fn json_argument_error_has_error_status() {
    let temp = TempDir::new().unwrap();
    let output = blogmeta(&temp)
        .args(["--json", "delete", "  "])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["status"], "error");
    assert_eq!(response["message"], "tag must not be empty");
}

#[test]
fn empty_default_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "post.md", "---\ntitle: T\n---\n");

    blogmeta(&temp)
        .arg("--root")
        .arg(&root)
        .args(["add-key", "draft"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(read(&root, "post.md"), "---\ntitle: T\n---\n");

    blogmeta(&temp)
        .arg("--root")
        .arg(&root)
        .args(["add-key", "draft", "--yes"])
        .assert()
        .success();
    assert_eq!(read(&root, "post.md"), "---\ntitle: T\ndraft: ''\n---\n");
}

#[test]
fn missing_root_is_a_warning() {
    let temp = TempDir::new().unwrap();
    blogmeta(&temp)
        .args(["--root", "does-not-exist", "check-mandatory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn check_commands_flag_documents() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(
        &root,
        "post.md",
        "---\ntitle: Hi\nTitle: Again\ncanonicalUrl: a\ncanonical_url: b\ntags: [Rust]\n---\n",
    );

    let duplicates = run_json(&temp, &["check-duplicates"]);
    assert_eq!(duplicates["summary"]["flagged"], 1);
    assert_eq!(duplicates["data"]["literal"][0]["findings"][0]["identity"], "title");
    assert_eq!(duplicates["data"]["conceptual"][0]["findings"][0]["group"], "canonicalurl");

    let seo = run_json(&temp, &["check-seo"]);
    let issues = seo["data"][0]["findings"].as_array().unwrap();
    assert!(issues
        .iter()
        .any(|issue| issue["kind"] == "not_lowercase" && issue["value"] == "Rust"));

    let mandatory = run_json(&temp, &["check-mandatory"]);
    assert_eq!(mandatory["summary"]["flagged"], 1);
}

#[test]
fn config_file_overrides_mandatory_keys() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(&root, "post.md", "---\ntitle: T\n---\n");
    fs::write(temp.path().join("blogmeta.toml"), "mandatory_keys = [\"title\"]\n").unwrap();

    let response = run_json(&temp, &["check-mandatory"]);
    assert_eq!(response["summary"]["flagged"], 0);
}

#[test]
fn invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("blogmeta.toml"), "[merge]\nmax_len = 2\n").unwrap();

    blogmeta(&temp)
        .args(["list-keys"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("merge.max_len"));
}

fn file_names(files: &Value) -> Vec<String> {
    files
        .as_array()
        .unwrap()
        .iter()
        .map(|path| {
            Path::new(path.as_str().unwrap())
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

fn presence_tree(temp: &TempDir) {
    let root = temp.path().join("blog");
    write(&root, "a.md", "---\ntitle: A\nlanguage: en\ntags: [rust, cli]\n---\nA\n");
    write(&root, "b.md", "---\ntitle: B\ntags: [rust]\n---\nB\n");
    write(&root, "c.md", "# No front matter\n");
}

#[test]
fn find_present_and_missing_partition_the_corpus() {
    let temp = TempDir::new().unwrap();
    presence_tree(&temp);

    let present = run_json(&temp, &["find-present", "language"]);
    assert_eq!(present["data"]["key"], "language");
    assert_eq!(present["data"]["present"], true);
    assert_eq!(file_names(&present["data"]["files"]), vec!["a.md"]);
    assert_eq!(present["summary"]["scanned"], 3);
    assert_eq!(present["summary"]["flagged"], 1);

    let missing = run_json(&temp, &["find-missing", "language"]);
    assert_eq!(missing["data"]["present"], false);
    assert_eq!(file_names(&missing["data"]["files"]), vec!["b.md", "c.md"]);
    assert_eq!(missing["summary"]["scanned"], 3);
    assert_eq!(missing["summary"]["flagged"], 2);
    assert_eq!(missing["summary"]["modified"], 0);
}

#[test]
fn list_keys_and_values_report_usage() {
    let temp = TempDir::new().unwrap();
    presence_tree(&temp);

    let keys = run_json(&temp, &["list-keys"]);
    assert_eq!(keys["data"]["keys"]["title"], 2);
    assert_eq!(keys["data"]["keys"]["tags"], 2);
    assert_eq!(keys["data"]["keys"]["language"], 1);
    assert_eq!(keys["data"]["with_front_matter"], 2);
    assert_eq!(
        file_names(&keys["data"]["without_front_matter"]),
        vec!["c.md"]
    );

    let values = run_json(&temp, &["list-values", "tags"]);
    assert_eq!(values["data"]["key"], "tags");
    assert_eq!(values["data"]["values"]["rust"], 2);
    assert_eq!(values["data"]["values"]["cli"], 1);
    assert_eq!(values["data"]["documents_with_key"], 2);
    assert_eq!(values["summary"]["scanned"], 3);
}

#[test]
fn check_duplicates_reads_blocks_with_repeated_keys() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");
    write(
        &root,
        "post.md",
        "---\ntitle: a\ntitle: b\nDate: x\ndate: y\n---\n",
    );

    let response = run_json(&temp, &["check-duplicates"]);

    assert!(response["summary"]["failed"].as_array().unwrap().is_empty());
    assert_eq!(response["summary"]["flagged"], 1);
    let literal = &response["data"]["literal"][0]["findings"];
    assert_eq!(literal.as_array().unwrap().len(), 1);
    assert_eq!(literal[0]["identity"], "date");
    assert_eq!(literal[0]["spellings"], serde_json::json!(["Date", "date"]));
    assert_eq!(
        response["data"]["repeated"][0]["findings"],
        serde_json::json!(["title"])
    );
}
