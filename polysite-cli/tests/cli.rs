use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn polysite() -> Result<Command, Box<dyn std::error::Error>> {
    #[allow(deprecated)]
    let cmd = Command::cargo_bin("polysite")?;
    Ok(cmd)
}

#[test]
fn render_outputs_document_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("post.md"),
        "# Intro\n\nHello **world**, this is a short post.\n\n## Intro\n\nMore text here.\n",
    )?;

    let assert = polysite()?
        .current_dir(dir.path())
        .args(["render", "post.md", "--excerpt-length", "20"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["schema_version"], "polysite-v1");
    assert_eq!(value["kind"], "document.rendered");

    let data = &value["data"];
    assert!(data["html"]
        .as_str()
        .expect("html string")
        .contains(r#"<h1 id="intro">Intro</h1>"#));
    let ids: Vec<&str> = data["headings"]
        .as_array()
        .expect("headings array")
        .iter()
        .filter_map(|h| h["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["intro", "intro-2"]);
    assert_eq!(data["reading_time"], 1);
    assert!(data["excerpt"].as_str().expect("excerpt").ends_with('…'));

    Ok(())
}

#[test]
fn headings_skips_code_fences() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("guide.md"),
        "# Guide\n\n```sh\n# not a heading\n```\n\n### Config File\n",
    )?;

    let assert = polysite()?
        .current_dir(dir.path())
        .args(["headings", "guide.md"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["kind"], "document.headings");
    let headings = value["data"].as_array().expect("headings array");
    assert_eq!(headings.len(), 2);
    assert_eq!(headings[1]["level"], 3);
    assert_eq!(headings[1]["id"], "config-file");

    Ok(())
}

#[test]
fn render_missing_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    polysite()?
        .current_dir(dir.path())
        .args(["render", "missing.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
    Ok(())
}

#[test]
fn t_resolves_with_fallback_and_placeholders() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("polysite.yml"),
        "cms:\n  url: http://localhost:1337\nstrings: strings.yml\n",
    )?;
    fs::write(
        dir.path().join("strings.yml"),
        r#"
en:
  nav:
    home: Home
  article:
    reading_time: "{minutes} min read"
ja:
  nav:
    home: ホーム
"#,
    )?;

    polysite()?
        .current_dir(dir.path())
        .args(["t", "nav.home", "--locale", "ja"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ホーム\n"));

    polysite()?
        .current_dir(dir.path())
        .args([
            "t",
            "article.reading_time",
            "--locale",
            "ja",
            "--arg",
            "minutes=4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("4 min read\n"));

    polysite()?
        .current_dir(dir.path())
        .args(["t", "footer.missing"])
        .assert()
        .success()
        .stdout(predicate::str::diff("footer.missing\n"));

    Ok(())
}

#[test]
fn articles_soft_fail_when_cms_is_down() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    // Nothing listens on the discard port
    let assert = polysite()?
        .current_dir(dir.path())
        .args(["--cms-url", "http://127.0.0.1:9", "articles", "--locale", "ko"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["kind"], "articles.list");
    assert_eq!(value["data"]["data"], Value::Array(vec![]));

    Ok(())
}

#[test]
fn locale_defaults_come_from_site_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("polysite.yml"),
        "site:\n  default_locale: ja\nstrings: strings.yml\n",
    )?;
    fs::write(
        dir.path().join("strings.yml"),
        "en:\n  nav:\n    home: Home\nja:\n  nav:\n    home: ホーム\n",
    )?;

    polysite()?
        .current_dir(dir.path())
        .args(["t", "nav.home"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ホーム\n"));

    polysite()?
        .current_dir(dir.path())
        .args(["t", "nav.home", "--locale", "xx"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ホーム\n"));

    polysite()?
        .current_dir(dir.path())
        .args(["t", "nav.home", "--locale", "en-US"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Home\n"));

    Ok(())
}
