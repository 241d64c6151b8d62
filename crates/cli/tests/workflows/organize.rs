//! `pbm organize` end to end: dry run, confirmation, backup, failure handling

use crate::common::fixtures::{folder, top_level, top_level_names, url, JAN_2_2014};
use crate::common::BookmarksFixture;
use crate::pbm;
use anyhow::Result;
use serde_json::json;

fn names(value: &serde_json::Value) -> Vec<String> {
    value["children"]
        .as_array()
        .map(|children| {
            children
                .iter()
                .filter_map(|c| c["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_dry_run_leaves_file_untouched() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    let before = fixture.raw();

    let result = pbm!(fixture.dir(), "organize", &fixture.path_str(), "--dry-run").assert_success()?;

    assert!(result.contains_stdout("Dry run"));
    assert!(result.contains_stdout("2015-3-4"));
    assert_eq!(fixture.raw(), before);
    assert!(fixture.backups().is_empty());
    Ok(())
}

#[test]
fn test_default_sequence_writes_and_backs_up() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    let before = fixture.raw();

    pbm!(fixture.dir(), "organize", &fixture.path_str(), "--yes").assert_success()?;

    let document = fixture.document();
    assert_eq!(
        top_level_names(&document),
        vec!["2014", "2015", "bookmarklets", "chrome", "quicklinks", "starred", "all", "queue"]
    );
    assert!(document.get("checksum").is_none());
    assert_eq!(document["version"], 1);
    assert_eq!(document["roots"]["other"]["children"], json!([]));

    // The duplicate from the secondary root is gone
    let all = top_level(&document, "all").expect("all folder");
    assert_eq!(names(all), vec!["old news", "docs", "new news"]);

    let quicklinks = top_level(&document, "quicklinks").expect("quicklinks folder");
    assert_eq!(names(quicklinks), vec!["daily"]);

    let backups = fixture.backups();
    assert_eq!(backups.len(), 1);
    assert_eq!(std::fs::read_to_string(&backups[0])?, before);
    Ok(())
}

#[test]
fn test_rerun_is_stable() -> Result<()> {
    let fixture = BookmarksFixture::sample();

    pbm!(fixture.dir(), "organize", &fixture.path_str(), "-y").assert_success()?;
    let first = fixture.document();

    let result = pbm!(fixture.dir(), "organize", &fixture.path_str(), "-y").assert_success()?;
    let second = fixture.document();

    assert_eq!(top_level_names(&first), top_level_names(&second));
    assert_eq!(
        names(top_level(&first, "all").expect("all")),
        names(top_level(&second, "all").expect("all"))
    );
    assert!(result.success());
    Ok(())
}

#[test]
fn test_declined_prompt_writes_nothing() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    let before = fixture.raw();

    let result = pbm!(fixture.dir(), "organize", &fixture.path_str())
        .stdin("n\n")
        .assert_success()?;

    assert!(result.contains_stdout("Aborted"));
    assert_eq!(fixture.raw(), before);
    assert!(fixture.backups().is_empty());
    Ok(())
}

#[test]
fn test_confirmed_prompt_writes() -> Result<()> {
    let fixture = BookmarksFixture::sample();

    pbm!(fixture.dir(), "organize", &fixture.path_str())
        .stdin("y\n")
        .assert_success()?;

    assert_eq!(top_level_names(&fixture.document())[0], "2014");
    assert_eq!(fixture.backups().len(), 1);
    Ok(())
}

#[test]
fn test_unknown_step_fails_without_writing() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    let before = fixture.raw();

    let result = pbm!(fixture.dir(), "organize", &fixture.path_str(), "--steps", "dedupe,bogus", "-y")
        .assert_failure()?;

    assert!(result.contains_stderr("unknown step 'bogus'"));
    assert_eq!(fixture.raw(), before);
    assert!(fixture.backups().is_empty());
    Ok(())
}

#[test]
fn test_invalid_json_fails() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    std::fs::write(fixture.path(), "{ not json")?;

    let result = pbm!(fixture.dir(), "organize", &fixture.path_str(), "-y").assert_failure()?;

    assert!(result.contains_stderr("not valid JSON"));
    assert_eq!(fixture.raw(), "{ not json");
    Ok(())
}

#[test]
fn test_output_to_separate_file() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    let before = fixture.raw();
    let output = fixture.dir().join("Organized");
    let output_str = output.display().to_string();

    pbm!(fixture.dir(), "organize", &fixture.path_str(), "--output", &output_str).assert_success()?;

    assert_eq!(fixture.raw(), before);
    assert!(fixture.backups().is_empty());
    let document: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output)?)?;
    assert_eq!(top_level_names(&document)[0], "2014");
    Ok(())
}

#[test]
fn test_config_file_selects_steps() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    let config = fixture.dir().join("pbm.toml");
    std::fs::write(&config, "[pipeline]\nsteps = [\"null\"]\n")?;
    let config_str = config.display().to_string();

    pbm!(fixture.dir(), "organize", &fixture.path_str(), "--config", &config_str, "-y").assert_success()?;

    let document = fixture.document();
    // Primary root untouched, secondary root cleared
    assert_eq!(top_level_names(&document), vec!["news", "tool", "quicklinks"]);
    assert_eq!(document["roots"]["other"]["children"], json!([]));
    Ok(())
}

#[test]
fn test_option_override() -> Result<()> {
    let fixture = BookmarksFixture::new(&json!({
        "roots": {
            "bookmark_bar": folder("1", "Bookmarks bar", vec![
                url("3", "a", "https://a.example/", JAN_2_2014),
            ]),
            "other": folder("2", "Other bookmarks", vec![])
        },
        "version": 1
    }));

    pbm!(
        fixture.dir(),
        "organize",
        &fixture.path_str(),
        "--steps",
        "datefolders",
        "-o",
        "datefolders.zero_pad=true",
        "-y"
    )
    .assert_success()?;

    let document = fixture.document();
    let year = top_level(&document, "2014").expect("year folder");
    assert_eq!(names(year), vec!["2014-01"]);
    assert_eq!(names(&year["children"][0]), vec!["2014-01-02"]);
    Ok(())
}

#[test]
fn test_bad_option_fails() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    let before = fixture.raw();

    let result = pbm!(
        fixture.dir(),
        "organize",
        &fixture.path_str(),
        "-o",
        "datefolders.mode=sideways",
        "-y"
    )
    .assert_failure()?;

    assert!(result.contains_stderr("sideways"));
    assert_eq!(fixture.raw(), before);
    Ok(())
}
