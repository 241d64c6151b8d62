//! Read-only commands: `print`, `profiles`, `steps`, `config`

use crate::common::fixtures::{folder, url, JAN_2_2014, MAR_4_2015};
use crate::common::BookmarksFixture;
use crate::pbm;
use anyhow::Result;
use serde_json::json;

#[test]
fn test_print_lists_navigable_links() -> Result<()> {
    let fixture = BookmarksFixture::sample();
    let before = fixture.raw();

    let result = pbm!(fixture.dir(), "print", &fixture.path_str()).assert_success()?;

    assert!(result.contains_stdout("https://news.example/old"));
    assert!(result.contains_stdout("https://docs.example/"));
    assert!(result.contains_stdout("# path : Bookmarks bar/news"));
    // Skipped: non-navigable scheme and the quicklinks folder
    assert!(!result.contains_stdout("javascript:alert(1)"));
    assert!(!result.contains_stdout("https://daily.example/"));
    assert!(result.contains_stdout("4 links"));
    assert_eq!(fixture.raw(), before);
    Ok(())
}

#[test]
fn test_print_all_includes_skipped() -> Result<()> {
    let fixture = BookmarksFixture::sample();

    let result = pbm!(fixture.dir(), "print", &fixture.path_str(), "--all").assert_success()?;

    assert!(result.contains_stdout("javascript:alert(1)"));
    assert!(result.contains_stdout("https://daily.example/"));
    assert!(result.contains_stdout("6 links"));
    Ok(())
}

#[test]
fn test_print_by_date_reversed() -> Result<()> {
    let fixture = BookmarksFixture::sample();

    let result = pbm!(fixture.dir(), "print", &fixture.path_str(), "--by-date", "--reverse").assert_success()?;

    // The 2015 link comes first once reversed
    let newest = result.stdout.find("https://news.example/new").expect("new link listed");
    let oldest = result.stdout.find("https://news.example/old").expect("old link listed");
    assert!(newest < oldest);
    Ok(())
}

#[test]
fn test_print_by_date_uses_modification_time() -> Result<()> {
    let mut edited = url("4", "edited", "https://edited.example/", JAN_2_2014);
    edited["date_modified"] = json!((MAR_4_2015 + 1).to_string());
    let fixture = BookmarksFixture::new(&json!({
        "roots": {
            "bookmark_bar": folder("1", "Bookmarks bar", vec![
                edited,
                url("5", "untouched", "https://untouched.example/", MAR_4_2015),
            ]),
            "other": folder("2", "Other bookmarks", vec![])
        },
        "version": 1
    }));

    let result = pbm!(fixture.dir(), "print", &fixture.path_str(), "-d").assert_success()?;

    let untouched = result.stdout.find("https://untouched.example/").expect("untouched listed");
    let edited = result.stdout.find("https://edited.example/").expect("edited listed");
    assert!(untouched < edited);
    Ok(())
}

#[test]
fn test_print_csv() -> Result<()> {
    let fixture = BookmarksFixture::sample();

    let result = pbm!(fixture.dir(), "print", &fixture.path_str(), "--format", "csv").assert_success()?;

    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(lines[0], "type,id,name,url,path,date_added,date_modified");
    assert_eq!(lines.len(), 5);
    assert!(lines.contains(&"url,8,docs,https://docs.example/,Other bookmarks,13033137600000000,"));
    assert!(!result.contains_stdout("links"));
    Ok(())
}

#[test]
fn test_print_json_links_lists_starred_urls() -> Result<()> {
    let fixture = BookmarksFixture::new(&json!({
        "roots": {
            "bookmark_bar": folder("1", "Bookmarks bar", vec![
                folder("3", "starred", vec![
                    url("4", "[XOO] twice", "https://twice.example/##", JAN_2_2014),
                    url("5", "[XO] once", "https://once.example/#", JAN_2_2014),
                ]),
                url("6", "plain", "https://plain.example/", JAN_2_2014),
            ]),
            "other": folder("2", "Other bookmarks", vec![])
        },
        "version": 1
    }));

    let result = pbm!(fixture.dir(), "print", &fixture.path_str(), "-f", "json-links").assert_success()?;

    let urls: Vec<String> = serde_json::from_str(&result.stdout)?;
    assert_eq!(urls, vec!["https://twice.example/##", "https://once.example/#"]);
    Ok(())
}

#[test]
fn test_profiles_lists_bookmarks_files() -> Result<()> {
    let data = tempfile::tempdir()?;
    for (profile, file) in [("Default", "Bookmarks"), ("Default", "Bookmarks.bak"), ("Profile 2", "Bookmarks")] {
        std::fs::create_dir_all(data.path().join(profile))?;
        std::fs::write(data.path().join(profile).join(file), "{}")?;
    }
    let data_str = data.path().display().to_string();

    let result = pbm!(data.path(), "profiles")
        .env("PBM_PROFILE_DIRS", &data_str)
        .assert_success()?;
    let listed: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].ends_with("Bookmarks"));
    assert!(result.contains_stdout("Profile 2"));

    let with_backups = pbm!(data.path(), "profiles", "--backups")
        .env("PBM_PROFILE_DIRS", &data_str)
        .assert_success()?;
    assert_eq!(with_backups.stdout.lines().count(), 3);
    assert!(with_backups.contains_stdout("Bookmarks.bak"));
    Ok(())
}

#[test]
fn test_steps_lists_catalogue() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let result = pbm!(dir.path(), "steps").assert_success()?;

    for name in ["null", "dedupe", "datefolders", "bookmarkletsfolder", "queuefolder"] {
        assert!(result.contains_stdout(name), "missing step {}", name);
    }
    assert!(result.contains_stdout(
        "null,dedupe,datefolders,bookmarkletsfolder,chromefolder,quicklinks,starred,allinone,queuefolder"
    ));
    Ok(())
}

#[test]
fn test_config_example_round_trips() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let example = pbm!(dir.path(), "config", "--example").assert_success()?;
    let path = dir.path().join("pbm.toml");
    std::fs::write(&path, &example.stdout)?;
    let path_str = path.display().to_string();

    let shown = pbm!(dir.path(), "config", "--config", &path_str).assert_success()?;
    assert!(shown.contains_stdout("datefolders.mode"));
    assert!(shown.contains_stdout("\"replace\""));
    Ok(())
}

#[test]
fn test_config_rejects_invalid_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("pbm.toml");
    std::fs::write(&path, "[pipeline]\nsteps = []\n")?;
    let path_str = path.display().to_string();

    let result = pbm!(dir.path(), "config", "--config", &path_str).assert_failure()?;
    assert!(result.contains_stderr("at least one step"));
    Ok(())
}
