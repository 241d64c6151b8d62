//! List the links of a bookmarks file

use anyhow::{Context, Result};
use clap::ValueEnum;
use cli_lib::util;
use owo_colors::OwoColorize;
use pbm_core::{walk_both_roots, ChromeFilter, IncludeAll, Link, Tree};
use std::path::Path;

/// Name prefix of the links the starred step produces
const STARRED_PREFIX: &str = "[XO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PrintFormat {
    /// One commented block per link
    #[default]
    Text,
    /// type,id,name,url,path,date_added,date_modified
    Csv,
    /// JSON array of starred link URLs; always searches every folder
    JsonLinks,
}

pub struct PrintArgs<'a> {
    pub path: &'a Path,
    pub by_date: bool,
    pub reverse: bool,
    pub all: bool,
    pub format: PrintFormat,
}

pub fn run(args: PrintArgs<'_>) -> Result<()> {
    let document = util::read_document(args.path)?;
    let tree = Tree::from_value(document)
        .with_context(|| format!("Not a bookmarks file: {}", args.path.display()))?;

    // Starred links live in a folder the default filter skips
    let all = args.all || args.format == PrintFormat::JsonLinks;
    let mut links = collect_links(&tree, all);
    if args.by_date {
        // Stable: links with equal dates keep walk order
        links.sort_by_key(sort_date);
    }
    if args.reverse {
        links.reverse();
    }

    match args.format {
        PrintFormat::Text => {
            for link in &links {
                println!("{}\n", link.to_console_string());
            }
            println!("{}", format!("{} links", links.len()).dimmed());
        }
        PrintFormat::Csv => {
            println!("type,id,name,url,path,date_added,date_modified");
            for link in &links {
                println!("{}", csv_row(link));
            }
        }
        PrintFormat::JsonLinks => {
            let urls: Vec<&str> = links
                .iter()
                .filter(|link| link.info.name.starts_with(STARRED_PREFIX))
                .map(|link| link.url.as_str())
                .collect();
            println!("{}", serde_json::to_string_pretty(&urls)?);
        }
    }

    Ok(())
}

/// Last modification, falling back to creation; undated sorts first
fn sort_date(link: &Link) -> i64 {
    link.info
        .modified_value()
        .filter(|v| *v > 0)
        .or(link.info.added_value())
        .unwrap_or(0)
}

/// Links of both roots with their folder path filled in
fn collect_links(tree: &Tree, all: bool) -> Vec<Link> {
    if all {
        walk_both_roots(tree, IncludeAll)
            .filter_map(|visit| visit.annotated_link())
            .collect()
    } else {
        walk_both_roots(tree, ChromeFilter::default())
            .filter_map(|visit| visit.annotated_link())
            .collect()
    }
}

fn csv_row(link: &Link) -> String {
    let info = &link.info;
    let raw = |value: Option<String>| value.unwrap_or_default();
    [
        "url".to_string(),
        raw(info.id.as_ref().map(ToString::to_string)),
        info.name.clone(),
        link.url.clone(),
        info.path.join("/"),
        raw(info.date_added.as_ref().map(ToString::to_string)),
        raw(info.date_modified.as_ref().map(ToString::to_string)),
    ]
    .iter()
    .map(|field| csv_field(field))
    .collect::<Vec<_>>()
    .join(",")
}

/// Quote a field when it holds a separator, quote or line break
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
