//! Show the effective configuration

use anyhow::Result;
use cli_lib::config::example_config;
use cli_lib::PbmConfig;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(path: Option<&Path>, example: bool) -> Result<()> {
    if example {
        println!("{}", example_config());
        return Ok(());
    }

    let config = PbmConfig::load_or_default(path)?;

    println!("{}", "pbm Configuration".bold());
    match path {
        Some(path) => println!("{}: {}\n", "Location".dimmed(), path.display().dimmed()),
        None => println!("{}\n", "(built-in defaults)".dimmed()),
    }

    println!("{}", "[pipeline]".yellow());
    println!("  {} = {:?}", "steps".cyan(), config.pipeline.steps);

    println!("\n{}", "[filter]".yellow());
    println!("  {} = {:?}", "skip_folders".cyan(), config.filter.skip_folders);

    println!("\n{}", "[options]".yellow());
    let options = serde_json::to_value(&config.options)?;
    match options.as_object() {
        Some(map) if !map.is_empty() => {
            for (key, value) in map {
                println!("  {} = {}", key.cyan(), value);
            }
        }
        _ => println!("  {}", "(none)".dimmed()),
    }

    Ok(())
}
