//! List registered steps

use anyhow::Result;
use owo_colors::OwoColorize;
use pbm_pipeline::{StepRegistry, DEFAULT_SEQUENCE};

pub fn run() -> Result<()> {
    let registry = StepRegistry::with_builtin_steps();

    println!("{}", "Available steps".bold());
    for name in registry.names() {
        match DEFAULT_SEQUENCE.iter().position(|s| *s == name) {
            Some(index) => println!("  {} {}", name.cyan(), format!("(default #{})", index + 1).dimmed()),
            None => println!("  {}", name.cyan()),
        }
    }

    println!("\n{}", "Default sequence".bold());
    println!("  {}", DEFAULT_SEQUENCE.join(","));

    Ok(())
}
