//! Story and naming commands

use std::path::Path;

use anyhow::{Result, bail};
use console::style;

use crate::locator::{AssetLocator, coverage_report};
use crate::story::{DEFAULT_DAY, DialogueKey, StoryScript, extract_day};
use crate::utils::stable_hash;

/// Print the stable hash of a dialogue line
pub fn hash(text: &str) {
    println!("{}", stable_hash(text));
}

/// Print the day label a key would set
pub fn day(key: &str) {
    match extract_day(key) {
        Some(day) => println!("{day}"),
        None => println!("no match (day label unchanged)"),
    }
}

/// Resolve the voice file for one line
pub fn locate(
    voices: &Path,
    speaker: &str,
    key: Option<&str>,
    text: Option<&str>,
    day: Option<&str>,
) -> Result<()> {
    let file_name = match (key, text) {
        (Some(key), _) => AssetLocator::key_file_name(speaker, &DialogueKey::from_raw(key)),
        (None, Some(text)) => {
            AssetLocator::fallback_file_name(speaker, day.unwrap_or(DEFAULT_DAY), text)
        }
        (None, None) => bail!("either --key or --text is required"),
    };

    let path = voices.join(&file_name);
    let status = if path.is_file() {
        style("found").green()
    } else {
        style("missing").red()
    };
    println!("{} [{}]", path.display(), status);
    Ok(())
}

/// Print a coverage report for a story script
pub fn coverage(script_path: &Path, voices: &Path, missing_only: bool) -> Result<()> {
    let script = StoryScript::load(script_path)?;
    let report = coverage_report(&script, &AssetLocator::new(voices))?;

    let mut current_scene = "";
    for entry in &report.entries {
        if missing_only && entry.present {
            continue;
        }
        if entry.scene_id != current_scene {
            println!("{}", style(&entry.scene_id).bold());
            current_scene = &entry.scene_id;
        }
        let mark = if entry.present {
            style("ok  ").green()
        } else {
            style("MISS").red()
        };
        println!("  {} {}  {}", mark, entry.file_name, style(&entry.text).dim());
    }

    println!(
        "\n{} lines: {} voiced, {} missing",
        report.entries.len(),
        report.present(),
        report.missing()
    );
    Ok(())
}

