//! Offline asset coverage for a story script
//!
//! Walks a script the same way a live session would (scene loads resolve
//! keys, keyed lines move the day label, unkeyed lines use the fallback
//! name) and reports which voice files exist.

use std::collections::HashSet;
use std::path::Path;

use walkdir::WalkDir;

use super::{AssetLocator, VOICE_EXTENSION};
use crate::error::Result;
use crate::story::{DayContext, KeyRegistry, StoryScript};

/// One speak line and the voice file it maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageEntry {
    pub scene_id: String,
    pub speaker: String,
    pub text: String,
    /// Expected file name inside the voice folder
    pub file_name: String,
    /// Whether the name came from a dialogue key (vs. the text hash)
    pub keyed: bool,
    pub present: bool,
}

/// Coverage of a whole script
#[derive(Debug, Clone, Default)]
pub struct CoverageReport {
    pub entries: Vec<CoverageEntry>,
}

impl CoverageReport {
    pub fn present(&self) -> usize {
        self.entries.iter().filter(|e| e.present).count()
    }

    pub fn missing(&self) -> usize {
        self.entries.len() - self.present()
    }

    /// Entries without a voice file, in script order
    pub fn missing_entries(&self) -> impl Iterator<Item = &CoverageEntry> {
        self.entries.iter().filter(|e| !e.present)
    }
}

/// Collect the names of all `.wav` files directly inside `folder`.
///
/// A missing folder yields an empty set.
pub fn index_voice_folder<P: AsRef<Path>>(folder: P) -> Result<HashSet<String>> {
    let folder = folder.as_ref();
    let mut names = HashSet::new();
    if !folder.is_dir() {
        return Ok(names);
    }

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_voice = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().to_lowercase() == VOICE_EXTENSION);
        if is_voice {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }

    tracing::debug!("Indexed {} voice files in {:?}", names.len(), folder);
    Ok(names)
}

/// Build a coverage report for `script` against the locator's folder
pub fn coverage_report(script: &StoryScript, locator: &AssetLocator) -> Result<CoverageReport> {
    let available = index_voice_folder(locator.voice_folder())?;
    let mut keys = KeyRegistry::new();
    let mut day = DayContext::new();
    let mut report = CoverageReport::default();

    for scene in script.materialize() {
        if scene.keyed {
            keys.resolve_scene(&scene.id, &scene.commands);
        }

        for cmd in &scene.commands {
            let Some(line) = cmd.command.as_speak() else {
                continue;
            };

            let (file_name, keyed) = match keys.key_for(cmd.handle) {
                Some(key) => {
                    day.update_from_key(key.as_str());
                    (AssetLocator::key_file_name(&line.speaker, key), true)
                }
                None => (
                    AssetLocator::fallback_file_name(&line.speaker, day.current(), &line.text),
                    false,
                ),
            };

            report.entries.push(CoverageEntry {
                scene_id: scene.id.clone(),
                speaker: line.speaker.clone(),
                text: line.text.clone(),
                present: available.contains(&file_name),
                file_name,
                keyed,
            });
        }
    }

    Ok(report)
}
