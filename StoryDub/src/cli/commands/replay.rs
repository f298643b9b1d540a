use std::path::Path;
use std::thread;
use std::time::Duration;

use voiceline::story::StoryScript;

use crate::config::DubConfig;
use crate::playback::{AudioDevice, LoadOutcome, WavLoader};
use crate::session::{DubSession, LineOutcome};

#[derive(Debug, Default)]
struct ReplayStats {
    lines: usize,
    played: usize,
    missing: usize,
    failed: usize,
}

pub fn execute(
    script_path: &Path,
    config: &DubConfig,
    skip: bool,
    line_delay_ms: u64,
) -> anyhow::Result<()> {
    let script = StoryScript::load(script_path)?;
    let device = AudioDevice::open_default()?;
    let mut session = DubSession::new(config, WavLoader, device.output())?;
    let delay = Duration::from_millis(line_delay_ms);
    let mut stats = ReplayStats::default();

    for scene in script.materialize() {
        if scene.keyed {
            session.on_scene_loaded(&scene.id, &scene.commands);
        }

        // The host only raises line events for dialogue
        for command in scene.commands.iter().filter(|c| c.command.is_speak()) {
            stats.lines += 1;
            match session.on_dialogue_line(Some(command), skip) {
                LineOutcome::Requested { handle, .. } => match handle.join() {
                    LoadOutcome::Played => {
                        stats.played += 1;
                        session.slot().wait_until_idle(Duration::from_millis(50));
                    }
                    LoadOutcome::Superseded => {}
                    LoadOutcome::Failed(_) | LoadOutcome::TimedOut => stats.failed += 1,
                },
                LineOutcome::Missing { .. } => stats.missing += 1,
                LineOutcome::Skipped | LineOutcome::Ignored => {}
            }
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    }

    println!(
        "✓ Replayed {} lines: {} played, {} missing, {} failed",
        stats.lines, stats.played, stats.missing, stats.failed
    );
    if let Some(log) = session.ledger().log_path().filter(|_| stats.missing > 0) {
        println!("  Missing files listed in {}", log.display());
    }
    Ok(())
}
