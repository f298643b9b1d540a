use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use voiceline::formats::wav::save_wav;
use voiceline::locator::{MISSING_LOG_NAME, coverage_report};
use voiceline::prelude::*;

const SCRIPT: &str = r#"{
    "scenes": [
        {
            "id": "Day2_briefing",
            "commands": [
                { "type": "speak", "speaker": "Angela", "text": "Good morning, manager." },
                { "type": "other", "name": "fade_in" },
                { "type": "speak", "speaker": "Angela", "text": "Today's work begins." }
            ]
        },
        {
            "id": "hallway",
            "keyed": false,
            "commands": [
                { "type": "speak", "speaker": "Gebura", "text": "Move." }
            ]
        }
    ]
}"#;

fn tone(samples: Vec<f32>) -> DecodedAudio {
    DecodedAudio {
        samples,
        channels: 1,
        sample_rate: 22050,
    }
}

#[test]
fn test_keyed_scene_end_to_end() {
    let dir = tempdir().unwrap();
    let locator = AssetLocator::new(dir.path());
    let mut ledger = MissingFileLedger::open(dir.path().join(MISSING_LOG_NAME));

    let script = StoryScript::from_json_str(SCRIPT).unwrap();
    let scenes = script.materialize();
    let mut keys = KeyRegistry::new();
    let mut day = DayContext::new();

    assert_eq!(keys.resolve_scene(&scenes[0].id, &scenes[0].commands), 2);

    let first = &scenes[0].commands[0];
    let key = keys.key_for(first.handle).unwrap().clone();
    assert_eq!(key.as_str(), "Day2_briefing_0");
    assert!(day.update_from_key(key.as_str()));
    assert_eq!(day.current(), "Day2");

    save_wav(
        dir.path().join("Angela_Day2_briefing_0.wav"),
        &tone(vec![0.25, -0.5, 0.0]),
    )
    .unwrap();

    let path = locator.locate(&key, "Angela");
    let found = locator.lookup(&path, "Good morning, manager.", &mut ledger);
    assert_eq!(found, AssetLookup::Found(path.clone()));
    assert!(ledger.is_empty());

    let mut audio = load_wav_file(&path).unwrap();
    assert_eq!(audio.samples, vec![0.25, -0.5, 0.0]);
    assert_eq!(audio.amplify(4.0), 1);
    assert_eq!(audio.samples, vec![1.0, -1.0, 0.0]);
}

#[test]
fn test_unkeyed_line_uses_day_and_hash() {
    let dir = tempdir().unwrap();
    let locator = AssetLocator::new(dir.path());
    let log_path = dir.path().join(MISSING_LOG_NAME);
    let mut ledger = MissingFileLedger::open(&log_path);

    let mut day = DayContext::new();
    day.update_from_key("Day2_briefing_0");

    let path = locator.locate_fallback("Gebura", "Move.", &day);
    let expected_name = format!("Gebura_Day2_{}.wav", stable_hash("Move."));
    assert_eq!(path, dir.path().join(&expected_name));

    // Reported twice, recorded once
    for _ in 0..2 {
        let lookup = locator.lookup(&path, "Move.", &mut ledger);
        assert_eq!(
            lookup,
            AssetLookup::Missing {
                file_name: expected_name.clone()
            }
        );
    }
    assert_eq!(ledger.len(), 1);

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("--- session start: "));
    assert_eq!(
        log.matches(&format!("{expected_name} | original: Move.")).count(),
        1
    );
}

#[test]
fn test_script_coverage() {
    let dir = tempdir().unwrap();
    save_wav(dir.path().join("Angela_Day2_briefing_1.wav"), &tone(vec![0.0])).unwrap();
    save_wav(
        dir.path()
            .join(format!("Gebura_Day2_{}.wav", stable_hash("Move."))),
        &tone(vec![0.0]),
    )
    .unwrap();

    let script = StoryScript::from_json_str(SCRIPT).unwrap();
    let report = coverage_report(&script, &AssetLocator::new(dir.path())).unwrap();

    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.present(), 2);
    let missing: Vec<_> = report
        .missing_entries()
        .map(|e| e.file_name.as_str())
        .collect();
    assert_eq!(missing, vec!["Angela_Day2_briefing_0.wav"]);
    assert!(!report.entries[2].keyed);
}

#[test]
fn test_invalid_wav_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.wav");
    fs::write(&path, b"not a wav file at all").unwrap();

    assert!(matches!(
        load_wav_file(&path),
        Err(WavError::InvalidRiffHeader)
    ));
}
