//! Story data handling: command types, dialogue keys and the day context
//!
//! # Overview
//!
//! When the host materializes a scene, every speak command in it gets a
//! [`DialogueKey`] of the form `{scene_id}_{speak_index}`. While lines play,
//! keys are also mined for a day label (see [`DayContext`]) that seeds the
//! fallback file name of lines whose key is unknown.
//!
//! # Usage
//!
//! ```
//! use voiceline::story::{DayContext, KeyRegistry, SceneCommand, CommandHandle};
//!
//! let commands = vec![
//!     SceneCommand::other(1, "bgm"),
//!     SceneCommand::speak(2, "Angela", "Welcome."),
//! ];
//!
//! let mut keys = KeyRegistry::new();
//! keys.resolve_scene("Day3_intro", &commands);
//! let key = keys.key_for(CommandHandle(2)).unwrap();
//! assert_eq!(key.as_str(), "Day3_intro_0");
//!
//! let mut day = DayContext::new();
//! day.update_from_key(key.as_str());
//! assert_eq!(day.current(), "Day3");
//! ```

mod day;
mod keys;
pub mod script;
mod types;

pub use day::{DEFAULT_DAY, DayContext, extract_day};
pub use keys::KeyRegistry;
pub use script::{MaterializedScene, SceneScript, StoryScript};
pub use types::{CommandHandle, DialogueKey, SceneCommand, SpeakLine, StoryCommand};
