//! Command execution implementations

use super::Commands;
use super::{story, wav};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Hash { text } => {
                story::hash(text);
                Ok(())
            }
            Commands::Day { key } => {
                story::day(key);
                Ok(())
            }
            Commands::Locate {
                voices,
                speaker,
                key,
                text,
                day,
            } => story::locate(
                voices,
                speaker,
                key.as_deref(),
                text.as_deref(),
                day.as_deref(),
            ),
            Commands::Inspect { file } => wav::inspect(file),
            Commands::Amplify {
                source,
                destination,
                gain,
            } => wav::amplify(source, destination, *gain),
            Commands::Coverage {
                script,
                voices,
                missing_only,
            } => story::coverage(script, voices, *missing_only),
        }
    }
}
