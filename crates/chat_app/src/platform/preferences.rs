use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use chat_logging::{chat_error, chat_info, chat_warn};
use serde::{Deserialize, Serialize};

const PREFS_FILENAME: &str = ".chat_prefs.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedPreferences {
    #[serde(default)]
    theme: Theme,
}

/// Key/value preference file. Read once at startup, rewritten on every change.
///
/// Writes go through a temp file in the same directory and a rename, so a crash mid-write
/// leaves the previous preferences intact.
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn load_theme(&self) -> Theme {
        let path = self.dir.join(PREFS_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Theme::default();
            }
            Err(err) => {
                chat_warn!("Failed to read preferences from {:?}: {}", path, err);
                return Theme::default();
            }
        };

        match ron::from_str::<PersistedPreferences>(&content) {
            Ok(prefs) => {
                chat_info!("Loaded theme {} from {:?}", prefs.theme.as_str(), path);
                prefs.theme
            }
            Err(err) => {
                chat_warn!("Failed to parse preferences from {:?}: {}", path, err);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) {
        let prefs = PersistedPreferences { theme };
        let content = match ron::ser::to_string_pretty(&prefs, ron::ser::PrettyConfig::new()) {
            Ok(text) => text,
            Err(err) => {
                chat_error!("Failed to serialize preferences: {}", err);
                return;
            }
        };

        match self.replace_file(&content) {
            Ok(path) => chat_info!("Saved theme {} to {:?}", theme.as_str(), path),
            Err(err) => chat_error!("Failed to write preferences to {:?}: {}", self.dir, err),
        }
    }

    fn replace_file(&self, content: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(PREFS_FILENAME);

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }
}
