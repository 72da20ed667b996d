use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::*;
use crate::error::ConfigError;
use crate::page::{Page, PageKind};

pub const DEFAULT_CONFIG_FILE: &str = "greeting.toml";

const DEFAULT_MESSAGE: &str = "Every journey begins with a reason…\n\nThis little show is not just a wish…\n\nIt's a small tribute to someone who made my life better since 2017…\n\nSo… welcome to a special story…";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub message: String,
    pub gallery_dir: PathBuf,
    pub music: Option<PathBuf>,
    pub slide_interval_ms: u64,
    pub fullscreen: bool,
    pub pages: Vec<PageSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageSettings {
    pub kind: PageKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
}

impl PageSettings {
    fn new(kind: PageKind, title: &str, body: &[&str]) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.iter().map(|line| line.to_string()).collect(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "A Special Story".into(),
            message: DEFAULT_MESSAGE.into(),
            gallery_dir: PathBuf::from("assets/gallery"),
            music: Some(PathBuf::from("assets/music.mp3")),
            slide_interval_ms: SLIDE_INTERVAL_MS,
            fullscreen: false,
            pages: vec![
                PageSettings::new(PageKind::Intro, "A Special Story", &[]),
                PageSettings::new(PageKind::Story, "Where it began", &[
                    "Some people walk into your life and quietly change everything.",
                    "You did exactly that.",
                ]),
                PageSettings::new(PageKind::Story, "Through the years", &[
                    "Every laugh, every long talk, every silly moment.",
                    "All of it adds up to something I am grateful for.",
                ]),
                PageSettings::new(PageKind::Gallery, "Memories", &[]),
                PageSettings::new(PageKind::Celebration, "Happy Birthday!", &[
                    "Today is all about you.",
                ]),
                PageSettings::new(PageKind::Finale, "Thank you", &[
                    "For being you. Here's to many more years.",
                ]),
            ],
        }
    }
}

impl Settings {
    /// Defaults, then the config file, then environment overrides.
    ///
    /// An explicit `path` must exist; otherwise `greeting.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => {
                debug!("no {DEFAULT_CONFIG_FILE}, using built-in settings");
                Self::default()
            }
        };
        settings.apply_env(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("GREETING_GALLERY") {
            self.gallery_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("GREETING_MUSIC") {
            self.music = if v.is_empty() { None } else { Some(PathBuf::from(v)) };
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pages.is_empty() {
            return Err(ConfigError::Invalid("at least one page is required".into()));
        }
        if self.slide_interval_ms == 0 {
            return Err(ConfigError::Invalid("slide_interval_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn build_pages(&self) -> Vec<Page> {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| Page::new(i, page.kind, page.title.clone(), page.body.clone()))
            .collect()
    }
}
