use directories::{ProjectDirs, UserDirs};
use doily_core::config::DEFAULT_PEN_SIZE;
use doily_core::{SectorCount, SurfaceConfig, SurfaceError};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::rgb::FromHexError;
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Pen color written as `#rrggbb` (or `#rgb`) in the config file.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct PenColor(Srgb<u8>);

impl PenColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        self.0.into_format::<f64>().with_alpha(1.0)
    }
}

impl FromStr for PenColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Srgb<u8>>().map(Self)
    }
}

impl fmt::Display for PenColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurfaceSettings {
    pub sectors: i32,
    pub pen_size: u32,
    pub pen_color: PenColor,
    pub show_sector_lines: bool,
    pub reflect: bool,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            sectors: 4,
            pen_size: DEFAULT_PEN_SIZE,
            pen_color: PenColor::new(255, 0, 0),
            show_sector_lines: true,
            reflect: false,
        }
    }
}

impl SurfaceSettings {
    pub fn to_surface_config(&self) -> Result<SurfaceConfig, SurfaceError> {
        Ok(SurfaceConfig {
            sectors: SectorCount::new(self.sectors)?,
            pen_size: self.pen_size,
            pen_color: self.pen_color.to_srgba(),
            draw_sector_lines: self.show_sector_lines,
            reflect: self.reflect,
            erasing: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlSettings {
    pub undo_step: u32,
    pub redo_step: u32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            undo_step: 5,
            redo_step: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GallerySettings {
    pub capacity: usize,
    pub export_dir: Option<PathBuf>,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            capacity: 12,
            export_dir: None,
        }
    }
}

impl GallerySettings {
    /// Configured directory, else `<Pictures>/doily`, else the app data directory.
    pub fn resolve_export_dir(&self) -> Option<PathBuf> {
        self.export_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|u| u.picture_dir().map(|p| p.join("doily"))))
            .or_else(|| project_dirs().map(|p| p.data_dir().join("exports")))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub surface: SurfaceSettings,
    pub controls: ControlSettings,
    pub gallery: GallerySettings,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "doily", "doily")
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("DOILY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
