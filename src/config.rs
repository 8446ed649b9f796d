use derive_more::{Deref, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("segment count must be at least 1")]
    InvalidSegmentCount,
    #[error("segment color list must not be empty")]
    EmptyColorList,
    #[error("invalid color token '{0}'")]
    InvalidColor(String),
}

/// A color given as a hex token (`#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`,
/// leading `#` optional), stored as linear-friendly sRGB components.
#[derive(
    Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr,
)]
pub struct ColorToken(Srgba<f64>);

impl FromStr for ColorToken {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // Byte-indexed slicing below; multi-byte characters can never form a
        // valid hex token anyway.
        if !hex.is_ascii() {
            return Err(ChartError::InvalidColor(s.to_owned()));
        }
        let expanded: String = match hex.len() {
            3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_owned(),
            _ => return Err(ChartError::InvalidColor(s.to_owned())),
        };
        let byte = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| ChartError::InvalidColor(s.to_owned()))
        };
        let (r, g, b) = (byte(0)?, byte(2)?, byte(4)?);
        let a = if expanded.len() == 8 { byte(6)? } else { u8::MAX };
        Ok(Self(Srgba::new(r, g, b, a).into_format()))
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0.into_format::<u8, u8>();
        if c.alpha == u8::MAX {
            write!(f, "#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                c.red, c.green, c.blue, c.alpha
            )
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> ColorToken {
    ColorToken(Srgba::new(r, g, b, u8::MAX).into_format())
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn to_cairo(self) -> cairo::LineCap {
        match self {
            Self::Butt => cairo::LineCap::Butt,
            Self::Round => cairo::LineCap::Round,
            Self::Square => cairo::LineCap::Square,
        }
    }
}

/// Everything the chart needs for one render. The chart recomputes its
/// geometry from this on every draw; nothing is cached across calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Side length of the square bounding box, in layout units.
    pub size: f64,
    /// Ring thickness.
    pub stroke_width: f64,
    pub current_value: f64,
    pub max_value: f64,
    /// Number of equal-capacity slots the ring is divided into.
    pub segment_count: usize,
    /// Per-slot colors, reused cyclically when shorter than `segment_count`.
    pub segment_colors: Vec<ColorToken>,
    /// Arc-length gap between adjacent slots.
    pub gap_length: f64,
    /// Optional text centered over the ring.
    pub label: Option<String>,
    pub outer_padding: f64,
    pub inner_padding: f64,
    pub line_cap: LineCap,
    pub show_background_track: bool,
    pub background_track_color: ColorToken,
    /// Extra CSS classes applied to the chart widget.
    pub css_classes: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            size: 120.0,
            stroke_width: 10.0,
            current_value: 80.0,
            max_value: 100.0,
            segment_count: 4,
            segment_colors: vec![
                rgb(0x24, 0xCC, 0xA7),
                rgb(0xFF, 0xCE, 0x31),
                rgb(0xFF, 0x5C, 0x5C),
                rgb(0x99, 0x99, 0xFF),
            ],
            gap_length: 2.0,
            label: None,
            outer_padding: 0.0,
            inner_padding: 0.0,
            line_cap: LineCap::default(),
            show_background_track: false,
            background_track_color: rgb(0xDD, 0xDD, 0xDD),
            css_classes: Vec::new(),
        }
    }
}

impl ChartConfig {
    /// A zero or negative slot count has no geometric meaning, and an empty
    /// color list leaves segments without a color. Everything else is clamped
    /// at render time instead of rejected.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.segment_count == 0 {
            return Err(ChartError::InvalidSegmentCount);
        }
        if self.segment_colors.is_empty() {
            return Err(ChartError::EmptyColorList);
        }
        Ok(())
    }

    pub fn color_for(&self, index: usize) -> ColorToken {
        self.segment_colors[index % self.segment_colors.len()]
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("dev", "ringchart", "ring-chart").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<ChartConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("RING_CHART"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> ChartConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default chart config: {}", e);
            ChartConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
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

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use async_channel::Sender;

/// Watches the config file and signals on every meaningful change so the
/// embedding application can reload and push a fresh `ChartConfig`.
pub async fn run_async_watcher(tx: Sender<()>) {
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
                    && tx.send(()).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
