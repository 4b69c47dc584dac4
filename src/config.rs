//! Optional user configuration, stored as [ron].
//!
//! Every field may be left out, in which case its default is used:
//!
//! ```text
//! (
//!     data_file: Some("/home/me/weight.dat"),
//!     cat_count: 30,
//!     smoothing: (order: 3, cutoff: 0.03, pad_threshold: 12),
//!     snapshot: (width: 100, height: 30),
//! )
//! ```

use crate::{
    filter::Smoothing,
    store::{executable_dir, DEFAULT_DATA_FILE},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Name of the config file looked up beside the executable.
pub const DEFAULT_CONFIG_FILE: &str = "weight.ron";

/// Things that can go wrong while loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Returned when the config file cannot be read.
    IoError(io::Error),

    /// Returned when the config file is not valid.
    RonSpannedError(ron::de::SpannedError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ConfigError::IoError(error) => Cow::from(format!("io error: {}", error)),
            ConfigError::RonSpannedError(error) => Cow::from(format!("bad config: {}", error)),
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for ConfigError {}

/// Size of the off-screen frame used by `plot --snapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSize {
    /// Columns
    pub width: u16,
    /// Rows
    pub height: u16,
}

impl Default for SnapshotSize {
    fn default() -> Self {
        SnapshotSize {
            width: 100,
            height: 30,
        }
    }
}

/// Settings that apply to every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Where the log is kept, defaults to `weight.dat` beside the executable
    pub data_file: Option<PathBuf>,
    /// How many entries `cat` prints
    pub cat_count: usize,
    /// How the trend is smoothed
    pub smoothing: Smoothing,
    /// Frame size for snapshots
    pub snapshot: SnapshotSize,
}

impl Default for WeightConfig {
    fn default() -> Self {
        WeightConfig {
            data_file: None,
            cat_count: 30,
            smoothing: Smoothing::default(),
            snapshot: SnapshotSize::default(),
        }
    }
}

impl FromStr for WeightConfig {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ron::de::from_str(s).map_err(ConfigError::RonSpannedError)
    }
}

impl WeightConfig {
    /// Read a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref()).map_err(ConfigError::IoError)?;
        let config = text.parse()?;
        info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load the config named on the command line, or else `weight.ron`
    /// beside the executable if there is one, or else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        let beside = executable_dir()
            .map_err(ConfigError::IoError)?
            .join(DEFAULT_CONFIG_FILE);
        if beside.is_file() {
            Self::from_path(beside)
        } else {
            debug!("No config at {}, using defaults", beside.display());
            Ok(Self::default())
        }
    }

    /// The data file to use: `explicit` if given, then the configured file,
    /// then `weight.dat` beside the executable.
    pub fn data_path(&self, explicit: Option<&Path>) -> io::Result<PathBuf> {
        match explicit.or(self.data_file.as_deref()) {
            Some(path) => Ok(path.to_path_buf()),
            None => Ok(executable_dir()?.join(DEFAULT_DATA_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_is_default() {
        let config: WeightConfig = "()".parse().unwrap();
        assert_eq!(config, WeightConfig::default());
        assert_eq!(config.cat_count, 30);
        assert_eq!(config.smoothing.order, 3);
        assert_eq!(config.smoothing.cutoff, 0.03);
    }

    #[test]
    fn partial_config() {
        let config: WeightConfig = r#"(
            data_file: Some("/tmp/w.dat"),
            smoothing: (cutoff: 0.1),
        )"#
        .parse()
        .unwrap();

        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/w.dat")));
        assert_eq!(config.cat_count, 30);
        assert_eq!(config.smoothing.cutoff, 0.1);
        assert_eq!(config.smoothing.order, 3);
        assert_eq!(config.snapshot, SnapshotSize::default());
    }

    #[test]
    fn invalid_config() {
        assert!(matches!(
            "(cat_count: \"many\")".parse::<WeightConfig>(),
            Err(ConfigError::RonSpannedError(_))
        ));
    }

    #[test]
    fn load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(cat_count: 7, snapshot: (width: 40))").unwrap();

        let config = WeightConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.cat_count, 7);
        assert_eq!(config.snapshot.width, 40);
        assert_eq!(config.snapshot.height, 30);
    }

    #[test]
    fn missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            WeightConfig::load(Some(&dir.path().join("nope.ron"))),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn data_path_precedence() {
        let config = WeightConfig {
            data_file: Some(PathBuf::from("configured.dat")),
            ..WeightConfig::default()
        };
        assert_eq!(
            config.data_path(Some(Path::new("flag.dat"))).unwrap(),
            PathBuf::from("flag.dat")
        );
        assert_eq!(config.data_path(None).unwrap(), PathBuf::from("configured.dat"));

        let fallback = WeightConfig::default().data_path(None).unwrap();
        assert!(fallback.ends_with(DEFAULT_DATA_FILE));
    }
}
