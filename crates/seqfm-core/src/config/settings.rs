//! Application configuration loaded from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::nav::filter::{FilterMask, SortKey};
use crate::seq::compress::SeqMode;
use crate::seq::extensions::SeqExtensions;

/// Top-level application configuration.
///
/// All fields have sensible defaults so seqfm works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sequence: SequenceConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Sequence detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// Extensions whose numbered files are grouped into sequences.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub mode: SeqMode,
}

impl SequenceConfig {
    /// The configured extensions as an allow-list.
    pub fn seq_extensions(&self) -> SeqExtensions {
        SeqExtensions::new(&self.extensions)
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            mode: SeqMode::default(),
        }
    }
}

/// Directory listing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub show_hidden: bool,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default = "default_true")]
    pub dirs_first: bool,
    #[serde(default)]
    pub globs: Vec<String>,
    #[serde(default = "default_true")]
    pub glob_files_only: bool,
}

impl ListingConfig {
    /// The filter mask implied by these settings.
    pub fn filter_mask(&self) -> FilterMask {
        if self.show_hidden {
            FilterMask::NONE
        } else {
            FilterMask::HIDDEN
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            sort: SortKey::default(),
            reverse: false,
            dirs_first: true,
            globs: Vec::new(),
            glob_files_only: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    [
        ".cin", ".dpx", ".exr", ".iff", ".z", ".lut", ".1dl", ".sgi", ".rgb", ".rgba", ".bw",
        ".tga", ".tif", ".tiff", ".png", ".jpg", ".jpeg", ".jfif", ".ppm", ".pnm", ".pgm", ".pbm",
        ".pic",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_sequence() {
        let config = Config::default();

        assert_eq!(config.sequence.mode, SeqMode::Sparse);
        let exts = config.sequence.seq_extensions();
        assert!(exts.contains(".exr"));
        assert!(exts.contains(".DPX"));
        assert!(!exts.contains(".txt"));
    }

    #[test]
    fn default_config_listing() {
        let config = Config::default();

        assert!(!config.listing.show_hidden);
        assert_eq!(config.listing.sort, SortKey::Name);
        assert!(!config.listing.reverse);
        assert!(config.listing.dirs_first);
        assert!(config.listing.globs.is_empty());
        assert!(config.listing.glob_files_only);
        assert_eq!(config.listing.filter_mask(), FilterMask::HIDDEN);
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[sequence]
extensions = ["exr", ".DPX"]
mode = "range"

[listing]
show_hidden = true
sort = "time"
reverse = true
dirs_first = false
globs = ["*.exr"]
glob_files_only = false
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.sequence.mode, SeqMode::Range);
        assert_eq!(
            config.sequence.seq_extensions().as_slice(),
            &[".exr".to_string(), ".dpx".to_string()]
        );

        assert!(config.listing.show_hidden);
        assert_eq!(config.listing.sort, SortKey::Time);
        assert!(config.listing.reverse);
        assert!(!config.listing.dirs_first);
        assert_eq!(config.listing.globs, vec!["*.exr".to_string()]);
        assert!(!config.listing.glob_files_only);
        assert_eq!(config.listing.filter_mask(), FilterMask::NONE);
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[listing]
show_hidden = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.listing.show_hidden);
        assert_eq!(config.listing.sort, SortKey::Name);
        assert!(config.listing.dirs_first);
        assert_eq!(config.sequence.mode, SeqMode::Sparse);
        assert!(config.sequence.seq_extensions().contains(".exr"));
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        let default = Config::default();

        assert_eq!(config.listing.show_hidden, default.listing.show_hidden);
        assert_eq!(config.sequence.extensions, default.sequence.extensions);
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn load_unknown_mode_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[sequence]\nmode = \"sideways\"\n").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.sequence.extensions, config.sequence.extensions);
        assert_eq!(back.listing.sort, config.listing.sort);
    }
}
