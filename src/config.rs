use crate::error::{Error, Result};
use crate::parser::ParseOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    /// Parser extensions, see [`ParseOptions`]
    #[serde(default)]
    pub parse: ParseOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "plain", "json", "tree" or "markdown"
    #[serde(default = "default_format")]
    pub format: String,

    /// Shallowest heading level to print
    #[serde(default = "default_min_depth")]
    pub min_depth: usize,

    /// Deepest heading level to print
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// List marker for markdown output
    #[serde(default = "default_bullet")]
    pub bullet: String,

    /// Spaces per nesting level for markdown output
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            min_depth: default_min_depth(),
            max_depth: default_max_depth(),
            bullet: default_bullet(),
            indent: default_indent(),
        }
    }
}

fn default_format() -> String {
    "plain".to_string()
}

fn default_min_depth() -> usize {
    1
}

fn default_max_depth() -> usize {
    6
}

fn default_bullet() -> String {
    "-".to_string()
}

fn default_indent() -> usize {
    2
}

impl Config {
    /// Get the XDG-style config file path (~/.config/mdtoc/config.toml)
    /// This is preferred on macOS for CLI tools and cross-platform dotfiles
    #[cfg(target_os = "macos")]
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("mdtoc").join("config.toml"))
    }

    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/mdtoc/config.toml
    /// - Linux: ~/.config/mdtoc/config.toml
    /// - Windows: %APPDATA%/mdtoc/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mdtoc").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    /// On macOS, checks ~/.config/mdtoc first, then falls back to ~/Library/Application Support
    pub fn load() -> Self {
        #[cfg(target_os = "macos")]
        {
            if let Some(config) = Self::xdg_config_path().and_then(|p| Self::read(&p)) {
                return config;
            }
        }

        Self::config_path()
            .and_then(|path| Self::read(&path))
            .unwrap_or_default()
    }

    /// Load config from an explicit path, falling back to defaults when the
    /// file is missing or malformed
    pub fn load_from(path: &Path) -> Self {
        Self::read(path).unwrap_or_default()
    }

    fn read(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match toml::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Save config to the platform config path, returning where it was written
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine config directory",
            ))
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config, Config::default());
        assert_eq!(config.output.format, "plain");
        assert_eq!(config.output.max_depth, 6);
        assert!(!config.parse.gfm);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\nmax_depth = 3\n\n[parse]\ngfm = true\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.output.max_depth, 3);
        assert_eq!(config.output.min_depth, 1);
        assert_eq!(config.output.bullet, "-");
        assert!(config.parse.gfm);
        assert!(!config.parse.front_matter);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output\nformat = ").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = "markdown".to_string();
        config.output.indent = 4;
        config.parse.front_matter = true;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }
}
