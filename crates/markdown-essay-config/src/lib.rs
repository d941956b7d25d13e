use markdown_essay_engine::{Markup, markup::DEFAULT_PINNED_SECTION};
use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings for the essay editor.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub notes_path: PathBuf,
    /// Essay to open on start, relative to `notes_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essay_path: Option<RelativePathBuf>,
    /// Heading of the section kept last in every essay.
    #[serde(default = "default_pinned_section")]
    pub pinned_section: String,
    /// Where extracted sections become notes, relative to `notes_path`.
    #[serde(default = "default_extract_folder")]
    pub extract_folder: RelativePathBuf,
    #[serde(default)]
    pub include_headings_in_export: bool,
}

fn default_pinned_section() -> String {
    DEFAULT_PINNED_SECTION.to_string()
}

fn default_extract_folder() -> RelativePathBuf {
    RelativePathBuf::from("extracted")
}

impl Config {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
            essay_path: None,
            pinned_section: default_pinned_section(),
            extract_folder: default_extract_folder(),
            include_headings_in_export: false,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.notes_path = Self::expand_path(&config.notes_path).unwrap_or(config.notes_path);
        if config.pinned_section.trim().is_empty() {
            config.pinned_section = default_pinned_section();
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-essay");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Markup conventions for the engine's parsers and mutators.
    pub fn markup(&self) -> Markup {
        Markup::new(self.pinned_section.trim())
    }

    pub fn extract_folder(&self) -> &RelativePath {
        &self.extract_folder
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-essay/config.toml"));
    }

    #[test]
    fn test_minimal_file_gets_defaults() {
        let config: Config = toml::from_str(r#"notes_path = "/tmp/notes""#).unwrap();

        assert_eq!(config.essay_path, None);
        assert_eq!(config.pinned_section, "Sources");
        assert_eq!(config.extract_folder(), RelativePath::new("extracted"));
        assert!(!config.include_headings_in_export);
        assert_eq!(config.markup(), Markup::default());
    }

    #[test]
    fn test_custom_pinned_section_reaches_markup() {
        let config: Config = toml::from_str(
            r#"
notes_path = "/tmp/notes"
pinned_section = "Bibliography"
extract_folder = "drafts/pieces"
essay_path = "essays/attention.md"
include_headings_in_export = true
"#,
        )
        .unwrap();

        assert!(config.markup().is_pinned_title("bibliography"));
        assert_eq!(config.extract_folder(), RelativePath::new("drafts/pieces"));
        assert_eq!(
            config.essay_path.as_deref(),
            Some(RelativePath::new("essays/attention.md"))
        );
        assert!(config.include_headings_in_export);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("ESSAY_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$ESSAY_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("ESSAY_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        for raw in ["/absolute/path", "relative/path"] {
            let path = PathBuf::from(raw);
            assert_eq!(Config::expand_path(&path), Some(path));
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = [unclosed").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_blank_pinned_section_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "notes_path = \"/tmp/notes\"\npinned_section = \"  \"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.pinned_section, "Sources");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::new("/tmp/test-notes");
        test_config.pinned_section = "References".to_string();
        test_config.essay_path = Some(RelativePathBuf::from("essay.md"));

        test_config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded.notes_path, test_config.notes_path);
        assert_eq!(loaded.pinned_section, "References");
        assert_eq!(loaded.essay_path, test_config.essay_path);
        assert_eq!(loaded.extract_folder, test_config.extract_folder);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("ESSAY_NOTES_ROOT", "/custom/notes");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = \"$ESSAY_NOTES_ROOT/my-notes\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.notes_path, PathBuf::from("/custom/notes/my-notes"));

        unsafe {
            env::remove_var("ESSAY_NOTES_ROOT");
        }
    }
}
