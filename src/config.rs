use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".potkitrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns (relative to the module) skipped while scanning.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Directory names (or `a/b` relative paths) never descended into.
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
    #[serde(default = "default_translatable_attributes")]
    pub translatable_attributes: Vec<String>,
    /// Elements on which `name` is a human label rather than an identifier.
    #[serde(default = "default_name_attribute_elements")]
    pub name_attribute_elements: Vec<String>,
    #[serde(default = "default_text_elements")]
    pub text_elements: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub min_percentage: Option<f64>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_dirs() -> Vec<String> {
    strings(&[
        "__pycache__",
        ".git",
        ".hg",
        "node_modules",
        "static/lib",
        "static/tests",
        "tests",
    ])
}

fn default_translatable_attributes() -> Vec<String> {
    strings(&[
        "string",
        "help",
        "placeholder",
        "confirm",
        "summary",
        "title",
        "alt",
    ])
}

fn default_name_attribute_elements() -> Vec<String> {
    strings(&["menuitem", "act_window"])
}

fn default_text_elements() -> Vec<String> {
    strings(&[
        "p", "span", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th", "label", "button", "a",
        "div", "strong", "em", "small", "b", "i",
    ])
}

fn default_output_dir() -> String {
    "i18n".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            excluded_dirs: default_excluded_dirs(),
            translatable_attributes: default_translatable_attributes(),
            name_attribute_elements: default_name_attribute_elements(),
            text_elements: default_text_elements(),
            output_dir: default_output_dir(),
            min_percentage: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or the
    /// threshold is outside `0..=100`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if let Some(min) = self.min_percentage
            && !(0.0..=100.0).contains(&min)
        {
            anyhow::bail!("'minPercentage' must be between 0 and 100, got {}", min);
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
