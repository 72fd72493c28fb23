/// Configuration loading for event binding generation
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eventgen_ethereum::codegen::{naming, EventCodegenConfig, DEFAULT_PACKAGE_NAME};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_package() -> String {
    DEFAULT_PACKAGE_NAME.to_string()
}

/// Contents of an eventgen configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// ABI JSON file, relative to the configuration file
    pub abi: String,

    /// Name of the generated module
    #[serde(default = "default_package")]
    pub package: String,

    /// Template file, relative to the configuration file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Events to generate, by canonical signature or unique name
    #[serde(default)]
    pub events: Vec<String>,
}

/// Configuration validation error
#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error in field '{}': {}", self.field, self.message)
    }
}

/// Configuration validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Configuration validator trait
pub trait ConfigValidator {
    /// Validate the configuration
    fn validate(&self) -> ValidationResult;
}

impl ConfigValidator for GenerationConfig {
    fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.abi.trim().is_empty() {
            errors.push(ValidationError {
                field: "abi".to_string(),
                message: "ABI path cannot be empty".to_string(),
            });
        }

        if !is_identifier(&self.package) {
            errors.push(ValidationError {
                field: "package".to_string(),
                message: format!("{:?} is not a valid module name", self.package),
            });
        }

        if self.events.is_empty() {
            errors.push(ValidationError {
                field: "events".to_string(),
                message: "At least one event is required".to_string(),
            });
        }

        for (index, event) in self.events.iter().enumerate() {
            if event.trim().is_empty() {
                errors.push(ValidationError {
                    field: format!("events.{}", index),
                    message: "Event identifier cannot be empty".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Usable as a plain Rust module name
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let well_formed = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    well_formed && name != "_" && !naming::is_keyword(name)
}

/// Loads a configuration file and resolves the paths it names
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: GenerationConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Load configuration from a file; the format follows the extension
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content).with_context(|| {
                format!("Failed to parse TOML configuration file: {}", path.display())
            })?,
            Some("json") => serde_json::from_str(&content).with_context(|| {
                format!("Failed to parse JSON configuration file: {}", path.display())
            })?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).with_context(|| {
                format!("Failed to parse YAML configuration file: {}", path.display())
            })?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported configuration file format. Supported formats: .toml, .json, .yaml, .yml"
                ))
            }
        };

        debug!(path = %path.display(), "Loaded configuration");

        Ok(Self {
            config,
            config_path: path.to_path_buf(),
        })
    }

    /// Replace the module name, e.g. from a command line override; checked
    /// by the next validation
    pub fn set_package(&mut self, package: String) {
        self.config.package = package;
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> ValidationResult {
        self.config.validate()
    }

    /// Validate, folding every problem into one error
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate().map_err(|errors| {
            let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
            anyhow::anyhow!(
                "Invalid configuration {}:\n  {}",
                self.config_path.display(),
                details.join("\n  ")
            )
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Directory relative paths in the configuration are resolved against
    pub fn base_dir(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// ABI file path
    pub fn abi_path(&self) -> PathBuf {
        self.base_dir().join(&self.config.abi)
    }

    /// Template file path, if the configuration names one
    pub fn template_path(&self) -> Option<PathBuf> {
        self.config.template.as_ref().map(|template| self.base_dir().join(template))
    }

    /// Codegen settings described by this configuration
    pub fn codegen_config(&self) -> EventCodegenConfig {
        EventCodegenConfig {
            package_name: self.config.package.clone(),
            events: self.config.events.clone(),
            template: self.template_path(),
            ..Default::default()
        }
    }
}
