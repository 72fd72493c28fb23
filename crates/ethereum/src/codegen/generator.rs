//! Code generator for contract event bindings
//!
//! Builds the generation model from a parsed ABI, renders it and writes the
//! result to a file or stdout.

use std::path::Path;

use eventgen_common::{Error, Result};
use tokio::io::AsyncWriteExt;
use tracing::info;

use super::model::{GenerationModel, ModelBuilder};
use super::parser::EthereumAbi;
use super::templates::{self, TemplateManager, CUSTOM_TEMPLATE, DEFAULT_TEMPLATE};
use super::EventCodegenConfig;

/// Code generator for event bindings
pub struct EventBindingsCodegen {
    config: EventCodegenConfig,
}

impl EventBindingsCodegen {
    /// Create a new code generator with the given configuration
    pub fn new(config: EventCodegenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EventCodegenConfig {
        &self.config
    }

    /// Resolve and map the configured events
    pub fn build_model(&self, abi: &EthereumAbi) -> Result<GenerationModel> {
        let builder = ModelBuilder::new(abi);
        if self.config.report_all_errors {
            builder.build_collecting(&self.config.package_name, self.config.events.as_slice())
        } else {
            builder.build(&self.config.package_name, self.config.events.as_slice())
        }
    }

    /// Render a model with the configured template
    pub fn render(&self, model: &GenerationModel) -> Result<String> {
        let (manager, template) = match &self.config.template {
            Some(path) => (TemplateManager::with_template_file(path)?, CUSTOM_TEMPLATE),
            None => (TemplateManager::new()?, DEFAULT_TEMPLATE),
        };

        let rendered = manager.render(template, model)?;
        Ok(templates::tidy(&rendered))
    }

    /// Build and render; nothing is produced unless every event resolved
    pub fn generate(&self, abi: &EthereumAbi) -> Result<String> {
        let model = self.build_model(abi)?;
        self.render(&model)
    }

    /// Write generated source to the configured output, or stdout
    pub async fn write_output(&self, content: &str) -> Result<()> {
        match &self.config.output {
            Some(path) => write_file(path, content).await,
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(content.as_bytes()).await?;
                stdout.flush().await?;
                Ok(())
            }
        }
    }
}

/// Write content to file, creating parent directories
async fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| {
                Error::Io(format!("Failed to create directory {}: {}", parent.display(), e))
            })?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::Io(format!("Failed to write file {}: {}", path.display(), e)))?;

    info!(path = %path.display(), bytes = content.len(), "Wrote bindings");
    Ok(())
}
