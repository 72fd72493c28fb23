//! Code generation for Ethereum contract events
//!
//! Resolves selected events in a contract ABI, maps their arguments to Rust
//! types and renders typed bindings from a Handlebars template.

pub mod model;
pub mod naming;
pub mod parser;
pub mod resolver;
pub mod types;

#[cfg(feature = "codegen")]
pub mod generator;
#[cfg(feature = "codegen")]
pub mod templates;

#[cfg(all(test, feature = "codegen"))]
mod tests;

use std::path::PathBuf;

pub use model::{GenerationModel, ModelBuilder, TargetArgument, TargetEvent};
pub use parser::{AbiEvent, AbiParameter, AbiParser, EthereumAbi};
pub use resolver::{resolve, EventIdentifier, EventResolver};

#[cfg(feature = "codegen")]
pub use generator::EventBindingsCodegen;

#[cfg(feature = "codegen")]
use eventgen_common::Result;

/// Package name used when configuration does not set one
pub const DEFAULT_PACKAGE_NAME: &str = "bindings";

/// Configuration for event binding generation
#[derive(Debug, Clone)]
pub struct EventCodegenConfig {
    /// Name of the generated module
    pub package_name: String,
    /// Events to generate, by canonical signature or unique name
    pub events: Vec<String>,
    /// Template file; the built-in template when unset
    pub template: Option<PathBuf>,
    /// Output file; stdout when unset
    pub output: Option<PathBuf>,
    /// Report every resolution and mapping error instead of the first
    pub report_all_errors: bool,
}

impl Default for EventCodegenConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            events: Vec::new(),
            template: None,
            output: None,
            report_all_errors: false,
        }
    }
}

/// Main entry point for event binding generation
#[cfg(feature = "codegen")]
pub async fn generate_event_bindings(
    abi_file_path: &str,
    config: EventCodegenConfig,
) -> Result<GenerationModel> {
    let parser = AbiParser::new();
    let abi = parser.parse_file(abi_file_path)?;

    let codegen = EventBindingsCodegen::new(config);
    let model = codegen.build_model(&abi)?;
    let source = codegen.render(&model)?;
    codegen.write_output(&source).await?;

    Ok(model)
}
