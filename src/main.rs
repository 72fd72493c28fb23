/// eventgen entry point
///
/// Reads a configuration naming a contract ABI and the events of interest,
/// and writes typed Rust bindings for those events.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eventgen_ethereum::codegen::{AbiParser, EthereumAbi, EventBindingsCodegen};
use eventgen_tools::config::ConfigLoader;

#[derive(Parser)]
#[command(name = "eventgen")]
#[command(
    author,
    version,
    about = "Generate typed bindings for contract events",
    long_about = None
)]
struct Cli {
    /// Configuration file (.yaml, .yml, .json or .toml)
    config: PathBuf,

    /// Handlebars template, overrides the configuration
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output file; generated code goes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the generated module, overrides the configuration
    #[arg(short, long)]
    package: Option<String>,

    /// Report every unresolved event and unsupported type, not just the first
    #[arg(long)]
    report_all: bool,

    /// Print the events the ABI defines and exit
    #[arg(long)]
    list_events: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries generated code
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let mut loader = ConfigLoader::load_from_file(&cli.config)?;
    if let Some(package) = cli.package {
        loader.set_package(package);
    }

    let abi_path = loader.abi_path();
    let abi = AbiParser::new()
        .parse_file(&abi_path)
        .with_context(|| format!("Failed to load ABI {}", abi_path.display()))?;
    info!(abi = %abi.source, events = abi.events.len(), "Loaded ABI");

    if cli.list_events {
        list_events(&abi);
        return Ok(());
    }

    loader.ensure_valid()?;

    let mut config = loader.codegen_config();
    if let Some(template) = cli.template {
        config.template = Some(template);
    }
    config.output = cli.output;
    config.report_all_errors = cli.report_all;

    let codegen = EventBindingsCodegen::new(config);
    let model = codegen.build_model(&abi)?;
    let source = codegen.render(&model)?;
    codegen.write_output(&source).await?;

    info!(
        package = %model.package_name,
        events = model.events.len(),
        "Generated event bindings"
    );

    Ok(())
}

fn list_events(abi: &EthereumAbi) {
    for event in &abi.events {
        println!("{} {}", event.id_hex(), event.signature());
    }
}
