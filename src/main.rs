use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indexmap::IndexMap;

use hangar_versions::config::ResolverConfig;
use hangar_versions::log::{self, LogFormat};
use hangar_versions::version::resolver::VersionResolver;

#[derive(Parser)]
#[command(name = "hangar-versions")]
#[command(version, about = "Resolve platform version patterns into Hangar version ids")]
struct Cli {
    /// Platform dependencies as JSON, e.g. '{"PAPER": ["1.21.x"], "VELOCITY": ["3.4.0"]}'
    dependencies: String,

    /// JSON config file overriding upstream URLs and timeouts
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Format of diagnostics written to stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = log::init(cli.log_format)?;

    let config = match &cli.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };

    let dependencies: IndexMap<String, Vec<String>> = serde_json::from_str(&cli.dependencies)
        .context("Failed to parse platform dependencies as JSON")?;

    let resolved = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(VersionResolver::new(&config).resolve_all(&dependencies))?;

    println!("{}", serde_json::to_string_pretty(&resolved)?);

    Ok(())
}
