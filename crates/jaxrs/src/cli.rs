//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `jaxrs providers` | List compiled-in provider classes and service registrations |
//! | `jaxrs locate <SERVICE_ID>` | Resolve a service and report the class and strategy |

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use jaxrs_ext::{list_provider_classes, list_service_registrations};
use jaxrs_infrastructure::{AppConfig, ConfigLoader, finder_from_config};

/// Command line interface for jaxrs provider discovery
#[derive(Parser, Debug)]
#[command(name = "jaxrs")]
#[command(about = "Inspect and resolve jaxrs runtime providers")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Runtime home holding lib/jaxrs.properties (overrides configuration)
    #[arg(long)]
    pub runtime_home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List registered provider classes and service registrations
    Providers,

    /// Resolve the provider of a service
    Locate {
        /// Service identifier, e.g. jakarta.ws.rs.ext.RuntimeDelegate
        service_id: String,

        /// Class to instantiate when no strategy resolves
        #[arg(long)]
        fallback: Option<String>,
    },
}

impl Cli {
    /// Load configuration and apply command line overrides
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::new().with_config_path(path),
            None => ConfigLoader::new(),
        };
        let mut config = loader.load().context("loading configuration")?;
        if let Some(home) = &self.runtime_home {
            config.discovery.runtime_home = Some(home.clone());
        }
        Ok(config)
    }
}

/// Execute a command, writing its report to `out`
pub fn run(command: &Command, config: &AppConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Providers => {
            writeln!(out, "Provider classes:")?;
            for (name, description) in list_provider_classes() {
                writeln!(out, "  {name:<48} {description}")?;
            }
            writeln!(out, "Service registrations:")?;
            for (service_id, class_name) in list_service_registrations() {
                writeln!(out, "  {service_id} -> {class_name}")?;
            }
        }
        Command::Locate {
            service_id,
            fallback,
        } => {
            let finder = finder_from_config(config);
            let located = finder
                .locate(service_id, fallback.as_deref())
                .with_context(|| format!("locating provider for {service_id}"))?;
            writeln!(
                out,
                "{service_id} -> {} (via {})",
                located.class_name, located.strategy
            )?;
        }
    }
    Ok(())
}
