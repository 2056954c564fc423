use clap::Parser;
use moo_core::{models::Client, ports::ClientDirectory as _};
use std::{io::Write as _, path::PathBuf};

mod io;
pub use io::*;

mod commands;
pub use commands::*;

pub mod config;
pub use config::AppConfig;

// The top-level arguments: where configuration lives, an optional solver
// override, and which subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to configuration file
    #[arg(short, long, env = "APP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Request a specific solver backend, overriding the configuration
    #[arg(short, long, global = true)]
    pub solver: Option<SolverLib>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(lib) = self.solver {
            config.solver.lib = lib;
        }
        let inputs = Inputs::load(&config)?;

        match self.command {
            Commands::Recommend { io } => {
                let client = io.parse::<Client>()?;
                let offer = config.solver.recommend(inputs, &client)?;
                let mut output = io.write()?;
                serde_json::to_writer_pretty(&mut output, &offer)?;
                writeln!(output)?;
            }
            Commands::Campaign { io, budget } => {
                let clients = io.load_clients()?;
                let assignments = config.solver.campaign(inputs, &clients, budget)?;
                let mut output = io.write()?;
                serde_json::to_writer_pretty(&mut output, &assignments)?;
                writeln!(output)?;
            }
            Commands::Export { io, budget, format } => {
                let format = if let Some(format) = format {
                    format
                } else if let Some(ext) = io.extension() {
                    ext.parse()?
                } else {
                    return Err(CliError::ExportInference)?;
                };

                let clients = io.load_clients()?;
                let (pairs, program) = inputs.program(&clients, budget)?;
                let mut output = io.write()?;
                format.export(&program, &pairs, &mut output)?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Unable to infer export format, please specify a valid format")]
    ExportInference,
}
