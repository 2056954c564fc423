use clap::ValueEnum;
use moo_core::models::{BinaryProgram, ClientId, OfferId};
use moo_solver::export::{export_lp, export_mps};
use std::{io::Write, str::FromStr};

// The formats the `export` subcommand can write
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Mps,
    Lp,
}

impl ExportFormat {
    /// Write the program, naming variable k after the k-th (client, offer) pair
    pub fn export<W: Write>(
        &self,
        program: &BinaryProgram,
        pairs: &[(ClientId, OfferId)],
        buffer: &mut W,
    ) -> Result<(), std::io::Error> {
        let name = |idx: usize| {
            let (client, offer) = pairs[idx];
            format!("x_c{client}_o{offer}")
        };
        match self {
            Self::Mps => export_mps(program, name, buffer),
            Self::Lp => export_lp(program, name, buffer),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mps" | "MPS" => Ok(Self::Mps),
            "lp" | "LP" => Ok(Self::Lp),
            _ => Err(Self::Err::ExportExtension(s.to_owned())),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportFormatError {
    #[error("Unknown export format: {0}")]
    ExportExtension(String),
}
