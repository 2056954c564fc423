use super::IOArgs;
use clap::Subcommand;

mod export;
mod solve;
pub use export::{ExportFormat, ExportFormatError};
pub use solve::{Inputs, SolverLib};

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend the best offer for one client, using the client's own budget
    Recommend {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Allocate at most one offer per client under a shared campaign budget
    Campaign {
        #[command(flatten)]
        io: IOArgs,

        /// The total amount the campaign may spend
        #[arg(short, long)]
        budget: f64,
    },

    /// Construct the campaign integer program and export to a standard format
    Export {
        #[command(flatten)]
        io: IOArgs,

        /// The total amount the campaign may spend
        #[arg(short, long)]
        budget: f64,

        /// The file format to use (if omitted, will infer based on filename)
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },
}
