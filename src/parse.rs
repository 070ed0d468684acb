use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tick-tracker")]
#[command(about = "Backend for reporting and viewing UK tick sightings")]
#[command(version = "0.1")]
pub(crate) struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the sightings HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// JSON file holding stored sightings
        #[arg(short, long, default_value = "sightings.json")]
        data_file: String,

        /// Keep sightings in memory only, lost on restart
        #[arg(short, long, conflicts_with = "data_file")]
        memory: bool,
    },

    /// Write stored sightings to a CSV file
    Export {
        #[arg(short, long, default_value = "sightings.json")]
        data_file: String,

        /// Output CSV filename
        #[arg(short, long, default_value = "sightings.csv")]
        output: String,
    },

    /// Print a short report of stored sightings
    Summary {
        #[arg(short, long, default_value = "sightings.json")]
        data_file: String,
    },
}
