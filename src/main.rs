mod classify;
mod error;
mod parse;
mod record;
mod report;
mod routes;
mod server;
mod service;
mod store;
mod util;
mod validate;

use crate::parse::{Args, Command};
use crate::report::{print_summary, save_to_csv};
use crate::service::SubmissionService;
use crate::store::{JsonFileStore, MemoryStore, SightingStore};
use clap::Parser;
use log::info;
use std::sync::Arc;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::try_parse()?;
    init_logger(args.verbose);

    match args.command {
        Command::Serve {
            port,
            data_file,
            memory,
        } => {
            let store: Arc<dyn SightingStore> = if memory {
                info!("Using in-memory sightings store");
                Arc::new(MemoryStore::new())
            } else {
                info!("Using sightings file {}", data_file);
                Arc::new(JsonFileStore::new(data_file))
            };

            let service = SubmissionService::new(store);
            server::start_server(Arc::new(service), port).await?;
        }
        Command::Export { data_file, output } => {
            let records = JsonFileStore::new(data_file).list_all()?;
            save_to_csv(&records, &output)?;
        }
        Command::Summary { data_file } => {
            let records = JsonFileStore::new(data_file).list_all()?;
            print_summary(&records);
        }
    }

    Ok(())
}
