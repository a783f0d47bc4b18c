mod args;
mod output;

use crate::args::Args;
use bearing::{gtfs::GtfsReader, repository::Repository};
use clap::Parser;
use std::{process::ExitCode, time::Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    info!("Loading {}...", args.feed.display());
    let now = Instant::now();
    let gtfs = GtfsReader::new(Default::default()).from_path(&args.feed);
    let repository = match Repository::new().load_gtfs(gtfs) {
        Ok(repository) => repository,
        Err(err) => {
            error!("Failed to load feed: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Loaded {} routes and {} trips in {:?}",
        repository.routes.len(),
        repository.trips.len(),
        now.elapsed()
    );

    let inference = match repository.directions().with_config(args.config()).solve() {
        Ok(inference) => inference,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(out_dir) = &args.out_dir {
        if let Err(err) = output::write(out_dir, &repository, &inference) {
            error!("Failed to write results to {}: {err}", out_dir.display());
            return ExitCode::FAILURE;
        }
        info!("Results written to {}", out_dir.display());
    } else {
        for direction in &inference.directions {
            info!(
                "{} [{}] {}",
                direction.route_id,
                direction.tag.as_gtfs_id(),
                direction.headsign.as_deref().unwrap_or("-")
            );
        }
    }
    ExitCode::SUCCESS
}
