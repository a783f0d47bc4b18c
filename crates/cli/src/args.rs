use bearing::direction::Config;
use clap::Parser;
use std::path::PathBuf;

/// Infers route directions and headsigns for a GTFS feed.
#[derive(Debug, Parser)]
#[command(name = "bearing")]
pub struct Args {
    /// GTFS feed, either a zip archive or an unpacked directory.
    pub feed: PathBuf,
    /// Directory for directions.txt and trip_directions.txt.
    pub out_dir: Option<PathBuf>,
    /// Use the feed's direction_id for this route instead of inferring it.
    #[arg(long = "trust-feed", value_name = "ROUTE_ID")]
    pub trust_feed: Vec<String>,
}

impl Args {
    pub fn config(&self) -> Config {
        self.trust_feed
            .iter()
            .fold(Config::default(), |config, route_id| {
                config.trust_feed_direction(route_id.as_str())
            })
    }
}
