//! Direction and headsign inference for GTFS feeds.
//!
//! Feeds often get `direction_id` wrong or leave it out, so the directions
//! of a route are inferred from the stop sequences of its trips instead.
//!
//! ```no_run
//! use bearing::prelude::*;
//!
//! let gtfs = GtfsReader::new(Default::default()).from_zip("feed.zip");
//! let repository = Repository::new().load_gtfs(gtfs)?;
//! let inference = repository.directions().solve()?;
//! for direction in &inference.directions {
//!     println!("{} {:?} {:?}", direction.route_id, direction.tag, direction.headsign);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod direction;
pub mod gtfs;
pub mod repository;
pub mod shared;

pub mod prelude {
    pub use crate::{
        direction::{
            Config, Direction, DirectionEngine, DirectionSink, DirectionTable, DirectionTag,
            Inference, Schedule,
        },
        gtfs::GtfsReader,
        repository::{Repository, Route, StopTime, Trip},
    };
}
