//! Direction inference.
//!
//! Trips of a route are grouped into at most two direction candidates by
//! comparing their stop sequences ([`cluster`]), the candidates are turned
//! into direction tags ([`assign`]), and each direction gets one headsign
//! picked from the possibly inconsistent headsigns of its trips
//! ([`headsign`]). [`DirectionEngine`] runs all of it for every route.

pub mod assign;
pub mod cluster;
mod engine;
#[cfg(test)]
mod fixture;
pub mod headsign;
pub mod sequence;
mod table;

pub use engine::*;
pub use table::*;

use std::{collections::HashSet, sync::Arc};
use thiserror::Error;

use crate::repository::{Route, StopTime, Trip};

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Route {route_id} needs more than two directions: trip {trip_id} with stops [{trip_stops}] fits neither {first} nor {second}"
    )]
    Unresolved {
        route_id: Arc<str>,
        trip_id: Arc<str>,
        trip_stops: String,
        first: String,
        second: String,
    },
    #[error("Route {route_id} ended up with {count} direction candidates, expected 1 or 2")]
    Inconsistent { route_id: Arc<str>, count: usize },
}

/// The direction a trip was assigned to.
///
/// `First` and `Second` are ordinals, not compass points: which physical
/// direction ends up as `First` only depends on a stable ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectionTag {
    /// The route only runs one way (or is a loop).
    Single,
    First,
    Second,
}

impl DirectionTag {
    /// The matching GTFS `direction_id`.
    pub const fn as_gtfs_id(&self) -> u8 {
        match self {
            Self::Single | Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// A resolved direction of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    pub route_idx: u32,
    pub route_id: Arc<str>,
    pub tag: DirectionTag,
    pub headsign: Option<Arc<str>>,
}

/// Tuning of the clustering heuristics.
/// The defaults are the values the heuristics were designed around.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum overlap score for a trip to join a candidate outright.
    pub near_exact_threshold: f64,
    /// Score the better of two candidates must exceed to win.
    pub dominant_threshold: f64,
    /// Share of a trip's length by which one order-preserving intersection
    /// must beat the other.
    pub intersection_dominance: f64,
    /// A continuation must be shorter than this share of the candidate.
    pub continuation_ratio: f64,
    /// Routes whose feed `direction_id` is trusted instead of inferred.
    pub feed_direction_routes: HashSet<Arc<str>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            near_exact_threshold: 0.90,
            dominant_threshold: 0.75,
            intersection_dominance: 0.75,
            continuation_ratio: 0.5,
            feed_direction_routes: HashSet::new(),
        }
    }
}

impl Config {
    pub fn trust_feed_direction<S: Into<Arc<str>>>(mut self, route_id: S) -> Self {
        self.feed_direction_routes.insert(route_id.into());
        self
    }
}

/// Read access to the schedule, as needed by the engine.
///
/// Indices handed out by one method are valid for every other method of the
/// same schedule. Stop times must be ordered by stop sequence.
pub trait Schedule: Sync {
    fn route_count(&self) -> usize;
    fn trip_count(&self) -> usize;
    fn route(&self, route_idx: u32) -> &Route;
    fn trips_by_route(&self, route_idx: u32) -> &[u32];
    fn trip(&self, trip_idx: u32) -> &Trip;
    fn stop_times(&self, trip_idx: u32) -> &[StopTime];
    /// The external identifier behind an interned stop.
    fn stop_id(&self, stop_idx: u32) -> Option<Arc<str>>;
}

/// Receives the direction of every trip once clustering is done.
pub trait DirectionSink {
    fn assign_direction(&mut self, trip_idx: u32, tag: DirectionTag);
}

impl DirectionSink for Vec<(u32, DirectionTag)> {
    fn assign_direction(&mut self, trip_idx: u32, tag: DirectionTag) {
        self.push((trip_idx, tag));
    }
}

#[test]
fn gtfs_ids() {
    assert_eq!(DirectionTag::Single.as_gtfs_id(), 0);
    assert_eq!(DirectionTag::First.as_gtfs_id(), 0);
    assert_eq!(DirectionTag::Second.as_gtfs_id(), 1);
}

#[test]
fn unresolved_error_names_everything() {
    let err = Error::Unresolved {
        route_id: "7".into(),
        trip_id: "t3".into(),
        trip_stops: "c, d".into(),
        first: "trips [t1] stops [a, b]".into(),
        second: "trips [t2] stops [x, y]".into(),
    };
    assert_eq!(
        err.to_string(),
        "Route 7 needs more than two directions: trip t3 with stops [c, d] fits neither trips [t1] stops [a, b] nor trips [t2] stops [x, y]"
    );
}
