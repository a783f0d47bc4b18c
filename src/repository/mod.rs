mod entities;
mod source;

pub use entities::*;

use std::sync::Arc;

use crate::{
    direction::{DirectionEngine, Schedule},
    shared::Interner,
};

/// Materialized view of the feed tables the direction engine reads.
///
/// Stop, route and trip identifiers are interned, so every entity is
/// addressed by a dense `u32` index into the arrays below.
#[derive(Debug, Default)]
pub struct Repository {
    pub routes: Box<[Route]>,
    pub trips: Box<[Trip]>,
    /// Flat array of stop times, grouped per trip and sorted by sequence.
    pub stop_times: Box<[StopTime]>,

    stop_ids: Interner,
    route_ids: Interner,
    trip_ids: Interner,
    route_to_trips: Box<[Box<[u32]>]>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Get a route with the given id.
    /// If no route is found with the given id None is returned.
    pub fn route_by_id(&self, id: &str) -> Option<&Route> {
        let route_idx = self.route_ids.get(id)?;
        self.routes.get(route_idx as usize)
    }

    /// Gets a trip with the given id.
    /// If no trip with the given id was found None is returned.
    pub fn trip_by_id(&self, id: &str) -> Option<&Trip> {
        let trip_idx = self.trip_ids.get(id)?;
        self.trips.get(trip_idx as usize)
    }

    pub fn trips_by_route_idx(&self, route_idx: u32) -> Vec<&Trip> {
        self.route_to_trips
            .get(route_idx as usize)
            .map(|trips| {
                trips
                    .iter()
                    .map(|trip_idx| &self.trips[*trip_idx as usize])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the stop times of a trip, ordered by stop sequence.
    pub fn stop_times_by_trip_idx(&self, trip_idx: u32) -> &[StopTime] {
        self.trips
            .get(trip_idx as usize)
            .map(|trip| &self.stop_times[trip.slice.range()])
            .unwrap_or_default()
    }

    /// The interned stops a trip visits, in order.
    pub fn stop_sequence(&self, trip_idx: u32) -> Vec<u32> {
        self.stop_times_by_trip_idx(trip_idx)
            .iter()
            .map(|stop_time| stop_time.stop_idx)
            .collect()
    }

    pub fn stop_idx(&self, stop_id: &str) -> Option<u32> {
        self.stop_ids.get(stop_id)
    }

    pub fn directions(&self) -> DirectionEngine<'_, Self> {
        DirectionEngine::new(self)
    }
}

impl Schedule for Repository {
    fn route_count(&self) -> usize {
        self.routes.len()
    }

    fn trip_count(&self) -> usize {
        self.trips.len()
    }

    fn route(&self, route_idx: u32) -> &Route {
        &self.routes[route_idx as usize]
    }

    fn trips_by_route(&self, route_idx: u32) -> &[u32] {
        self.route_to_trips
            .get(route_idx as usize)
            .map(|trips| &trips[..])
            .unwrap_or_default()
    }

    fn trip(&self, trip_idx: u32) -> &Trip {
        &self.trips[trip_idx as usize]
    }

    fn stop_times(&self, trip_idx: u32) -> &[StopTime] {
        self.stop_times_by_trip_idx(trip_idx)
    }

    fn stop_id(&self, stop_idx: u32) -> Option<Arc<str>> {
        self.stop_ids.resolve(stop_idx)
    }
}
