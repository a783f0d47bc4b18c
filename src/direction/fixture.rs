use std::sync::Arc;

use crate::{
    direction::Schedule,
    repository::{Route, Slice, StopTime, Trip},
    shared::Interner,
};

/// In-memory schedule for unit tests.
#[derive(Debug, Default)]
pub(crate) struct Fixture {
    routes: Vec<Route>,
    trips: Vec<Trip>,
    stop_times: Vec<StopTime>,
    route_to_trips: Vec<Vec<u32>>,
    stops: Interner,
}

impl Fixture {
    pub(crate) fn route(mut self, id: &str) -> Self {
        let index = self.routes.len() as u32;
        self.routes.push(Route {
            index,
            id: id.into(),
            ..Default::default()
        });
        self.route_to_trips.push(Vec::new());
        self
    }

    /// Adds a trip to the last added route.
    pub(crate) fn trip(mut self, id: &str, head_sign: Option<&str>, stops: &[&str]) -> Self {
        self.push_trip(id, head_sign, None, stops);
        self
    }

    pub(crate) fn feed_trip(mut self, id: &str, direction: Option<u8>, stops: &[&str]) -> Self {
        self.push_trip(id, None, direction, stops);
        self
    }

    fn push_trip(
        &mut self,
        id: &str,
        head_sign: Option<&str>,
        feed_direction: Option<u8>,
        stops: &[&str],
    ) {
        let index = self.trips.len() as u32;
        let route_idx = self.routes.len() as u32 - 1;
        let slice = Slice {
            start_idx: self.stop_times.len() as u32,
            count: stops.len() as u32,
        };
        stops.iter().enumerate().for_each(|(i, stop)| {
            self.stop_times.push(StopTime {
                trip_idx: index,
                stop_idx: self.stops.intern(stop),
                sequence: i as u32 + 1,
                ..Default::default()
            });
        });
        self.trips.push(Trip {
            index,
            id: id.into(),
            route_idx,
            head_sign: head_sign.map(|val| val.into()),
            feed_direction,
            slice,
            ..Default::default()
        });
        self.route_to_trips[route_idx as usize].push(index);
    }

    /// Sets the stop headsign of a trip's first stop time.
    pub(crate) fn stop_headsign(mut self, trip_idx: u32, head_sign: &str) -> Self {
        let start = self.trips[trip_idx as usize].slice.start_idx as usize;
        self.stop_times[start].headsign = Some(head_sign.into());
        self
    }
}

impl Schedule for Fixture {
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
        &self.route_to_trips[route_idx as usize]
    }

    fn trip(&self, trip_idx: u32) -> &Trip {
        &self.trips[trip_idx as usize]
    }

    fn stop_times(&self, trip_idx: u32) -> &[StopTime] {
        &self.stop_times[self.trips[trip_idx as usize].slice.range()]
    }

    fn stop_id(&self, stop_idx: u32) -> Option<Arc<str>> {
        self.stops.resolve(stop_idx)
    }
}
