use crate::{
    gtfs::{self, GtfsReader},
    repository::{Repository, Route, Slice, StopTime, Trip},
};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, warn};

impl Repository {
    pub fn load_gtfs(mut self, gtfs: GtfsReader) -> Result<Self, gtfs::Error> {
        self.load_routes(&gtfs)?;
        self.load_trips(&gtfs)?;
        self.load_stop_times(&gtfs)?;
        Ok(self)
    }

    fn load_routes(&mut self, gtfs: &GtfsReader) -> Result<(), gtfs::Error> {
        debug!("Loading routes...");
        let now = Instant::now();
        let mut routes: Vec<Route> = Vec::new();
        let mut duplicates = 0usize;
        gtfs.stream_routes(|(_, route)| {
            if self.route_ids.get(&route.route_id).is_some() {
                duplicates += 1;
                return;
            }
            let mut value: Route = route.into();
            value.index = self.route_ids.intern(&value.id);
            routes.push(value);
        })?;
        if duplicates > 0 {
            warn!("Ignored {duplicates} routes with an already seen route_id");
        }
        self.routes = routes.into();
        debug!("Loading routes took {:?}", now.elapsed());
        Ok(())
    }

    fn load_trips(&mut self, gtfs: &GtfsReader) -> Result<(), gtfs::Error> {
        debug!("Loading trips...");
        let now = Instant::now();
        let mut route_to_trips: Vec<Vec<u32>> = vec![Vec::new(); self.routes.len()];
        let mut trips: Vec<Trip> = Vec::new();
        let mut orphans = 0usize;
        let mut duplicates = 0usize;
        gtfs.stream_trips(|(_, trip)| {
            let Some(route_idx) = self.route_ids.get(&trip.route_id) else {
                orphans += 1;
                return;
            };
            if self.trip_ids.get(&trip.trip_id).is_some() {
                duplicates += 1;
                return;
            }
            let index = self.trip_ids.intern(&trip.trip_id);
            let value = Trip {
                index,
                id: trip.trip_id.into(),
                route_idx,
                head_sign: trip.trip_headsign.map(|val| val.into()),
                feed_direction: trip.direction_id,
                slice: Slice::default(),
            };
            route_to_trips[route_idx as usize].push(index);
            trips.push(value);
        })?;
        if orphans > 0 {
            warn!("Ignored {orphans} trips that reference an unknown route");
        }
        if duplicates > 0 {
            warn!("Ignored {duplicates} trips with an already seen trip_id");
        }
        self.trips = trips.into();
        self.route_to_trips = route_to_trips.into_iter().map(|val| val.into()).collect();
        debug!("Loading trips took {:?}", now.elapsed());
        Ok(())
    }

    fn load_stop_times(&mut self, gtfs: &GtfsReader) -> Result<(), gtfs::Error> {
        debug!("Loading stop times...");
        let now = Instant::now();
        // Feeds usually list stop times grouped by trip, but nothing requires
        // it, so every trip gets its own bucket before flattening.
        let mut buckets: Vec<Vec<StopTime>> = vec![Vec::new(); self.trips.len()];
        let mut orphans = 0usize;
        gtfs.stream_stop_times(|(_, stop_time)| {
            let Some(trip_idx) = self.trip_ids.get(&stop_time.trip_id) else {
                orphans += 1;
                return;
            };
            let stop_idx = self.stop_ids.intern(&stop_time.stop_id);
            let mut value: StopTime = stop_time.into();
            value.trip_idx = trip_idx;
            value.stop_idx = stop_idx;
            buckets[trip_idx as usize].push(value);
        })?;
        if orphans > 0 {
            warn!("Ignored {orphans} stop times that reference an unknown trip");
        }

        buckets
            .par_iter_mut()
            .for_each(|bucket| bucket.sort_by_key(|stop_time| stop_time.sequence));

        let mut stop_times: Vec<StopTime> = Vec::with_capacity(buckets.iter().map(Vec::len).sum());
        buckets
            .into_iter()
            .zip(self.trips.iter_mut())
            .for_each(|(mut bucket, trip)| {
                trip.slice = Slice {
                    start_idx: stop_times.len() as u32,
                    count: bucket.len() as u32,
                };
                stop_times.append(&mut bucket);
            });
        self.stop_times = stop_times.into();

        debug!(
            "Loading stop times took {:?} ({} stops interned)",
            now.elapsed(),
            self.stop_ids.len()
        );
        Ok(())
    }
}
