use rayon::prelude::*;
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, warn};

use crate::direction::{
    Config, Direction, DirectionSink, DirectionTable, DirectionTag, Error, Schedule, assign,
    cluster::{self, Candidate, Unresolved},
    headsign,
};

/// Directions of one route before they are merged into the table.
#[derive(Debug, Default)]
struct RouteDirections {
    route_idx: u32,
    tags: Vec<DirectionTag>,
    trips: Vec<(u32, DirectionTag)>,
}

/// Result of a full run.
#[derive(Debug, Clone, Default)]
pub struct Inference {
    /// Direction of every trip that has stop times.
    pub table: DirectionTable,
    /// One entry per route and direction, ordered by route then tag.
    pub directions: Vec<Direction>,
}

impl Inference {
    pub fn direction(&self, trip_idx: u32) -> Option<DirectionTag> {
        self.table.direction(trip_idx)
    }

    /// Resolves the headsign of a route's direction on demand.
    pub fn resolve_headsign<S: Schedule>(
        &self,
        schedule: &S,
        route_idx: u32,
        tag: DirectionTag,
    ) -> Option<Arc<str>> {
        headsign::resolve(schedule, &self.table, route_idx, tag)
    }

    pub fn directions_by_route_idx(&self, route_idx: u32) -> impl Iterator<Item = &Direction> {
        self.directions
            .iter()
            .filter(move |direction| direction.route_idx == route_idx)
    }
}

/// Runs direction inference over every route of a schedule.
///
/// Routes are independent and solved in parallel. A route that cannot be
/// split into at most two directions fails the whole run.
pub struct DirectionEngine<'a, S: Schedule> {
    schedule: &'a S,
    config: Config,
}

impl<'a, S: Schedule> DirectionEngine<'a, S> {
    pub fn new(schedule: &'a S) -> Self {
        Self {
            schedule,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn solve(self) -> Result<Inference, Error> {
        debug!("Inferring directions...");
        let now = Instant::now();
        let schedule = self.schedule;
        let routes: Vec<RouteDirections> = (0..schedule.route_count() as u32)
            .into_par_iter()
            .map(|route_idx| self.solve_route(route_idx))
            .collect::<Result<_, _>>()?;

        let mut table = DirectionTable::new(schedule.trip_count());
        routes.iter().for_each(|route| {
            route
                .trips
                .iter()
                .for_each(|(trip_idx, tag)| table.assign_direction(*trip_idx, *tag));
        });

        let mut directions: Vec<Direction> = routes
            .par_iter()
            .flat_map_iter(|route| {
                let table = &table;
                route.tags.iter().map(move |tag| Direction {
                    route_idx: route.route_idx,
                    route_id: schedule.route(route.route_idx).id.clone(),
                    tag: *tag,
                    headsign: headsign::resolve(schedule, table, route.route_idx, *tag),
                })
            })
            .collect();
        directions.par_sort_by_key(|direction| (direction.route_idx, direction.tag));

        info!(
            "Inferred {} directions for {} trips on {} routes in {:?}",
            directions.len(),
            table.assigned(),
            routes.iter().filter(|route| !route.tags.is_empty()).count(),
            now.elapsed()
        );
        Ok(Inference { table, directions })
    }

    fn solve_route(&self, route_idx: u32) -> Result<RouteDirections, Error> {
        let route = self.schedule.route(route_idx);
        if self.config.feed_direction_routes.contains(&route.id) {
            return Ok(self.feed_directions(route_idx));
        }

        let sequences = self
            .schedule
            .trips_by_route(route_idx)
            .iter()
            .map(|trip_idx| {
                let stops = self
                    .schedule
                    .stop_times(*trip_idx)
                    .iter()
                    .map(|stop_time| stop_time.stop_idx)
                    .collect();
                (*trip_idx, stops)
            })
            .collect();
        let sequences = cluster::prepare(sequences);
        if sequences.is_empty() {
            debug!("Route {} has no trips with stop times", route.id);
            return Ok(RouteDirections {
                route_idx,
                ..Default::default()
            });
        }

        let candidates = cluster::cluster(&sequences, &self.config)
            .map_err(|unresolved| self.unresolved(&route.id, unresolved))?;
        let mut trips: Vec<(u32, DirectionTag)> = Vec::with_capacity(sequences.len());
        let tags = assign::assign(&route.id, &candidates, &mut trips)?;
        debug!(
            "Route {} split into {} direction(s) over {} trips",
            route.id,
            tags.len(),
            trips.len()
        );
        Ok(RouteDirections {
            route_idx,
            tags,
            trips,
        })
    }

    /// Takes the directions straight from the feed's `direction_id`.
    fn feed_directions(&self, route_idx: u32) -> RouteDirections {
        let route = self.schedule.route(route_idx);
        let mut missing = 0usize;
        let trips: Vec<(u32, DirectionTag)> = self
            .schedule
            .trips_by_route(route_idx)
            .iter()
            .filter(|trip_idx| !self.schedule.stop_times(**trip_idx).is_empty())
            .map(|trip_idx| {
                let tag = match self.schedule.trip(*trip_idx).feed_direction {
                    Some(1) => DirectionTag::Second,
                    Some(0) => DirectionTag::First,
                    _ => {
                        missing += 1;
                        DirectionTag::First
                    }
                };
                (*trip_idx, tag)
            })
            .collect();
        if missing > 0 {
            warn!(
                "Route {} trusts feed directions but {missing} trips have no usable direction_id",
                route.id
            );
        }
        let mut tags: Vec<DirectionTag> = trips.iter().map(|(_, tag)| *tag).collect();
        tags.sort();
        tags.dedup();
        RouteDirections {
            route_idx,
            tags,
            trips,
        }
    }

    fn unresolved(&self, route_id: &Arc<str>, unresolved: Unresolved) -> Error {
        let describe = |candidate: Option<&Candidate>| -> String {
            candidate
                .map(|candidate| {
                    let trips: Vec<String> = candidate
                        .trips
                        .iter()
                        .map(|trip_idx| self.schedule.trip(*trip_idx).id.to_string())
                        .collect();
                    format!(
                        "trips [{}] stops [{}]",
                        trips.join(", "),
                        self.stop_ids(&candidate.stops)
                    )
                })
                .unwrap_or_default()
        };
        Error::Unresolved {
            route_id: route_id.clone(),
            trip_id: self.schedule.trip(unresolved.trip_idx).id.clone(),
            trip_stops: self.stop_ids(&unresolved.stops),
            first: describe(unresolved.candidates.first()),
            second: describe(unresolved.candidates.get(1)),
        }
    }

    fn stop_ids(&self, stops: &[u32]) -> String {
        stops
            .iter()
            .map(|stop_idx| {
                self.schedule
                    .stop_id(*stop_idx)
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| format!("#{stop_idx}"))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
