//! Picking one headsign per direction.
//!
//! Feeds often label trips of the same direction differently, for example
//! short turns that end before the terminus. When the labels disagree the
//! trip that keeps going furthest past the stops it shares with the current
//! pick wins.

use std::{collections::HashSet, sync::Arc};

use crate::direction::{DirectionTable, DirectionTag, Schedule};

/// The headsign for `tag` on `route_idx`, using the directions in `table`.
pub fn resolve<S: Schedule>(
    schedule: &S,
    table: &DirectionTable,
    route_idx: u32,
    tag: DirectionTag,
) -> Option<Arc<str>> {
    let trips: Vec<u32> = schedule
        .trips_by_route(route_idx)
        .iter()
        .copied()
        .filter(|trip_idx| table.direction(*trip_idx) == Some(tag))
        .collect();
    resolve_trips(schedule, &trips)
}

/// The headsign shared by `trips`, which are assumed to run the same way.
pub fn resolve_trips<S: Schedule>(schedule: &S, trips: &[u32]) -> Option<Arc<str>> {
    let (first, rest) = trips.split_first()?;

    let distinct: HashSet<&str> = trips
        .iter()
        .filter_map(|trip_idx| trip_headsign(schedule, *trip_idx))
        .map(|head_sign| head_sign.trim())
        .collect();
    match distinct.len() {
        0 => return None,
        1 => return trip_headsign_for_any(schedule, trips),
        _ => (),
    }

    let seed = Label::new(schedule, *first);
    let label = rest.iter().fold(seed, |current, trip_idx| {
        let candidate = Label::new(schedule, *trip_idx);
        if runs_further(&current.stops, &candidate.stops) {
            candidate
        } else {
            current
        }
    });
    label.head_sign.map(|head_sign| head_sign.trim().into())
}

struct Label<'a> {
    head_sign: Option<&'a Arc<str>>,
    stops: Vec<u32>,
}

impl<'a> Label<'a> {
    fn new<S: Schedule>(schedule: &'a S, trip_idx: u32) -> Self {
        Self {
            head_sign: trip_headsign(schedule, trip_idx),
            stops: schedule
                .stop_times(trip_idx)
                .iter()
                .map(|stop_time| stop_time.stop_idx)
                .collect(),
        }
    }
}

/// The trip's headsign, or the first stop's headsign when the trip has none.
fn trip_headsign<S: Schedule>(schedule: &S, trip_idx: u32) -> Option<&Arc<str>> {
    let trip = schedule.trip(trip_idx);
    trip.head_sign
        .as_ref()
        .filter(|head_sign| !head_sign.trim().is_empty())
        .or_else(|| {
            schedule
                .stop_times(trip_idx)
                .first()
                .and_then(|stop_time| stop_time.headsign.as_ref())
                .filter(|head_sign| !head_sign.trim().is_empty())
        })
}

fn trip_headsign_for_any<S: Schedule>(schedule: &S, trips: &[u32]) -> Option<Arc<str>> {
    trips
        .iter()
        .find_map(|trip_idx| trip_headsign(schedule, *trip_idx))
        .map(|head_sign| head_sign.trim().into())
}

/// Whether `candidate` keeps going for more stops than `current` after the
/// last stop the two have in common.
///
/// The last common stop is the last stop of the longer list that the shorter
/// list also visits. Without a common stop, or on a tie, `current` stays.
pub(crate) fn runs_further(current: &[u32], candidate: &[u32]) -> bool {
    let (longer, shorter) = if candidate.len() > current.len() {
        (candidate, current)
    } else {
        (current, candidate)
    };
    let in_shorter: HashSet<u32> = shorter.iter().copied().collect();
    let Some(common) = longer.iter().rev().find(|stop| in_shorter.contains(stop)) else {
        return false;
    };
    let remaining = |stops: &[u32]| {
        stops
            .iter()
            .position(|stop| stop == common)
            .map_or(0, |idx| stops.len() - idx)
    };
    remaining(candidate) > remaining(current)
}
