//! Grouping of a route's trips into at most two direction candidates.
//!
//! Trips are visited longest first. Each trip goes through a fixed list of
//! tests and joins the candidate picked by the first test that decides;
//! when none decides a new candidate is started, and when two candidates
//! already exist the route cannot be clustered.

use std::{cmp::Reverse, collections::HashSet};
use tracing::trace;

use crate::direction::{
    Config,
    sequence::{contains_subsequence, intersect_preserving_order, overlap_score},
};

/// A group of trips believed to travel the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Member trips, in the order they joined.
    pub trips: Vec<u32>,
    /// Skeleton stop sequence. Starts as the first member's stops and only
    /// ever grows at its ends.
    pub stops: Vec<u32>,
}

impl Candidate {
    fn new(trip_idx: u32, stops: &[u32]) -> Self {
        Self {
            trips: vec![trip_idx],
            stops: stops.to_vec(),
        }
    }

    /// Sum of the interned stop ids, used to order two candidates.
    pub fn ordering_key(&self) -> u64 {
        self.stops.iter().map(|stop| *stop as u64).sum()
    }
}

/// A trip that fits neither of the two existing candidates.
#[derive(Debug, Clone)]
pub struct Unresolved {
    pub trip_idx: u32,
    pub stops: Vec<u32>,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Head,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Join(usize),
    Extend(usize, End),
    New,
    Unresolved,
}

/// Drops trips without stops and orders the rest longest first.
/// Trips of equal length keep their relative order.
pub fn prepare(mut sequences: Vec<(u32, Vec<u32>)>) -> Vec<(u32, Vec<u32>)> {
    sequences.retain(|(_, stops)| !stops.is_empty());
    sequences.sort_by_key(|(_, stops)| Reverse(stops.len()));
    sequences
}

/// Clusters `(trip, stops)` pairs that already went through [`prepare`].
pub fn cluster(
    sequences: &[(u32, Vec<u32>)],
    config: &Config,
) -> Result<Vec<Candidate>, Unresolved> {
    let mut candidates: Vec<Candidate> = Vec::with_capacity(2);
    for (trip_idx, stops) in sequences {
        let placement = place(&candidates, stops, config);
        trace!("Trip {trip_idx} placed as {placement:?}");
        match placement {
            Placement::Join(idx) => candidates[idx].trips.push(*trip_idx),
            Placement::Extend(idx, end) => {
                let candidate = &mut candidates[idx];
                extend(&mut candidate.stops, stops, end);
                candidate.trips.push(*trip_idx);
            }
            Placement::New => candidates.push(Candidate::new(*trip_idx, stops)),
            Placement::Unresolved => {
                return Err(Unresolved {
                    trip_idx: *trip_idx,
                    stops: stops.clone(),
                    candidates,
                });
            }
        }
    }
    Ok(candidates)
}

fn place(candidates: &[Candidate], trip: &[u32], config: &Config) -> Placement {
    contained(candidates, trip)
        .or_else(|| near_exact(candidates, trip, config))
        .or_else(|| dominant_score(candidates, trip, config))
        .or_else(|| continuation(candidates, trip, config))
        .or_else(|| single_intersection(candidates, trip))
        .or_else(|| dominant_intersection(candidates, trip, config))
        .unwrap_or(if candidates.len() < 2 {
            Placement::New
        } else {
            Placement::Unresolved
        })
}

/// The index of the only item matching `f`, if exactly one does.
fn only<F>(candidates: &[Candidate], f: F) -> Option<usize>
where
    F: Fn(&Candidate) -> bool,
{
    let mut matches = candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| f(candidate))
        .map(|(idx, _)| idx);
    let first = matches.next()?;
    matches.next().is_none().then_some(first)
}

fn contained(candidates: &[Candidate], trip: &[u32]) -> Option<Placement> {
    only(candidates, |candidate| {
        contains_subsequence(&candidate.stops, trip)
    })
    .map(Placement::Join)
}

fn near_exact(candidates: &[Candidate], trip: &[u32], config: &Config) -> Option<Placement> {
    only(candidates, |candidate| {
        overlap_score(&candidate.stops, trip) >= config.near_exact_threshold
    })
    .map(Placement::Join)
}

fn dominant_score(candidates: &[Candidate], trip: &[u32], config: &Config) -> Option<Placement> {
    let [a, b] = candidates else {
        return None;
    };
    let a = overlap_score(&a.stops, trip);
    let b = overlap_score(&b.stops, trip);
    let (best, high, low) = if a >= b { (0, a, b) } else { (1, b, a) };
    (high > low && high > config.dominant_threshold).then_some(Placement::Join(best))
}

fn continuation(candidates: &[Candidate], trip: &[u32], config: &Config) -> Option<Placement> {
    let end = |candidate: &Candidate| -> Option<End> {
        let short_enough =
            (trip.len() as f64) < candidate.stops.len() as f64 * config.continuation_ratio;
        if !short_enough {
            return None;
        }
        let tail = trip.first() == candidate.stops.last();
        let head = trip.last() == candidate.stops.first();
        match (head, tail) {
            (false, true) => Some(End::Tail),
            (true, false) => Some(End::Head),
            _ => None,
        }
    };
    let idx = only(candidates, |candidate| end(candidate).is_some())?;
    end(&candidates[idx]).map(|end| Placement::Extend(idx, end))
}

fn single_intersection(candidates: &[Candidate], trip: &[u32]) -> Option<Placement> {
    if candidates.len() != 2 {
        return None;
    }
    let stops: HashSet<u32> = trip.iter().copied().collect();
    only(candidates, |candidate| {
        candidate.stops.iter().any(|stop| stops.contains(stop))
    })
    .map(Placement::Join)
}

fn dominant_intersection(
    candidates: &[Candidate],
    trip: &[u32],
    config: &Config,
) -> Option<Placement> {
    let sizes: Vec<usize> = candidates
        .iter()
        .map(|candidate| intersect_preserving_order(&candidate.stops, trip).len())
        .collect();
    if let Some(idx) = sizes.iter().position(|size| *size == trip.len()) {
        return Some(Placement::Join(idx));
    }
    let margin = trip.len() as f64 * config.intersection_dominance;
    match *sizes.as_slice() {
        [a] => (a as f64 > margin).then_some(Placement::Join(0)),
        [a, b] if a > b => ((a - b) as f64 > margin).then_some(Placement::Join(0)),
        [a, b] if b > a => ((b - a) as f64 > margin).then_some(Placement::Join(1)),
        _ => None,
    }
}

/// Grows `stops` with the part of `trip` that lies beyond the shared end stop.
fn extend(stops: &mut Vec<u32>, trip: &[u32], end: End) {
    match end {
        End::Tail => stops.extend_from_slice(&trip[1..]),
        End::Head => {
            stops.splice(0..0, trip[..trip.len() - 1].iter().copied());
        }
    }
}
