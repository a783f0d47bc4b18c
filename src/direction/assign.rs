use std::sync::Arc;

use crate::direction::{DirectionSink, DirectionTag, Error, cluster::Candidate};

/// Tags every member trip of `candidates` and returns the tag of each
/// candidate, in candidate order.
///
/// With two candidates the one with the smaller [`Candidate::ordering_key`]
/// becomes [`DirectionTag::First`]; equal keys keep creation order. The key
/// carries no geographic meaning, it only makes reruns on the same feed
/// agree with each other.
pub fn assign<S: DirectionSink>(
    route_id: &Arc<str>,
    candidates: &[Candidate],
    sink: &mut S,
) -> Result<Vec<DirectionTag>, Error> {
    let tags = match candidates {
        [_] => vec![DirectionTag::Single],
        [a, b] if b.ordering_key() < a.ordering_key() => {
            vec![DirectionTag::Second, DirectionTag::First]
        }
        [_, _] => vec![DirectionTag::First, DirectionTag::Second],
        _ => {
            return Err(Error::Inconsistent {
                route_id: route_id.clone(),
                count: candidates.len(),
            });
        }
    };
    candidates
        .iter()
        .zip(tags.iter())
        .for_each(|(candidate, tag)| {
            candidate
                .trips
                .iter()
                .for_each(|trip_idx| sink.assign_direction(*trip_idx, *tag));
        });
    Ok(tags)
}
