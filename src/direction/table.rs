use crate::direction::{DirectionSink, DirectionTag};

/// Inferred direction per trip, indexed by trip index.
/// Trips that were never assigned report `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionTable {
    directions: Vec<Option<DirectionTag>>,
}

impl DirectionTable {
    pub fn new(trip_count: usize) -> Self {
        Self {
            directions: vec![None; trip_count],
        }
    }

    pub fn direction(&self, trip_idx: u32) -> Option<DirectionTag> {
        self.directions.get(trip_idx as usize).copied().flatten()
    }

    /// Number of trips that have a direction.
    pub fn assigned(&self) -> usize {
        self.directions.iter().filter(|tag| tag.is_some()).count()
    }
}

impl DirectionSink for DirectionTable {
    fn assign_direction(&mut self, trip_idx: u32, tag: DirectionTag) {
        let idx = trip_idx as usize;
        if idx >= self.directions.len() {
            self.directions.resize(idx + 1, None);
        }
        self.directions[idx] = Some(tag);
    }
}

#[test]
fn unset_by_default() {
    let table = DirectionTable::new(3);
    assert_eq!(table.direction(0), None);
    assert_eq!(table.direction(7), None);
    assert_eq!(table.assigned(), 0);
}

#[test]
fn assign_grows_when_needed() {
    let mut table = DirectionTable::new(1);
    table.assign_direction(0, DirectionTag::First);
    table.assign_direction(4, DirectionTag::Second);
    assert_eq!(table.direction(0), Some(DirectionTag::First));
    assert_eq!(table.direction(3), None);
    assert_eq!(table.direction(4), Some(DirectionTag::Second));
    assert_eq!(table.assigned(), 2);
}
