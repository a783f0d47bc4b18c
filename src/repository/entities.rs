use std::sync::Arc;

use crate::gtfs::{GtfsRoute, GtfsStopTime};

/// A contiguous range inside one of the repository's flat arrays.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub start_idx: u32,
    pub count: u32,
}

impl Slice {
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.start_idx as usize;
        start..start + self.count as usize
    }
}

/// A transit line as published by the agency.
#[derive(Debug, Default, Clone)]
pub struct Route {
    /// The global internal index used for O(1) array lookups in the repository.
    pub index: u32,
    /// The unique external identifier.
    pub id: Arc<str>,
}

impl From<GtfsRoute> for Route {
    fn from(value: GtfsRoute) -> Self {
        Self {
            index: u32::MAX,
            id: value.route_id.into(),
        }
    }
}

/// One scheduled run of a vehicle along a route.
///
/// Direction is deliberately absent: it is inferred and stored outside the
/// trip, see [`crate::direction::DirectionTable`].
#[derive(Debug, Default, Clone)]
pub struct Trip {
    /// Global internal index of the trip.
    pub index: u32,
    /// Unique external identifier.
    pub id: Arc<str>,
    /// Internal index of the owning [`Route`].
    pub route_idx: u32,
    /// Destination label as published in the feed, possibly blank.
    pub head_sign: Option<Arc<str>>,
    /// The `direction_id` the feed claims, only trusted on request.
    pub feed_direction: Option<u8>,
    /// The trip's stop times inside [`crate::repository::Repository::stop_times`].
    pub slice: Slice,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StopAccessType {
    #[default]
    Regularly,
    NoneAvailable,
    AgencyArrange,
    DriverArrange,
}

impl From<Option<u8>> for StopAccessType {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(1) => Self::NoneAvailable,
            Some(2) => Self::AgencyArrange,
            Some(3) => Self::DriverArrange,
            _ => Self::Regularly,
        }
    }
}

/// Individual event within a trip where a vehicle calls at a stop.
#[derive(Debug, Default, Clone)]
pub struct StopTime {
    /// Internal index of the parent [`Trip`].
    pub trip_idx: u32,
    /// Interned stop identifier.
    pub stop_idx: u32,
    /// The order of this stop within the trip, as published.
    pub sequence: u32,
    pub headsign: Option<Arc<str>>,
    pub pickup_type: StopAccessType,
    pub drop_off_type: StopAccessType,
}

impl From<GtfsStopTime> for StopTime {
    fn from(value: GtfsStopTime) -> Self {
        Self {
            trip_idx: u32::MAX,
            stop_idx: u32::MAX,
            sequence: value.stop_sequence,
            headsign: value.stop_headsign.map(|val| val.into()),
            pickup_type: value.pickup_type.into(),
            drop_off_type: value.drop_off_type.into(),
        }
    }
}
