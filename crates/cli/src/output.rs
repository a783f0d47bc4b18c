use bearing::{direction::Inference, repository::Repository};
use serde::Serialize;
use std::{fs, io, path::Path};

#[derive(Debug, Serialize)]
struct DirectionRow<'a> {
    route_id: &'a str,
    direction_id: u8,
    headsign: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct TripDirectionRow<'a> {
    trip_id: &'a str,
    route_id: &'a str,
    direction_id: u8,
}

/// Writes `directions.txt` and `trip_directions.txt` into `out_dir`.
pub fn write(out_dir: &Path, repository: &Repository, inference: &Inference) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let mut writer = csv::Writer::from_path(out_dir.join("directions.txt"))?;
    for direction in &inference.directions {
        writer.serialize(DirectionRow {
            route_id: &direction.route_id,
            direction_id: direction.tag.as_gtfs_id(),
            headsign: direction.headsign.as_deref(),
        })?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(out_dir.join("trip_directions.txt"))?;
    for trip in repository.trips.iter() {
        let Some(tag) = inference.direction(trip.index) else {
            continue;
        };
        writer.serialize(TripDirectionRow {
            trip_id: &trip.id,
            route_id: &repository.routes[trip.route_idx as usize].id,
            direction_id: tag.as_gtfs_id(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
