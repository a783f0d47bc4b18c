mod common;

use bearing::{
    gtfs::{self, GtfsReader},
    repository::{Repository, StopAccessType},
};
use tempfile::tempdir;

fn load_directory(files: &[(&str, String)]) -> Repository {
    let dir = tempdir().unwrap();
    common::write_directory(dir.path(), files);
    let gtfs = GtfsReader::new(Default::default()).from_directory(dir.path());
    Repository::new().load_gtfs(gtfs).unwrap()
}

#[test]
fn load_from_directory_test() {
    let repository = load_directory(&common::feed());
    assert_eq!(repository.routes.len(), 2);
    // The trip pointing at route 9 is dropped along with its stop time.
    assert_eq!(repository.trips.len(), 7);
    assert!(repository.trip_by_id("orphan").is_none());
    assert_eq!(repository.stop_times.len(), 32);

    let route = repository.route_by_id("1").unwrap();
    assert_eq!(route.id.as_ref(), "1");
    assert_eq!(repository.trips_by_route_idx(route.index).len(), 5);
}

#[test]
fn load_from_zip_test() {
    let dir = tempdir().unwrap();
    let zip_path = dir.path().join("feed.zip");
    common::write_zip(&zip_path, &common::feed());
    let gtfs = GtfsReader::new(Default::default()).from_path(&zip_path);
    let repository = Repository::new().load_gtfs(gtfs).unwrap();
    assert_eq!(repository.routes.len(), 2);
    assert_eq!(repository.trips.len(), 7);
}

#[test]
fn stop_times_are_sorted_by_sequence() {
    let repository = load_directory(&common::feed());
    let trip = repository.trip_by_id("back-a").unwrap();
    let sequences: Vec<u32> = repository
        .stop_times_by_trip_idx(trip.index)
        .iter()
        .map(|stop_time| stop_time.sequence)
        .collect();
    assert_eq!(sequences, vec![1, 2, 3, 4, 5, 6]);

    let stops: Vec<u32> = ["S6", "S5", "S4", "S3", "S2", "S1"]
        .iter()
        .map(|id| repository.stop_idx(id).unwrap())
        .collect();
    assert_eq!(repository.stop_sequence(trip.index), stops);
}

#[test]
fn stop_time_fields_are_parsed() {
    let repository = load_directory(&common::feed());
    let trip = repository.trip_by_id("express").unwrap();
    let stop_times = repository.stop_times_by_trip_idx(trip.index);
    assert_eq!(stop_times.len(), 3);
    assert_eq!(stop_times[1].pickup_type, StopAccessType::NoneAvailable);
    assert_eq!(stop_times[0].pickup_type, StopAccessType::Regularly);

    let loop_b = repository.trip_by_id("loop-b").unwrap();
    let first = &repository.stop_times_by_trip_idx(loop_b.index)[0];
    assert_eq!(first.headsign.as_deref(), Some("Circle"));
}

#[test]
fn unparsable_times_do_not_matter() {
    let stop_times = common::STOP_TIMES
        .replace("express,25:00:00,25:00:00", "express,2000000:00:00,soon")
        .replace("express,25:20:00,25:20:00", "express,,");
    let files = vec![
        ("routes.txt", common::ROUTES.to_string()),
        ("trips.txt", common::TRIPS.to_string()),
        ("stop_times.txt", stop_times),
    ];
    let repository = load_directory(&files);
    let trip = repository.trip_by_id("express").unwrap();
    assert_eq!(repository.stop_times_by_trip_idx(trip.index).len(), 3);
}

#[test]
fn feed_direction_is_kept_as_published() {
    let repository = load_directory(&common::feed());
    assert_eq!(repository.trip_by_id("out-b").unwrap().feed_direction, Some(1));
    assert_eq!(repository.trip_by_id("short").unwrap().feed_direction, None);
}

#[test]
fn missing_file_test() {
    let dir = tempdir().unwrap();
    let files: Vec<_> = common::feed()
        .into_iter()
        .filter(|(name, _)| *name != "stop_times.txt")
        .collect();
    common::write_directory(dir.path(), &files);
    let gtfs = GtfsReader::new(Default::default()).from_directory(dir.path());
    match Repository::new().load_gtfs(gtfs) {
        Err(gtfs::Error::FileNotFound(name)) => assert_eq!(name, "stop_times.txt"),
        other => panic!("expected a missing file error, got {other:?}"),
    }
}

#[test]
fn missing_archive_test() {
    let dir = tempdir().unwrap();
    let gtfs = GtfsReader::new(Default::default()).from_zip(dir.path().join("nope.zip"));
    assert!(matches!(
        Repository::new().load_gtfs(gtfs),
        Err(gtfs::Error::Io(_))
    ));
}

#[test]
fn custom_file_names_test() {
    let dir = tempdir().unwrap();
    let files: Vec<_> = common::feed()
        .into_iter()
        .map(|(name, content)| {
            if name == "trips.txt" {
                ("trips_v2.txt", content)
            } else {
                (name, content)
            }
        })
        .collect();
    common::write_directory(dir.path(), &files);
    let config = gtfs::Config {
        trips_file_name: "trips_v2.txt".into(),
        ..Default::default()
    };
    let gtfs = GtfsReader::new(config).from_directory(dir.path());
    let repository = Repository::new().load_gtfs(gtfs).unwrap();
    assert_eq!(repository.trips.len(), 7);
}
