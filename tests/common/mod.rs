#![allow(dead_code)]

use std::{fs, io::Write, path::Path};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

pub const ROUTES: &str = "\
route_id,agency_id,route_short_name,route_long_name,route_type
1,A,1,Harbour - Airport,3
2,A,2,Circle,3
";

// The direction_id column is wrong on purpose for route 1.
pub const TRIPS: &str = "\
route_id,service_id,trip_id,trip_headsign,trip_short_name,direction_id,shape_id
1,wk,out-a,Harbour,,0,
1,wk,out-b,Harbour,,1,
1,wk,short,Midtown,,,
1,wk,back-a,Airport,,1,
1,wk,express,Airport,,0,
2,wk,loop-a,Circle,,,
2,wk,loop-b,,,,
9,wk,orphan,Nowhere,,0,
";

// back-a is listed in reverse stop_sequence order.
pub const STOP_TIMES: &str = "\
trip_id,arrival_time,departure_time,stop_id,stop_sequence,stop_headsign,pickup_type,drop_off_type
out-a,08:00:00,08:00:00,S1,1,,0,0
out-a,08:05:00,08:05:00,S2,2,,0,0
out-a,08:10:00,08:10:00,S3,3,,0,0
out-a,08:15:00,08:15:00,S4,4,,0,0
out-a,08:20:00,08:20:00,S5,5,,0,0
out-a,08:25:00,08:25:00,S6,6,,0,1
out-b,09:00:00,09:00:00,S1,1,,0,0
out-b,09:05:00,09:05:00,S2,2,,0,0
out-b,09:10:00,09:10:00,S3,3,,0,0
out-b,09:15:00,09:15:00,S4,4,,0,0
out-b,09:20:00,09:20:00,S5,5,,0,0
out-b,09:25:00,09:25:00,S6,6,,0,1
short,10:00:00,10:00:00,S1,1,,0,0
short,10:05:00,10:05:00,S2,2,,0,0
short,10:10:00,10:10:00,S3,3,,0,1
back-a,08:25:00,08:25:00,S1,6,,0,1
back-a,08:20:00,08:20:00,S2,5,,0,0
back-a,08:15:00,08:15:00,S3,4,,0,0
back-a,08:10:00,08:10:00,S4,3,,0,0
back-a,08:05:00,08:05:00,S5,2,,0,0
back-a,08:00:00,08:00:00,S6,1,,0,0
express,24:50:00,24:50:00,S6,1,,0,0
express,25:00:00,25:00:00,S4,2,,1,1
express,25:20:00,25:20:00,S1,3,,0,1
loop-a,07:00:00,07:00:00,C1,1,,0,0
loop-a,07:05:00,07:05:00,C2,2,,0,0
loop-a,07:10:00,07:10:00,C3,3,,0,0
loop-a,07:15:00,07:15:00,C1,4,,0,0
loop-b,07:30:00,07:30:00,C1,1,Circle,0,0
loop-b,07:35:00,07:35:00,C2,2,,0,0
loop-b,07:40:00,07:40:00,C3,3,,0,0
loop-b,07:45:00,07:45:00,C1,4,,0,0
orphan,07:00:00,07:00:00,S1,1,,0,0
";

pub fn feed() -> Vec<(&'static str, String)> {
    vec![
        ("routes.txt", ROUTES.to_string()),
        ("trips.txt", TRIPS.to_string()),
        ("stop_times.txt", STOP_TIMES.to_string()),
    ]
}

/// The base feed plus route 3, whose three trips share no stop.
pub fn broken_feed() -> Vec<(&'static str, String)> {
    vec![
        ("routes.txt", format!("{ROUTES}3,A,3,Broken,3\n")),
        (
            "trips.txt",
            format!("{TRIPS}3,wk,p,P,,0,\n3,wk,q,Q,,1,\n3,wk,s,S,,,\n"),
        ),
        (
            "stop_times.txt",
            format!(
                "{STOP_TIMES}\
p,06:00:00,06:00:00,P1,1,,0,0
p,06:05:00,06:05:00,P2,2,,0,0
p,06:10:00,06:10:00,P3,3,,0,0
q,06:00:00,06:00:00,Q1,1,,0,0
q,06:05:00,06:05:00,Q2,2,,0,0
q,06:10:00,06:10:00,Q3,3,,0,0
s,06:00:00,06:00:00,R1,1,,0,0
s,06:05:00,06:05:00,R2,2,,0,0
s,06:10:00,06:10:00,R3,3,,0,0
"
            ),
        ),
    ]
}

pub fn write_directory(dir: &Path, files: &[(&str, String)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

pub fn write_zip(path: &Path, files: &[(&str, String)]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}
