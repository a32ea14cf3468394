// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use ifr::prelude::*;

fn navdata_dir() -> String {
    format!("{}/tests/fixtures/navdata", env!("CARGO_MANIFEST_DIR"))
}

fn load() -> NavData {
    NavData::try_from_dir(navdata_dir()).expect("fixture navdata should load")
}

#[test]
fn rejects_a_missing_directory() {
    let err = NavData::try_from_dir("/no/such/navdata").expect_err("path does not exist");
    assert!(matches!(err, Error::NotADirectory { .. }));
}

#[test]
fn rejects_a_directory_without_the_data_files() {
    let fixtures = format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let err = NavData::try_from_dir(fixtures).expect_err("the files live one level deeper");
    assert!(matches!(err, Error::MissingFile { .. }));
}

#[test]
fn indexes_every_record_kind() {
    let nd = load();

    assert!(matches!(
        nd.navaids("KBOS").expect("KBOS is a fix")[0].as_ref(),
        NavAid::Fix(_)
    ));
    assert!(matches!(
        nd.navaids("XBX").expect("XBX is an NDB")[0].as_ref(),
        NavAid::Ndb(_)
    ));

    // VOR and DME share HFD, in input order
    let hfd = nd.navaids("HFD").expect("HFD has two records");
    assert_eq!(hfd.len(), 2);
    assert!(matches!(hfd[0].as_ref(), NavAid::Vor(_)));
    assert!(matches!(hfd[1].as_ref(), NavAid::Dme(_)));

    // the airport reference point is the mean of its runway ends and pads
    match nd.navaids("KBED").expect("KBED is an airport")[0].as_ref() {
        NavAid::Airport(arpt) => {
            assert_eq!(arpt.name, "Hanscom Field");
            assert!((arpt.coordinate.y() - 42.47).abs() < 1e-9);
            assert!((arpt.coordinate.x() - (-71.28)).abs() < 1e-9);
        }
        other => panic!("KBED should be an airport, got {other:?}"),
    }

    // an airport without runways or helipads is dropped
    assert!(nd.navaids("KNOP").is_none());
}

#[test]
fn decodes_latin1_names() {
    let nd = load();
    match nd.navaids("UL").expect("UL is an NDB")[0].as_ref() {
        NavAid::Ndb(ndb) => assert_eq!(ndb.name, "MONTRÉAL"),
        other => panic!("UL should be an NDB, got {other:?}"),
    }
}

#[test]
fn assembles_airways_per_identifier_group() {
    let nd = load();

    // the low airway spans three points after joining two segments
    let j121 = nd.airways("J121").expect("J121 should assemble");
    assert_eq!(j121.len(), 1);
    assert_eq!(j121[0].points.len(), 3);
    assert!(!j121[0].high);

    // the grouped identifiers each carry the high segment
    for ident in ["J174", "Q439"] {
        let airways = nd.airways(ident).expect("grouped identifier should assemble");
        assert_eq!(airways.len(), 1);
        assert!(airways[0].high);
        assert_eq!(airways[0].points.len(), 2);
    }
}

#[test]
fn decodes_a_route_end_to_end() {
    let nd = load();
    let mut route = Route::new();
    route
        .decode(&nd, "KBED DCT KBOS J121 KJFK")
        .expect("route should decode");

    let codes: Vec<&str> = route.waypoints().iter().map(Waypoint::ident).collect();
    assert_eq!(codes, ["KBED", "KBOS", "ORW", "KJFK"]);

    // seams agree on both sides
    for pair in route.waypoints().windows(2) {
        assert_eq!(pair[0].out_awy(), pair[1].in_awy());
    }
}

#[test]
fn reports_unresolved_tokens_with_context() {
    let nd = load();
    let mut route = Route::new();
    let failure = route
        .decode(&nd, "KBOS XYZZY KJFK")
        .expect_err("XYZZY should not resolve");

    assert_eq!(failure.code, "XYZZY");
    assert!(!failure.navaid);
    assert_eq!(failure.wp1.as_deref(), Some("KBOS"));
    assert_eq!(failure.wp2.as_deref(), Some("KJFK"));
}

#[test]
fn reloading_assembles_identically() {
    let first = load();
    let second = load();
    assert_eq!(first.airways("J121"), second.airways("J121"));
    assert_eq!(first.navaids("HFD"), second.navaids("HFD"));
}
