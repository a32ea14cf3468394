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

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::navaid::Fix;

/// One two-point segment of an airway as presented by the source file.
///
/// Segments arrive in no particular order and several airways may share an
/// identifier, so segments are staged per identifier and joined by
/// [`Airway::assemble`] once the file is consumed.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct AirwaySegment {
    pub(crate) high: bool,
    /// Base flight level.
    pub(crate) base: u16,
    /// Top flight level.
    pub(crate) top: u16,
    pub(crate) ends: [Fix; 2],
}

/// A point on an assembled airway.
///
/// `base` and `top` describe the altitude band of the outgoing edge to the
/// next point; the last point of an airway carries `None` for both.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AirwayPoint {
    pub fix: Fix,
    pub base: Option<u16>,
    pub top: Option<u16>,
}

/// A named aerial highway: an ordered polyline of navaid stubs.
///
/// Consecutive points were joined through a shared endpoint in the segment
/// graph and all segments share the high/low class. Two airways may share an
/// identifier if they differ in class or are geographically disjoint.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airway {
    pub ident: String,
    pub high: bool,
    pub points: Vec<AirwayPoint>,
}

impl Airway {
    /// Joins the staged segments of one identifier into ordered airways.
    ///
    /// Pops a seed segment and extends the polyline forward as long as a
    /// segment of the same class attaches to the last point, then backward
    /// from the first point. When neither direction extends, the airway is
    /// complete; any leftover segments seed the next airway under the same
    /// identifier. The first matching segment in scan order wins, which is
    /// deterministic; segments with equal class and a shared endpoint yield
    /// the same polyline up to orientation.
    pub(crate) fn assemble(ident: &str, mut segments: Vec<AirwaySegment>) -> Vec<Airway> {
        let mut airways = Vec::new();

        while !segments.is_empty() {
            let seed = segments.remove(0);
            let high = seed.high;
            let [from, to] = seed.ends;
            let mut points = vec![
                AirwayPoint {
                    fix: from,
                    base: Some(seed.base),
                    top: Some(seed.top),
                },
                AirwayPoint {
                    fix: to,
                    base: None,
                    top: None,
                },
            ];

            loop {
                if extend_forward(&mut points, high, &mut segments) {
                    continue;
                }
                if extend_backward(&mut points, high, &mut segments) {
                    continue;
                }
                break;
            }

            trace!("assembled {} with {} points", ident, points.len());
            airways.push(Airway {
                ident: ident.to_string(),
                high,
                points,
            });
        }

        airways
    }
}

/// Attaches one segment to the last point, appending the far endpoint and
/// moving the segment's altitude band onto the previously terminal point.
fn extend_forward(
    points: &mut Vec<AirwayPoint>,
    high: bool,
    segments: &mut Vec<AirwaySegment>,
) -> bool {
    let last = points[points.len() - 1].fix.clone();
    let Some(pos) = segments
        .iter()
        .position(|s| s.high == high && (s.ends[0] == last || s.ends[1] == last))
    else {
        return false;
    };

    let segment = segments.remove(pos);
    let [a, b] = segment.ends;
    // flip the segment around if necessary
    let next = if b == last { a } else { b };

    let tail = points.len() - 1;
    points[tail].base = Some(segment.base);
    points[tail].top = Some(segment.top);
    points.push(AirwayPoint {
        fix: next,
        base: None,
        top: None,
    });
    true
}

/// Attaches one segment to the first point, prepending the far endpoint with
/// the segment's altitude band on its outgoing edge.
fn extend_backward(
    points: &mut Vec<AirwayPoint>,
    high: bool,
    segments: &mut Vec<AirwaySegment>,
) -> bool {
    let first = points[0].fix.clone();
    let Some(pos) = segments
        .iter()
        .position(|s| s.high == high && (s.ends[0] == first || s.ends[1] == first))
    else {
        return false;
    };

    let segment = segments.remove(pos);
    let [a, b] = segment.ends;
    let prev = if a == first { b } else { a };

    points.insert(
        0,
        AirwayPoint {
            fix: prev,
            base: Some(segment.base),
            top: Some(segment.top),
        },
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord;

    fn fix(ident: &str, lat: f64, lon: f64) -> Fix {
        Fix {
            ident: ident.to_string(),
            coordinate: coord!(lat, lon),
        }
    }

    fn segment(from: Fix, to: Fix, high: bool, base: u16, top: u16) -> AirwaySegment {
        AirwaySegment {
            high,
            base,
            top,
            ends: [from, to],
        }
    }

    fn idents(airway: &Airway) -> Vec<&str> {
        airway.points.iter().map(|p| p.fix.ident.as_str()).collect()
    }

    #[test]
    fn joins_unordered_segments_into_one_polyline() {
        let (a, b, c, d) = (
            fix("AAA", 50.0, 8.0),
            fix("BBB", 50.5, 8.5),
            fix("CCC", 51.0, 9.0),
            fix("DDD", 51.5, 9.5),
        );

        // seed is B-C; C-D extends forward, A-B extends backward
        let segments = vec![
            segment(b.clone(), c.clone(), false, 100, 200),
            segment(a.clone(), b.clone(), false, 80, 180),
            segment(c.clone(), d.clone(), false, 120, 220),
        ];

        let airways = Airway::assemble("V1", segments);
        assert_eq!(airways.len(), 1);
        assert_eq!(idents(&airways[0]), vec!["AAA", "BBB", "CCC", "DDD"]);
        assert!(!airways[0].high);

        // each point carries the band of its outgoing edge
        let points = &airways[0].points;
        assert_eq!((points[0].base, points[0].top), (Some(80), Some(180)));
        assert_eq!((points[1].base, points[1].top), (Some(100), Some(200)));
        assert_eq!((points[2].base, points[2].top), (Some(120), Some(220)));
        assert_eq!((points[3].base, points[3].top), (None, None));
    }

    #[test]
    fn reversed_segments_join_through_either_endpoint() {
        let (a, b, c) = (
            fix("AAA", 50.0, 8.0),
            fix("BBB", 50.5, 8.5),
            fix("CCC", 51.0, 9.0),
        );

        // both segments written away from the middle point
        let segments = vec![
            segment(b.clone(), a.clone(), false, 100, 200),
            segment(b.clone(), c.clone(), false, 100, 200),
        ];

        let airways = Airway::assemble("V1", segments);
        assert_eq!(airways.len(), 1);
        assert_eq!(idents(&airways[0]), vec!["CCC", "BBB", "AAA"]);
    }

    #[test]
    fn classes_assemble_separately() {
        let (a, b, c) = (
            fix("AAA", 50.0, 8.0),
            fix("BBB", 50.5, 8.5),
            fix("CCC", 51.0, 9.0),
        );

        let segments = vec![
            segment(a.clone(), b.clone(), false, 50, 180),
            segment(b.clone(), c.clone(), true, 180, 450),
        ];

        let airways = Airway::assemble("J5", segments);
        assert_eq!(airways.len(), 2);
        assert_eq!(idents(&airways[0]), vec!["AAA", "BBB"]);
        assert!(!airways[0].high);
        assert_eq!(idents(&airways[1]), vec!["BBB", "CCC"]);
        assert!(airways[1].high);
    }

    #[test]
    fn disjoint_segments_become_two_airways() {
        let segments = vec![
            segment(fix("AAA", 50.0, 8.0), fix("BBB", 50.5, 8.5), false, 50, 180),
            segment(fix("XXX", 10.0, 30.0), fix("YYY", 10.5, 30.5), false, 50, 180),
        ];

        let airways = Airway::assemble("V9", segments);
        assert_eq!(airways.len(), 2);
    }

    #[test]
    fn shared_code_with_different_coordinates_is_not_fused() {
        // two distinct points named WPT on opposite sides of the world
        let wpt_east = fix("WPT", 50.0, 8.0);
        let wpt_west = fix("WPT", -30.0, -60.0);

        let segments = vec![
            segment(fix("AAA", 49.5, 7.5), wpt_east, false, 50, 180),
            segment(wpt_west, fix("BBB", -30.5, -60.5), false, 50, 180),
        ];

        let airways = Airway::assemble("V2", segments);
        assert_eq!(airways.len(), 2);
        assert_eq!(airways[0].points.len(), 2);
        assert_eq!(airways[1].points.len(), 2);
    }

    #[test]
    fn removing_a_segment_splits_the_airway() {
        let (a, b, c, d) = (
            fix("AAA", 50.0, 8.0),
            fix("BBB", 50.5, 8.5),
            fix("CCC", 51.0, 9.0),
            fix("DDD", 51.5, 9.5),
        );

        let segments = vec![
            segment(a.clone(), b.clone(), false, 100, 200),
            segment(c.clone(), d.clone(), false, 100, 200),
        ];

        // without B-C the chain falls apart into two airways
        let airways = Airway::assemble("V1", segments);
        assert_eq!(airways.len(), 2);
        assert_eq!(idents(&airways[0]), vec!["AAA", "BBB"]);
        assert_eq!(idents(&airways[1]), vec!["CCC", "DDD"]);
    }
}
