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

//! Navigation Data.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;

mod airway;
mod navaid;
mod parser;
mod waypoint;

pub use airway::{Airway, AirwayPoint};
pub use navaid::{Airport, Dme, Fix, NavAid, Ndb, Vor};
pub use waypoint::Waypoint;

pub(crate) use airway::AirwaySegment;

/// The X-Plane navigation database, indexed by identifier.
///
/// Built once by [`try_from_dir`] and immutable afterwards; routes hold
/// reference-counted records out of the index but never write back into it.
///
/// [`try_from_dir`]: Self::try_from_dir
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavData {
    navaids: HashMap<String, Vec<Rc<NavAid>>>,
    airways: HashMap<String, Vec<Rc<Airway>>>,
}

impl NavData {
    /// Loads the navigation database from a directory.
    ///
    /// The directory must contain `earth_awy.dat`, `earth_fix.dat`,
    /// `earth_nav.dat` and `apt.dat`. The load is all-or-nothing; any
    /// malformed line fails it with an error naming the file and line.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use ifr::nd::NavData;
    /// # fn load() -> Result<(), ifr::error::Error> {
    /// let nd = NavData::try_from_dir("navdata")?;
    ///
    /// if let Some(records) = nd.navaids("KBOS") {
    ///     println!("{} record(s) for KBOS", records.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn try_from_dir<P: AsRef<Path>>(path: P) -> Result<Self> {
        parser::load_dir(path.as_ref())
    }

    #[cfg(test)]
    pub(crate) fn from_sources(awy: &str, fix: &str, nav: &str, apt: &str) -> Result<Self> {
        parser::from_sources(awy, fix, nav, apt)
    }

    /// Returns every record known under the identifier, in input order.
    ///
    /// The slice is non-empty; an unknown identifier returns `None`.
    pub fn navaids(&self, ident: &str) -> Option<&[Rc<NavAid>]> {
        self.navaids.get(ident).map(Vec::as_slice)
    }

    /// Returns every airway assembled under the identifier.
    pub fn airways(&self, ident: &str) -> Option<&[Rc<Airway>]> {
        self.airways.get(ident).map(Vec::as_slice)
    }

    /// Returns the waypoints between `src` and `dest` on the named airway.
    ///
    /// Walks each airway sharing the identifier and watches for the source
    /// and destination codes in either order; the traversal runs from just
    /// after the source through the destination. It excludes the source,
    /// includes the destination, and every waypoint is annotated with the
    /// matched airway. `None` if no airway of that name connects the two.
    pub fn find_airway(
        &self,
        ident: &str,
        src: &NavAid,
        dest: &str,
    ) -> Option<(Vec<Waypoint>, Rc<Airway>)> {
        let airways = self.airways.get(ident)?;

        for airway in airways {
            let mut found_src = false;
            let mut found_dest = false;
            let mut collected: Vec<Fix> = Vec::new();

            for point in &airway.points {
                if point.fix.ident == src.ident() {
                    if found_dest {
                        // the walk ran from the destination towards the
                        // source, so flip it around
                        collected.reverse();
                        return Some(traversal(collected, airway));
                    }
                    found_src = true;
                } else if point.fix.ident == dest {
                    collected.push(point.fix.clone());
                    if found_src {
                        return Some(traversal(collected, airway));
                    }
                    found_dest = true;
                } else if found_src || found_dest {
                    // somewhere between the source and destination
                    collected.push(point.fix.clone());
                }
            }
        }

        None
    }
}

/// Wraps the collected stubs as route waypoints riding the airway: all of
/// them arrive on it and all but the terminal one depart on it.
fn traversal(fixes: Vec<Fix>, airway: &Rc<Airway>) -> (Vec<Waypoint>, Rc<Airway>) {
    let last = fixes.len() - 1;
    let waypoints = fixes
        .into_iter()
        .enumerate()
        .map(|(i, fix)| Waypoint {
            navaid: Rc::new(NavAid::Fix(fix)),
            in_awy: Some(Rc::clone(airway)),
            out_awy: (i != last).then(|| Rc::clone(airway)),
        })
        .collect();
    (waypoints, Rc::clone(airway))
}
