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

use geo::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named geographic point with no radio equipment.
///
/// This is also the shape of an airway segment endpoint: the airway source
/// file carries only a code and a coordinate for each end, so traversal
/// waypoints produced from an airway enter a route as fixes. Equality
/// compares the code and the exact coordinate, which keeps two distinct
/// points that happen to share a code apart.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    pub ident: String,
    pub coordinate: Point<f64>,
}

/// Non-directional beacon.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ndb {
    pub ident: String,
    pub coordinate: Point<f64>,
    /// Elevation in feet.
    pub elevation: i32,
    pub freq: u32,
    /// Reception range in nautical miles.
    pub range: u32,
    pub name: String,
}

/// VHF omnidirectional range station.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vor {
    pub ident: String,
    pub coordinate: Point<f64>,
    /// Elevation in feet.
    pub elevation: i32,
    pub freq: u32,
    /// Reception range in nautical miles.
    pub range: u32,
    /// Slaved magnetic variation in degrees.
    pub slaved_var: f64,
    pub name: String,
}

/// Distance measuring equipment.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dme {
    pub ident: String,
    pub coordinate: Point<f64>,
    /// Elevation in feet.
    pub elevation: i32,
    pub freq: u32,
    /// Reception range in nautical miles.
    pub range: u32,
    /// DME bias in nautical miles.
    pub bias: f64,
    pub name: String,
}

/// An airport, indexed under its ICAO code.
///
/// The source format carries no reference point, so the coordinate is the
/// arithmetic mean of all runway endpoints and helipad centers.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airport {
    pub ident: String,
    pub coordinate: Point<f64>,
    /// Elevation in feet.
    pub elevation: i32,
    pub name: String,
}

/// Any named point used for navigation.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavAid {
    Fix(Fix),
    Ndb(Ndb),
    Vor(Vor),
    Dme(Dme),
    Airport(Airport),
}

impl NavAid {
    /// The identifier under which the record is indexed. Not unique
    /// worldwide.
    pub fn ident(&self) -> &str {
        match self {
            Self::Fix(fix) => &fix.ident,
            Self::Ndb(ndb) => &ndb.ident,
            Self::Vor(vor) => &vor.ident,
            Self::Dme(dme) => &dme.ident,
            Self::Airport(arpt) => &arpt.ident,
        }
    }

    pub fn coordinate(&self) -> Point<f64> {
        match self {
            Self::Fix(fix) => fix.coordinate,
            Self::Ndb(ndb) => ndb.coordinate,
            Self::Vor(vor) => vor.coordinate,
            Self::Dme(dme) => dme.coordinate,
            Self::Airport(arpt) => arpt.coordinate,
        }
    }
}
