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

//! IFR route decoding over the X-Plane navigation database.
//!
//! The crate reads the four fixed-format navdata files (`earth_awy.dat`,
//! `earth_fix.dat`, `earth_nav.dat` and `apt.dat`) into an identifier index
//! of [navaids] and [airways], and resolves pilot-style route strings
//! (whitespace-separated waypoint and airway identifiers) into an ordered
//! sequence of [waypoints] annotated with the airways used to reach and
//! leave them.
//!
//! # Examples
//!
//! ```no_run
//! use ifr::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let nd = NavData::try_from_dir("navdata")?;
//!
//!     let mut route = Route::new();
//!     route.decode(&nd, "KBOS J121 KJFK")?;
//!
//!     for wp in route.waypoints() {
//!         println!("{}", wp.ident());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [navaids]: nd::NavAid
//! [airways]: nd::Airway
//! [waypoints]: nd::Waypoint

pub mod error;
pub mod geom;
pub mod nd;
pub mod route;

mod macros;

pub mod prelude {
    //! Everything needed to load navdata and decode routes.
    pub use crate::error::{Error, Result};
    pub use crate::nd::{
        Airport, Airway, AirwayPoint, Dme, Fix, NavAid, NavData, Ndb, Vor, Waypoint,
    };
    pub use crate::route::{AppendOptions, Route, RouteFailure};
}
