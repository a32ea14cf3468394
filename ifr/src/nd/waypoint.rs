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

use std::rc::Rc;

use geo::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Airway, NavAid};

/// A committed element of a decoded route.
///
/// Wraps the navaid the route passes through together with the airway the
/// route arrived on (`in_awy`) and the airway it departs on (`out_awy`).
/// Consecutive waypoints either share an airway on their seam or carry
/// `None` on both sides, which reads as a direct leg.
///
/// Waypoints are route-local: annotating them never touches the shared
/// navaid index.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    pub(crate) navaid: Rc<NavAid>,
    pub(crate) in_awy: Option<Rc<Airway>>,
    pub(crate) out_awy: Option<Rc<Airway>>,
}

impl Waypoint {
    /// A waypoint reached and left outside any airway.
    pub(crate) fn direct(navaid: Rc<NavAid>) -> Self {
        Self {
            navaid,
            in_awy: None,
            out_awy: None,
        }
    }

    pub fn navaid(&self) -> &NavAid {
        &self.navaid
    }

    pub fn ident(&self) -> &str {
        self.navaid.ident()
    }

    pub fn coordinate(&self) -> Point<f64> {
        self.navaid.coordinate()
    }

    /// The airway on which the route arrived at this waypoint.
    pub fn in_awy(&self) -> Option<&Rc<Airway>> {
        self.in_awy.as_ref()
    }

    /// The airway on which the route departs this waypoint.
    pub fn out_awy(&self) -> Option<&Rc<Airway>> {
        self.out_awy.as_ref()
    }
}
