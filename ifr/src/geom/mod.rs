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

//! Spherical geometry.

use geo::Point;

/// Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3441.035;

/// Returns the great-circle distance between two points in nautical miles.
///
/// Computes the arc length on a sphere of [`EARTH_RADIUS_NM`] using the
/// `atan2` form, which is well conditioned for both small and antipodal
/// separations. The navdata coordinates round-trip through one decoder, so
/// the result is only used to rank candidates, not for navigation.
pub fn great_circle(from: &Point<f64>, to: &Point<f64>) -> f64 {
    let (lat1, lon1) = (from.y().to_radians(), from.x().to_radians());
    let (lat2, lon2) = (to.y().to_radians(), to.x().to_radians());
    let lon_diff = lon2 - lon1;

    let num = ((lat2.cos() * lon_diff.sin()).powi(2)
        + (lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * lon_diff.cos()).powi(2))
    .sqrt();
    let den = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * lon_diff.cos();

    EARTH_RADIUS_NM * num.atan2(den)
}
