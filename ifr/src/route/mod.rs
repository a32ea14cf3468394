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

//! IFR route decoding.
//!
//! A route string is a whitespace-separated alternation of waypoint and
//! airway identifiers, with `DCT`, `SID` and `STAR` accepted as structural
//! markers. Most identifiers are overloaded: a fix may share its name with
//! a point inside an airway, and several navaids around the world may share
//! a code. Decoding is a small state machine that tries the airway reading
//! where the grammar allows one and falls back to a waypoint lookup,
//! ranking duplicate records by distance from the last committed waypoint.

use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::coord;
use crate::geom::great_circle;
use crate::nd::{NavAid, NavData, Waypoint};

/// Options controlling [`Route::append`].
#[derive(Clone, Debug, Default)]
pub struct AppendOptions {
    /// Commit the candidate nearest the last committed waypoint when an
    /// identifier is ambiguous, instead of failing with the candidate list.
    pub best_guess: bool,
    /// Skip identifiers that resolve to nothing, instead of failing.
    pub missing_ok: bool,
    /// The record to commit for the current token; used to answer a failure
    /// that carried `choices`.
    pub choice: Option<Rc<NavAid>>,
}

/// Why a route string could not be appended.
///
/// Returned as data rather than raised: the route keeps every waypoint
/// committed before the failing token, and `remaining` can be re-appended
/// once the caller has settled the problem, with [`AppendOptions::choice`]
/// when `choices` is non-empty.
#[derive(Clone, Debug)]
pub struct RouteFailure {
    /// The unconsumed portion of the route, verbatim.
    pub remaining: String,
    /// True when the failure is a plain navaid lookup; false when the
    /// surrounding tokens allowed an airway interpretation as well.
    pub navaid: bool,
    /// The token that failed to resolve.
    pub code: String,
    /// The candidate records when the identifier was ambiguous.
    pub choices: Vec<Rc<NavAid>>,
    /// The waypoint code before the token, when an airway reading was
    /// possible.
    pub wp1: Option<String>,
    /// The waypoint code after the token, when an airway reading was
    /// possible.
    pub wp2: Option<String>,
}

impl fmt::Display for RouteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.choices.is_empty() {
            write!(
                f,
                "{} is ambiguous between {} records",
                self.code,
                self.choices.len()
            )
        } else if self.navaid {
            write!(f, "navaid {} not found", self.code)
        } else {
            write!(
                f,
                "navaid {} or airway {} {} {} not found",
                self.code,
                self.wp1.as_deref().unwrap_or("?"),
                self.code,
                self.wp2.as_deref().unwrap_or("?")
            )
        }
    }
}

impl std::error::Error for RouteFailure {}

/// What the next token may be.
struct Expecting {
    waypoint: bool,
    airway: bool,
    direct: bool,
}

/// A decoded IFR route: the waypoints committed so far, in order.
///
/// Routes are ephemeral and owned by their caller; they are built by
/// appending one or more route strings against a [`NavData`] index, which
/// is only ever read.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `route`, committing the nearest record on ambiguity.
    ///
    /// Shorthand for [`append`] with `best_guess` set.
    ///
    /// [`append`]: Self::append
    pub fn decode(&mut self, nd: &NavData, route: &str) -> Result<(), RouteFailure> {
        self.append(
            nd,
            route,
            AppendOptions {
                best_guess: true,
                ..AppendOptions::default()
            },
        )
    }

    /// The committed waypoints, in route order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Appends the route string to the current route.
    ///
    /// Tokens alternate between waypoints and airways: after a committed
    /// waypoint the next token may name an airway that connects it to the
    /// token after, a routing marker (`DCT`, `SID`, `STAR`), or simply the
    /// next waypoint. A token that is neither fails the append, or is
    /// skipped when `missing_ok` is set. An airway can neither open nor
    /// close a route; both readings need a bracketing waypoint.
    ///
    /// On failure the route keeps everything committed so far and the
    /// returned [`RouteFailure`] describes the offending token.
    pub fn append(
        &mut self,
        nd: &NavData,
        route: &str,
        opts: AppendOptions,
    ) -> Result<(), RouteFailure> {
        debug!("route append: {route:?}");

        let tokens: Vec<String> = route
            .to_uppercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let mut choice = opts.choice;
        let mut last: Option<Rc<NavAid>> = None;
        let mut expecting = Expecting {
            waypoint: true,
            airway: false,
            direct: false,
        };

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i].as_str();
            let is_last = i + 1 == tokens.len();

            if expecting.direct && !is_last && matches!(token, "DCT" | "SID" | "STAR") {
                trace!("routing marker {token}");
                expecting = Expecting {
                    waypoint: true,
                    airway: false,
                    direct: false,
                };
                i += 1;
                continue;
            }

            if expecting.airway && !is_last {
                if let Some(src) = last.clone() {
                    if let Some(end) = self.push_airway(nd, token, &src, &tokens[i + 1]) {
                        last = Some(end);
                        i += 2;
                        expecting = Expecting {
                            waypoint: true,
                            airway: true,
                            direct: true,
                        };
                        continue;
                    }
                }
            }

            // the token is a waypoint, or an airway reading fell through
            if expecting.waypoint {
                if let Some(chosen) = choice.take() {
                    trace!("commit chosen {}", chosen.ident());
                    self.waypoints.push(Waypoint::direct(Rc::clone(&chosen)));
                    last = Some(chosen);
                } else {
                    match nd.navaids(token) {
                        None => {
                            if opts.missing_ok {
                                warn!("ignoring unknown identifier {token}");
                            } else {
                                return Err(self.failure(&tokens, i, &expecting, last.is_some()));
                            }
                        }

                        Some(candidates) => {
                            if opts.best_guess {
                                i = self.commit_best_guess(nd, &tokens, i, candidates, &mut last);
                            } else if candidates.len() == 1 {
                                let navaid = Rc::clone(&candidates[0]);
                                trace!("commit {}", navaid.ident());
                                self.waypoints.push(Waypoint::direct(Rc::clone(&navaid)));
                                last = Some(navaid);
                            } else {
                                let mut failure =
                                    self.failure(&tokens, i, &expecting, last.is_some());
                                failure.choices = candidates.to_vec();
                                return Err(failure);
                            }
                        }
                    }
                }

                expecting.direct = true;
                expecting.airway = true;
            }

            i += 1;
        }

        Ok(())
    }

    /// Commits one of `candidates` for the token at `i`, nearest first, and
    /// returns the new token position.
    ///
    /// With several candidates and room for an airway to follow, each
    /// candidate is committed tentatively and the next two tokens tried as
    /// an airway continuation; the first candidate whose airway resolves
    /// wins and the airway is consumed. When none resolves, or there is no
    /// room, the nearest candidate stands on its own.
    fn commit_best_guess(
        &mut self,
        nd: &NavData,
        tokens: &[String],
        i: usize,
        candidates: &[Rc<NavAid>],
        last: &mut Option<Rc<NavAid>>,
    ) -> usize {
        let standpoint = last
            .as_ref()
            .map(|navaid| navaid.coordinate())
            .unwrap_or_else(|| coord!(0.0, 0.0));

        let mut candidates: Vec<Rc<NavAid>> = candidates.to_vec();
        candidates.sort_by(|a, b| {
            great_circle(&standpoint, &a.coordinate())
                .total_cmp(&great_circle(&standpoint, &b.coordinate()))
        });

        let lookahead = i + 2 < tokens.len();
        if candidates.len() == 1 || !lookahead {
            let nearest = Rc::clone(&candidates[0]);
            trace!("commit {}", nearest.ident());
            self.waypoints.push(Waypoint::direct(Rc::clone(&nearest)));
            *last = Some(Rc::clone(&nearest));

            if lookahead {
                if let Some(end) =
                    self.push_airway(nd, &tokens[i + 1], &nearest, &tokens[i + 2])
                {
                    *last = Some(end);
                    return i + 2;
                }
            }
            return i;
        }

        // several candidates and room for an airway continuation; try them
        // in distance order against the next two tokens
        self.waypoints
            .push(Waypoint::direct(Rc::clone(&candidates[0])));
        let slot = self.waypoints.len() - 1;

        for candidate in &candidates {
            self.waypoints[slot] = Waypoint::direct(Rc::clone(candidate));
            if let Some(end) = self.push_airway(nd, &tokens[i + 1], candidate, &tokens[i + 2]) {
                trace!("commit {} joining {}", candidate.ident(), tokens[i + 1]);
                *last = Some(end);
                return i + 2;
            }
        }

        // no adjoining airway works; settle for the nearest candidate
        trace!("commit nearest {}", candidates[0].ident());
        self.waypoints[slot] = Waypoint::direct(Rc::clone(&candidates[0]));
        *last = Some(Rc::clone(&candidates[0]));
        i
    }

    /// Appends the traversal of the airway from `src` to `dest` when it
    /// resolves, marking the previously final waypoint as departing on it.
    /// Returns the navaid the traversal ends on. The route is untouched when
    /// the airway does not resolve.
    fn push_airway(
        &mut self,
        nd: &NavData,
        ident: &str,
        src: &Rc<NavAid>,
        dest: &str,
    ) -> Option<Rc<NavAid>> {
        let (traversal, airway) = nd.find_airway(ident, src, dest)?;
        trace!("{} joins {} to {}", airway.ident, src.ident(), dest);

        let end = Rc::clone(&traversal.last()?.navaid);
        if let Some(wp) = self.waypoints.last_mut() {
            wp.out_awy = Some(Rc::clone(&airway));
        }
        self.waypoints.extend(traversal);
        Some(end)
    }

    fn failure(
        &self,
        tokens: &[String],
        i: usize,
        expecting: &Expecting,
        has_predecessor: bool,
    ) -> RouteFailure {
        // could the token have been an airway as well?
        let airway_context = expecting.airway && has_predecessor && i + 1 != tokens.len();

        RouteFailure {
            remaining: tokens[i..].join(" "),
            navaid: !airway_context,
            code: tokens[i].clone(),
            choices: Vec::new(),
            wp1: airway_context.then(|| tokens[i - 1].clone()),
            wp2: airway_context.then(|| tokens[i + 1].clone()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes = self.waypoints.iter().map(Waypoint::ident);
        if let Some(first) = codes.next() {
            write!(f, "{first}")?;
            for code in codes {
                write!(f, " {code}")?;
            }
        }
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////
// Unit tests
/////////////////////////////////////////////////////////////////////////////
