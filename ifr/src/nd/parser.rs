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

//! Decoder for the four fixed-format navdata files.
//!
//! Every file opens with the same three-line header (origin marker, version
//! line, empty line) and closes on a line whose first token is `99`. The
//! body grammars differ per file and are normative down to the field count;
//! any malformed line aborts the load with the file name and line number.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use geo::Point;
use log::debug;

use super::{Airport, Airway, AirwaySegment, Dme, Fix, NavAid, NavData, Ndb, Vor};
use crate::coord;
use crate::error::{Error, Result};

const AWY_FILE: &str = "earth_awy.dat";
const FIX_FILE: &str = "earth_fix.dat";
const NAV_FILE: &str = "earth_nav.dat";
const APT_FILE: &str = "apt.dat";

const AWY_VERSION: &str = "640";
const FIX_VERSION: &str = "600";
const NAV_VERSION: &str = "810";
const APT_VERSION: &str = "850";

type NavAidIndex = HashMap<String, Vec<Rc<NavAid>>>;

pub(super) fn load_dir(path: &Path) -> Result<NavData> {
    if !path.is_dir() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    for file in [AWY_FILE, FIX_FILE, NAV_FILE, APT_FILE] {
        let file_path = path.join(file);
        if !file_path.is_file() {
            return Err(Error::MissingFile { path: file_path });
        }
    }

    let awy = read_latin1(&path.join(AWY_FILE))?;
    let fix = read_latin1(&path.join(FIX_FILE))?;
    let nav = read_latin1(&path.join(NAV_FILE))?;
    let apt = read_latin1(&path.join(APT_FILE))?;

    from_sources(&awy, &fix, &nav, &apt)
}

pub(super) fn from_sources(awy: &str, fix: &str, nav: &str, apt: &str) -> Result<NavData> {
    let mut navaids = NavAidIndex::new();
    let mut staged: HashMap<String, Vec<AirwaySegment>> = HashMap::new();

    parse_awy(awy, &mut staged)?;
    parse_fix(fix, &mut navaids)?;
    parse_nav(nav, &mut navaids)?;
    parse_apt(apt, &mut navaids)?;

    let mut airways: HashMap<String, Vec<Rc<Airway>>> = HashMap::new();
    for (ident, segments) in staged {
        let assembled = Airway::assemble(&ident, segments);
        airways.insert(ident, assembled.into_iter().map(Rc::new).collect());
    }

    Ok(NavData { navaids, airways })
}

/// Latin-1 maps every byte to the Unicode code point of the same value, so
/// the decode cannot fail.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn read_latin1(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_latin1(&bytes))
}

/// Consumes and validates the three header lines.
fn check_header<'a, I>(lines: &mut I, file: &'static str, version: &str) -> Result<()>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let (line, origin) = lines.next().ok_or(Error::TruncatedHeader { file })?;
    if origin != "I" && origin != "A" {
        return Err(Error::InvalidOrigin { file, line });
    }

    let (line, version_line) = lines.next().ok_or(Error::TruncatedHeader { file })?;
    let digits_end = version_line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(version_line.len());
    let (digits, rest) = version_line.split_at(digits_end);
    if digits.is_empty() || !rest.starts_with(" Version") {
        return Err(Error::InvalidVersion { file, line });
    }
    if digits != version {
        return Err(Error::UnsupportedVersion {
            file,
            version: digits.to_string(),
        });
    }

    let (line, blank) = lines.next().ok_or(Error::TruncatedHeader { file })?;
    if !blank.is_empty() {
        return Err(Error::ExpectedEmptyLine { file, line });
    }

    Ok(())
}

/// Splits a line on whitespace runs into at most `limit` fields; the last
/// field absorbs the remainder of the line, so free-form names can contain
/// whitespace.
fn split_fields(line: &str, limit: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(limit);
    let mut rest = line.trim_start();

    while fields.len() + 1 < limit {
        match rest.find(char::is_whitespace) {
            Some(pos) => {
                fields.push(&rest[..pos]);
                rest = rest[pos..].trim_start();
            }
            None => break,
        }
    }
    if !rest.is_empty() {
        fields.push(rest);
    }

    fields
}

fn parse_num<T: FromStr>(s: &str, file: &'static str, line: usize) -> Result<T> {
    s.parse().map_err(|_| Error::InvalidNumber {
        file,
        line,
        value: s.to_string(),
    })
}

fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.lines().enumerate().map(|(i, l)| (i + 1, l))
}

/// `earth_awy.dat`: ten-field two-point segments, staged per identifier.
///
/// The identifier group is a `-`-separated list and the segment registers
/// under each listed identifier. Joining happens later; segments may arrive
/// in any order and several airways can share an identifier.
fn parse_awy(content: &str, staged: &mut HashMap<String, Vec<AirwaySegment>>) -> Result<()> {
    debug!("parsing {AWY_FILE}");
    let mut lines = numbered_lines(content);
    check_header(&mut lines, AWY_FILE, AWY_VERSION)?;

    for (line_no, line) in lines {
        let fields = split_fields(line, 10);
        if fields.first() == Some(&"99") {
            break;
        }
        if fields.len() != 10 {
            return Err(Error::FieldCount {
                file: AWY_FILE,
                line: line_no,
                expected: 10,
                actual: fields.len(),
            });
        }

        let high = match fields[6] {
            "1" => false,
            "2" => true,
            class => {
                return Err(Error::InvalidAirwayClass {
                    file: AWY_FILE,
                    line: line_no,
                    class: class.to_string(),
                })
            }
        };

        let from = Fix {
            ident: fields[0].to_string(),
            coordinate: coord!(
                parse_num(fields[1], AWY_FILE, line_no)?,
                parse_num(fields[2], AWY_FILE, line_no)?
            ),
        };
        let to = Fix {
            ident: fields[3].to_string(),
            coordinate: coord!(
                parse_num(fields[4], AWY_FILE, line_no)?,
                parse_num(fields[5], AWY_FILE, line_no)?
            ),
        };
        let base: u16 = parse_num(fields[7], AWY_FILE, line_no)?;
        let top: u16 = parse_num(fields[8], AWY_FILE, line_no)?;

        for ident in fields[9].split('-') {
            staged
                .entry(ident.to_string())
                .or_default()
                .push(AirwaySegment {
                    high,
                    base,
                    top,
                    ends: [from.clone(), to.clone()],
                });
        }
    }

    Ok(())
}

/// `earth_fix.dat`: latitude, longitude, identifier. Empty lines are
/// skipped.
fn parse_fix(content: &str, navaids: &mut NavAidIndex) -> Result<()> {
    debug!("parsing {FIX_FILE}");
    let mut lines = numbered_lines(content);
    check_header(&mut lines, FIX_FILE, FIX_VERSION)?;

    for (line_no, line) in lines {
        if line.is_empty() {
            continue;
        }
        let fields = split_fields(line, 3);
        if fields.first() == Some(&"99") {
            break;
        }
        if fields.len() != 3 {
            return Err(Error::FieldCount {
                file: FIX_FILE,
                line: line_no,
                expected: 3,
                actual: fields.len(),
            });
        }

        let fix = Fix {
            ident: fields[2].to_string(),
            coordinate: coord!(
                parse_num(fields[0], FIX_FILE, line_no)?,
                parse_num(fields[1], FIX_FILE, line_no)?
            ),
        };
        navaids
            .entry(fix.ident.clone())
            .or_default()
            .push(Rc::new(NavAid::Fix(fix)));
    }

    Ok(())
}

/// `earth_nav.dat`: radio navaids keyed by a numeric row code.
///
/// Codes 2 (NDB), 3 (VOR) and 12/13 (DME) share the nine-field layout with
/// one kind-specific float in the seventh position; 4 through 9 are other
/// equipment this index does not carry; anything else fails the load.
fn parse_nav(content: &str, navaids: &mut NavAidIndex) -> Result<()> {
    debug!("parsing {NAV_FILE}");
    let mut lines = numbered_lines(content);
    check_header(&mut lines, NAV_FILE, NAV_VERSION)?;

    for (line_no, line) in lines {
        let token = line.split_whitespace().next().unwrap_or("");
        let code: u32 = token.parse().map_err(|_| Error::InvalidRowCode {
            file: NAV_FILE,
            line: line_no,
            code: token.to_string(),
        })?;

        match code {
            2 | 3 | 12 | 13 => {
                let fields = split_fields(line, 9);
                if fields.len() != 9 {
                    return Err(Error::FieldCount {
                        file: NAV_FILE,
                        line: line_no,
                        expected: 9,
                        actual: fields.len(),
                    });
                }

                let coordinate: Point<f64> = coord!(
                    parse_num(fields[1], NAV_FILE, line_no)?,
                    parse_num(fields[2], NAV_FILE, line_no)?
                );
                let elevation: i32 = parse_num(fields[3], NAV_FILE, line_no)?;
                let freq: u32 = parse_num(fields[4], NAV_FILE, line_no)?;
                let range: u32 = parse_num(fields[5], NAV_FILE, line_no)?;
                let ident = fields[7].to_string();
                let name = fields[8].to_string();

                let navaid = match code {
                    2 => NavAid::Ndb(Ndb {
                        ident: ident.clone(),
                        coordinate,
                        elevation,
                        freq,
                        range,
                        name,
                    }),
                    3 => NavAid::Vor(Vor {
                        ident: ident.clone(),
                        coordinate,
                        elevation,
                        freq,
                        range,
                        slaved_var: parse_num(fields[6], NAV_FILE, line_no)?,
                        name,
                    }),
                    _ => NavAid::Dme(Dme {
                        ident: ident.clone(),
                        coordinate,
                        elevation,
                        freq,
                        range,
                        bias: parse_num(fields[6], NAV_FILE, line_no)?,
                        name,
                    }),
                };

                navaids.entry(ident).or_default().push(Rc::new(navaid));
            }

            99 => break,

            // localizers, glideslopes, markers; not indexed
            4..=9 => (),

            _ => {
                return Err(Error::InvalidRowCode {
                    file: NAV_FILE,
                    line: line_no,
                    code: token.to_string(),
                })
            }
        }
    }

    Ok(())
}

/// `apt.dat`: airport headers followed by runway and helipad rows.
///
/// The format carries no airport reference point, so the coordinate becomes
/// the mean of all runway endpoints and helipad centers collected for the
/// airport; airports that collect no point are dropped.
fn parse_apt(content: &str, navaids: &mut NavAidIndex) -> Result<()> {
    debug!("parsing {APT_FILE}");
    let mut lines = numbered_lines(content);
    check_header(&mut lines, APT_FILE, APT_VERSION)?;

    struct Pending {
        ident: String,
        elevation: i32,
        name: String,
        points: Vec<Point<f64>>,
    }

    let mut airports: Vec<Pending> = Vec::new();

    for (line_no, line) in lines {
        let Some(code) = line.split_whitespace().next() else {
            continue;
        };
        if code == "99" {
            break;
        }

        match code {
            // land airport, seaplane base, heliport
            "1" | "16" | "17" => {
                let fields = split_fields(line, 6);
                if fields.len() != 6 {
                    return Err(Error::FieldCount {
                        file: APT_FILE,
                        line: line_no,
                        expected: 6,
                        actual: fields.len(),
                    });
                }
                airports.push(Pending {
                    ident: fields[4].to_string(),
                    elevation: parse_num(fields[1], APT_FILE, line_no)?,
                    name: fields[5].to_string(),
                    points: Vec::new(),
                });
            }

            "100" | "101" | "103" => {
                if airports.is_empty() {
                    return Err(Error::RunwayBeforeAirport {
                        file: APT_FILE,
                        line: line_no,
                    });
                }

                let expected = match code {
                    "100" => 26,
                    "101" => 9,
                    _ => 12,
                };
                let fields = split_fields(line, expected);
                if fields.len() != expected {
                    return Err(Error::FieldCount {
                        file: APT_FILE,
                        line: line_no,
                        expected,
                        actual: fields.len(),
                    });
                }

                let mut push_point = |lat: &str, lon: &str| -> Result<()> {
                    let point = coord!(
                        parse_num(lat, APT_FILE, line_no)?,
                        parse_num(lon, APT_FILE, line_no)?
                    );
                    airports.last_mut().unwrap().points.push(point);
                    Ok(())
                };

                match code {
                    // land runway: both thresholds
                    "100" => {
                        push_point(fields[9], fields[10])?;
                        push_point(fields[18], fields[19])?;
                    }
                    // water runway: both ends
                    "101" => {
                        push_point(fields[4], fields[5])?;
                        push_point(fields[7], fields[8])?;
                    }
                    // helipad center
                    _ => push_point(fields[2], fields[3])?,
                }
            }

            _ => (),
        }
    }

    for pending in airports {
        if pending.points.is_empty() {
            continue;
        }

        let count = pending.points.len() as f64;
        let (lat, lon) = pending
            .points
            .iter()
            .fold((0.0, 0.0), |(lat, lon), p| (lat + p.y(), lon + p.x()));

        let airport = Airport {
            ident: pending.ident.clone(),
            coordinate: coord!(lat / count, lon / count),
            elevation: pending.elevation,
            name: pending.name,
        };
        navaids
            .entry(pending.ident)
            .or_default()
            .push(Rc::new(NavAid::Airport(airport)));
    }

    Ok(())
}
