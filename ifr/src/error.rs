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

use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// A load-time failure.
///
/// The load is all-or-nothing: the first error aborts it and no partial
/// index is returned. Line numbers count from the top of the file, header
/// included.
#[derive(Debug)]
pub enum Error {
    /// The navdata path does not exist or is not a directory.
    NotADirectory { path: PathBuf },
    /// One of the four required files is missing.
    MissingFile { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
    /// The file ended inside the three-line header.
    TruncatedHeader { file: &'static str },
    /// The origin marker on line 1 is neither `I` nor `A`.
    InvalidOrigin { file: &'static str, line: usize },
    /// Line 2 does not match `<digits> Version`.
    InvalidVersion { file: &'static str, line: usize },
    /// The version digits differ from the version expected for the file.
    UnsupportedVersion { file: &'static str, version: String },
    /// Line 3 of the header is not empty.
    ExpectedEmptyLine { file: &'static str, line: usize },
    InvalidRowCode {
        file: &'static str,
        line: usize,
        code: String,
    },
    FieldCount {
        file: &'static str,
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// The airway class field is neither `1` (low) nor `2` (high).
    InvalidAirwayClass {
        file: &'static str,
        line: usize,
        class: String,
    },
    InvalidNumber {
        file: &'static str,
        line: usize,
        value: String,
    },
    /// A runway or helipad row appeared before any airport header.
    RunwayBeforeAirport { file: &'static str, line: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory { path } => {
                write!(f, "{} is not a directory", path.display())
            }
            Self::MissingFile { path } => {
                write!(f, "{} missing", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::TruncatedHeader { file } => {
                write!(f, "{file} invalid: file ends inside the header")
            }
            Self::InvalidOrigin { file, line } => {
                write!(f, "{file} invalid, line {line}: invalid origin code")
            }
            Self::InvalidVersion { file, line } => {
                write!(f, "{file} invalid, line {line}: invalid version string")
            }
            Self::UnsupportedVersion { file, version } => {
                write!(f, "{file}: unsupported file format version {version}")
            }
            Self::ExpectedEmptyLine { file, line } => {
                write!(f, "{file} invalid, line {line}: expected empty line")
            }
            Self::InvalidRowCode { file, line, code } => {
                write!(f, "{file} invalid, line {line}: unrecognised row code {code:?}")
            }
            Self::FieldCount {
                file,
                line,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{file} invalid, line {line}: expected {expected} fields but got {actual}"
                )
            }
            Self::InvalidAirwayClass { file, line, class } => {
                write!(f, "{file} invalid, line {line}: invalid airway class {class:?}")
            }
            Self::InvalidNumber { file, line, value } => {
                write!(f, "{file} invalid, line {line}: {value:?} is not a number")
            }
            Self::RunwayBeforeAirport { file, line } => {
                write!(f, "{file} invalid, line {line}: runway before airport header")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
