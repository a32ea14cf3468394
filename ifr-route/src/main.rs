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

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use ifr::prelude::*;

/// Decodes an IFR route against an X-Plane navdata directory.
///
/// Prints the space-separated codes of the resolved waypoints on success.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory containing earth_awy.dat, earth_fix.dat, earth_nav.dat
    /// and apt.dat.
    #[arg(long, default_value = "navdata")]
    navdata: PathBuf,

    /// Route tokens, e.g. KBOS J121 KJFK.
    #[arg(required = true)]
    route: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    eprintln!("loading navdata from {}", cli.navdata.display());
    let nd = NavData::try_from_dir(&cli.navdata)
        .with_context(|| format!("loading navdata from {}", cli.navdata.display()))?;

    eprintln!("parsing route");
    let mut route = Route::new();
    match route.decode(&nd, &cli.route.join(" ")) {
        Ok(()) => {
            println!("{route}");
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("parse failed: {failure}");
            eprintln!("  remaining: {}", failure.remaining);
            for choice in &failure.choices {
                let point = choice.coordinate();
                eprintln!("  candidate {} at ({}, {})", choice.ident(), point.y(), point.x());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
