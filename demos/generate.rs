// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  generate.rs - Generate a gem constant combinator blueprint.
 *  Copyright (C) 2026  Forest Crossman <cyrozap@gmail.com>
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::process::ExitCode;

use clap::Parser;

use factorio_blueprint::template::{GEM_ITEMS, QUALITY_TIERS, gem_constant_combinator};
use factorio_blueprint::{DEFAULT_VERSION_TAG, EncodeOptions, encode_with_options};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write JSON with spaces after separators.
    #[arg(long)]
    spaced: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let options = if args.spaced {
        EncodeOptions::spaced()
    } else {
        EncodeOptions::new()
    };

    let blueprint =
        match encode_with_options(&gem_constant_combinator(), DEFAULT_VERSION_TAG, options) {
            Ok(blueprint) => blueprint,
            Err(error) => {
                eprintln!("Error encoding blueprint: {}", error);
                return ExitCode::FAILURE;
            }
        };

    println!("Factorio Constant Combinator Blueprint:");
    println!("{}", "=".repeat(60));
    println!("{}", blueprint);
    println!("{}", "=".repeat(60));
    println!("\nCopy the string above and paste it into Factorio to import the blueprint.");
    println!("\nSignals:");
    println!("  - Items: {}", GEM_ITEMS.join(", "));
    println!("  - Qualities: {}", QUALITY_TIERS.join(", "));
    println!("  - Count: 1 of each");

    ExitCode::SUCCESS
}
