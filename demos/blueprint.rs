// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  blueprint.rs - Decode or encode Factorio blueprint strings.
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

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use factorio_blueprint::decoder::DecodedBlueprintString;
use factorio_blueprint::encoder::DEFAULT_COMPRESSION_LEVEL;
use factorio_blueprint::interpreter::BlueprintSummary;
use factorio_blueprint::parser::*;
use factorio_blueprint::{DEFAULT_VERSION_TAG, EncodeOptions, encode_with_options};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// A blueprint string to decode, or a JSON file to encode.
    input: String,

    /// Treat the input as a JSON file even without a `.json` extension.
    #[arg(short, long)]
    encode: bool,

    /// Where to save the decoded document.
    #[arg(short, long, default_value = "blueprint_decoded.json")]
    output: PathBuf,

    /// Version tag to prefix when encoding.
    #[arg(short, long, default_value_t = DEFAULT_VERSION_TAG)]
    tag: char,

    /// Write JSON with spaces after separators when encoding.
    #[arg(long)]
    spaced: bool,

    /// zlib compression level (0-9) when encoding.
    #[arg(short, long, default_value_t = DEFAULT_COMPRESSION_LEVEL)]
    level: u32,
}

fn rule() -> String {
    "-".repeat(60)
}

fn encode_file(args: &Args) -> Result<(), factorio_blueprint::Error> {
    let document = load_from_file(&args.input)?;
    println!("Blueprint data loaded from: {}", args.input);

    let layout = if args.spaced {
        JsonLayout::Spaced
    } else {
        JsonLayout::Compact
    };
    let options = EncodeOptions::new()
        .with_layout(layout)
        .with_level(args.level);
    let blueprint = encode_with_options(&document, args.tag, options)?;

    println!("\nEncoded Blueprint String:");
    println!("{}", rule());
    println!("{}", blueprint);
    println!("{}", rule());
    Ok(())
}

fn decode_string(args: &Args) -> Result<(), factorio_blueprint::Error> {
    let decoded = DecodedBlueprintString::new(&args.input)?;
    let parsed = ParsedBlueprint::from_decoded(&decoded)?;

    println!("\n{}", "=".repeat(60));
    println!("BLUEPRINT SUMMARY (version tag {:?})", parsed.version_tag);
    println!("{}", "=".repeat(60));
    print!("{}", BlueprintSummary::from_document(&parsed.document));
    println!("{}\n", "=".repeat(60));

    println!("Full Blueprint Data (JSON):");
    println!("{}", rule());
    println!("{}", to_json_pretty(&parsed.document)?);
    println!("{}", rule());

    save_to_file(&args.output, &parsed.document)?;
    println!("Blueprint data saved to: {}", args.output.display());
    println!("\nYou can now edit {:?} and encode it again.", args.output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let is_file = args.encode
        || Path::new(&args.input)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let result = if is_file {
        encode_file(&args)
    } else {
        decode_string(&args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error processing {:?}: {} ({:?})", &args.input, error, error.kind());
            ExitCode::FAILURE
        }
    }
}
