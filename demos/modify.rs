// SPDX-License-Identifier: GPL-3.0-or-later

/*
 *  modify.rs - Programmatic blueprint editing demo.
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
use serde_json::json;

use factorio_blueprint::parser::to_json_pretty;
use factorio_blueprint::{Error, Value, decode, encode, encode_default};

const DECIDER: &str = "0eJyVUdtKxEAM/ZVlnl3Yrq6rPizob4gM0zargc6FTKZYSv/dTFrQBxF8muSc5OQkM5t2KJAIA5un3WywiyFL9DqbjO/BDYrylEACgwze3OxMcF7zHjrsgfZd9C0Gx5HMIjSGHj6Fb5Y3ySAwMsKmqtlkQ/EtUK35W07YFLP0x6BOquxBwKm+dVaPBN1GV0L8M8XBtvDhRoykXZuwFbJXrazwFSmz/WXPEYmLYD+8rVX7Z12wHomdnmyd6ZMj9SuVl9oWC6fyT+2XTTtNYrQEtleK3mIQIam6uiHDsuhJ9R+k8fvvBByB8nqH40Nzd348nk/Nqbm9PyzLF/gIndQ=";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of decider combinators to place in a row.
    #[arg(short, long, default_value_t = 5)]
    count: u64,
}

fn signal(name: &str) -> Value {
    json!({"type": "virtual", "name": name})
}

fn decider_combinator(index: u64) -> Value {
    json!({
        "entity_number": index + 1,
        "name": "decider-combinator",
        "position": {"x": index.saturating_mul(2), "y": 0},
        "direction": 0,
        "control_behavior": {
            "decider_conditions": {
                "first_signal": signal(&format!("signal-{}", index)),
                "constant": index.saturating_mul(10),
                "comparator": ">",
                "output_signal": signal("signal-each"),
                "copy_count_from_input": true,
            }
        }
    })
}

fn describe_conditions(document: &Value) {
    let conditions = &document["blueprint"]["entities"][0]["control_behavior"]["decider_conditions"];
    println!("  Input: {}", conditions["first_signal"]["name"].as_str().unwrap_or("-"));
    println!("  Comparator: {}", conditions["comparator"].as_str().unwrap_or("-"));
    match conditions["constant"].as_number() {
        Some(constant) => println!("  Constant: {}", constant),
        None => println!("  Constant: -"),
    }
    println!("  Output: {}", conditions["output_signal"]["name"].as_str().unwrap_or("-"));
}

fn modify_decider() -> Result<String, Error> {
    let (mut document, version_tag) = decode(DECIDER)?;

    println!("Original Settings:");
    describe_conditions(&document);

    match document
        .pointer_mut("/blueprint/entities/0/control_behavior/decider_conditions")
        .and_then(Value::as_object_mut)
    {
        Some(conditions) => {
            conditions.insert("first_signal".to_string(), signal("signal-red"));
            conditions.insert("comparator".to_string(), json!("<"));
            conditions.insert("constant".to_string(), json!(50));
            conditions.insert("output_signal".to_string(), signal("signal-green"));
        }
        None => println!("Blueprint has no decider conditions to modify"),
    }

    println!("\nModified Settings:");
    describe_conditions(&document);

    encode(&document, version_tag)
}

fn combinator_row(count: u64) -> Result<String, Error> {
    let document = json!({
        "blueprint": {
            "icons": [
                {
                    "signal": {"type": "item", "name": "decider-combinator"},
                    "index": 1,
                }
            ],
            "entities": (0..count).map(decider_combinator).collect::<Vec<_>>(),
            "item": "blueprint",
            "version": 281479275151360u64,
        }
    });

    encode_default(&document)
}

fn coordinate(value: &Value) -> String {
    match value.as_number() {
        Some(number) => number.to_string(),
        None => "?".to_string(),
    }
}

fn inspect_blueprint() -> Result<(), Error> {
    let (document, _version_tag) = decode(DECIDER)?;

    println!("Blueprint Structure:");
    println!("{}\n", to_json_pretty(&document)?);

    let entities = document["blueprint"]["entities"]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default();
    println!("Number of entities: {}", entities.len());

    for (i, entity) in entities.iter().enumerate() {
        println!("\nEntity {}:", i + 1);
        println!("  Type: {}", entity["name"].as_str().unwrap_or("-"));
        println!(
            "  Position: ({}, {})",
            coordinate(&entity["position"]["x"]),
            coordinate(&entity["position"]["y"])
        );
        if entity.get("control_behavior").is_some() {
            println!("  Has control behavior: Yes");
        }
    }

    Ok(())
}

fn heading(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    heading("Example 1: Modify a decider combinator");
    match modify_decider() {
        Ok(blueprint) => println!("\nModified Blueprint:\n{}\n", blueprint),
        Err(error) => {
            eprintln!("Error modifying blueprint: {}", error);
            return ExitCode::FAILURE;
        }
    }

    heading(&format!("Example 2: Create {} decider combinators", args.count));
    match combinator_row(args.count) {
        Ok(blueprint) => println!("{}\n", blueprint),
        Err(error) => {
            eprintln!("Error encoding blueprint: {}", error);
            return ExitCode::FAILURE;
        }
    }

    heading("Example 3: Inspect blueprint structure");
    if let Err(error) = inspect_blueprint() {
        eprintln!("Error inspecting blueprint: {}", error);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
