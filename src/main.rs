// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! loadstone CLI - registers a sample contact bundle and resolves modules

use clap::Parser;
use loadstone::{Factory, ModuleRegistry, VERSION, factory};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Parser)]
#[command(
    name = "loadstone",
    about = "In-memory module registry demo",
    version = VERSION,
    author = "Pegasus Heavy Industries"
)]
struct Cli {
    /// Module to resolve from the sample bundle
    #[arg(default_value = "app")]
    module: String,

    /// List registered module paths and exit
    #[arg(short, long)]
    list: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

/// Sample contact record shipped with the demo bundle
#[derive(Debug, Default, Serialize)]
struct Contact {
    first_name: String,
    last_name: String,
    short_bio: String,
    email: String,
    links: Links,
}

#[derive(Debug, Default, Serialize)]
struct Links {
    twitter: String,
    github: String,
    website: String,
}

fn sample_contact() -> Contact {
    Contact {
        first_name: "Mark".into(),
        last_name: "Johnson".into(),
        short_bio: "Web designer, developer and teacher. Co-founder of Pathwright".into(),
        email: "wmdmark@gmail.com".into(),
        links: Links {
            twitter: "http://twitter.com/wmdmark".into(),
            github: "http://github.com/wmdmark".into(),
            website: "http://pathwright.com".into(),
        },
    }
}

fn full_name(contact: &Value) -> String {
    format!(
        "{} {}",
        contact["first_name"].as_str().unwrap_or(""),
        contact["last_name"].as_str().unwrap_or("")
    )
}

/// A contact has links when its link values are not all empty.
fn has_links(contact: &Value) -> bool {
    contact["links"]
        .as_object()
        .map(|links| {
            links
                .values()
                .any(|v| v.as_str().is_some_and(|s| !s.is_empty()))
        })
        .unwrap_or(false)
}

/// The demo bundle: contact data modules plus an `app` module that pulls
/// them together through relative requests and the index fallback.
fn contact_bundle() -> Vec<(&'static str, Factory)> {
    vec![
        (
            "contact/defaults",
            factory(|exports, _require, _module| {
                *exports.borrow_mut() =
                    serde_json::to_value(Contact::default()).unwrap_or_default();
                Ok(())
            }),
        ),
        (
            "contact/sample",
            factory(|exports, _require, _module| {
                *exports.borrow_mut() = serde_json::to_value(sample_contact()).unwrap_or_default();
                Ok(())
            }),
        ),
        (
            "contact/index",
            factory(|exports, require, _module| {
                let defaults = require.require("./defaults")?;
                let sample = require.require("./sample")?;
                *exports.borrow_mut() = json!({
                    "defaults": defaults.borrow().clone(),
                    "sample": sample.borrow().clone(),
                });
                Ok(())
            }),
        ),
        (
            "app",
            factory(|exports, require, _module| {
                let contact = require.require("contact")?;
                let sample = contact.borrow()["sample"].clone();
                *exports.borrow_mut() = json!({
                    "full_name": full_name(&sample),
                    "has_links": has_links(&sample),
                    "contact": sample,
                });
                Ok(())
            }),
        ),
    ]
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("loadstone=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("loadstone=warn")
            .init();
    }

    let registry = ModuleRegistry::new();
    registry.register_many(contact_bundle());

    if cli.list {
        let mut paths = registry.list();
        paths.sort();
        for path in paths {
            println!("{}", path);
        }
        return Ok(());
    }

    match registry.resolve(&cli.module) {
        Ok(exports) => {
            println!("{}", serde_json::to_string_pretty(&*exports.borrow())?);
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
