use crate::CLAP_STYLING;
use clap::{Arg, arg, command};
use std::path::PathBuf;

const FORMATS: [&str; 5] = ["text", "json", "csv", "html", "markdown"];
const LAYOUTS: [&str; 3] = ["auto", "positional", "named"];

fn input_arg() -> Arg {
    arg!(<CSV>)
        .help("Path to the CSV link export")
        .value_parser(clap::value_parser!(PathBuf))
}

/// Options shared by every subcommand that reads an export
fn layout_args() -> [Arg; 4] {
    [
        arg!(--"layout" <LAYOUT>)
            .required(false)
            .help("Column layout: auto-detect, positional (URL/anchor pairs after column 1) or named (marker tokens)")
            .value_parser(LAYOUTS)
            .default_value("auto"),
        arg!(--"source-column" <NAME>)
            .required(false)
            .help("Source page column for the named layout")
            .default_value(linkmap_core::config::DEFAULT_SOURCE_COLUMN),
        arg!(--"url-marker" <TOKEN>)
            .required(false)
            .help("Substring identifying target URL columns in the named layout")
            .default_value(linkmap_core::config::DEFAULT_URL_MARKER),
        arg!(--"anchor-marker" <TOKEN>)
            .required(false)
            .help("Substring identifying anchor text columns in the named layout")
            .default_value(linkmap_core::config::DEFAULT_ANCHOR_MARKER),
    ]
}

fn top_arg() -> Arg {
    arg!(--"top" <N>)
        .required(false)
        .help("Number of pages in the most-linked ranking")
        .value_parser(clap::value_parser!(usize))
        .default_value("20")
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkmap")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkmap")
        .about("Visualize a website's internal link structure from a CSV export")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Enable debug logging on stderr").required(false))
        .subcommand_required(true)
        .subcommand(
            command!("analyze")
                .about(
                    "Normalize the export into an edge list and write the network map, \
                the most-linked chart and the edge table.",
                )
                .arg(input_arg())
                .arg(
                    arg!(-o --"output" <DIR>)
                        .required(false)
                        .help("Directory for the generated files")
                        .default_value("./linkmap-report"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Edge table format: text, json, csv, html, markdown")
                        .value_parser(FORMATS)
                        .default_value("csv"),
                )
                .arg(top_arg())
                .arg(
                    arg!(--"node-base" <SIZE>)
                        .required(false)
                        .help("Base node size in the network map")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"node-scale" <SIZE>)
                        .required(false)
                        .help("Node size added per incoming link")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("3"),
                )
                .args(layout_args()),
        )
        .subcommand(
            command!("edges")
                .about("Print the normalized edge list (Source, Target, Anchor_Text)")
                .arg(input_arg())
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json, csv, html, markdown")
                        .value_parser(FORMATS)
                        .default_value("text"),
                )
                .args(layout_args()),
        )
        .subcommand(
            command!("view")
                .about("Explore the link graph, ranking and edge table in the terminal")
                .arg(input_arg())
                .arg(top_arg())
                .args(layout_args()),
        )
}
