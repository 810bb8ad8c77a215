use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use linkmap_core::config::{AnalysisOptions, LayoutChoice, MarkerConfig, NodeSizing, RenderOptions};
use linkmap_core::pipeline::{Analysis, Outcome, analyze_file};
use linkmap_core::report::{
    ReportFormat, generate_json_report, generate_summary_text, render_edge_table, save_report,
};
use linkmap_core::views::{Views, render_views};
use linkmap_core::LinkMapError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const NETWORK_FILE: &str = "network.html";
pub const RANKING_FILE: &str = "top_linked.svg";
pub const EDGES_FILE_STEM: &str = "edges";
pub const SUMMARY_FILE: &str = "summary.json";

// Argument helpers

/// Build analysis options from the shared layout/marker arguments
pub fn analysis_options_from_args(args: &ArgMatches) -> AnalysisOptions {
    let defaults = AnalysisOptions::default();
    let marker_defaults = MarkerConfig::default();

    let layout = string_arg(args, "layout")
        .as_deref()
        .and_then(LayoutChoice::from_str)
        .unwrap_or(defaults.layout);

    let markers = MarkerConfig {
        source_column: string_arg(args, "source-column").unwrap_or(marker_defaults.source_column),
        url_marker: string_arg(args, "url-marker").unwrap_or(marker_defaults.url_marker),
        anchor_marker: string_arg(args, "anchor-marker").unwrap_or(marker_defaults.anchor_marker),
    };

    let top_n = args
        .try_get_one::<usize>("top")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(defaults.top_n);

    AnalysisOptions {
        layout,
        markers,
        top_n,
    }
}

pub fn render_options_from_args(args: &ArgMatches) -> RenderOptions {
    let mut options = RenderOptions::default();
    let sizing_defaults = NodeSizing::default();
    options.network.sizing = NodeSizing {
        base: args
            .try_get_one::<u32>("node-base")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(sizing_defaults.base),
        scale: args
            .try_get_one::<u32>("node-scale")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(sizing_defaults.scale),
    };
    options
}

pub fn format_from_args(args: &ArgMatches, fallback: ReportFormat) -> ReportFormat {
    string_arg(args, "format")
        .as_deref()
        .and_then(ReportFormat::from_str)
        .unwrap_or(fallback)
}

fn string_arg(args: &ArgMatches, id: &str) -> Option<String> {
    args.try_get_one::<String>(id).ok().flatten().cloned()
}

/// Expand `~` in a user-supplied output directory
pub fn resolve_output_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

// View output

/// Where a rendered view ended up
#[derive(Debug)]
pub struct ViewOutput {
    pub name: &'static str,
    pub result: std::result::Result<PathBuf, String>,
}

impl ViewOutput {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Write each successfully rendered view to `dir`. A view that failed to render,
/// or failed to write, is reported without affecting the others.
pub fn write_views(views: &Views, dir: &Path, table_format: ReportFormat) -> Result<Vec<ViewOutput>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let edges_file = format!("{}.{}", EDGES_FILE_STEM, table_format.extension());
    let targets: [(&'static str, &linkmap_core::error::Result<String>, String); 3] = [
        ("network map", &views.network, NETWORK_FILE.to_string()),
        ("most linked chart", &views.ranking, RANKING_FILE.to_string()),
        ("edge table", &views.table, edges_file),
    ];

    let outputs = targets
        .into_iter()
        .map(|(name, rendered, file_name)| {
            let result = match rendered {
                Ok(content) => {
                    let path = dir.join(file_name);
                    save_report(content, &path)
                        .map(|_| path)
                        .map_err(|e| format!("write failed: {}", e))
                }
                Err(e) => Err(e.to_string()),
            };
            ViewOutput { name, result }
        })
        .collect();

    Ok(outputs)
}

fn write_summary(analysis: &Analysis, dir: &Path, render_options: &RenderOptions) -> ViewOutput {
    let path = dir.join(SUMMARY_FILE);
    let result = generate_json_report(analysis, &render_options.network.sizing)
        .map_err(|e| e.to_string())
        .and_then(|json| {
            save_report(&json, &path)
                .map(|_| path)
                .map_err(|e| format!("write failed: {}", e))
        });
    ViewOutput {
        name: "json summary",
        result,
    }
}

/// Load, normalize and render everything for one export
pub fn run_analysis(
    input: &Path,
    output_dir: &Path,
    options: &AnalysisOptions,
    render_options: &RenderOptions,
    table_format: ReportFormat,
) -> Result<(Outcome, Vec<ViewOutput>)> {
    let outcome = analyze_file(input, options)?;

    let outputs = match &outcome {
        Outcome::Complete(analysis) => {
            let views = render_views(analysis, render_options, table_format);
            let mut outputs = write_views(&views, output_dir, table_format)?;
            outputs.push(write_summary(analysis, output_dir, render_options));
            outputs
        }
        Outcome::Empty { .. } => Vec::new(),
    };

    Ok((outcome, outputs))
}

/// Load and normalize; `None` when the file holds no valid links
pub fn load_analysis(input: &Path, options: &AnalysisOptions) -> Result<Option<Analysis>> {
    match analyze_file(input, options)? {
        Outcome::Complete(analysis) => Ok(Some(analysis)),
        Outcome::Empty { .. } => Ok(None),
    }
}

// Console helpers

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_empty_warning() {
    println!(
        "{} {}",
        "⚠".yellow().bold(),
        "No valid links were found in the file. Check that it follows the expected format."
            .yellow()
    );
}

/// Print a pipeline error plus the expected layout when the input was the problem
pub fn report_error(error: &anyhow::Error) {
    eprintln!("{} {}", "✗".red().bold(), format!("{:#}", error).red());
    let input_problem = error
        .downcast_ref::<LinkMapError>()
        .map(LinkMapError::is_format_error)
        .unwrap_or(false);
    if input_problem {
        eprintln!("{} {}", "ℹ".yellow(), LinkMapError::layout_hint().yellow());
    }
}

fn input_path(args: &ArgMatches) -> Result<&PathBuf> {
    args.get_one::<PathBuf>("CSV")
        .context("A CSV file must be provided")
}

// Command handlers

pub fn handle_analyze(args: &ArgMatches, quiet: bool) -> Result<()> {
    let input = input_path(args)?;
    let output_raw = string_arg(args, "output").unwrap_or_else(|| "./linkmap-report".to_string());
    let output_dir = resolve_output_dir(&output_raw);
    let options = analysis_options_from_args(args);
    let render_options = render_options_from_args(args);
    let table_format = format_from_args(args, ReportFormat::Csv);

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Processing {}", input.display()));

    let result = run_analysis(input, &output_dir, &options, &render_options, table_format);
    spinner.finish_and_clear();
    let (outcome, outputs) = result?;

    if outcome.is_empty() {
        print_empty_warning();
        return Ok(());
    }

    if let Some(analysis) = outcome.analysis() {
        println!(
            "{} File processed. Found {} internal links.",
            "✓".green().bold(),
            analysis.link_count().to_string().bright_white().bold()
        );
    }

    if !quiet {
        print!("{}", generate_summary_text(&outcome));
    }

    print_divider();
    for output in &outputs {
        match &output.result {
            Ok(path) => println!(
                "{} {}: {}",
                "✓".green().bold(),
                output.name,
                path.display().to_string().bright_white()
            ),
            Err(e) => println!("{} {}: {}", "✗".red().bold(), output.name, e.red()),
        }
    }
    print_divider();

    Ok(())
}

pub fn handle_edges(args: &ArgMatches) -> Result<()> {
    let input = input_path(args)?;
    let options = analysis_options_from_args(args);
    let format = format_from_args(args, ReportFormat::Text);

    match load_analysis(input, &options)? {
        Some(analysis) => {
            print!("{}", render_edge_table(&analysis.edges, format)?);
        }
        None => print_empty_warning(),
    }
    Ok(())
}

pub fn handle_view(args: &ArgMatches) -> Result<()> {
    let input = input_path(args)?;
    let options = analysis_options_from_args(args);

    match load_analysis(input, &options)? {
        Some(analysis) => {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.display().to_string());
            linkmap_tui::run(analysis, &name)
        }
        None => {
            print_empty_warning();
            Ok(())
        }
    }
}
