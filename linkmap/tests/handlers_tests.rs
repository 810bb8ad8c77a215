use linkmap::commands::command_argument_builder;
use linkmap::handlers::*;
use linkmap_core::config::{AnalysisOptions, LayoutChoice, RenderOptions};
use linkmap_core::report::ReportFormat;
use linkmap_core::LinkMapError;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

const EXPORT: &str = "Address,Link 1,Anchor 1,Link 2,Anchor 2\n\
                      https://ex.com/,https://ex.com/a,A,https://ex.com/b,B\n\
                      https://ex.com/a,https://ex.com/b,B,,\n";

fn export_file(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", contents).unwrap();
    temp_file
}

// ============================================================================
// Argument parsing
// ============================================================================

#[test]
fn test_analyze_args_to_options() {
    let matches = command_argument_builder()
        .try_get_matches_from([
            "linkmap",
            "analyze",
            "export.csv",
            "--layout",
            "named",
            "--top",
            "5",
            "--url-marker",
            "Link URL",
            "--node-base",
            "4",
        ])
        .unwrap();
    let args = matches.subcommand_matches("analyze").unwrap();

    let options = analysis_options_from_args(args);
    assert_eq!(options.layout, LayoutChoice::Named);
    assert_eq!(options.top_n, 5);
    assert_eq!(options.markers.url_marker, "Link URL");
    assert_eq!(options.markers.anchor_marker, "Texto_Ancla");

    let render = render_options_from_args(args);
    assert_eq!(render.network.sizing.base, 4);
    assert_eq!(render.network.sizing.scale, 3);

    assert_eq!(format_from_args(args, ReportFormat::Text), ReportFormat::Csv);
}

#[test]
fn test_edges_args_use_defaults() {
    let matches = command_argument_builder()
        .try_get_matches_from(["linkmap", "edges", "export.csv", "-f", "markdown"])
        .unwrap();
    let args = matches.subcommand_matches("edges").unwrap();

    let options = analysis_options_from_args(args);
    assert_eq!(options, AnalysisOptions::default());
    assert_eq!(format_from_args(args, ReportFormat::Text), ReportFormat::Markdown);
}

#[test]
fn test_invalid_layout_is_rejected() {
    let result = command_argument_builder().try_get_matches_from([
        "linkmap",
        "analyze",
        "export.csv",
        "--layout",
        "diagonal",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_subcommand_is_required() {
    assert!(command_argument_builder().try_get_matches_from(["linkmap"]).is_err());
}

#[test]
fn test_resolve_output_dir_plain_path() {
    assert_eq!(resolve_output_dir("out/report"), PathBuf::from("out/report"));
}

#[test]
fn test_resolve_output_dir_expands_tilde() {
    if std::env::var("HOME").is_err() {
        return;
    }
    let resolved = resolve_output_dir("~/linkmap-report");
    assert!(!resolved.to_string_lossy().starts_with('~'));
    assert!(resolved.ends_with("linkmap-report"));
}

// ============================================================================
// Running an analysis
// ============================================================================

#[test]
fn test_run_analysis_writes_all_views() -> Result<(), Box<dyn std::error::Error>> {
    let input = export_file(EXPORT);
    let out = TempDir::new()?;
    let output_dir = out.path().join("report");

    let (outcome, outputs) = run_analysis(
        input.path(),
        &output_dir,
        &AnalysisOptions::default(),
        &RenderOptions::default(),
        ReportFormat::Csv,
    )?;

    assert_eq!(outcome.analysis().map(|a| a.link_count()), Some(3));
    assert_eq!(outputs.len(), 4);
    assert!(outputs.iter().all(ViewOutput::is_ok));

    let network = fs::read_to_string(output_dir.join(NETWORK_FILE))?;
    assert!(network.contains("https://ex.com/b"));
    let chart = fs::read_to_string(output_dir.join(RANKING_FILE))?;
    assert_eq!(chart.matches("<rect class=\"bar\"").count(), 2);
    let edges = fs::read_to_string(output_dir.join("edges.csv"))?;
    assert_eq!(edges.lines().count(), 4);
    assert!(edges.starts_with("Source,Target,Anchor_Text"));
    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output_dir.join(SUMMARY_FILE))?)?;
    assert_eq!(summary["report"]["summary"]["links"], 3);

    Ok(())
}

#[test]
fn test_run_analysis_failed_view_does_not_block_others() -> Result<(), Box<dyn std::error::Error>> {
    let input = export_file(EXPORT);
    let out = TempDir::new()?;
    let mut render = RenderOptions::default();
    render.chart.width = 1;

    let (_, outputs) = run_analysis(
        input.path(),
        out.path(),
        &AnalysisOptions::default(),
        &render,
        ReportFormat::Markdown,
    )?;

    let failed: Vec<&str> = outputs
        .iter()
        .filter(|o| !o.is_ok())
        .map(|o| o.name)
        .collect();
    assert_eq!(failed, vec!["most linked chart"]);
    assert!(out.path().join(NETWORK_FILE).exists());
    assert!(out.path().join("edges.md").exists());
    assert!(!out.path().join(RANKING_FILE).exists());

    Ok(())
}

#[test]
fn test_run_analysis_empty_input_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let input = export_file("Address,Link 1,Anchor 1\nhttps://ex.com/,,nothing\n");
    let out = TempDir::new()?;
    let output_dir = out.path().join("report");

    let (outcome, outputs) = run_analysis(
        input.path(),
        &output_dir,
        &AnalysisOptions::default(),
        &RenderOptions::default(),
        ReportFormat::Csv,
    )?;

    assert!(outcome.is_empty());
    assert!(outputs.is_empty());
    assert!(!output_dir.exists());

    Ok(())
}

#[test]
fn test_run_analysis_bad_layout_is_format_error() {
    let input = export_file("Only\nhttps://ex.com/\n");
    let out = TempDir::new().unwrap();

    let err = run_analysis(
        input.path(),
        out.path(),
        &AnalysisOptions::default(),
        &RenderOptions::default(),
        ReportFormat::Csv,
    )
    .unwrap_err();

    let core_error = err.downcast_ref::<LinkMapError>().unwrap();
    assert!(core_error.is_format_error());
    assert!(LinkMapError::layout_hint().contains("anchor text"));
}

#[test]
fn test_load_analysis_none_when_no_links() -> Result<(), Box<dyn std::error::Error>> {
    let input = export_file("Address,Link 1,Anchor 1\n");
    assert!(load_analysis(input.path(), &AnalysisOptions::default())?.is_none());

    let input = export_file(EXPORT);
    assert!(load_analysis(input.path(), &AnalysisOptions::default())?.is_some());

    Ok(())
}
