use linkmap::commands::command_argument_builder;
use linkmap::handlers::{handle_analyze, handle_edges, handle_view, report_error};
use linkmap::print_banner;
use tracing::Level;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    let result = match chosen_command.subcommand() {
        Some(("analyze", sub_matches)) => {
            init_logging(verbose);
            if !quiet {
                print_banner();
            }
            handle_analyze(sub_matches, quiet)
        }
        Some(("edges", sub_matches)) => {
            init_logging(verbose);
            handle_edges(sub_matches)
        }
        // No subscriber here: log lines would corrupt the alternate screen
        Some(("view", sub_matches)) => handle_view(sub_matches),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
