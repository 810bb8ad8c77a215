pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    analysis_options_from_args, format_from_args, load_analysis, render_options_from_args,
    report_error, resolve_output_dir, run_analysis, write_views,
};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn print_banner() {
    let banner = r#"
     _ _       _
    | (_)_ __ | | ___ __ ___   __ _ _ __
    | | | '_ \| |/ / '_ ` _ \ / _` | '_ \
    | | | | | |   <| | | | | | (_| | |_) |
    |_|_|_| |_|_|\_\_| |_| |_|\__,_| .__/
                                   |_|   internal link explorer
    "#;
    println!("{}", banner);
}
