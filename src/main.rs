use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{add, catalog, GlobalArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "kitbag")]
#[command(version = VERSION)]
#[command(about = "Interactive CLI for adding versioned utility bundles to a project")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a utility and add it to the current project (the default)
    Add(add::AddArgs),
    /// List the available utilities
    #[command(visible_alias = "list")]
    Catalog(catalog::CatalogArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    // Bare `kitbag` runs the interactive add flow, like the original tool.
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Add(add::AddArgs::default()));

    let (json_result, exit_code) = commands::run_json(command, &global);
    output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
