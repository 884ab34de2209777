mod cli;
mod lines_cmd;
mod page_range;
mod shared;
mod tables_cmd;

use clap::Parser;
use cli::Cli;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Tables {
            ref file,
            ref pages,
            ref format,
            ref grid,
        } => tables_cmd::run(file, pages.as_deref(), format, grid),
        cli::Commands::Lines {
            ref file,
            ref pages,
            ref format,
            min_line_length,
        } => lines_cmd::run(file, pages.as_deref(), format, min_line_length),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}

/// Log to stderr at `warn`, or `debug` with `--verbose`. `RUST_LOG` directives win.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
