//! CLI entry point for the tile-reveal maze runner

use clap::Parser;
use tilemaze::io::cli::{Cli, Session, init_logging};

fn main() -> tilemaze::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose.log_level_filter());
    Session::new(cli).run()
}
