//! CLI entry point for the clipped grid explorer

use clap::Parser;
use innovation_grid::io::cli::{Cli, ExplorerRunner};

fn main() -> innovation_grid::Result<()> {
    let cli = Cli::parse();
    cli.init_logging()?;

    let mut runner = ExplorerRunner::new(cli);
    runner.run()?;
    Ok(())
}
