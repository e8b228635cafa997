//! CLI entry point for the brushstroke painting tool

use clap::Parser;
use gendraw::io::cli::{Cli, Painter};
use gendraw::io::logging;

fn main() -> gendraw::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);
    Painter::new(cli).process().map(|_| ())
}
