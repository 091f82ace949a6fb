//! CLI entry point for the photomosaic composition engine

use clap::Parser;
use mosaictile::io::cli::{Cli, MosaicProcessor};

fn main() -> mosaictile::Result<()> {
    let cli = Cli::parse();
    let processor = MosaicProcessor::new(cli);
    processor.process()
}
