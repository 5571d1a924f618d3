//! BERSIM - BER vs SNR simulation for AM, FM and QAM

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bersim_tools::cli::{self, Cli};
use bersim_tools::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.debug)?;
    info!("BERSIM starting");

    cli::execute(cli)
}
