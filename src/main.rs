use clap::Parser;
use holdem_gto_core::cli::Cli;
use holdem_gto_core::{driver, init};

fn main() {
    let cli = Cli::parse();
    init(cli.verbose);
    if let Err(err) = driver::run(cli) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
