//! Standalone table-builder binary, spec §1/§6.1: builds the evaluator tables from
//! scratch and writes them to a `handranks.dat` file, independent of any solve run. The
//! main binary can always rebuild lazily via `table::load_or_build`; this one exists so a
//! deployment can pre-bake the file once and ship it alongside the binary.

use holdem_gto_core::cards::evaluator::Evaluator;
use holdem_gto_core::table::write_handranks;
use std::path::PathBuf;

fn main() {
    holdem_gto_core::init(false);

    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("handranks.dat"));

    log::info!("building evaluator tables");
    let evaluator = Evaluator::build();

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            log::error!("could not create {path:?}: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = write_handranks(&evaluator, file) {
        log::error!("could not write {path:?}: {err}");
        std::process::exit(1);
    }

    log::info!("wrote evaluator tables to {path:?}");
}
