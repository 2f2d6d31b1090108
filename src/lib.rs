//! Heads-up no-limit Texas Hold'em postflop GTO solver core. Four pieces, spec §2:
//! a precomputed 7-card hand-strength evaluator (`cards::evaluator`), a range grammar
//! and 169-cell aggregator (`range`, `aggregate`), a vanilla-CFR engine over a bounded
//! postflop betting tree (`cfr`), and the glue that turns CLI flags into a solved grid
//! (`cli`, `driver`, `table`).

pub mod aggregate;
pub mod cards;
pub mod cfr;
pub mod cli;
pub mod driver;
pub mod error;
pub mod range;
pub mod table;

/// initializes logging to stderr plus a timestamped file under `logs/`, spec §7.1. No
/// signal handling here: the CLI binary is a one-shot batch run, not a long-lived server.
pub fn init(verbose: bool) {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term_level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{time}.log")).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        term_level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
