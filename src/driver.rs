//! End-to-end orchestration, spec §2/§6.2: range strings in, an aggregated 169-cell
//! strategy grid out. Ties `range`, `table`, `cfr`, and `aggregate` together behind the
//! CLI surface `cli` defines; the only module that knows about all four.

use crate::aggregate::{Aggregator, Sample};
use crate::cards::{Card, Evaluator};
use crate::cfr::{Solver, SolverConfig};
use crate::cli::{Cli, OutputFormat};
use crate::error::SolverError;
use crate::range::{self, Combo, HandClass, ParsedRange};
use anyhow::{ensure, Context};
use colored::Colorize;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// full deck, used to complete a partially specified board and to draw random boards.
fn full_deck() -> Vec<Card> {
    (0..52u8).map(Card::from).collect()
}

/// parses the 0/6/8/10-character board notation of spec §6.2 into 0, 3, 4, or 5 cards.
/// Shorter than a full river board, the remainder is filled in by random draw so every
/// solve still runs a complete flop-through-river tree.
fn parse_board(spec: &str) -> anyhow::Result<Vec<Card>> {
    ensure!(
        spec.len() % 2 == 0 && matches!(spec.len(), 0 | 6 | 8 | 10),
        "board {spec:?} must be 0, 6, 8, or 10 characters (pairs of <rank><suit>)"
    );
    spec.as_bytes()
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).expect("ascii card notation");
            Card::try_from(text).map_err(|_| anyhow::anyhow!("invalid card {text:?} in board {spec:?}"))
        })
        .collect()
}

/// fills a partial board up to five cards by drawing uniformly from the remaining deck.
fn complete_board(given: &[Card], rng: &mut impl Rng) -> [Card; 5] {
    let mut deck: Vec<Card> = full_deck().into_iter().filter(|c| !given.contains(c)).collect();
    let need = 5 - given.len();
    let mut board = given.to_vec();
    for i in 0..need {
        let pick = rng.random_range(i..deck.len());
        deck.swap(i, pick);
    }
    board.extend_from_slice(&deck[..need]);
    board.try_into().expect("exactly five board cards")
}

/// the boards to solve against: a single fixed/completed board if `--board` was given,
/// otherwise `--boards` independently sampled random boards (spec §6.2, §5 "Sampling").
fn boards_for(cli: &Cli, master_seed: u64) -> anyhow::Result<Vec<[Card; 5]>> {
    if let Some(spec) = &cli.board {
        let given = parse_board(spec)?;
        let mut rng = SmallRng::seed_from_u64(master_seed);
        return Ok(vec![complete_board(&given, &mut rng)]);
    }
    ensure!(cli.boards > 0, "--boards must be at least 1");
    Ok((0..cli.boards)
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(master_seed ^ (i as u64).wrapping_mul(0x9E3779B97F4A7C15));
            complete_board(&[], &mut rng)
        })
        .collect())
}

fn parse_bet_sizes(raw: &str) -> anyhow::Result<Vec<f64>> {
    let sizes: Result<Vec<f64>, _> = raw.split(',').map(|tok| tok.trim().parse::<f64>()).collect();
    let sizes = sizes.with_context(|| format!("--bet-sizes {raw:?} must be comma-separated numbers"))?;
    ensure!(!sizes.is_empty(), "--bet-sizes must name at least one size");
    ensure!(sizes.iter().all(|&s| s > 0.0), "--bet-sizes must all be positive");
    Ok(sizes)
}

/// overlap check across hero hole cards, villain hole cards, and the board, skipping the
/// combination rather than failing the whole run (spec §7's `CardOverlap` policy).
fn combo_conflicts(hero: &Combo, villain: &Combo, board: &[Card; 5]) -> bool {
    hero.overlaps(villain) || board.iter().any(|&c| c == hero.lo || c == hero.hi || c == villain.lo || c == villain.hi)
}

/// solves every legal hero-combo x villain-combo pair against one board, returning each
/// hero combo's root strategy. Independent of every other board, so the driver runs these
/// concurrently with `rayon` (spec §5 "Concurrency model").
fn solve_board(
    evaluator: &Evaluator,
    hero_range: &ParsedRange,
    villain_range: &ParsedRange,
    board: &[Card; 5],
    config: &SolverConfig,
    iterations: usize,
) -> Vec<(Combo, Vec<(crate::cfr::Action, f64)>)> {
    let mut out = Vec::new();
    for hero in &hero_range.combos {
        for villain in &villain_range.combos {
            if combo_conflicts(hero, villain, board) {
                continue;
            }
            let hero_cards = [hero.lo, hero.hi];
            let villain_cards = [villain.lo, villain.hi];
            let mut solver = match Solver::new(evaluator, hero_cards, villain_cards, *board, config.clone()) {
                Ok(solver) => solver,
                Err(SolverError::CardOverlap) => continue,
                Err(other) => {
                    log::warn!("unexpected solver setup error, skipping combination: {other}");
                    continue;
                }
            };
            solver.solve(iterations, || false);
            out.push((*hero, solver.root_strategy()));
        }
    }
    out
}

/// sizes rayon's global pool from `--workers`, falling back to the logical CPU count
/// the way the teacher's own worker-sizing convention does (spec §5 "Scheduling
/// model": board-level tasks fan out across workers). Only the first call in a process
/// has any effect; later calls are ignored, matching `rayon`'s own one-shot semantics.
fn configure_thread_pool(workers: Option<usize>) {
    let workers = workers.unwrap_or_else(num_cpus::get);
    let _ = rayon::ThreadPoolBuilder::new().num_threads(workers).build_global();
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    configure_thread_pool(cli.workers);
    let evaluator = crate::table::load_or_build(&cli.table).context("loading evaluator tables")?;
    let hero_range = range::parse_range(&cli.hero_range).context("parsing hero range")?;
    let villain_range = range::parse_range(&cli.villain_range).context("parsing villain range")?;
    let bet_sizes = parse_bet_sizes(&cli.bet_sizes)?;

    let config = SolverConfig {
        bet_sizes,
        max_raises: cli.max_raises,
        ..SolverConfig::default()
    };

    let master_seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let boards = boards_for(&cli, master_seed)?;
    log::info!("solving {} board(s) at {} iterations each", boards.len(), cli.iterations);

    let per_board: Vec<Vec<(Combo, Vec<(crate::cfr::Action, f64)>)>> = boards
        .par_iter()
        .map(|board| solve_board(&evaluator, &hero_range, &villain_range, board, &config, cli.iterations))
        .collect();

    let mut aggregator = Aggregator::new();
    for board_result in per_board {
        for (combo, strategy) in board_result {
            aggregator.ingest(&Sample { combo, strategy }, &hero_range);
        }
    }
    let report = aggregator.finish();

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => render_grid(&report),
    }
    Ok(())
}

/// renders the 169-cell grid the way a terminal poker-range tool does: aggression
/// frequency (bet+raise) drives the color, from red (passive) to green (aggressive).
fn render_grid(report: &crate::aggregate::AggregateReport) {
    use crate::cards::Rank;
    let ranks = Rank::all();
    for row in (0..13).rev() {
        let mut line = String::new();
        for col in (0..13).rev() {
            let class = if row == col {
                HandClass::Pair(ranks[row])
            } else if row > col {
                HandClass::Suited(ranks[row], ranks[col])
            } else {
                HandClass::Offsuit(ranks[col], ranks[row])
            };
            let cell = report.cell(class);
            let label = cell_label(class);
            let aggression = cell.bet + cell.raise;
            let cell_text = format!("{label:>4}");
            let colored_text = if cell.samples == 0 {
                cell_text.dimmed()
            } else if aggression >= 0.66 {
                cell_text.green()
            } else if aggression >= 0.33 {
                cell_text.yellow()
            } else {
                cell_text.red()
            };
            line.push_str(&format!("{colored_text} "));
        }
        println!("{line}");
    }
}

fn cell_label(class: HandClass) -> String {
    match class {
        HandClass::Pair(r) => format!("{r}{r}"),
        HandClass::Suited(hi, lo) => format!("{hi}{lo}s"),
        HandClass::Offsuit(hi, lo) => format!("{hi}{lo}o"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    #[test]
    fn configure_thread_pool_accepts_explicit_and_default_worker_counts() {
        configure_thread_pool(Some(2));
        configure_thread_pool(None);
    }

    #[test]
    fn parses_full_board() {
        let board = parse_board("AhKdQc").unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board[0], Card::try_from("Ah").unwrap());
    }

    #[test]
    fn rejects_wrong_length_board() {
        assert!(parse_board("Ah").is_err());
        assert!(parse_board("AhKdQcJs").is_ok()); // 8 chars (turn) is legal
    }

    #[test]
    fn completes_partial_board_without_duplicates() {
        let given = parse_board("AhKdQc").unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let board = complete_board(&given, &mut rng);
        assert_eq!(board.len(), 5);
        let unique: std::collections::HashSet<_> = board.iter().collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn detects_hero_villain_card_overlap() {
        let hero = Combo::new(Card::try_from("Ah").unwrap(), Card::try_from("Kd").unwrap(), 1.0);
        let villain = Combo::new(Card::try_from("Ah").unwrap(), Card::try_from("2c").unwrap(), 1.0);
        let board = [
            Card::try_from("3c").unwrap(),
            Card::try_from("4d").unwrap(),
            Card::try_from("5h").unwrap(),
            Card::try_from("6s").unwrap(),
            Card::try_from("7c").unwrap(),
        ];
        assert!(combo_conflicts(&hero, &villain, &board));
    }

    #[test]
    fn parses_valid_bet_sizes() {
        let sizes = parse_bet_sizes("0.5, 1.0, 1.5").unwrap();
        assert_eq!(sizes, vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn rejects_non_numeric_bet_sizes() {
        assert!(parse_bet_sizes("half-pot").is_err());
    }
}
