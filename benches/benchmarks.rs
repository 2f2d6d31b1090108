use holdem_gto_core::cards::evaluator::Evaluator;
use holdem_gto_core::cards::{Card, Hand};
use holdem_gto_core::cfr::{sanity, Solver, SolverConfig};
use holdem_gto_core::range::parse_range;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_evaluator_tables,
        evaluating_a_seven_card_hand,
        evaluating_by_subset_scan,
        parsing_a_wide_range,
        solving_cfr_one_combination,
        solving_cfr_rps_sanity_check,
}

fn hand(cards: &[&str]) -> Hand {
    cards.iter().map(|s| Card::try_from(*s).unwrap()).collect::<Vec<_>>().into()
}

fn building_evaluator_tables(c: &mut criterion::Criterion) {
    c.bench_function("build evaluator tables from scratch", |b| {
        b.iter(Evaluator::build);
    });
}

fn evaluating_a_seven_card_hand(c: &mut criterion::Criterion) {
    let evaluator = Evaluator::build();
    let seven = hand(&["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]);
    c.bench_function("evaluate a 7-card hand (rank map)", |b| {
        b.iter(|| evaluator.evaluate(&seven).unwrap());
    });
}

fn evaluating_by_subset_scan(c: &mut criterion::Criterion) {
    let evaluator = Evaluator::build();
    let seven = hand(&["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]);
    c.bench_function("evaluate a 7-card hand (21-subset scan)", |b| {
        b.iter(|| evaluator.evaluate_by_subsets(&seven));
    });
}

fn parsing_a_wide_range(c: &mut criterion::Criterion) {
    c.bench_function("parse a wide range string", |b| {
        b.iter(|| parse_range("22+,A2+,K2+,Q2+,J2+,T2+,92+,82+,72+,62+,52+,42+,32+").unwrap());
    });
}

fn solving_cfr_one_combination(c: &mut criterion::Criterion) {
    let evaluator = Evaluator::build();
    let hero = [Card::try_from("Ah").unwrap(), Card::try_from("Ad").unwrap()];
    let villain = [Card::try_from("Kc").unwrap(), Card::try_from("Qd").unwrap()];
    let board = [
        Card::try_from("2c").unwrap(),
        Card::try_from("7d").unwrap(),
        Card::try_from("9h").unwrap(),
        Card::try_from("Js").unwrap(),
        Card::try_from("3c").unwrap(),
    ];
    c.bench_function("solve 200 CFR iterations for one combination", |b| {
        b.iter(|| {
            let mut solver = Solver::new(&evaluator, hero, villain, board, SolverConfig::default()).unwrap();
            solver.solve(200, || false);
            solver.root_strategy()
        });
    });
}

fn solving_cfr_rps_sanity_check(c: &mut criterion::Criterion) {
    c.bench_function("solve 10k iterations of the rock-paper-scissors sanity game", |b| {
        b.iter(|| sanity::solve(10_000));
    });
}
