//! Range-string parser, spec §4.4. Turns notation like `22+,A2s+,KTo@50%` into a flat
//! set of weighted 2-card combinations plus an optional overall frequency.

use super::combo::Combo;
use crate::cards::{Card, Rank, Suit};
use crate::error::SolverError;
use log::warn;

#[derive(Debug, Clone)]
pub struct ParsedRange {
    pub combos: Vec<Combo>,
    pub overall_weight: f64,
}

/// parses a full range string. A malformed individual `hand_spec` is skipped with a
/// warning (spec §7); the whole range only fails if it ends up with zero combos.
pub fn parse_range(input: &str) -> Result<ParsedRange, SolverError> {
    let mut tokens: Vec<&str> = input.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();

    let overall_weight = match tokens.last() {
        Some(tok) if is_bare_weight(tok) => {
            let w = parse_weight(tok).unwrap_or_else(|| {
                warn!("malformed overall weight {tok:?}, defaulting to 1.0");
                1.0
            });
            tokens.pop();
            w
        }
        _ => 1.0,
    };

    let mut combos: Vec<Combo> = Vec::new();
    for token in tokens {
        match parse_hand_spec(token) {
            Ok(mut expanded) => combos.append(&mut expanded),
            Err(reason) => warn!("skipping malformed hand specifier {token:?}: {reason}"),
        }
    }

    if combos.is_empty() {
        return Err(SolverError::RangeParseError {
            spec: input.to_string(),
            reason: "range contains zero valid combinations".to_string(),
        });
    }

    Ok(ParsedRange { combos, overall_weight })
}

/// a token that is *only* `@<number>` with nothing else — the overall-frequency marker,
/// distinct from a per-hand weight which is always suffixed onto a rank specifier.
fn is_bare_weight(token: &str) -> bool {
    token.starts_with('@') && parse_weight(token).is_some()
}

fn parse_weight(token: &str) -> Option<f64> {
    let body = token.strip_prefix('@')?;
    let (body, is_percent) = match body.strip_suffix('%') {
        Some(b) => (b, true),
        None => (body, false),
    };
    let n: f64 = body.parse().ok()?;
    let fraction = if is_percent || n > 1.0 { n / 100.0 } else { n };
    if fraction > 0.0 && fraction <= 1.0 {
        Some(fraction)
    } else {
        None
    }
}

fn parse_hand_spec(token: &str) -> Result<Vec<Combo>, String> {
    let (core, weight) = match token.split_once('@') {
        Some((core, w)) => {
            let weight = parse_weight(&format!("@{w}")).unwrap_or_else(|| {
                warn!("malformed per-hand weight in {token:?}, defaulting to 1.0");
                1.0
            });
            (core, weight)
        }
        None => (token, 1.0),
    };

    let (core, plus) = match core.strip_suffix('+') {
        Some(c) => (c, true),
        None => (core, false),
    };

    let chars: Vec<char> = core.chars().collect();
    if chars.len() < 2 || chars.len() > 3 {
        return Err("expected two ranks and an optional suited/offsuit marker".to_string());
    }
    let rank_a = Rank::try_from(chars[0]).map_err(|_| format!("unknown rank {:?}", chars[0]))?;
    let rank_b = Rank::try_from(chars[1]).map_err(|_| format!("unknown rank {:?}", chars[1]))?;
    let suitedness = if chars.len() == 3 {
        match chars[2].to_ascii_lowercase() {
            's' => Some(true),
            'o' => Some(false),
            other => return Err(format!("unknown suitedness marker {other:?}")),
        }
    } else {
        None
    };

    let is_pair = rank_a == rank_b;
    if is_pair && suitedness.is_some() {
        return Err("a pair cannot carry a suited/offsuit marker".to_string());
    }

    let mut combos = Vec::new();
    if is_pair {
        let top = if plus { Rank::Ace as u8 } else { rank_a as u8 };
        for r in (rank_a as u8)..=top {
            combos.extend(pair_combos(Rank::from(r), weight));
        }
    } else {
        let (hi, lo) = if rank_a > rank_b { (rank_a, rank_b) } else { (rank_b, rank_a) };
        let low_floor = if plus { hi as u8 - 1 } else { lo as u8 };
        for low_rank in (lo as u8)..=low_floor {
            let low = Rank::from(low_rank);
            if suitedness != Some(false) {
                combos.extend(suited_combos(hi, low, weight));
            }
            if suitedness != Some(true) {
                combos.extend(offsuit_combos(hi, low, weight));
            }
        }
    }
    Ok(combos)
}

fn pair_combos(rank: Rank, weight: f64) -> Vec<Combo> {
    let suits = Suit::all();
    let mut out = Vec::with_capacity(6);
    for i in 0..4 {
        for j in (i + 1)..4 {
            out.push(Combo::new(
                Card::from((rank, suits[i])),
                Card::from((rank, suits[j])),
                weight,
            ));
        }
    }
    out
}

fn suited_combos(hi: Rank, lo: Rank, weight: f64) -> Vec<Combo> {
    Suit::all()
        .into_iter()
        .map(|s| Combo::new(Card::from((hi, s)), Card::from((lo, s)), weight))
        .collect()
}

fn offsuit_combos(hi: Rank, lo: Rank, weight: f64) -> Vec<Combo> {
    let suits = Suit::all();
    let mut out = Vec::with_capacity(12);
    for &s1 in &suits {
        for &s2 in &suits {
            if s1 != s2 {
                out.push(Combo::new(Card::from((hi, s1)), Card::from((lo, s2)), weight));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_expands_to_six_combos() {
        let parsed = parse_range("AA").unwrap();
        assert_eq!(parsed.combos.len(), 6);
    }

    #[test]
    fn suited_expands_to_four_combos() {
        let parsed = parse_range("AKs").unwrap();
        assert_eq!(parsed.combos.len(), 4);
    }

    #[test]
    fn offsuit_expands_to_twelve_combos() {
        let parsed = parse_range("AKo").unwrap();
        assert_eq!(parsed.combos.len(), 12);
    }

    #[test]
    fn bare_rank_pair_is_suited_plus_offsuit() {
        let parsed = parse_range("AK").unwrap();
        assert_eq!(parsed.combos.len(), 16);
    }

    #[test]
    fn pair_plus_expands_upward() {
        let parsed = parse_range("QQ+").unwrap();
        assert_eq!(parsed.combos.len(), 3 * 6); // QQ, KK, AA
    }

    #[test]
    fn suited_plus_expands_low_card_only() {
        let parsed = parse_range("A2s+").unwrap();
        // low card ranges 2..K (12 values), high card fixed at ace, 4 combos each
        assert_eq!(parsed.combos.len(), 12 * 4);
    }

    #[test]
    fn per_hand_weight_applies_only_to_its_spec() {
        let parsed = parse_range("22+,KTo@50%").unwrap();
        let kto_weight = parsed
            .combos
            .iter()
            .find(|c| c.lo.rank() != c.hi.rank())
            .unwrap()
            .weight;
        assert!((kto_weight - 0.5).abs() < 1e-9);
    }

    #[test]
    fn overall_weight_is_separate_from_combo_weights() {
        let parsed = parse_range("22+,@50%").unwrap();
        assert!((parsed.overall_weight - 0.5).abs() < 1e-9);
        assert!(parsed.combos.iter().all(|c| (c.weight - 1.0).abs() < 1e-9));
    }

    #[test]
    fn unknown_rank_is_skipped_not_fatal() {
        let parsed = parse_range("ZZ,AA").unwrap();
        assert_eq!(parsed.combos.len(), 6);
    }

    #[test]
    fn all_malformed_specs_is_fatal() {
        assert!(parse_range("ZZ,YY").is_err());
    }

    #[test]
    fn max_range_combination_count() {
        let parsed = parse_range("22+,A2+,K2+,Q2+,J2+,T2+,92+,82+,72+,62+,52+,42+,32+").unwrap();
        assert!(parsed.combos.len() <= 1326);
    }
}
