//! End-of-game verdict and ecological equivalences.

use serde::Serialize;

use super::state::Score;

/// NIRD points needed to win the campaign.
pub const VICTORY_THRESHOLD: i64 = 100;

/// Kilograms of CO₂ counted as one tree planted.
const CO2_PER_TREE_KG: f64 = 10.0;

/// Euros counted as one reconditioned PC.
const EUROS_PER_PC: f64 = 100.0;

/// Final outcome of a play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub victory: bool,
    pub score: Score,
    /// CO₂ savings expressed as trees planted, never below one.
    pub trees_equivalent: i64,
    /// Money savings expressed as PCs given a second life, never below one.
    pub pcs_saved: i64,
}

impl Verdict {
    /// Judge a final score.
    #[must_use]
    pub fn from_score(score: Score) -> Self {
        Self {
            victory: score.nird >= VICTORY_THRESHOLD,
            score,
            trees_equivalent: equivalence(score.co2, CO2_PER_TREE_KG),
            pcs_saved: equivalence(score.money, EUROS_PER_PC),
        }
    }
}

/// Rounded `amount / unit`, floored at one so the result screen always has
/// something to show, including after a losing run with negative savings.
#[allow(clippy::cast_precision_loss)]
fn equivalence(amount: i64, unit: f64) -> i64 {
    ((amount as f64 / unit).round() as i64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(money: i64, co2: i64, nird: i64) -> Score {
        Score { money, co2, nird }
    }

    #[test]
    fn test_victory_at_threshold() {
        assert!(!Verdict::from_score(score(0, 0, 99)).victory);
        assert!(Verdict::from_score(score(0, 0, 100)).victory);
        assert!(Verdict::from_score(score(0, 0, 240)).victory);
    }

    #[test]
    fn test_equivalences_round_to_nearest() {
        let verdict = Verdict::from_score(score(12_350, 847, 150));
        assert_eq!(verdict.trees_equivalent, 85);
        assert_eq!(verdict.pcs_saved, 124);
    }

    #[test]
    fn test_equivalences_never_drop_below_one() {
        let verdict = Verdict::from_score(score(-20_000, -900, 10));
        assert!(!verdict.victory);
        assert_eq!(verdict.trees_equivalent, 1);
        assert_eq!(verdict.pcs_saved, 1);

        let broke = Verdict::from_score(score(0, 0, 120));
        assert_eq!(broke.trees_equivalent, 1);
        assert_eq!(broke.pcs_saved, 1);
    }

    #[test]
    fn test_verdict_carries_the_score() {
        let s = score(500, 60, 110);
        assert_eq!(Verdict::from_score(s).score, s);
    }
}
