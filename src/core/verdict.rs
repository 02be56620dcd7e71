//! # Comparison Verdicts / 对比结论
//!
//! Classifies a pair of metrics into a verdict. Differences below
//! [`WIN_RATIO`] are treated as noise and reported as `Close`.
//!
//! 将一对指标归类为对比结论。低于 [`WIN_RATIO`] 的差异视为噪声，判定为 `Close`。

use serde::Serialize;

use crate::core::models::{TestName, Track};

/// The ratio (larger / smaller) at or above which one track is declared the winner.
pub const WIN_RATIO: f64 = 1.2;

/// The classification of one test's track pair.
/// 单个测试两条轨道结果的分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    BothMissing,
    OnlyPrimary,
    OnlySecondary,
    PrimaryWins,
    SecondaryWins,
    Close,
}

impl Outcome {
    /// The track this outcome favours, if any. One-sided results are not wins.
    pub fn winner(self) -> Option<Track> {
        match self {
            Outcome::PrimaryWins => Some(Track::Primary),
            Outcome::SecondaryWins => Some(Track::Secondary),
            _ => None,
        }
    }

    /// The same outcome seen with the tracks swapped.
    pub fn swapped(self) -> Outcome {
        match self {
            Outcome::OnlyPrimary => Outcome::OnlySecondary,
            Outcome::OnlySecondary => Outcome::OnlyPrimary,
            Outcome::PrimaryWins => Outcome::SecondaryWins,
            Outcome::SecondaryWins => Outcome::PrimaryWins,
            other => other,
        }
    }
}

/// A fully computed comparison for one test name. Computed fresh per report.
/// 单个测试名称的完整对比结果，每次报告时重新计算。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonVerdict {
    pub test: TestName,
    pub primary: Option<f64>,
    pub secondary: Option<f64>,
    pub outcome: Outcome,
    /// `(larger - smaller) / smaller * 100`, only present for wins.
    pub percent_faster: Option<f64>,
}

impl ComparisonVerdict {
    pub fn new(test: TestName, primary: Option<f64>, secondary: Option<f64>) -> Self {
        let (outcome, percent_faster) = classify(primary, secondary);
        Self {
            test,
            primary,
            secondary,
            outcome,
            percent_faster,
        }
    }

    pub fn metric(&self, track: Track) -> Option<f64> {
        match track {
            Track::Primary => self.primary,
            Track::Secondary => self.secondary,
        }
    }
}

/// Classifies a metric pair.
///
/// - both absent: `BothMissing`
/// - exactly one absent: `OnlyPrimary` / `OnlySecondary`
/// - both present with `max / min >= WIN_RATIO`: the larger track wins and the
///   percentage difference is returned
/// - otherwise `Close`, without a percentage
///
/// A zero metric against a positive one is a win with an infinite percentage;
/// two zeros are `Close`.
pub fn classify(primary: Option<f64>, secondary: Option<f64>) -> (Outcome, Option<f64>) {
    let (a, b) = match (primary, secondary) {
        (None, None) => return (Outcome::BothMissing, None),
        (Some(_), None) => return (Outcome::OnlyPrimary, None),
        (None, Some(_)) => return (Outcome::OnlySecondary, None),
        (Some(a), Some(b)) => (a, b),
    };

    let (larger, smaller, outcome) = if a >= b {
        (a, b, Outcome::PrimaryWins)
    } else {
        (b, a, Outcome::SecondaryWins)
    };

    if larger == 0.0 {
        return (Outcome::Close, None);
    }

    let ratio = larger / smaller;
    if ratio >= WIN_RATIO {
        let percent = if smaller == 0.0 {
            f64::INFINITY
        } else {
            (larger - smaller) / smaller * 100.0
        };
        (outcome, Some(percent))
    } else {
        (Outcome::Close, None)
    }
}

/// Aggregate counts over a set of verdicts.
/// 一组对比结论的汇总计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub primary_wins: usize,
    pub secondary_wins: usize,
    pub close: usize,
    pub one_sided: usize,
    pub no_results: usize,
}

impl Tally {
    pub fn from_verdicts<'a>(verdicts: impl IntoIterator<Item = &'a ComparisonVerdict>) -> Self {
        let mut tally = Tally::default();
        for verdict in verdicts {
            match verdict.outcome {
                Outcome::PrimaryWins => tally.primary_wins += 1,
                Outcome::SecondaryWins => tally.secondary_wins += 1,
                Outcome::Close => tally.close += 1,
                Outcome::OnlyPrimary | Outcome::OnlySecondary => tally.one_sided += 1,
                Outcome::BothMissing => tally.no_results += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.primary_wins + self.secondary_wins + self.close + self.one_sided + self.no_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_are_close() {
        assert_eq!(classify(Some(10.0), Some(10.0)), (Outcome::Close, None));
    }

    #[test]
    fn zero_against_positive_is_an_infinite_win() {
        let (outcome, percent) = classify(Some(0.0), Some(5.0));
        assert_eq!(outcome, Outcome::SecondaryWins);
        assert_eq!(percent, Some(f64::INFINITY));
        assert_eq!(classify(Some(0.0), Some(0.0)), (Outcome::Close, None));
    }

    #[test]
    fn swapped_is_an_involution() {
        for outcome in [
            Outcome::BothMissing,
            Outcome::OnlyPrimary,
            Outcome::OnlySecondary,
            Outcome::PrimaryWins,
            Outcome::SecondaryWins,
            Outcome::Close,
        ] {
            assert_eq!(outcome.swapped().swapped(), outcome);
        }
    }

    #[test]
    fn tally_counts_every_outcome() {
        let name = |s: &str| TestName::new(s).unwrap();
        let verdicts = vec![
            ComparisonVerdict::new(name("a"), Some(200.0), Some(100.0)),
            ComparisonVerdict::new(name("b"), Some(100.0), Some(200.0)),
            ComparisonVerdict::new(name("c"), Some(100.0), Some(101.0)),
            ComparisonVerdict::new(name("d"), None, Some(1.0)),
            ComparisonVerdict::new(name("e"), None, None),
        ];
        let tally = Tally::from_verdicts(&verdicts);
        assert_eq!(
            tally,
            Tally {
                primary_wins: 1,
                secondary_wins: 1,
                close: 1,
                one_sided: 1,
                no_results: 1,
            }
        );
        assert_eq!(tally.total(), 5);
    }
}
