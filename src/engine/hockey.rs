//! Ice hockey pre-match model.
//!
//! Key dynamics:
//!   - Goals come from shot volume beaten past the opposing goaltender
//!   - Save percentage differences of a few points are worth a lot
//!   - Games cannot end level: regulation ties go to overtime / shootout
//!
//! The softmax carries a small draw placeholder for the regulation tie; its
//! mass is handed back to both sides pro rata so the reported home / away
//! split is a full-game distribution.

use serde::Serialize;

use super::handicap::{estimate_handicap, Handicap, HandicapUnits};
use super::primitives::{percent, poisson_total_over, round, softmax};
use super::verdict::{verdict, Verdict};
use crate::params::HockeyParams;

/// Share of unsaved shots that become goals.
const SHOT_CONVERSION: f64 = 0.12;
/// Scoring floor per side, so a Poisson rate is never zero.
const BASE_GOALS: f64 = 1.1;
/// Extra floor for a home side.
const HOME_ICE_GOALS: f64 = 0.2;
const MIN_RATE: f64 = 0.05;
const MAX_RATE: f64 = 20.0;

const W_SHOTS: f64 = 0.35;
const W_GOALIE: f64 = 0.35;
const W_FORM: f64 = 0.2;
const W_SPECIAL: f64 = 0.1;
const HOME_NUDGE: f64 = 0.08;
const REGULATION_DRAW_LOGIT: f64 = -0.2;

const MAX_GOALS: u32 = 8;
const TOTAL_LINE: f64 = 5.5;

const MARGIN_FORM: f64 = 0.08;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HockeyAnalysis {
    pub probabilities: HockeyProbabilities,
    pub total: HockeyTotal,
    /// Chance the game is level after regulation, before it is resolved.
    #[serde(rename = "regulation_draw_%")]
    pub regulation_draw_pct: f64,
    pub handicap: Handicap,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HockeyProbabilities {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HockeyTotal {
    #[serde(rename = "over55_%")]
    pub over55_pct: f64,
    pub expected_goals: [f64; 2],
    pub total_expected: f64,
}

/// Expected goals per side from shots against the opposing save rate.
pub fn expected_goals(p: &HockeyParams) -> (f64, f64) {
    let home_ice = if p.home { HOME_ICE_GOALS } else { 0.0 };
    let g1 = p.shots1 * (1.0 - p.save2) * SHOT_CONVERSION + BASE_GOALS + home_ice;
    let g2 = p.shots2 * (1.0 - p.save1) * SHOT_CONVERSION + BASE_GOALS;
    (g1.clamp(MIN_RATE, MAX_RATE), g2.clamp(MIN_RATE, MAX_RATE))
}

/// Antisymmetric part of the composite score.
fn matchup_score(p: &HockeyParams) -> f64 {
    W_SHOTS * ((p.shots1 - p.shots2) / 10.0)
        + W_GOALIE * ((p.save1 - p.save2) * 10.0)
        + W_FORM * ((p.form1 - p.form2) / 5.0)
        + W_SPECIAL * ((p.pp1 - p.pp2) * 10.0)
}

fn composite_score(p: &HockeyParams) -> f64 {
    matchup_score(p) + if p.home { HOME_NUDGE } else { -HOME_NUDGE }
}

/// `(home, regulation draw, away)` before the draw mass is redistributed.
fn regulation_split(p: &HockeyParams) -> (f64, f64, f64) {
    let score = composite_score(p);
    let probs = softmax(&[score, REGULATION_DRAW_LOGIT, -score]);
    (probs[0], probs[1], probs[2])
}

pub fn expected_goal_diff(p: &HockeyParams) -> f64 {
    let (g1, g2) = expected_goals(p);
    g1 - g2 + MARGIN_FORM * (p.form1 - p.form2)
}

pub fn analyze(p: &HockeyParams) -> HockeyAnalysis {
    let (home, draw, away) = regulation_split(p);
    let decided = home + away;
    let (g1, g2) = expected_goals(p);
    let over = poisson_total_over(g1, g2, MAX_GOALS, TOTAL_LINE);

    let probabilities = HockeyProbabilities {
        home: percent(home / decided),
        away: percent(away / decided),
    };

    HockeyAnalysis {
        probabilities,
        total: HockeyTotal {
            over55_pct: percent(over),
            expected_goals: [round(g1, 2), round(g2, 2)],
            total_expected: round(g1 + g2, 2),
        },
        regulation_draw_pct: percent(draw),
        handicap: estimate_handicap(expected_goal_diff(p), HandicapUnits::Goals),
        verdict: verdict(probabilities.home, probabilities.away),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::handicap::Side;
    use crate::engine::verdict::ConfidenceTier;
    use crate::params::HOCKEY_DEFAULTS;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scenario() -> HockeyParams {
        HockeyParams {
            shots1: 40.0,
            shots2: 20.0,
            save1: 0.95,
            save2: 0.85,
            home: true,
            ..HOCKEY_DEFAULTS
        }
    }

    fn random_params(rng: &mut StdRng) -> HockeyParams {
        HockeyParams {
            shots1: rng.gen_range(18.0..45.0),
            shots2: rng.gen_range(18.0..45.0),
            save1: rng.gen_range(0.85..0.96),
            save2: rng.gen_range(0.85..0.96),
            pp1: rng.gen_range(0.05..0.35),
            pp2: rng.gen_range(0.05..0.35),
            form1: rng.gen_range(0.0..=5.0),
            form2: rng.gen_range(0.0..=5.0),
            home: rng.gen_bool(0.5),
        }
    }

    #[test]
    fn dominant_home_side_scenario() {
        let a = analyze(&scenario());
        assert!(a.probabilities.home > 70.0, "home {}", a.probabilities.home);
        // 40·0.15·0.12 + 1.3 and 20·0.05·0.12 + 1.1
        assert_eq!(a.total.expected_goals, [2.02, 1.22]);
        assert_eq!(a.total.total_expected, 3.24);
        let baseline = analyze(&HOCKEY_DEFAULTS);
        assert!(a.total.over55_pct > 0.0);
        assert!(a.total.over55_pct > baseline.total.over55_pct);
        assert_eq!(a.handicap.favoured, Some(Side::First));
        assert_eq!(a.verdict.favourite, Some(Side::First));
        assert_eq!(a.verdict.tier, ConfidenceTier::Clear);
    }

    #[test]
    fn probabilities_sum_to_100_across_parameter_space() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let a = analyze(&random_params(&mut rng));
            let sum = a.probabilities.home + a.probabilities.away;
            assert!((99.0..=101.0).contains(&sum), "sum {sum}");
            assert!((0.0..=100.0).contains(&a.probabilities.home));
            assert!((0.0..=100.0).contains(&a.probabilities.away));
            assert!((0.0..=100.0).contains(&a.total.over55_pct));
            assert!((0.0..=100.0).contains(&a.regulation_draw_pct));
        }
    }

    #[test]
    fn draw_mass_is_redistributed_pro_rata() {
        let p = scenario();
        let (home, draw, away) = regulation_split(&p);
        assert!(draw > 0.0);
        assert_relative_eq!(home + draw + away, 1.0, epsilon = 1e-12);
        let full_home = home / (home + away);
        assert_relative_eq!(full_home / (1.0 - full_home), home / away, epsilon = 1e-9);
    }

    #[test]
    fn away_nudge_tips_an_even_game() {
        let a = analyze(&HockeyParams {
            home: false,
            ..HOCKEY_DEFAULTS
        });
        // Away nudge only.
        assert!(a.probabilities.away > a.probabilities.home);
        let (g1, g2) = expected_goals(&HOCKEY_DEFAULTS);
        assert_relative_eq!(g1, g2, epsilon = 1e-12);
    }

    #[test]
    fn matchup_score_is_antisymmetric() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let p = random_params(&mut rng);
            assert_relative_eq!(matchup_score(&p), -matchup_score(&p.swapped()), epsilon = 1e-12);
        }
    }

    #[test]
    fn swapping_sides_away_from_home_flips_everything() {
        let p = HockeyParams {
            home: false,
            ..scenario()
        };
        let a = analyze(&p);
        let b = analyze(&p.swapped());
        assert_eq!(a.handicap.line, b.handicap.line);
        assert_eq!(a.handicap.favoured.map(Side::other), b.handicap.favoured);
        assert_eq!(a.total.expected_goals[0], b.total.expected_goals[1]);
        assert_eq!(a.total.over55_pct, b.total.over55_pct);
        assert!(b.probabilities.away > b.probabilities.home);
    }

    #[test]
    fn leaky_goalie_is_floored() {
        let p = HockeyParams {
            save1: 1.5,
            save2: 1.5,
            ..HOCKEY_DEFAULTS
        };
        let (g1, g2) = expected_goals(&p);
        assert!(g1 > 0.0 && g2 > 0.0);
    }

    #[test]
    fn extreme_shot_volume_stays_well_formed() {
        let p = HockeyParams {
            shots1: 1e60,
            ..HOCKEY_DEFAULTS
        };
        let a = analyze(&p);
        assert_eq!(a.total.expected_goals[0], MAX_RATE);
        assert!((0.0..=100.0).contains(&a.total.over55_pct));
        let sum = a.probabilities.home + a.probabilities.away;
        assert!((99.0..=101.0).contains(&sum), "sum {sum}");
    }

    #[test]
    fn deterministic() {
        let a = serde_json::to_string(&analyze(&scenario())).unwrap();
        let b = serde_json::to_string(&analyze(&scenario())).unwrap();
        assert_eq!(a, b);
    }
}
