//! Football (soccer) pre-match model.
//!
//! Linear feature weighting into three log-odds (home / draw / away), softmax
//! for the 1X2 split, and two independent Poisson scoring rates for the
//! over-2.5 total.
//!
//! Away log-odds are simply the negated home log-odds. That zero-sum baseline
//! is a modelling simplification, not a derivation.

use serde::Serialize;

use super::handicap::{estimate_handicap, Handicap, HandicapUnits};
use super::primitives::{percent, poisson_total_over, round, softmax};
use super::verdict::{verdict, Verdict};
use crate::params::FootballParams;

// ── Weights ──────────────────────────────────────────────────────────────────

const W_FORM: f64 = 0.18;
const W_GOALS: f64 = 0.18;
const W_XG: f64 = 0.18;
const W_ELO: f64 = 0.22;
const W_HOME: f64 = 0.22;

/// Baseline lean toward the first-listed side.
const HOME_BIAS: f64 = 0.12;
const HOME_NUDGE: f64 = 0.10;
const AWAY_NUDGE: f64 = -0.05;

const DRAW_BASE: f64 = -0.05;
/// Lopsided form makes a draw less likely.
const DRAW_FORM_PENALTY: f64 = 0.03;

/// Elo points per unit of `tanh` input.
const ELO_SCALE: f64 = 400.0;

/// Max ±15% swing in scoring rate from an xG edge.
const XG_RATE_SWING: f64 = 0.15;
/// Poisson rates must stay positive.
const MIN_RATE: f64 = 0.05;
/// No side averages more than this in any real league.
const MAX_RATE: f64 = 20.0;

const MAX_GOALS: u32 = 6;
const TOTAL_LINE: f64 = 2.5;

const MARGIN_ELO: f64 = 0.2;
const MARGIN_FORM: f64 = 0.15;

// ── Output ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootballAnalysis {
    pub probabilities: FootballProbabilities,
    pub total: FootballTotal,
    pub handicap: Handicap,
    pub verdict: Verdict,
}

/// Whole percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FootballProbabilities {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootballTotal {
    #[serde(rename = "over25_%")]
    pub over25_pct: f64,
    pub expected_goals: [f64; 2],
}

// ── Model ────────────────────────────────────────────────────────────────────

/// Paired-feature differences, side 1 minus side 2.
#[derive(Debug, Clone, Copy)]
struct Features {
    form: f64,
    goals: f64,
    xg: f64,
    elo_norm: f64,
}

fn features(p: &FootballParams) -> Features {
    Features {
        form: p.form1 - p.form2,
        goals: p.goals1 - p.goals2,
        xg: p.xg1 - p.xg2,
        elo_norm: ((p.elo1 - p.elo2) / ELO_SCALE).tanh(),
    }
}

/// The part of the home log-odds driven purely by the matchup. Swapping the
/// two sides negates it.
fn matchup_logit(f: &Features) -> f64 {
    W_FORM * f.form + W_GOALS * f.goals + W_XG * f.xg + W_ELO * f.elo_norm
}

/// Venue terms are not paired and do not flip with the sides.
fn venue_logit(home: bool) -> f64 {
    HOME_BIAS + W_HOME * if home { HOME_NUDGE } else { AWAY_NUDGE }
}

/// `[home, draw, away]` log-odds.
fn logits(p: &FootballParams) -> [f64; 3] {
    let f = features(p);
    let home = venue_logit(p.home) + matchup_logit(&f);
    let draw = DRAW_BASE - DRAW_FORM_PENALTY * f.form.abs();
    [home, draw, -home]
}

/// Per-side Poisson scoring rates, scaled by the xG edge.
pub fn goal_rates(p: &FootballParams) -> (f64, f64) {
    let home = p.goals1 * (1.0 + XG_RATE_SWING * (p.xg1 - p.xg2).tanh());
    let away = p.goals2 * (1.0 + XG_RATE_SWING * (p.xg2 - p.xg1).tanh());
    (
        home.clamp(MIN_RATE, MAX_RATE),
        away.clamp(MIN_RATE, MAX_RATE),
    )
}

/// Signed expected goal margin, positive when side 1 is stronger.
pub fn expected_goal_diff(p: &FootballParams) -> f64 {
    let (home, away) = goal_rates(p);
    let f = features(p);
    home - away + MARGIN_ELO * f.elo_norm + MARGIN_FORM * f.form
}

pub fn analyze(p: &FootballParams) -> FootballAnalysis {
    let probs = softmax(&logits(p));
    let (rate1, rate2) = goal_rates(p);
    let over = poisson_total_over(rate1, rate2, MAX_GOALS, TOTAL_LINE);

    let probabilities = FootballProbabilities {
        home: percent(probs[0]),
        draw: percent(probs[1]),
        away: percent(probs[2]),
    };

    FootballAnalysis {
        probabilities,
        total: FootballTotal {
            over25_pct: percent(over),
            expected_goals: [round(rate1, 2), round(rate2, 2)],
        },
        handicap: estimate_handicap(expected_goal_diff(p), HandicapUnits::Goals),
        verdict: verdict(probabilities.home, probabilities.away),
    }
}
