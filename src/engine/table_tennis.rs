//! Table tennis pre-match model.
//!
//! A single-set win probability comes from a logistic on rating gap,
//! head-to-head record, serve efficiency and a style matchup term. The match
//! probability is then solved exactly for the best-of-N format.

use serde::Serialize;

use super::best_of::solve_best_of;
use super::handicap::{estimate_handicap, Handicap, HandicapUnits};
use super::primitives::{percent, round, sigmoid};
use super::verdict::{verdict, Verdict};
use crate::params::{PlayStyle, TableTennisParams};

const RATING_SCALE: f64 = 400.0;

const W_RATING: f64 = 0.45;
const W_H2H: f64 = 0.25;
const W_SERVE: f64 = 0.2;

/// Attackers edge defenders slightly more than defenders edge attackers.
const ATTACK_VS_DEFENCE: f64 = 0.08;
const DEFENCE_VS_ATTACK: f64 = -0.06;

/// Single-set probability above which one extra set is predicted.
const DOMINANT_SET_PROB: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableTennisAnalysis {
    pub probabilities: TableTennisProbabilities,
    /// Player 1's chance of taking any one set, in percent (1 decimal).
    pub single_set_winprob: f64,
    /// Coarse proxy: `p_set · best_of`.
    pub expected_sets: f64,
    /// Exact mean match length.
    pub expected_sets_played: f64,
    pub predicted_sets: u32,
    pub best_of: u32,
    pub handicap: Handicap,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableTennisProbabilities {
    pub player1: f64,
    pub player2: f64,
}

pub fn style_bonus(style1: PlayStyle, style2: PlayStyle) -> f64 {
    match (style1, style2) {
        (PlayStyle::Attack, PlayStyle::Defence) => ATTACK_VS_DEFENCE,
        (PlayStyle::Defence, PlayStyle::Attack) => DEFENCE_VS_ATTACK,
        _ => 0.0,
    }
}

fn set_logit(p: &TableTennisParams) -> f64 {
    W_RATING * ((p.rating1 - p.rating2) / RATING_SCALE)
        + W_H2H * (p.h2h1 - p.h2h2)
        + W_SERVE * (p.serve1 - p.serve2)
        + style_bonus(p.style1, p.style2)
}

/// Player 1's probability of winning a single set.
pub fn single_set_probability(p: &TableTennisParams) -> f64 {
    sigmoid(set_logit(p))
}

pub fn analyze(p: &TableTennisParams) -> TableTennisAnalysis {
    let p_set = single_set_probability(p);
    let outcome = solve_best_of(p_set, p.best_of);
    let best_of = outcome.best_of;
    let n = best_of as f64;

    let predicted_sets = if p_set > DOMINANT_SET_PROB {
        (outcome.need + 1).min(best_of)
    } else {
        outcome.need
    };
    let expected_margin = (p_set - 0.5) * n;

    let probabilities = TableTennisProbabilities {
        player1: percent(outcome.win_probability),
        player2: percent(1.0 - outcome.win_probability),
    };

    TableTennisAnalysis {
        probabilities,
        single_set_winprob: round(p_set * 100.0, 1),
        expected_sets: round(p_set * n, 2),
        expected_sets_played: round(outcome.expected_length, 2),
        predicted_sets,
        best_of,
        handicap: estimate_handicap(expected_margin, HandicapUnits::Sets),
        verdict: verdict(probabilities.player1, probabilities.player2),
    }
}
