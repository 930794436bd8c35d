//! Handicap (spread) recommendation from an expected scoring margin.

use serde::Serialize;
use std::fmt;

/// Which participant of the fixture, in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn number(self) -> u8 {
        match self {
            Side::First => 1,
            Side::Second => 2,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandicapUnits {
    Goals,
    Sets,
}

impl HandicapUnits {
    fn label(self) -> &'static str {
        match self {
            HandicapUnits::Goals => "goals",
            HandicapUnits::Sets => "sets",
        }
    }
}

/// A spread laid on the favoured side.
///
/// Serialises to its human-readable form, e.g. `"Side 1 -1.5 sets"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct Handicap {
    /// `None` only when the expected margin is exactly zero.
    pub favoured: Option<Side>,
    /// Non-negative line size; 0 is a pick'em.
    pub line: f64,
    pub units: HandicapUnits,
}

impl Handicap {
    pub fn is_pick_em(&self) -> bool {
        self.line == 0.0
    }
}

impl fmt::Display for Handicap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.favoured {
            None => write!(f, "Pick'em 0"),
            Some(side) if self.is_pick_em() => {
                write!(f, "Pick'em 0, lean side {}", side.number())
            }
            Some(side) => write!(
                f,
                "Side {} -{} {}",
                side.number(),
                self.line,
                self.units.label()
            ),
        }
    }
}

impl From<Handicap> for String {
    fn from(h: Handicap) -> Self {
        h.to_string()
    }
}

/// (threshold on |diff|, line) pairs, checked in order.
const SET_LINES: [(f64, f64); 2] = [(1.4, 2.5), (0.8, 1.5)];
const GOAL_LINES: [(f64, f64); 2] = [(1.2, 1.0), (0.5, 0.5)];

/// Map a signed expected margin to a spread recommendation.
///
/// Positive `diff` favours side 1, negative favours side 2. Total over all
/// finite reals; a NaN margin is treated as zero.
pub fn estimate_handicap(diff: f64, units: HandicapUnits) -> Handicap {
    let diff = if diff.is_nan() { 0.0 } else { diff };
    let favoured = if diff > 0.0 {
        Some(Side::First)
    } else if diff < 0.0 {
        Some(Side::Second)
    } else {
        None
    };

    let table = match units {
        HandicapUnits::Sets => &SET_LINES,
        HandicapUnits::Goals => &GOAL_LINES,
    };
    let magnitude = diff.abs();
    let line = table
        .iter()
        .find(|(threshold, _)| magnitude > *threshold)
        .map(|(_, line)| *line)
        .unwrap_or(0.0);

    Handicap {
        favoured,
        line,
        units,
    }
}
