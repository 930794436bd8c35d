//! Confidence tier for the headline pick, read off the rounded win
//! percentages of the two sides.

use serde::Serialize;
use std::fmt;

use super::handicap::Side;

/// Favourite's win chance above which it is a clear favourite.
const CLEAR_FAVOURITE_PCT: f64 = 60.0;
/// Favourite's win chance above which it holds a slight edge.
const SLIGHT_EDGE_PCT: f64 = 52.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// A straight single on the favourite is reasonable.
    Clear,
    /// Better played through the handicap.
    Slight,
    Balanced,
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfidenceTier::Clear => "clear favourite",
            ConfidenceTier::Slight => "slight edge",
            ConfidenceTier::Balanced => "balanced",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    /// `None` when both sides carry the same percentage.
    pub favourite: Option<Side>,
    /// Percentage-point gap between the two sides' win chances.
    pub margin_pts: f64,
    pub tier: ConfidenceTier,
}

/// Grade a fixture from side 1's and side 2's win percentages. A draw share,
/// where the sport has one, does not take part.
pub fn verdict(side1_pct: f64, side2_pct: f64) -> Verdict {
    let favourite = if side1_pct > side2_pct {
        Some(Side::First)
    } else if side2_pct > side1_pct {
        Some(Side::Second)
    } else {
        None
    };
    let top = side1_pct.max(side2_pct);
    let tier = if top > CLEAR_FAVOURITE_PCT {
        ConfidenceTier::Clear
    } else if top > SLIGHT_EDGE_PCT {
        ConfidenceTier::Slight
    } else {
        ConfidenceTier::Balanced
    };
    Verdict {
        favourite,
        margin_pts: (side1_pct - side2_pct).abs(),
        tier,
    }
}
