//! Outcome probability engine.
//!
//! Every model is a pure function from a resolved parameter set to an
//! analysis. Nothing here keeps state between calls or draws random numbers,
//! so identical inputs always serialise to identical output.
//!
//! Models implemented:
//! - **Football**: softmax over weighted feature log-odds, Poisson over-2.5
//! - **Hockey**: shot-quality expected goals, softmax with overtime fold-in, Poisson over-5.5
//! - **Table tennis**: logistic per-set probability, exact best-of-N solver

pub mod best_of;
pub mod football;
pub mod handicap;
pub mod hockey;
pub mod primitives;
pub mod table_tennis;
pub mod verdict;

use serde::Serialize;
use tracing::debug;

use crate::params::{ParameterSet, RawParams, Sport};
use football::FootballAnalysis;
use handicap::Handicap;
use hockey::HockeyAnalysis;
use table_tennis::TableTennisAnalysis;
use verdict::Verdict;

/// Sport-tagged analysis. Serialises with a `"sport"` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum AnalysisResult {
    Football(FootballAnalysis),
    Hockey(HockeyAnalysis),
    TableTennis(TableTennisAnalysis),
}

impl AnalysisResult {
    pub fn sport(&self) -> Sport {
        match self {
            AnalysisResult::Football(_) => Sport::Football,
            AnalysisResult::Hockey(_) => Sport::Hockey,
            AnalysisResult::TableTennis(_) => Sport::TableTennis,
        }
    }

    pub fn handicap(&self) -> &Handicap {
        match self {
            AnalysisResult::Football(a) => &a.handicap,
            AnalysisResult::Hockey(a) => &a.handicap,
            AnalysisResult::TableTennis(a) => &a.handicap,
        }
    }

    pub fn verdict(&self) -> &Verdict {
        match self {
            AnalysisResult::Football(a) => &a.verdict,
            AnalysisResult::Hockey(a) => &a.verdict,
            AnalysisResult::TableTennis(a) => &a.verdict,
        }
    }

    /// `(outcome label, percentage)` pairs in listing order.
    pub fn probabilities(&self) -> Vec<(&'static str, f64)> {
        match self {
            AnalysisResult::Football(a) => vec![
                ("home", a.probabilities.home),
                ("draw", a.probabilities.draw),
                ("away", a.probabilities.away),
            ],
            AnalysisResult::Hockey(a) => vec![
                ("home", a.probabilities.home),
                ("away", a.probabilities.away),
            ],
            AnalysisResult::TableTennis(a) => vec![
                ("player1", a.probabilities.player1),
                ("player2", a.probabilities.player2),
            ],
        }
    }
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Run the model matching the parameter set's sport.
pub fn analyze(params: &ParameterSet) -> AnalysisResult {
    let result = match params {
        ParameterSet::Football(p) => AnalysisResult::Football(football::analyze(p)),
        ParameterSet::Hockey(p) => AnalysisResult::Hockey(hockey::analyze(p)),
        ParameterSet::TableTennis(p) => AnalysisResult::TableTennis(table_tennis::analyze(p)),
    };
    debug!(sport = %result.sport(), handicap = %result.handicap(), "analysis complete");
    result
}

/// Resolve a sport tag and loose parameters, then analyse. Unknown tags are
/// analysed as football.
pub fn analyze_raw(sport_tag: &str, raw: &RawParams) -> AnalysisResult {
    let sport = Sport::from_tag(sport_tag);
    analyze(&ParameterSet::resolve(sport, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_follows_sport() {
        let raw = RawParams::new();
        assert_eq!(analyze_raw("football", &raw).sport(), Sport::Football);
        assert_eq!(analyze_raw("hockey", &raw).sport(), Sport::Hockey);
        assert_eq!(analyze_raw("tt", &raw).sport(), Sport::TableTennis);
    }

    #[test]
    fn unknown_sport_is_analysed_as_football() {
        let raw = RawParams::new().with("elo1", 1700);
        assert_eq!(analyze_raw("darts", &raw), analyze_raw("football", &raw));
    }

    #[test]
    fn football_scenario_from_loose_values() {
        let raw = RawParams::new()
            .with("form1", "4")
            .with("form2", "2")
            .with("goals1", "1.9")
            .with("goals2", "1.3")
            .with("elo1", "1800")
            .with("elo2", "1650")
            .with("home", "yes");
        let result = analyze_raw("football", &raw);
        let probs = result.probabilities();
        assert_eq!(probs.len(), 3);
        assert!(probs[0].1 > probs[2].1);
        let verdict = result.verdict();
        assert_eq!(verdict.favourite, Some(handicap::Side::First));
        assert_eq!(verdict.margin_pts, probs[0].1 - probs[2].1);
    }

    #[test]
    fn table_tennis_equal_players_from_loose_values() {
        let raw = RawParams::new()
            .with("rating1", 1850)
            .with("rating2", "1850")
            .with("h2h1", 1)
            .with("h2h2", 1)
            .with("serve1", 0.61)
            .with("serve2", "0.61")
            .with("style1", "defence")
            .with("style2", "Defence")
            .with("bestOf", 5);
        match analyze_raw("table_tennis", &raw) {
            AnalysisResult::TableTennis(a) => {
                assert_eq!(a.single_set_winprob, 50.0);
                assert_eq!(a.probabilities.player1, 50.0);
                assert_eq!(a.probabilities.player2, 50.0);
            }
            other => panic!("expected table tennis, got {other:?}"),
        }
    }

    #[test]
    fn garbage_everywhere_still_yields_a_result() {
        let mut raw = RawParams::new();
        for key in Sport::TableTennis.known_keys() {
            raw.insert(*key, "???");
        }
        let result = analyze_raw("tt", &raw);
        let sum: f64 = result.probabilities().iter().map(|(_, p)| p).sum();
        assert!((99.0..=101.0).contains(&sum));
    }

    #[test]
    fn serialises_with_sport_tag() {
        let json = serde_json::to_value(analyze_raw("hockey", &RawParams::new())).unwrap();
        assert_eq!(json["sport"], "hockey");
        assert!(json["total"]["over55_%"].is_number());
        let json = serde_json::to_value(analyze_raw("tt", &RawParams::new())).unwrap();
        assert_eq!(json["sport"], "table_tennis");
        assert!(json["single_set_winprob"].is_number());
        assert!(json["verdict"]["margin_pts"].is_number());
    }

    #[test]
    fn repeated_calls_are_byte_identical() {
        let raw = RawParams::new().with("shots1", 35).with("home", "yes");
        for tag in ["football", "hockey", "tt"] {
            let a = serde_json::to_string(&analyze_raw(tag, &raw)).unwrap();
            let b = serde_json::to_string(&analyze_raw(tag, &raw)).unwrap();
            assert_eq!(a, b);
        }
    }
}
