//! Parameter resolution: loose caller-supplied values to typed, defaulted
//! per-sport parameter sets.
//!
//! Every field has a documented default in its sport's table below. A value
//! that is absent, blank or not a finite number silently takes that default;
//! nothing in here fails.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use crate::engine::best_of::{coerce_best_of, DEFAULT_BEST_OF};
use crate::error::ParamError;

// ── Sport ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Football,
    Hockey,
    TableTennis,
}

impl Sport {
    /// Resolve a sport tag. Unrecognised tags fall back to football.
    pub fn from_tag(tag: &str) -> Sport {
        match tag.trim().to_lowercase().as_str() {
            "football" | "soccer" => Sport::Football,
            "hockey" | "ice_hockey" | "ice-hockey" | "nhl" => Sport::Hockey,
            "tt" | "table_tennis" | "table-tennis" | "tabletennis" | "ping_pong" => {
                Sport::TableTennis
            }
            "" => Sport::Football,
            other => {
                warn!(tag = other, "unknown sport tag, falling back to football");
                Sport::Football
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Hockey => "hockey",
            Sport::TableTennis => "table_tennis",
        }
    }

    /// Parameter keys understood by this sport's model.
    pub fn known_keys(self) -> &'static [&'static str] {
        match self {
            Sport::Football => &[
                "form1", "form2", "goals1", "goals2", "xg1", "xg2", "elo1", "elo2", "home",
            ],
            Sport::Hockey => &[
                "shots1", "shots2", "save1", "save2", "pp1", "pp2", "form1", "form2", "home",
            ],
            Sport::TableTennis => &[
                "rating1", "rating2", "h2h1", "h2h2", "serve1", "serve2", "style1", "style2",
                "bestOf", "best_of",
            ],
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Raw parameters ───────────────────────────────────────────────────────────

/// Loosely-typed parameters as a caller supplies them: form fields, a JSON
/// file, `key=value` pairs. Values may be JSON numbers or strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams(BTreeMap<String, Value>);

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Later values win.
    pub fn merge(&mut self, other: RawParams) {
        self.0.extend(other.0);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Parse one `key=value` pair. The value is kept as a string and
    /// interpreted later by the sport that reads it.
    pub fn parse_pair(pair: &str) -> Result<(String, Value), ParamError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ParamError::MalformedPair(pair.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParamError::MalformedPair(pair.to_string()));
        }
        Ok((key.to_string(), Value::String(value.trim().to_string())))
    }

    /// Parse a JSON object of parameters. `source` names the input in errors.
    pub fn from_json_str(json: &str, source: &str) -> Result<Self, ParamError> {
        let value: Value = serde_json::from_str(json).map_err(|e| ParamError::Json {
            path: source.to_string(),
            source: e,
        })?;
        match value {
            Value::Object(map) => Ok(RawParams(map.into_iter().collect())),
            _ => Err(ParamError::NotAnObject {
                path: source.to_string(),
            }),
        }
    }

    /// Finite numeric value of `key`, if present and parsable.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(parse_number)
    }

    /// Numeric value of `key`, or `default` when absent or unparsable.
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        match self.0.get(key) {
            None => default,
            Some(v) => parse_number(v).unwrap_or_else(|| {
                debug!(key, value = %v, default, "unparsable parameter, using default");
                default
            }),
        }
    }

    /// Trimmed, lower-cased string value of `key`; blank counts as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => {
                let s = s.trim().to_lowercase();
                (!s.is_empty()).then_some(s)
            }
            _ => None,
        }
    }

    /// yes/no style flag.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|x| x != 0.0),
            Value::String(_) => match self.text(key)?.as_str() {
                "yes" | "y" | "true" | "1" => Some(true),
                "no" | "n" | "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    let x = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    x.is_finite().then_some(x)
}

// ── Football ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootballParams {
    /// Recent form, 0..5 points (W=1, D=0.5, L=0).
    pub form1: f64,
    pub form2: f64,
    /// Average goals scored per match.
    pub goals1: f64,
    pub goals2: f64,
    /// Average expected goals. A missing side counts as 0, and equal values
    /// leave the goal rates untouched.
    pub xg1: f64,
    pub xg2: f64,
    pub elo1: f64,
    pub elo2: f64,
    /// Side 1 plays at home.
    pub home: bool,
}

pub const FOOTBALL_DEFAULTS: FootballParams = FootballParams {
    form1: 3.0,
    form2: 3.0,
    goals1: 1.2,
    goals2: 1.0,
    xg1: 0.0,
    xg2: 0.0,
    elo1: 1500.0,
    elo2: 1500.0,
    home: false,
};

impl Default for FootballParams {
    fn default() -> Self {
        FOOTBALL_DEFAULTS
    }
}

impl FootballParams {
    pub fn from_raw(raw: &RawParams) -> Self {
        let d = FOOTBALL_DEFAULTS;
        FootballParams {
            form1: raw.number_or("form1", d.form1),
            form2: raw.number_or("form2", d.form2),
            goals1: raw.number_or("goals1", d.goals1),
            goals2: raw.number_or("goals2", d.goals2),
            xg1: raw.number_or("xg1", d.xg1),
            xg2: raw.number_or("xg2", d.xg2),
            elo1: raw.number_or("elo1", d.elo1),
            elo2: raw.number_or("elo2", d.elo2),
            home: raw.flag("home").unwrap_or(d.home),
        }
    }

    /// Side 2's view of the same fixture. Venue is not a paired field.
    pub fn swapped(&self) -> Self {
        FootballParams {
            form1: self.form2,
            form2: self.form1,
            goals1: self.goals2,
            goals2: self.goals1,
            xg1: self.xg2,
            xg2: self.xg1,
            elo1: self.elo2,
            elo2: self.elo1,
            home: self.home,
        }
    }
}

// ── Hockey ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HockeyParams {
    /// Shots on goal per match.
    pub shots1: f64,
    pub shots2: f64,
    /// Goaltender save percentage, 0..1.
    pub save1: f64,
    pub save2: f64,
    /// Power-play conversion, 0..1.
    pub pp1: f64,
    pub pp2: f64,
    pub form1: f64,
    pub form2: f64,
    pub home: bool,
}

pub const HOCKEY_DEFAULTS: HockeyParams = HockeyParams {
    shots1: 30.0,
    shots2: 30.0,
    save1: 0.91,
    save2: 0.91,
    pp1: 0.16,
    pp2: 0.16,
    form1: 3.0,
    form2: 3.0,
    home: false,
};

impl Default for HockeyParams {
    fn default() -> Self {
        HOCKEY_DEFAULTS
    }
}

impl HockeyParams {
    pub fn from_raw(raw: &RawParams) -> Self {
        let d = HOCKEY_DEFAULTS;
        HockeyParams {
            shots1: raw.number_or("shots1", d.shots1),
            shots2: raw.number_or("shots2", d.shots2),
            save1: raw.number_or("save1", d.save1),
            save2: raw.number_or("save2", d.save2),
            pp1: raw.number_or("pp1", d.pp1),
            pp2: raw.number_or("pp2", d.pp2),
            form1: raw.number_or("form1", d.form1),
            form2: raw.number_or("form2", d.form2),
            home: raw.flag("home").unwrap_or(d.home),
        }
    }

    pub fn swapped(&self) -> Self {
        HockeyParams {
            shots1: self.shots2,
            shots2: self.shots1,
            save1: self.save2,
            save2: self.save1,
            pp1: self.pp2,
            pp2: self.pp1,
            form1: self.form2,
            form2: self.form1,
            home: self.home,
        }
    }
}

// ── Table tennis ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayStyle {
    Attack,
    Defence,
    #[default]
    Neutral,
}

impl PlayStyle {
    /// Anything that is not recognisably attack or defence is neutral.
    pub fn from_text(s: &str) -> PlayStyle {
        match s.trim().to_lowercase().as_str() {
            "attack" | "attacker" | "attacking" | "offensive" => PlayStyle::Attack,
            "defence" | "defense" | "defender" | "defensive" | "chopper" => PlayStyle::Defence,
            _ => PlayStyle::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableTennisParams {
    /// Elo-like player ratings.
    pub rating1: f64,
    pub rating2: f64,
    /// Head-to-head wins against each other.
    pub h2h1: f64,
    pub h2h2: f64,
    /// Share of service points won, 0..1.
    pub serve1: f64,
    pub serve2: f64,
    pub style1: PlayStyle,
    pub style2: PlayStyle,
    /// Odd number of sets in the match format.
    pub best_of: u32,
}

pub const TABLE_TENNIS_DEFAULTS: TableTennisParams = TableTennisParams {
    rating1: 1800.0,
    rating2: 1750.0,
    h2h1: 0.0,
    h2h2: 0.0,
    serve1: 0.62,
    serve2: 0.60,
    style1: PlayStyle::Neutral,
    style2: PlayStyle::Neutral,
    best_of: DEFAULT_BEST_OF,
};

impl Default for TableTennisParams {
    fn default() -> Self {
        TABLE_TENNIS_DEFAULTS
    }
}

impl TableTennisParams {
    pub fn from_raw(raw: &RawParams) -> Self {
        let d = TABLE_TENNIS_DEFAULTS;
        let style = |key: &str, default: PlayStyle| {
            raw.text(key)
                .map(|s| PlayStyle::from_text(&s))
                .unwrap_or(default)
        };
        let best_of = match raw.number("bestOf").or_else(|| raw.number("best_of")) {
            Some(requested) => {
                let used = coerce_best_of(requested);
                if used as f64 != requested {
                    warn!(requested, used, "best-of format coerced to a positive odd count");
                }
                used
            }
            None => d.best_of,
        };
        TableTennisParams {
            rating1: raw.number_or("rating1", d.rating1),
            rating2: raw.number_or("rating2", d.rating2),
            h2h1: raw.number_or("h2h1", d.h2h1),
            h2h2: raw.number_or("h2h2", d.h2h2),
            serve1: raw.number_or("serve1", d.serve1),
            serve2: raw.number_or("serve2", d.serve2),
            style1: style("style1", d.style1),
            style2: style("style2", d.style2),
            best_of,
        }
    }

    pub fn swapped(&self) -> Self {
        TableTennisParams {
            rating1: self.rating2,
            rating2: self.rating1,
            h2h1: self.h2h2,
            h2h2: self.h2h1,
            serve1: self.serve2,
            serve2: self.serve1,
            style1: self.style2,
            style2: self.style1,
            best_of: self.best_of,
        }
    }
}

// ── Sport-tagged set ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterSet {
    Football(FootballParams),
    Hockey(HockeyParams),
    TableTennis(TableTennisParams),
}

impl ParameterSet {
    /// Build the typed parameter set for `sport`, substituting defaults for
    /// anything missing.
    pub fn resolve(sport: Sport, raw: &RawParams) -> ParameterSet {
        let known = sport.known_keys();
        for key in raw.keys().filter(|k| !known.contains(k)) {
            debug!(sport = %sport, key, "ignoring parameter not used by this sport");
        }
        match sport {
            Sport::Football => ParameterSet::Football(FootballParams::from_raw(raw)),
            Sport::Hockey => ParameterSet::Hockey(HockeyParams::from_raw(raw)),
            Sport::TableTennis => ParameterSet::TableTennis(TableTennisParams::from_raw(raw)),
        }
    }

    pub fn sport(&self) -> Sport {
        match self {
            ParameterSet::Football(_) => Sport::Football,
            ParameterSet::Hockey(_) => Sport::Hockey,
            ParameterSet::TableTennis(_) => Sport::TableTennis,
        }
    }
}
