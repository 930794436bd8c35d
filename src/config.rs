use clap::Parser;
use std::path::PathBuf;

use crate::error::ParamError;
use crate::params::RawParams;

/// Pre-match outcome probabilities, totals and handicaps
#[derive(Parser, Debug, Clone)]
#[command(name = "match-odds", version, about)]
pub struct Config {
    /// Sport tag: football, hockey or tt (unknown tags are analysed as football)
    #[arg(long, env = "MATCH_SPORT", default_value = "football")]
    pub sport: String,

    /// First-listed participant (home side / player 1)
    #[arg(long, env = "MATCH_TEAM1", default_value = "Participant 1")]
    pub team1: String,

    /// Second-listed participant (away side / player 2)
    #[arg(long, env = "MATCH_TEAM2", default_value = "Participant 2")]
    pub team2: String,

    /// Model parameter as key=value, repeatable (e.g. -p elo1=1800 -p home=yes)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// JSON object of model parameters; --param values override it
    #[arg(long, env = "MATCH_PARAMS_FILE")]
    pub params_file: Option<PathBuf>,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long, env = "MATCH_COMPACT", default_value = "false")]
    pub compact: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let team1 = self.team1.trim();
        let team2 = self.team2.trim();
        if team1.is_empty() || team2.is_empty() {
            anyhow::bail!("both participant names must be non-empty");
        }
        if team1.eq_ignore_ascii_case(team2) {
            anyhow::bail!("participants must differ (got {:?} twice)", team1);
        }
        Ok(())
    }

    pub fn participants(&self) -> [String; 2] {
        [self.team1.trim().to_string(), self.team2.trim().to_string()]
    }

    /// Collect raw parameters: the file first, then inline pairs on top.
    pub fn raw_params(&self) -> Result<RawParams, ParamError> {
        let mut raw = match &self.params_file {
            Some(path) => {
                let name = path.display().to_string();
                let text = std::fs::read_to_string(path).map_err(|e| ParamError::Io {
                    path: name.clone(),
                    source: e,
                })?;
                RawParams::from_json_str(&text, &name)?
            }
            None => RawParams::new(),
        };
        let mut inline = RawParams::new();
        for pair in &self.params {
            let (key, value) = RawParams::parse_pair(pair)?;
            inline.insert(key, value);
        }
        raw.merge(inline);
        Ok(raw)
    }
}
