use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use match_odds::config::Config;
use match_odds::{analyze, ParameterSet, Report, Sport};

fn main() -> Result<()> {
    // Initialise tracing / logging. Stdout carries the JSON report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let raw = config
        .raw_params()
        .context("Failed to collect match parameters")?;
    let sport = Sport::from_tag(&config.sport);
    let params = ParameterSet::resolve(sport, &raw);
    let analysis = analyze(&params);

    let [team1, team2] = config.participants();
    let verdict = analysis.verdict();
    for (outcome, pct) in analysis.probabilities() {
        info!(outcome, pct, "outcome probability");
    }
    info!(
        sport = %sport,
        team1 = %team1,
        team2 = %team2,
        handicap = %analysis.handicap(),
        tier = %verdict.tier,
        margin_pts = verdict.margin_pts,
        "Analysis complete"
    );

    let report = Report::new([team1, team2], analysis);
    let json = report
        .to_json(!config.compact)
        .context("Failed to serialise report")?;
    println!("{}", json);

    Ok(())
}
