use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::AnalysisResult;
use crate::params::Sport;

/// Output envelope: who played what, plus the engine's analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub sport: Sport,
    /// `[side 1, side 2]` in listing order.
    pub participants: [String; 2],
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(participants: [String; 2], analysis: AnalysisResult) -> Self {
        Report {
            meta: ReportMeta {
                sport: analysis.sport(),
                participants,
                generated_at: Utc::now(),
            },
            analysis,
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analyze_raw;
    use crate::params::RawParams;

    #[test]
    fn envelope_shape() {
        let analysis = analyze_raw("hockey", &RawParams::new());
        let report = Report::new(["Dynamo".into(), "Spartak".into()], analysis);
        let json: serde_json::Value =
            serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        assert_eq!(json["meta"]["sport"], "hockey");
        assert_eq!(json["meta"]["participants"][1], "Spartak");
        assert!(json["meta"]["generated_at"].is_string());
        assert_eq!(json["analysis"]["sport"], "hockey");
    }

    #[test]
    fn pretty_and_compact_carry_the_same_data() {
        let analysis = analyze_raw("tt", &RawParams::new());
        let report = Report::new(["Ivanov".into(), "Petrov".into()], analysis);
        let pretty: serde_json::Value =
            serde_json::from_str(&report.to_json(true).unwrap()).unwrap();
        let compact: serde_json::Value =
            serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        assert_eq!(pretty, compact);
        assert!(!report.to_json(false).unwrap().contains('\n'));
    }
}
