use crate::record::SightingRecord;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static NUMERIC_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9\s]+$").expect("numeric location pattern is valid")
});

pub const NUMERIC_LOCATION_MESSAGE: &str = "Your sighting has been saved, but the location looks unusual (only numbers). Please double-check it.";
pub const HIGH_ALERT_MESSAGE: &str =
    "Success: your sighting has been saved. This is marked as a HIGH ALERT (high severity) sighting.";
pub const THANK_YOU_MESSAGE: &str = "Thank you, your sighting has been recorded.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub outcome: Outcome,
    pub message: &'static str,
}

pub trait ClassificationRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, record: &SightingRecord) -> Option<Classification>;
}

/// Location made only of digits and whitespace.
pub struct NumericLocation;

impl ClassificationRule for NumericLocation {
    fn name(&self) -> &'static str {
        "numeric_location"
    }

    fn classify(&self, record: &SightingRecord) -> Option<Classification> {
        NUMERIC_LOCATION
            .is_match(record.location.trim())
            .then_some(Classification {
                outcome: Outcome::Warning,
                message: NUMERIC_LOCATION_MESSAGE,
            })
    }
}

pub struct HighSeverity;

impl ClassificationRule for HighSeverity {
    fn name(&self) -> &'static str {
        "high_severity"
    }

    fn classify(&self, record: &SightingRecord) -> Option<Classification> {
        (record.severity == "high").then_some(Classification {
            outcome: Outcome::Success,
            message: HIGH_ALERT_MESSAGE,
        })
    }
}

/// Runs rules in order; the first match decides the outcome. No rule blocks a save.
pub struct Classifier {
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: vec![Box::new(NumericLocation), Box::new(HighSeverity)],
        }
    }
}

impl Classifier {
    pub fn classify(&self, record: &SightingRecord) -> Classification {
        self.rules
            .iter()
            .find_map(|rule| {
                let hit = rule.classify(record)?;
                log::debug!("Sighting {} matched rule {}", record.id, rule.name());
                Some(hit)
            })
            .unwrap_or(Classification {
                outcome: Outcome::Success,
                message: THANK_YOU_MESSAGE,
            })
    }
}
