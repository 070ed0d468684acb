use serde::{Deserialize, Serialize};

/// A stored tick sighting. Every field is non-empty once it gets here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightingRecord {
    pub id: u64,
    pub date: String,
    pub time: String,
    pub location: String,
    pub species: String,
    pub severity: String,
}

/// Untrusted submission body. Any field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateSighting {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

#[cfg(test)]
impl CandidateSighting {
    pub fn complete(location: &str, severity: &str) -> Self {
        Self {
            date: Some("2025-08-14".to_string()),
            time: Some("17:30".to_string()),
            location: Some(location.to_string()),
            species: Some("Sheep tick".to_string()),
            severity: Some(severity.to_string()),
        }
    }
}
