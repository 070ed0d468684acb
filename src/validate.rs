use crate::record::CandidateSighting;
use std::collections::BTreeMap;

/// Field name to human-readable message, one entry per failing field.
pub type FieldErrors = BTreeMap<String, String>;

/// A candidate that passed validation, with `location` already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSighting {
    pub date: String,
    pub time: String,
    pub location: String,
    pub species: String,
    pub severity: String,
}

fn required(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.insert(field.to_string(), format!("{label} is required."));
            None
        }
    }
}

/// Check every field and collect all failures rather than stopping at the first.
pub fn validate(candidate: CandidateSighting) -> Result<ValidSighting, FieldErrors> {
    let mut errors = FieldErrors::new();

    let date = required(&mut errors, "date", "Date", candidate.date);
    let time = required(&mut errors, "time", "Time", candidate.time);
    let location = required(
        &mut errors,
        "location",
        "Location",
        candidate.location.map(|l| l.trim().to_string()),
    );
    let species = required(&mut errors, "species", "Species", candidate.species);
    let severity = required(&mut errors, "severity", "Severity", candidate.severity);

    match (date, time, location, species, severity) {
        (Some(date), Some(time), Some(location), Some(species), Some(severity)) => {
            Ok(ValidSighting {
                date,
                time,
                location,
                species,
                severity,
            })
        }
        _ => Err(errors),
    }
}
