use crate::classify::{Classifier, Outcome};
use crate::error::StorageError;
use crate::record::{CandidateSighting, SightingRecord};
use crate::store::SightingStore;
use crate::util::IdGenerator;
use crate::validate::{FieldErrors, validate};
use log::{debug, error, info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Saved {
        outcome: Outcome,
        message: &'static str,
        sighting: SightingRecord,
    },
    ValidationFailed {
        errors: FieldErrors,
    },
    StorageFailed,
}

pub struct SubmissionService {
    store: Arc<dyn SightingStore>,
    classifier: Classifier,
    ids: IdGenerator,
}

impl SubmissionService {
    /// Seeds id generation from the largest id already in the store. An
    /// unreadable store still starts; requests then fail one by one.
    pub fn new(store: Arc<dyn SightingStore>) -> Self {
        let floor = match store.list_all() {
            Ok(existing) => {
                info!("Loaded {} existing sightings", existing.len());
                existing.iter().map(|r| r.id).max().unwrap_or(0)
            }
            Err(e) => {
                error!("Could not load existing sightings: {}", e);
                0
            }
        };

        Self {
            store,
            classifier: Classifier::default(),
            ids: IdGenerator::starting_after(floor),
        }
    }

    pub fn submit(&self, candidate: CandidateSighting) -> SubmissionResult {
        let valid = match validate(candidate) {
            Ok(valid) => valid,
            Err(errors) => {
                debug!("Rejected sighting, invalid fields: {:?}", errors.keys());
                return SubmissionResult::ValidationFailed { errors };
            }
        };

        let record = SightingRecord {
            id: self.ids.next_id(),
            date: valid.date,
            time: valid.time,
            location: valid.location,
            species: valid.species,
            severity: valid.severity,
        };

        let sighting = match self.store.append(record) {
            Ok(sighting) => sighting,
            Err(e) => {
                error!("Failed to save sighting: {}", e);
                return SubmissionResult::StorageFailed;
            }
        };

        let classification = self.classifier.classify(&sighting);
        match classification.outcome {
            Outcome::Warning => warn!(
                "Saved sighting {} with unusual location {:?}",
                sighting.id, sighting.location
            ),
            Outcome::Success => info!(
                "Saved sighting {} ({}, {})",
                sighting.id, sighting.location, sighting.severity
            ),
        }

        SubmissionResult::Saved {
            outcome: classification.outcome,
            message: classification.message,
            sighting,
        }
    }

    pub fn list(&self) -> Result<Vec<SightingRecord>, StorageError> {
        self.store.list_all().inspect_err(|e| {
            error!("Failed to read sightings: {}", e);
        })
    }
}
