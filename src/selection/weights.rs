//! Per-topic weighting, independent of selection.

use crate::catalogue::TopicCatalogue;
use crate::error::WizardError;
use crate::types::TopicId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const MIN_WEIGHT: f64 = 0.5;
pub const MAX_WEIGHT: f64 = 3.0;
pub const WEIGHT_STEP: f64 = 0.5;
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Topic weights. Unset topics weigh [`DEFAULT_WEIGHT`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicWeights {
    weights: BTreeMap<TopicId, f64>,
    touched: bool,
}

impl TopicWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a weight, snapped to the step grid and clamped to the allowed range.
    /// Returns the stored value.
    pub fn set(
        &mut self,
        catalogue: &TopicCatalogue,
        topic_id: &str,
        value: f64,
    ) -> Result<f64, WizardError> {
        if catalogue.get(topic_id).is_none() {
            return Err(WizardError::UnknownTopic(topic_id.to_string()));
        }
        let stored = normalize_weight(value);
        self.weights.insert(topic_id.to_string(), stored);
        self.touched = true;
        debug!(topic_id, weight = stored, "Set topic weight");
        Ok(stored)
    }

    pub fn get(&self, topic_id: &str) -> f64 {
        self.weights.get(topic_id).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Whether the user has explicitly set any weight
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Explicitly set weights
    pub fn explicit(&self) -> &BTreeMap<TopicId, f64> {
        &self.weights
    }
}

fn normalize_weight(value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_WEIGHT;
    }
    let snapped = (value / WEIGHT_STEP).round() * WEIGHT_STEP;
    snapped.clamp(MIN_WEIGHT, MAX_WEIGHT)
}
