// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use crate::model::Model;

/// Joint values (angles in radians, displacements in metres) keyed by joint name.
///
/// Joints without an entry sit at `0`. Serialized as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelConfig {
    values: BTreeMap<String, f64>,
}

impl ModelConfig {
    /// Empty configuration (every joint at zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of `joint`, returning the updated configuration.
    pub fn with(mut self, joint: impl Into<String>, value: f64) -> Self {
        self.set(joint, value);
        self
    }

    /// Sets the value of `joint`.
    pub fn set(&mut self, joint: impl Into<String>, value: f64) {
        self.values.insert(joint.into(), value);
    }

    /// Value of `joint`, `0` when unset.
    pub fn value(&self, joint: &str) -> f64 {
        self.values.get(joint).copied().unwrap_or(0.0)
    }

    /// Iterates over the explicitly set values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Checks that every entry names a joint of `model`.
    ///
    /// # Errors
    /// [`ChainError::UnknownJoint`] for the first unknown name.
    pub fn validate(&self, model: &Model) -> Result<(), ChainError> {
        match self
            .values
            .keys()
            .find(|name| model.joint_by_name(name).is_none())
        {
            Some(name) => Err(ChainError::UnknownJoint(name.clone())),
            None => Ok(()),
        }
    }
}
