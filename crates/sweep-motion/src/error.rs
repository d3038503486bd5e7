// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_chain::ChainError;
use thiserror::Error;

/// Errors emitted by motion queries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    /// The kinematic chain behind an articulated motion failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
    /// An articulated motion is attached to a link without a parent joint.
    #[error("link {0} has no parent joint")]
    NoParentJoint(String),
    /// The motion kind has no Taylor-model form.
    #[error("{0} motion has no Taylor model")]
    TaylorModelUnsupported(&'static str),
}

/// Errors emitted while loading [`crate::MotionSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A value is negative or not finite.
    #[error("invalid {field}: {value}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
}
