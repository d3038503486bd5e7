// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

use crate::data::InterpolationKind;

/// Errors emitted while building interpolation curves.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpolationError {
    /// No constructor is registered for the requested kind.
    #[error("no interpolation registered for kind {0:?}")]
    Unregistered(InterpolationKind),
    /// A constructor received data declaring a different kind.
    #[error("interpolation data of kind {found:?} passed to {expected:?} constructor")]
    KindMismatch {
        /// Kind the constructor builds.
        expected: InterpolationKind,
        /// Kind declared by the data.
        found: InterpolationKind,
    },
    /// Start or end value is not finite.
    #[error("non-finite interpolation endpoints: start={start}, end={end}")]
    NonFinite {
        /// Start value.
        start: f64,
        /// End value.
        end: f64,
    },
    /// A declared limit is not a positive finite number.
    #[error("invalid {quantity} limit: {value}")]
    InvalidLimit {
        /// Which limit.
        quantity: &'static str,
        /// Offending value.
        value: f64,
    },
    /// The curve would exceed a declared limit.
    #[error("{quantity} {required} exceeds limit {limit}")]
    LimitExceeded {
        /// Which limit.
        quantity: &'static str,
        /// Peak value the curve needs.
        required: f64,
        /// Declared limit.
        limit: f64,
    },
}
