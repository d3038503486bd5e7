// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use sweep_interp::InterpolationError;
use thiserror::Error;

/// Errors emitted while assembling a [`crate::Model`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Two links share a name.
    #[error("duplicate link: {0}")]
    DuplicateLink(String),
    /// Two joints share a name.
    #[error("duplicate joint: {0}")]
    DuplicateJoint(String),
    /// A joint references a link that was never declared.
    #[error("joint {joint} references unknown link {link}")]
    UnknownLink {
        /// Referencing joint.
        joint: String,
        /// Missing link name.
        link: String,
    },
    /// A link is the child of more than one joint.
    #[error("link {link} has two parent joints: {first} and {second}")]
    TwoParents {
        /// Offending link.
        link: String,
        /// Joint registered first.
        first: String,
        /// Joint registered second.
        second: String,
    },
    /// Every link has a parent joint.
    #[error("model has no root link")]
    NoRoot,
    /// More than one link lacks a parent joint.
    #[error("model has multiple root links: {0:?}")]
    MultipleRoots(Vec<String>),
    /// A link cannot be reached from the root.
    #[error("link {0} is part of a joint cycle")]
    Cycle(String),
    /// A moving joint declares a zero or non-finite axis.
    #[error("joint {0} has a degenerate axis")]
    DegenerateAxis(String),
}

/// Errors emitted by chain motion-bound queries and movements.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChainError {
    /// No link with this name exists in the model.
    #[error("unknown link: {0}")]
    UnknownLink(String),
    /// No joint with this name exists in the model.
    #[error("unknown joint: {0}")]
    UnknownJoint(String),
    /// A non-root joint has no parent joint.
    #[error("joint {0} has no parent joint")]
    MissingParentJoint(String),
    /// Building a joint interpolation failed.
    #[error("interpolation for joint {joint} failed")]
    Interpolation {
        /// Joint being interpolated.
        joint: String,
        /// Underlying failure.
        #[source]
        source: InterpolationError,
    },
    /// The model itself is invalid.
    #[error(transparent)]
    Model(#[from] ModelError),
}
