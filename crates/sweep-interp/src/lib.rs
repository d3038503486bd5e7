// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Joint-value interpolation for sweep.
//!
//! An [`Interpolation`] moves one scalar from a start value to an end value
//! over normalized time `[0, 1]` and answers conservative velocity and
//! displacement bounds over sub-windows. Curves are built through an
//! [`InterpolationFactory`], which maps an [`InterpolationKind`] tag to a
//! constructor so the kinematic layer never names concrete curve types.
//!
//! The factory is an ordinary value: build one at startup, register the
//! kinds you need, and hand it to consumers. [`InterpolationFactory::builtin`]
//! is a shared read-only instance with the built-in kinds registered.

mod curve;
mod data;
mod error;
mod factory;
mod linear;
mod third_order;

pub use curve::Interpolation;
pub use data::{InterpolationData, InterpolationKind, ThirdOrderLimits};
pub use error::InterpolationError;
pub use factory::{CreateFn, InterpolationFactory};
pub use linear::LinearInterpolation;
pub use third_order::ThirdOrderInterpolation;
