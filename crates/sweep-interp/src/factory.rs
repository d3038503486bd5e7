// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::curve::Interpolation;
use crate::data::{InterpolationData, InterpolationKind};
use crate::error::InterpolationError;
use crate::linear::LinearInterpolation;
use crate::third_order::ThirdOrderInterpolation;

/// Function pointer building a curve from data and endpoint values.
pub type CreateFn =
    fn(&InterpolationData, f64, f64) -> Result<Box<dyn Interpolation>, InterpolationError>;

static BUILTIN: Lazy<InterpolationFactory> = Lazy::new(InterpolationFactory::with_builtin);

/// Registry mapping an [`InterpolationKind`] to its constructor.
///
/// Registration is expected during startup; afterwards the factory is shared
/// read-only (it is `Sync`).
#[derive(Debug, Clone, Default)]
pub struct InterpolationFactory {
    creators: FxHashMap<InterpolationKind, CreateFn>,
}

impl InterpolationFactory {
    /// Creates an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory with every built-in kind registered.
    pub fn with_builtin() -> Self {
        let mut factory = Self::new();
        LinearInterpolation::register(&mut factory);
        ThirdOrderInterpolation::register(&mut factory);
        factory
    }

    /// Shared read-only factory with the built-in kinds, created on first use.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Inserts or overwrites the constructor for `kind`.
    ///
    /// Returns the constructor previously registered for `kind`, if any.
    pub fn register_class(&mut self, kind: InterpolationKind, create: CreateFn) -> Option<CreateFn> {
        let previous = self.creators.insert(kind, create);
        if previous.is_some() {
            warn!(?kind, "interpolation constructor replaced");
        } else {
            debug!(?kind, "interpolation constructor registered");
        }
        previous
    }

    /// Returns `true` if a constructor is registered for `kind`.
    pub fn is_registered(&self, kind: InterpolationKind) -> bool {
        self.creators.contains_key(&kind)
    }

    /// Builds a curve for `data`'s declared kind.
    ///
    /// # Errors
    /// [`InterpolationError::Unregistered`] if no constructor is registered
    /// for the kind; otherwise whatever the constructor reports.
    pub fn create(
        &self,
        data: &InterpolationData,
        start_value: f64,
        end_value: f64,
    ) -> Result<Box<dyn Interpolation>, InterpolationError> {
        let kind = data.kind();
        let create = self
            .creators
            .get(&kind)
            .ok_or(InterpolationError::Unregistered(kind))?;
        create(data, start_value, end_value)
    }
}
