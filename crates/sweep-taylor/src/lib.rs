// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Taylor-model arithmetic for sweep.

A [`TaylorModel`] is a degree-3 polynomial in the absolute time variable `t`
plus a remainder [`Interval`]. For every `t` in the model's time interval the
represented function value lies in `p(t) + remainder`.

Soundness contract:
- Every operation exported here (addition, scaling, products, the cos/sin
  generators) yields a model whose remainder contains the true error of its
  polynomial over the whole time interval, given sound inputs.
- Remainders are only ever widened, never truncated. Rounding of `f64`
  arithmetic is not tracked.
"]

/// Closed intervals.
pub mod interval;
/// Scalar Taylor models and their generators.
pub mod model;
/// 3-vectors and 3×3 matrices of Taylor models.
pub mod tensor;

pub use interval::Interval;
pub use model::TaylorModel;
pub use tensor::{TaylorMatrix, TaylorVector};
