// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used)]
//! Registry behaviour of `InterpolationFactory`.

use proptest::prelude::*;
use sweep_interp::{
    Interpolation, InterpolationData, InterpolationError, InterpolationFactory, InterpolationKind,
    LinearInterpolation, ThirdOrderLimits,
};
use sweep_taylor::Interval;

fn doubled_linear(
    _data: &InterpolationData,
    start: f64,
    end: f64,
) -> Result<Box<dyn Interpolation>, InterpolationError> {
    Ok(Box::new(LinearInterpolation::new(2.0 * start, 2.0 * end)?))
}

#[test]
fn create_on_unregistered_kind_fails() {
    let factory = InterpolationFactory::new();
    let err = factory
        .create(&InterpolationData::Linear, 0.0, 1.0)
        .expect_err("empty factory");
    assert_eq!(err, InterpolationError::Unregistered(InterpolationKind::Linear));
}

#[test]
fn create_uses_the_registered_constructor() {
    let mut factory = InterpolationFactory::new();
    assert!(factory
        .register_class(InterpolationKind::Linear, doubled_linear)
        .is_none());
    let curve = factory
        .create(&InterpolationData::Linear, 1.0, 3.0)
        .expect("registered");
    assert_eq!(curve.start_value(), 2.0);
    assert_eq!(curve.end_value(), 6.0);
}

#[test]
fn register_overwrites_previous_constructor() {
    let mut factory = InterpolationFactory::with_builtin();
    assert!(factory
        .register_class(InterpolationKind::Linear, doubled_linear)
        .is_some());
    let curve = factory
        .create(&InterpolationData::Linear, 1.0, 1.0)
        .expect("registered");
    assert_eq!(curve.value(0.5), 2.0);
}

#[test]
fn builtin_factory_builds_both_kinds() {
    let factory = InterpolationFactory::builtin();
    assert!(factory.is_registered(InterpolationKind::Linear));
    assert!(factory.is_registered(InterpolationKind::ThirdOrder));
    let limits = ThirdOrderLimits {
        max_velocity: 10.0,
        max_acceleration: 40.0,
        max_jerk: 80.0,
    };
    let curve = factory
        .create(&InterpolationData::ThirdOrder(limits), 0.0, 1.0)
        .expect("within limits");
    assert_eq!(curve.kind(), InterpolationKind::ThirdOrder);
}

#[test]
fn mismatched_data_is_rejected_by_constructor() {
    let err = LinearInterpolation::create(
        &InterpolationData::ThirdOrder(ThirdOrderLimits {
            max_velocity: 1.0,
            max_acceleration: 1.0,
            max_jerk: 1.0,
        }),
        0.0,
        1.0,
    )
    .expect_err("kind mismatch");
    assert!(matches!(err, InterpolationError::KindMismatch { .. }));
}

proptest! {
    // The velocity bound over a window must dominate the average speed over
    // every sub-interval of that window.
    #[test]
    fn velocity_bound_dominates_finite_differences(
        start in -5.0f64..5.0,
        end in -5.0f64..5.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
        third in any::<bool>(),
    ) {
        let data = if third {
            InterpolationData::ThirdOrder(ThirdOrderLimits {
                max_velocity: 100.0,
                max_acceleration: 1000.0,
                max_jerk: 1000.0,
            })
        } else {
            InterpolationData::Linear
        };
        let curve = InterpolationFactory::builtin().create(&data, start, end).expect("valid");
        let window = Interval::new(a, b);
        let bound = curve.velocity_bound(window);
        let steps = 16;
        for i in 0..steps {
            let t0 = window.lo() + window.width() * f64::from(i) / f64::from(steps);
            let t1 = window.lo() + window.width() * f64::from(i + 1) / f64::from(steps);
            if t1 > t0 {
                let speed = (curve.value(t1) - curve.value(t0)).abs() / (t1 - t0);
                prop_assert!(speed <= bound + 1e-9, "speed {} > bound {}", speed, bound);
            }
        }
        let travel = (curve.value(window.hi()) - curve.value(window.lo())).abs();
        prop_assert!(travel <= curve.movement_length_bound(window) + 1e-12);
    }
}
