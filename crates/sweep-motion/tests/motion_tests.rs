// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used)]
//! Endpoint reproduction, Taylor-model enclosure and visitor soundness of
//! the closed-form motions.

use proptest::prelude::*;
use sweep_math::{Quat, Transform, Vec3};
use sweep_motion::{
    swept_aabb, Aabb, AabbBoundVisitor, InterpMotion, Motion, MotionCache, ScrewMotion,
    SplineMotion, TriangleBoundVisitor,
};
use sweep_taylor::Interval;

const SLACK: f64 = 1e-9;

prop_compose! {
    fn arb_vec(r: f64)(x in -r..r, y in -r..r, z in -r..r) -> Vec3 {
        Vec3::new(x, y, z)
    }
}

prop_compose! {
    fn arb_transform()(
        axis in arb_vec(1.0),
        angle in 0.0f64..3.0,
        translation in arb_vec(5.0),
    ) -> Transform {
        Transform::new(Quat::from_axis_angle(axis, angle), translation)
    }
}

prop_compose! {
    fn arb_window()(a in 0.0f64..1.0, b in 0.0f64..1.0) -> Interval {
        Interval::new(a, b)
    }
}

fn arb_motion() -> impl Strategy<Value = Motion> {
    prop_oneof![
        (arb_transform(), arb_transform())
            .prop_map(|(a, b)| Motion::from(ScrewMotion::new(a, b))),
        (arb_transform(), arb_transform(), arb_vec(2.0))
            .prop_map(|(a, b, p)| Motion::from(InterpMotion::with_reference_point(a, b, p))),
        (
            proptest::array::uniform4(arb_vec(3.0)),
            proptest::array::uniform4(arb_vec(1.0)),
        )
            .prop_map(|(td, rd)| Motion::from(SplineMotion::new(td, rd))),
    ]
}

/// Checks every entry of the sampled pose against the Taylor enclosure.
fn pose_enclosed(motion: &Motion, window: Interval, t: f64) -> bool {
    let (rotation, translation) = motion.taylor_model(window).expect("closed form");
    let pose = motion.transform_at(t).expect("closed form");
    let m = pose.rotation_matrix();
    let p = pose.translation();
    let r = rotation.enclose(t);
    let v = translation.enclose(t);
    let inside = |iv: &Interval, x: f64| iv.lo() - SLACK <= x && x <= iv.hi() + SLACK;
    (0..3).all(|i| inside(&v[i], p.get(i)) && (0..3).all(|j| inside(&r[i][j], m.at(i, j))))
}

#[test]
fn integrate_clamps_and_fills_the_cache() {
    let a = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
    let b = Transform::from_translation(Vec3::new(3.0, 0.0, 0.0));
    let motion = Motion::from(InterpMotion::new(a, b));
    let mut cache = MotionCache::default();

    motion.integrate(&mut cache, 1.7, 2.0).expect("integrate");
    assert_eq!(cache.current_time(), 1.0);
    assert!(cache.current_transform().approx_eq(&b, 1e-12));

    motion.integrate(&mut cache, -0.5, 1.0).expect("integrate");
    assert_eq!(cache.current_time(), 0.0);
    assert_eq!(cache.current_translation(), Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn spline_endpoints_are_curve_ends() {
    let td = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
    ];
    let motion = Motion::from(SplineMotion::new(td, [Vec3::ZERO; 4]));
    let mut cache = motion.initial_cache().expect("cache");
    assert!((cache.current_translation().x() - 1.0).abs() < 1e-12);
    motion.integrate(&mut cache, 1.0, 1.0).expect("integrate");
    assert!(cache
        .current_transform()
        .approx_eq(&motion.end_transform().expect("end"), 1e-12));
    assert!((cache.current_translation().x() - 2.0).abs() < 1e-12);
}

#[test]
fn swept_box_covers_a_quarter_turn() {
    let a = Transform::from_translation(Vec3::new(2.0, 0.0, 0.0));
    let b = Transform::new(
        Quat::from_axis_angle(Vec3::UNIT_Z, core::f64::consts::FRAC_PI_2),
        Vec3::new(0.0, 2.0, 0.0),
    );
    let motion = Motion::from(ScrewMotion::new(a, b));
    let shape = Aabb::from_center_half_extents(Vec3::ZERO, 0.5, 0.5, 0.5);
    let mut cache = motion.initial_cache().expect("cache");
    let swept = swept_aabb(&motion, &mut cache, &shape).expect("swept");
    for k in 0..=20 {
        let pose = motion.transform_at(f64::from(k) / 20.0).expect("pose");
        let moved = shape.transformed(&pose);
        assert!(swept.min().x() <= moved.min().x() + SLACK);
        assert!(swept.min().y() <= moved.min().y() + SLACK);
        assert!(swept.max().x() >= moved.max().x() - SLACK);
        assert!(swept.max().y() >= moved.max().y() - SLACK);
    }
    // Planar motion leaves the z extent alone.
    assert!((swept.max().z() - 0.5).abs() < 1e-12);
}

#[test]
fn zero_direction_bounds_the_speed() {
    let a = Transform::identity();
    let b = Transform::from_translation(Vec3::new(0.0, 3.0, 4.0));
    let motion = Motion::from(InterpMotion::new(a, b));
    let mut cache = motion.initial_cache().expect("cache");
    let triangle = [Vec3::ZERO, Vec3::UNIT_X, Vec3::UNIT_Y];
    let speed = motion
        .compute_motion_bound(&mut cache, &TriangleBoundVisitor::new(triangle, Vec3::ZERO))
        .expect("bound");
    assert!((speed - 5.0).abs() < 1e-12);
    let along_x = motion
        .compute_motion_bound(&mut cache, &TriangleBoundVisitor::new(triangle, Vec3::UNIT_X))
        .expect("bound");
    assert!(along_x.abs() < 1e-12);
}

#[test]
fn sub_epsilon_direction_bounds_the_speed() {
    let b = Transform::new(
        Quat::from_axis_angle(Vec3::UNIT_Z, 1.0),
        Vec3::new(3.0, 0.0, 0.0),
    );
    let shape = Aabb::from_center_half_extents(Vec3::ZERO, 0.5, 0.5, 0.5);
    let tiny = Vec3::new(1e-13, 0.0, 0.0);
    for motion in [
        Motion::from(ScrewMotion::new(Transform::identity(), b)),
        Motion::from(InterpMotion::new(Transform::identity(), b)),
    ] {
        let mut cache = motion.initial_cache().expect("cache");
        let mut rate = |direction: Vec3| {
            motion
                .compute_motion_bound(&mut cache, &AabbBoundVisitor::new(shape, direction))
                .expect("bound")
        };
        let along_x = rate(Vec3::UNIT_X);
        let speed = rate(Vec3::ZERO);
        assert!(along_x > 0.0, "{}", motion.kind_name());
        assert_eq!(rate(tiny), speed, "{}", motion.kind_name());
        assert!(speed >= along_x, "{}", motion.kind_name());
    }
}

proptest! {
    #[test]
    fn screw_and_interp_reproduce_their_end_poses(a in arb_transform(), b in arb_transform()) {
        for motion in [
            Motion::from(ScrewMotion::new(a, b)),
            Motion::from(InterpMotion::with_reference_point(a, b, Vec3::new(0.5, -1.0, 2.0))),
        ] {
            let mut cache = MotionCache::default();
            motion.integrate(&mut cache, 0.0, 1.0).expect("integrate");
            prop_assert!(cache.current_transform().approx_eq(&a, 1e-9), "{}", motion.kind_name());
            motion.integrate(&mut cache, 1.0, 1.0).expect("integrate");
            prop_assert!(cache.current_transform().approx_eq(&b, 1e-9), "{}", motion.kind_name());
        }
    }

    #[test]
    fn taylor_models_enclose_sampled_poses(
        motion in arb_motion(),
        window in arb_window(),
        s in 0.0f64..1.0,
    ) {
        let t = window.lo() + s * window.width();
        prop_assert!(pose_enclosed(&motion, window, t), "{} at {t}", motion.kind_name());
    }

    #[test]
    fn box_bound_covers_corner_travel(
        motion in arb_motion(),
        direction in arb_vec(1.0),
        start in 0.0f64..1.0,
        s in 0.0f64..1.0,
    ) {
        let shape = Aabb::new(Vec3::new(-0.5, -0.2, 0.0), Vec3::new(0.4, 0.3, 0.6));
        let mut cache = MotionCache::default();
        motion.integrate(&mut cache, start, 1.0).expect("integrate");
        let rate = motion
            .compute_motion_bound(&mut cache, &AabbBoundVisitor::new(shape, direction))
            .expect("bound");

        let t = start + s * (1.0 - start);
        let n = if direction.is_zero() { direction } else { direction.normalize() };
        let now = cache.current_transform();
        let later = motion.transform_at(t).expect("pose");
        for corner in shape.corners() {
            let step = later.transform_point(&corner).sub(&now.transform_point(&corner));
            let moved = if n.is_zero() { step.length() } else { step.dot(&n).abs() };
            prop_assert!(moved <= rate * (t - start) + SLACK, "{}", motion.kind_name());
        }
    }
}
