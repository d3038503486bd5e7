// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used)]
//! Articulated motions driven by a two-link arm.

use std::sync::Arc;

use sweep_chain::{JointKind, LinkBound, Model, ModelBuilder, ModelConfig, Movement};
use sweep_interp::InterpolationFactory;
use sweep_math::{Transform, Vec3};
use sweep_motion::{
    swept_aabb, Aabb, AabbBoundVisitor, ArticularMotion, Motion, MotionCache, MotionError,
};
use sweep_taylor::Interval;

fn arm() -> Arc<Model> {
    Arc::new(
        ModelBuilder::new()
            .link("base")
            .link("upper")
            .link("lower")
            .connect(
                "shoulder",
                JointKind::Revolute,
                "base",
                "upper",
                Vec3::UNIT_Z,
                Transform::identity(),
            )
            .connect(
                "elbow",
                JointKind::Revolute,
                "upper",
                "lower",
                Vec3::UNIT_Z,
                Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)),
            )
            .build()
            .expect("valid arm"),
    )
}

fn motion_of(link: &str) -> ArticularMotion {
    let model = arm();
    let end = ModelConfig::new().with("shoulder", 1.0).with("elbow", -0.5);
    let movement = Movement::new(
        model.clone(),
        &ModelConfig::new(),
        &end,
        InterpolationFactory::builtin(),
    )
    .expect("movement");
    let bound = LinkBound::for_link_name(model, Arc::new(movement), link).expect("link");
    ArticularMotion::new(bound)
}

#[test]
fn root_link_cannot_be_integrated() {
    let motion = Motion::from(motion_of("base"));
    let mut cache = MotionCache::default();
    let err = motion.integrate(&mut cache, 0.5, 1.0).expect_err("root");
    assert_eq!(err, MotionError::NoParentJoint("base".into()));
    assert_eq!(cache.current_time(), 0.0);
}

#[test]
fn taylor_model_is_unsupported() {
    let motion = Motion::from(motion_of("lower"));
    let err = motion.taylor_model(Interval::UNIT).expect_err("unsupported");
    assert_eq!(err, MotionError::TaylorModelUnsupported("articular"));
    assert_eq!(err.to_string(), "articular motion has no Taylor model");
}

#[test]
fn reference_point_offsets_the_body() {
    let mut articular = motion_of("lower");
    let link_pose = articular.transform_at(0.0).expect("pose");
    articular.set_reference_point(Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(articular.reference_point(), Vec3::new(0.5, 0.0, 0.0));
    let body_pose = articular.transform_at(0.0).expect("pose");
    assert!(body_pose
        .translation()
        .sub(&link_pose.translation())
        .sub(&Vec3::new(0.5, 0.0, 0.0))
        .length()
        < 1e-12);
}

#[test]
fn directional_bound_never_exceeds_speed_bound() {
    let articular = motion_of("lower");
    let mut cache = MotionCache::default();
    let plain = articular
        .non_directional_motion_bound(&mut cache, 0.5)
        .expect("bound");
    for n in [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::new(1.0, 1.0, 0.0)] {
        let along = articular.motion_bound(&mut cache, &n, 0.5).expect("bound");
        assert!(along <= plain + 1e-12);
    }
    assert!(cache.chain_cache().is_warm());
    let again = articular.non_directional_motion_bound(&mut cache, 0.5).expect("bound");
    assert_eq!(again, plain);
}

#[test]
fn swept_box_contains_later_poses() {
    let mut articular = motion_of("lower");
    articular.set_reference_point(Vec3::new(0.5, 0.0, 0.0));
    let motion = Motion::from(articular);
    let shape = Aabb::from_center_half_extents(Vec3::ZERO, 0.25, 0.1, 0.1);
    let mut cache = MotionCache::default();
    motion.integrate(&mut cache, 0.25, 1.0).expect("integrate");

    let rate = motion
        .compute_motion_bound(&mut cache, &AabbBoundVisitor::new(shape, Vec3::ZERO))
        .expect("bound");
    assert!(rate > 0.0);

    let swept = swept_aabb(&motion, &mut cache, &shape).expect("swept");
    for k in 0..=12 {
        let t = 0.25 + 0.75 * f64::from(k) / 12.0;
        let moved = shape.transformed(&motion.transform_at(t).expect("pose"));
        assert!(swept.min().x() <= moved.min().x() + 1e-9, "t = {t}");
        assert!(swept.min().y() <= moved.min().y() + 1e-9, "t = {t}");
        assert!(swept.max().x() >= moved.max().x() - 1e-9, "t = {t}");
        assert!(swept.max().y() >= moved.max().y() - 1e-9, "t = {t}");
    }
}
