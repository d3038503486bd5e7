// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used)]
//! Forward kinematics and velocity bounds of `Movement`.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use proptest::prelude::*;
use rustc_hash::FxHashMap;
use sweep_chain::{
    ChainError, JointKind, LinkBound, LinkBoundCache, Model, ModelBuilder, ModelConfig,
    ModelDescription, Movement, TimeWindow, VelocityBounds,
};
use sweep_interp::{InterpolationData, InterpolationFactory, ThirdOrderLimits};
use sweep_math::{Transform, Vec3};

fn planar_arm() -> Arc<Model> {
    Arc::new(
        ModelBuilder::new()
            .link("base")
            .link("upper")
            .link("lower")
            .link("slider")
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
            .connect(
                "rail",
                JointKind::Prismatic,
                "lower",
                "slider",
                Vec3::UNIT_X,
                Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)),
            )
            .build()
            .expect("valid arm"),
    )
}

fn movement(model: &Arc<Model>, end: ModelConfig) -> Movement {
    Movement::new(
        model.clone(),
        &ModelConfig::new(),
        &end,
        InterpolationFactory::builtin(),
    )
    .expect("movement")
}

#[test]
fn forward_kinematics_follows_the_joints() {
    let model = planar_arm();
    let end = ModelConfig::new()
        .with("shoulder", FRAC_PI_2)
        .with("rail", 0.5);
    let movement = movement(&model, end);
    let lower = model.link_by_name("lower").expect("lower");
    let slider = model.link_by_name("slider").expect("slider");

    let at_start = movement.global_transform(lower, 0.0);
    assert!(at_start.approx_eq(&Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)), 1e-12));

    let at_end = movement.global_transform(slider, 1.0);
    let p = at_end.translation();
    assert!((p.x()).abs() < 1e-12, "{p:?}");
    assert!((p.y() - 2.5).abs() < 1e-12, "{p:?}");

    let root = movement.global_transform(model.root(), 0.7);
    assert_eq!(root, Transform::identity());
}

#[test]
fn velocity_bounds_follow_joint_kinds() {
    let model = planar_arm();
    let end = ModelConfig::new()
        .with("shoulder", FRAC_PI_2)
        .with("rail", -0.5);
    let movement = movement(&model, end);
    let shoulder = model.joint_by_name("shoulder").expect("shoulder");
    let elbow = model.joint_by_name("elbow").expect("elbow");
    let rail = model.joint_by_name("rail").expect("rail");
    let window = TimeWindow::FULL;

    assert_eq!(
        movement.angular_velocity_bound(shoulder, window),
        Vec3::new(0.0, 0.0, FRAC_PI_2)
    );
    assert_eq!(movement.linear_velocity_bound(shoulder, window), Vec3::ZERO);
    assert_eq!(movement.angular_velocity_bound(elbow, window), Vec3::ZERO);
    assert_eq!(movement.linear_velocity_bound(rail, window), Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(movement.absolute_linear_velocity_bound(rail, window), 0.5);
    assert_eq!(movement.child_parent_distance_bound(elbow, shoulder), 1.0);
    // Levers to farther ancestors sum the joint origins in between.
    assert_eq!(movement.child_parent_distance_bound(rail, shoulder), 2.0);
}

#[test]
fn unknown_joint_in_config_is_rejected() {
    let model = planar_arm();
    let err = Movement::new(
        model,
        &ModelConfig::new().with("wrist", 1.0),
        &ModelConfig::new(),
        InterpolationFactory::builtin(),
    )
    .expect_err("wrist is not a joint");
    assert_eq!(err, ChainError::UnknownJoint("wrist".into()));
}

#[test]
fn interpolation_failures_name_the_joint() {
    let model = planar_arm();
    let mut data = FxHashMap::default();
    data.insert(
        "shoulder".to_owned(),
        InterpolationData::ThirdOrder(ThirdOrderLimits {
            max_velocity: 0.1,
            max_acceleration: 0.1,
            max_jerk: 0.1,
        }),
    );
    let err = Movement::with_interpolations(
        model,
        &ModelConfig::new(),
        &ModelConfig::new().with("shoulder", 3.0),
        &data,
        InterpolationFactory::builtin(),
    )
    .expect_err("limits exceeded");
    assert!(matches!(err, ChainError::Interpolation { ref joint, .. } if joint == "shoulder"));

    let empty = InterpolationFactory::new();
    let err = Movement::new(planar_arm(), &ModelConfig::new(), &ModelConfig::new(), &empty)
        .expect_err("nothing registered");
    assert!(matches!(err, ChainError::Interpolation { .. }));
}

#[test]
fn description_round_trips_through_json() {
    let json = r#"{
        "links": ["base", "arm"],
        "joints": [{"name": "hinge", "kind": "revolute", "parent": "base", "child": "arm"}]
    }"#;
    let desc: ModelDescription = serde_json::from_str(json).expect("parse");
    let model = Model::from_description(&desc).expect("valid");
    let hinge = model.joint_by_name("hinge").expect("hinge");
    assert_eq!(model.joint(hinge).axis(), Vec3::UNIT_Z);
    assert_eq!(model.joint(hinge).kind(), JointKind::Revolute);
}

proptest! {
    // Sampled displacement of a point on the slider over a sub-window never
    // exceeds the link bound times the window length.
    #[test]
    fn link_bound_covers_sampled_displacement(
        shoulder in -2.0f64..2.0,
        elbow in -2.0f64..2.0,
        rail in -1.0f64..1.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let model = planar_arm();
        let end = ModelConfig::new()
            .with("shoulder", shoulder)
            .with("elbow", elbow)
            .with("rail", rail);
        let movement: Arc<dyn VelocityBounds> = Arc::new(movement(&model, end));
        let slider = model.link_by_name("slider").expect("slider");
        let bound = LinkBound::new(model, movement.clone(), slider);
        let mut cache = LinkBoundCache::new();
        // The slider frame sits up to |rail| away from the rail joint centre.
        let offset = Vec3::new(0.3, 0.4, 0.0);
        let reach = offset.length() + rail.abs();
        let rate = bound.motion_bound(&mut cache, a, b, &Vec3::ZERO, reach).expect("bound");
        let window = TimeWindow::new(a, b);
        let p0 = movement.global_transform(slider, window.start()).transform_point(&offset);
        let p1 = movement.global_transform(slider, window.end()).transform_point(&offset);
        prop_assert!(p1.sub(&p0).length() <= rate * window.length() + 1e-9);
    }
}
