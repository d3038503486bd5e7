// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON scene files read by the `sweep` subcommands.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use sweep_chain::{ModelConfig, ModelDescription};
use sweep_interp::InterpolationData;
use sweep_math::{Quat, Transform, Vec3};
use sweep_motion::{Aabb, MotionSettings};

/// Pose as a quaternion `[x, y, z, w]` and a translation.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoseSpec {
    #[serde(default = "identity_rotation")]
    rotation: [f64; 4],
    #[serde(default)]
    translation: [f64; 3],
}

fn identity_rotation() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl PoseSpec {
    pub fn to_transform(self) -> Transform {
        Transform::new(Quat::from(self.rotation), Vec3::from(self.translation))
    }
}

/// Box in the body frame.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxSpec {
    #[serde(default)]
    center: [f64; 3],
    half_extents: [f64; 3],
}

impl Default for BoxSpec {
    fn default() -> Self {
        Self {
            center: [0.0; 3],
            half_extents: [0.5; 3],
        }
    }
}

impl BoxSpec {
    pub fn to_aabb(self) -> Aabb {
        let [hx, hy, hz] = self.half_extents;
        Aabb::from_center_half_extents(Vec3::from(self.center), hx, hy, hz)
    }
}

fn default_samples() -> u32 {
    4
}

/// Shape, sampling and direction shared by the rigid-motion scenes.
#[derive(Debug, Clone, Deserialize)]
pub struct Probe {
    #[serde(default)]
    pub shape: BoxSpec,
    /// Number of sample intervals; poses are printed at `samples + 1` times.
    #[serde(default = "default_samples")]
    pub samples: u32,
    /// Direction of the reported rate bound; zero bounds the speed.
    #[serde(default)]
    pub direction: [f64; 3],
    #[serde(default)]
    pub settings: MotionSettings,
}

/// Scene for `sweep screw` and `sweep interp`.
#[derive(Debug, Clone, Deserialize)]
pub struct RigidScene {
    pub start: PoseSpec,
    pub end: PoseSpec,
    /// Rotation centre of interpolated motions, body frame.
    #[serde(default)]
    pub reference_point: [f64; 3],
    #[serde(flatten)]
    pub probe: Probe,
}

/// Scene for `sweep spline`.
#[derive(Debug, Clone, Deserialize)]
pub struct SplineScene {
    pub translation_points: [[f64; 3]; 4],
    pub rotation_points: [[f64; 3]; 4],
    #[serde(flatten)]
    pub probe: Probe,
}

fn default_end_time() -> f64 {
    1.0
}

/// Scene for `sweep chain`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainScene {
    pub model: ModelDescription,
    #[serde(default)]
    pub start: ModelConfig,
    #[serde(default)]
    pub end: ModelConfig,
    /// Per-joint curves; unlisted joints interpolate linearly.
    #[serde(default)]
    pub interpolations: BTreeMap<String, InterpolationData>,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default = "default_end_time")]
    pub end_time: f64,
    #[serde(default)]
    pub direction: [f64; 3],
    #[serde(default)]
    pub max_distance: f64,
}

impl ChainScene {
    pub fn interpolation_map(&self) -> FxHashMap<String, InterpolationData> {
        self.interpolations
            .iter()
            .map(|(name, data)| (name.clone(), *data))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rigid_scene_defaults() {
        let scene: RigidScene =
            serde_json::from_str(r#"{"start": {}, "end": {"translation": [1, 2, 3]}}"#)
                .expect("parse");
        assert_eq!(scene.start.to_transform(), Transform::identity());
        assert_eq!(
            scene.end.to_transform().translation(),
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(scene.probe.samples, 4);
        assert_eq!(scene.probe.settings, MotionSettings::default());
        assert_eq!(scene.probe.shape.to_aabb().max(), Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn chain_scene_reads_configs_and_curves() {
        let json = r#"{
            "model": {
                "links": ["base", "arm"],
                "joints": [{"name": "hinge", "kind": "revolute", "parent": "base", "child": "arm"}]
            },
            "end": {"hinge": 1.5},
            "interpolations": {
                "hinge": {"kind": "third_order", "max_velocity": 10, "max_acceleration": 40, "max_jerk": 80}
            },
            "max_distance": 0.25
        }"#;
        let scene: ChainScene = serde_json::from_str(json).expect("parse");
        assert_eq!(scene.end.value("hinge"), 1.5);
        assert_eq!(scene.end_time, 1.0);
        assert_eq!(scene.interpolation_map().len(), 1);
    }
}
