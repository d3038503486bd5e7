// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use sweep_math::{Quat, Transform, Vec3};
use tracing::debug;

use crate::error::ModelError;

/// Index of a link inside the [`Model`] that minted it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkId(u32);

/// Index of a joint inside the [`Model`] that minted it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JointId(u32);

impl LinkId {
    /// Position of the link in [`Model::links`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl JointId {
    /// Position of the joint in [`Model::joints`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[cfg(test)]
    pub(crate) const fn for_tests(raw: u32) -> Self {
        Self(raw)
    }
}

/// How a joint moves its child link relative to its parent link.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JointKind {
    /// Rigid connection.
    #[default]
    Fixed,
    /// Rotation about the joint axis, angle in radians.
    Revolute,
    /// Unbounded rotation about the joint axis.
    Continuous,
    /// Translation along the joint axis.
    Prismatic,
}

impl JointKind {
    /// Returns `true` for joints whose value rotates the child link.
    #[must_use]
    pub const fn is_rotational(self) -> bool {
        matches!(self, Self::Revolute | Self::Continuous)
    }
}

/// A rigid body in the kinematic tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    name: String,
    parent_joint: Option<JointId>,
    child_joints: Vec<JointId>,
}

impl Link {
    /// Link name, unique within the model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Joint attaching this link to its parent; `None` for the root link.
    pub fn parent_joint(&self) -> Option<JointId> {
        self.parent_joint
    }

    /// Joints attaching child links to this link.
    pub fn child_joints(&self) -> &[JointId] {
        &self.child_joints
    }
}

/// A connection between a parent link and a child link.
///
/// The joint frame sits at `origin` in the parent link frame; the child link
/// frame is the joint frame moved by the joint value along or about `axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    name: String,
    kind: JointKind,
    parent_link: LinkId,
    child_link: LinkId,
    axis: Vec3,
    origin: Transform,
}

impl Joint {
    /// Joint name, unique within the model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Motion type.
    pub fn kind(&self) -> JointKind {
        self.kind
    }

    /// Link the joint hangs from.
    pub fn parent_link(&self) -> LinkId {
        self.parent_link
    }

    /// Link the joint moves.
    pub fn child_link(&self) -> LinkId {
        self.child_link
    }

    /// Unit axis in the joint frame.
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Joint axis expressed in the parent link frame.
    pub fn axis_in_parent(&self) -> Vec3 {
        self.origin.rotation().rotate(&self.axis)
    }

    /// Pose of the joint frame in the parent link frame.
    pub fn origin(&self) -> Transform {
        self.origin
    }

    /// Pose of the child link frame in the parent link frame for joint value `q`.
    pub fn child_transform(&self, q: f64) -> Transform {
        let motion = match self.kind {
            JointKind::Fixed => Transform::identity(),
            JointKind::Revolute | JointKind::Continuous => {
                Transform::new(Quat::from_axis_angle(self.axis, q), Vec3::ZERO)
            }
            JointKind::Prismatic => Transform::from_translation(self.axis.scale(q)),
        };
        self.origin.compose(&motion)
    }
}

fn default_axis() -> Vec3 {
    Vec3::UNIT_Z
}

/// Serializable joint declaration referencing links by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointDescription {
    /// Joint name.
    pub name: String,
    /// Motion type.
    #[serde(default)]
    pub kind: JointKind,
    /// Parent link name.
    pub parent: String,
    /// Child link name.
    pub child: String,
    /// Axis in the joint frame; normalized on build.
    #[serde(default = "default_axis")]
    pub axis: Vec3,
    /// Pose of the joint frame in the parent link frame.
    #[serde(default)]
    pub origin: Transform,
}

/// Serializable model: link names plus joint declarations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelDescription {
    /// Link names.
    pub links: Vec<String>,
    /// Joints connecting the links.
    #[serde(default)]
    pub joints: Vec<JointDescription>,
}

/// Incremental [`Model`] assembly; validation happens in [`ModelBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    links: Vec<String>,
    joints: Vec<JointDescription>,
}

impl ModelBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a link.
    pub fn link(mut self, name: impl Into<String>) -> Self {
        self.links.push(name.into());
        self
    }

    /// Declares a joint.
    pub fn joint(mut self, joint: JointDescription) -> Self {
        self.joints.push(joint);
        self
    }

    /// Shorthand for a joint with the given kind, axis and origin.
    pub fn connect(
        self,
        name: impl Into<String>,
        kind: JointKind,
        parent: impl Into<String>,
        child: impl Into<String>,
        axis: Vec3,
        origin: Transform,
    ) -> Self {
        self.joint(JointDescription {
            name: name.into(),
            kind,
            parent: parent.into(),
            child: child.into(),
            axis,
            origin,
        })
    }

    /// Validates the declarations and builds the tree.
    ///
    /// # Errors
    /// Duplicate names, dangling link references, links with two parents,
    /// a missing or ambiguous root, cycles and degenerate moving axes.
    pub fn build(self) -> Result<Model, ModelError> {
        let mut link_index = FxHashMap::default();
        let mut links = Vec::with_capacity(self.links.len());
        for name in self.links {
            let id = LinkId(index_u32(links.len()));
            if link_index.insert(name.clone(), id).is_some() {
                return Err(ModelError::DuplicateLink(name));
            }
            links.push(Link {
                name,
                parent_joint: None,
                child_joints: Vec::new(),
            });
        }

        let mut joint_index = FxHashMap::default();
        let mut joints: Vec<Joint> = Vec::with_capacity(self.joints.len());
        for desc in self.joints {
            let id = JointId(index_u32(joints.len()));
            if joint_index.contains_key(&desc.name) {
                return Err(ModelError::DuplicateJoint(desc.name));
            }
            let lookup = |link: &str| {
                link_index
                    .get(link)
                    .copied()
                    .ok_or_else(|| ModelError::UnknownLink {
                        joint: desc.name.clone(),
                        link: link.to_owned(),
                    })
            };
            let parent_link = lookup(&desc.parent)?;
            let child_link = lookup(&desc.child)?;
            let axis = if desc.kind == JointKind::Fixed && desc.axis.is_zero() {
                Vec3::UNIT_Z
            } else {
                if desc.axis.is_zero() || !desc.axis.is_finite() {
                    return Err(ModelError::DegenerateAxis(desc.name));
                }
                desc.axis.normalize()
            };

            let child = &mut links[child_link.index()];
            if let Some(first) = child.parent_joint {
                return Err(ModelError::TwoParents {
                    link: child.name.clone(),
                    first: joints[first.index()].name.clone(),
                    second: desc.name,
                });
            }
            child.parent_joint = Some(id);
            links[parent_link.index()].child_joints.push(id);

            joint_index.insert(desc.name.clone(), id);
            joints.push(Joint {
                name: desc.name,
                kind: desc.kind,
                parent_link,
                child_link,
                axis,
                origin: desc.origin,
            });
        }

        let roots: Vec<LinkId> = links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.parent_joint.is_none())
            .map(|(i, _)| LinkId(index_u32(i)))
            .collect();
        let root = match roots.as_slice() {
            [] => return Err(ModelError::NoRoot),
            [root] => *root,
            many => {
                return Err(ModelError::MultipleRoots(
                    many.iter().map(|id| links[id.index()].name.clone()).collect(),
                ))
            }
        };

        // Every non-root link has exactly one parent, so anything the root
        // cannot reach hangs off a cycle.
        let mut reached = vec![false; links.len()];
        let mut stack = vec![root];
        while let Some(link) = stack.pop() {
            reached[link.index()] = true;
            for joint in &links[link.index()].child_joints {
                stack.push(joints[joint.index()].child_link);
            }
        }
        if let Some(pos) = reached.iter().position(|r| !r) {
            return Err(ModelError::Cycle(links[pos].name.clone()));
        }

        debug!(links = links.len(), joints = joints.len(), "model built");
        Ok(Model {
            links,
            joints,
            link_index,
            joint_index,
            root,
        })
    }
}

fn index_u32(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

/// Validated kinematic tree with exactly one root link.
///
/// Read-only after construction; share it behind an `Arc` between any number
/// of movements and bound accumulators. [`LinkId`] and [`JointId`] values are
/// only meaningful for the model that produced them.
#[derive(Debug, Clone)]
pub struct Model {
    links: Vec<Link>,
    joints: Vec<Joint>,
    link_index: FxHashMap<String, LinkId>,
    joint_index: FxHashMap<String, JointId>,
    root: LinkId,
}

impl Model {
    /// Builds a model from its serializable description.
    pub fn from_description(desc: &ModelDescription) -> Result<Self, ModelError> {
        let mut builder = ModelBuilder::new();
        for link in &desc.links {
            builder = builder.link(link.clone());
        }
        for joint in &desc.joints {
            builder = builder.joint(joint.clone());
        }
        builder.build()
    }

    /// The root link.
    pub fn root(&self) -> LinkId {
        self.root
    }

    /// Link by id.
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.index()]
    }

    /// Joint by id.
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    /// All links in declaration order.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> + '_ {
        self.links
            .iter()
            .enumerate()
            .map(|(i, link)| (LinkId(index_u32(i)), link))
    }

    /// All joints in declaration order.
    pub fn joints(&self) -> impl Iterator<Item = (JointId, &Joint)> + '_ {
        self.joints
            .iter()
            .enumerate()
            .map(|(i, joint)| (JointId(index_u32(i)), joint))
    }

    /// Number of joints.
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Looks up a link by name.
    pub fn link_by_name(&self, name: &str) -> Option<LinkId> {
        self.link_index.get(name).copied()
    }

    /// Looks up a joint by name.
    pub fn joint_by_name(&self, name: &str) -> Option<JointId> {
        self.joint_index.get(name).copied()
    }

    /// Joint attaching `link` to its parent; `None` for the root link.
    pub fn parent_joint(&self, link: LinkId) -> Option<JointId> {
        self.link(link).parent_joint
    }

    /// Parent joint of `joint`: the joint attaching `joint`'s parent link.
    ///
    /// `None` means `joint` hangs directly off the root link (a root joint).
    pub fn joint_parent(&self, joint: JointId) -> Option<JointId> {
        self.parent_joint(self.joint(joint).parent_link)
    }

    /// `last` followed by its ancestors, leaf to root.
    pub fn joints_chain_from_last_joint(&self, last: JointId) -> Vec<JointId> {
        let mut chain = vec![last];
        let mut joint = last;
        while let Some(parent) = self.joint_parent(joint) {
            chain.push(parent);
            joint = parent;
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm() -> ModelBuilder {
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
                Vec3::new(0.0, 0.0, 2.0),
                Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)),
            )
    }

    #[test]
    fn builds_chain_leaf_to_root() {
        let model = arm().build().expect("valid arm");
        let elbow = model.joint_by_name("elbow").expect("elbow");
        let shoulder = model.joint_by_name("shoulder").expect("shoulder");
        assert_eq!(model.joints_chain_from_last_joint(elbow), vec![elbow, shoulder]);
        assert_eq!(model.joint_parent(shoulder), None);
        assert_eq!(model.joint_parent(elbow), Some(shoulder));
        assert_eq!(model.joint(elbow).axis(), Vec3::UNIT_Z);
        assert_eq!(model.parent_joint(model.root()), None);
    }

    #[test]
    fn rejects_two_parents() {
        let err = arm()
            .connect(
                "extra",
                JointKind::Fixed,
                "base",
                "lower",
                Vec3::UNIT_Z,
                Transform::identity(),
            )
            .build()
            .expect_err("lower has two parents");
        assert!(matches!(err, ModelError::TwoParents { .. }));
    }

    #[test]
    fn rejects_multiple_roots_and_cycles() {
        let err = arm().link("floating").build().expect_err("two roots");
        assert!(matches!(err, ModelError::MultipleRoots(_)));

        let err = ModelBuilder::new()
            .link("root")
            .link("a")
            .link("b")
            .connect("ab", JointKind::Fixed, "a", "b", Vec3::UNIT_Z, Transform::identity())
            .connect("ba", JointKind::Fixed, "b", "a", Vec3::UNIT_Z, Transform::identity())
            .build()
            .expect_err("cycle");
        assert!(matches!(err, ModelError::Cycle(_)));
    }

    #[test]
    fn rejects_degenerate_moving_axis() {
        let err = ModelBuilder::new()
            .link("a")
            .link("b")
            .connect("j", JointKind::Prismatic, "a", "b", Vec3::ZERO, Transform::identity())
            .build()
            .expect_err("zero axis");
        assert_eq!(err, ModelError::DegenerateAxis("j".into()));
    }
}
