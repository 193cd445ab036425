//! Test doubles and fixtures. Not a stable API.

#![allow(missing_docs)]

use alloc::vec::Vec;
use core::cell::RefCell;

use crate::math::{FreeCoordinate, FreePoint, Pose, Rgba};
use crate::physics::{CastRequest, CastVolume, PhysicsQueries};
use crate::query::{Hit, TargetId};
use crate::scenario::{CameraTargetId, CastMode, CastShape, ProxyId, Scenario};
use crate::stage::{Material, Mesh, MeshId, ProxyObject, SceneObject, SceneObjects};

/// Proxy object in [`test_scene()`] with no parts, for spheres and boxes.
pub const PLAIN_PROXY: ProxyId = ProxyId(0);
/// Proxy object in [`test_scene()`] with all three capsule parts.
pub const CAPSULE_PROXY: ProxyId = ProxyId(1);

/// One call made to a [`ScriptedPhysics`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCast {
    pub mode: CastMode,
    pub volume: CastVolume,
    pub request: CastRequest,
}

/// A [`PhysicsQueries`] which returns preset answers and records every call.
#[derive(Debug, Default)]
pub struct ScriptedPhysics {
    nearest: Option<Hit>,
    all: Vec<Hit>,
    calls: RefCell<Vec<RecordedCast>>,
}

impl ScriptedPhysics {
    /// Answers every cast with no hits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the answer to nearest-hit casts.
    #[must_use]
    pub fn with_nearest(mut self, hit: Hit) -> Self {
        self.nearest = Some(hit);
        self
    }

    /// Sets the answer to all-hits casts.
    #[must_use]
    pub fn with_all(mut self, hits: Vec<Hit>) -> Self {
        self.all = hits;
        self
    }

    /// Returns every call made so far.
    pub fn calls(&self) -> Vec<RecordedCast> {
        self.calls.borrow().clone()
    }

    fn record(&self, mode: CastMode, volume: &CastVolume, request: &CastRequest) {
        self.calls.borrow_mut().push(RecordedCast {
            mode,
            volume: *volume,
            request: *request,
        });
    }
}

impl PhysicsQueries for ScriptedPhysics {
    fn cast_nearest(&self, volume: &CastVolume, request: &CastRequest) -> Option<Hit> {
        self.record(CastMode::Nearest, volume, request);
        self.nearest
    }

    fn cast_all(&self, volume: &CastVolume, request: &CastRequest) -> Vec<Hit> {
        self.record(CastMode::All, volume, request);
        self.all.clone()
    }
}

/// A hit on `target` at `distance` along +Z from the scene origin.
pub fn hit(distance: FreeCoordinate, target: u32) -> Hit {
    Hit::new(distance, FreePoint::new(0., 0., distance), TargetId(target))
        .unwrap_or_else(|_| panic!("distance {distance} is NaN"))
}

/// The base color [`test_scene()`] gives to `target`.
pub fn original_color(target: TargetId) -> Rgba {
    Rgba::new(0.1 * (target.0 % 10) as f32, 0.0, 1.0, 1.0)
}

/// The vertex colors [`test_scene()`] gives to `target`'s mesh.
pub fn original_vertex_colors(target: TargetId) -> Vec<Rgba> {
    vec![original_color(target), Rgba::WHITE]
}

/// A scene containing each of `targets` (with its own material and mesh),
/// [`PLAIN_PROXY`] and [`CAPSULE_PROXY`].
pub fn test_scene(targets: &[u32]) -> SceneObjects {
    let mut scene = SceneObjects::new();
    for &t in targets {
        let target = TargetId(t);
        scene.insert_mesh(
            MeshId(t),
            Mesh {
                colors: original_vertex_colors(target),
            },
        );
        scene.insert_object(
            target,
            SceneObject {
                material: Some(Material::colored(original_color(target))),
                mesh: Some(MeshId(t)),
            },
        );
    }
    scene.insert_proxy(PLAIN_PROXY, ProxyObject::new([0., 0., 0.]));
    scene.insert_proxy(
        CAPSULE_PROXY,
        ProxyObject::new([0., 0., 0.]).with_capsule_parts(),
    );
    scene
}

/// A scenario of the given shape and mode at the origin, facing +Z,
/// using whichever test proxy suits the shape.
pub fn scenario(shape: CastShape, mode: CastMode) -> Scenario {
    let scenario = Scenario::new(shape, mode, Pose::default(), CameraTargetId(0));
    match shape {
        CastShape::Ray => scenario,
        CastShape::Capsule { .. } => scenario.with_proxy(CAPSULE_PROXY),
        CastShape::Sphere { .. } | CastShape::Box { .. } => scenario.with_proxy(PLAIN_PROXY),
    }
}
