//! A small built-in scene with one lane per kind of cast.
//!
//! Each lane runs along +Z from its own origin and contains the same arrangement of
//! targets, so that every scenario has something to hit:
//!
//! * a cube at distance 3, on layer 1;
//! * a sphere at distance 6, with a material but no vertex colors;
//! * a cube at distance 9 which is a trigger volume;
//! * a wide slab at distance 12, which shares its mesh with every other lane's slab.

use castscope::math::{FreeCoordinate, Pose, Rgba};
use castscope::query::TargetId;
use castscope::scenario::{
    CameraTargetId, CastMode, CastShape, LayerMask, ProxyId, Scenario, TriggerPolicy,
};
use castscope::stage::{Material, Mesh, MeshId, ProxyObject, SceneObject, SceneObjects};

use parry3d::math::{Isometry, Real};
use parry3d::shape::SharedShape;

use crate::physics_parry::{Collider, ParryWorld};

/// Spacing between lanes along X.
const LANE_SPACING: FreeCoordinate = 10.0;

/// Mesh shared by every lane's slab.
const SLAB_MESH: MeshId = MeshId(0);

/// Everything needed to run the demo: scenarios, physics, and visuals, all describing the
/// same scene.
#[derive(Debug)]
pub struct DemoScene {
    /// One scenario per lane, in lane order.
    pub scenarios: Vec<Scenario>,
    /// Colliders of every target.
    pub physics: ParryWorld,
    /// Visuals of every target, the line display, and the proxy objects.
    pub stage: SceneObjects,
}

impl DemoScene {
    /// Builds the scene.
    pub fn new() -> Self {
        let mut physics = ParryWorld::new();
        let mut stage = SceneObjects::new();
        stage.insert_mesh(
            SLAB_MESH,
            Mesh {
                colors: vec![Rgba::new(0.5, 0.5, 0.5, 1.0); 8],
            },
        );

        let lanes: [(CastShape, CastMode); 8] = [
            (CastShape::Ray, CastMode::Nearest),
            (CastShape::Ray, CastMode::All),
            (CastShape::default_sphere(), CastMode::Nearest),
            (CastShape::default_sphere(), CastMode::All),
            (CastShape::default_capsule(), CastMode::Nearest),
            (CastShape::default_capsule(), CastMode::All),
            (CastShape::default_box(), CastMode::Nearest),
            (CastShape::default_box(), CastMode::All),
        ];

        let scenarios = lanes
            .into_iter()
            .enumerate()
            .map(|(lane, (shape, mode))| {
                let lane = lane as u32;
                let x = FreeCoordinate::from(lane) * LANE_SPACING;
                add_lane_targets(&mut physics, &mut stage, lane, x);

                let mut scenario =
                    Scenario::new(shape, mode, Pose::at([x, 0., 0.]), CameraTargetId(lane));
                if shape.is_swept() {
                    let proxy = ProxyObject::new([x, 0., 0.]);
                    let proxy = match shape {
                        CastShape::Capsule { .. } => proxy.with_capsule_parts(),
                        _ => proxy,
                    };
                    stage.insert_proxy(ProxyId(lane), proxy);
                    scenario = scenario.with_proxy(ProxyId(lane));
                }
                // Vary the filters a little so their effect can be seen.
                match lane {
                    1 => scenario.with_triggers(TriggerPolicy::Ignore),
                    3 => scenario.with_layers(LayerMask::DEFAULT),
                    7 => scenario.with_length(10.0),
                    _ => scenario,
                }
            })
            .collect();

        Self {
            scenarios,
            physics,
            stage,
        }
    }
}

impl Default for DemoScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Target IDs are `lane * 10 + slot`.
pub fn target_id(lane: u32, slot: u32) -> TargetId {
    TargetId(lane * 10 + slot)
}

fn add_lane_targets(
    physics: &mut ParryWorld,
    stage: &mut SceneObjects,
    lane: u32,
    x: FreeCoordinate,
) {
    let x = x as Real;
    let lane_color = Rgba::new(0.2 + 0.1 * lane as f32, 0.2, 0.8, 1.0);

    let cube = target_id(lane, 0);
    let cube_mesh = MeshId(cube.0 + 1);
    physics.insert(
        Collider::new(
            cube,
            SharedShape::cuboid(0.5, 0.5, 0.5),
            Isometry::translation(x, 0.0, 3.0),
        )
        .on_layer(1),
    );
    stage.insert_mesh(
        cube_mesh,
        Mesh {
            colors: vec![lane_color; 8],
        },
    );
    stage.insert_object(
        cube,
        SceneObject {
            material: Some(Material::colored(lane_color)),
            mesh: Some(cube_mesh),
        },
    );

    let sphere = target_id(lane, 1);
    physics.insert(Collider::new(
        sphere,
        SharedShape::ball(0.75),
        Isometry::translation(x, 0.0, 6.0),
    ));
    stage.insert_object(
        sphere,
        SceneObject {
            material: Some(Material::colored(Rgba::WHITE)),
            mesh: None,
        },
    );

    let trigger = target_id(lane, 2);
    physics.insert(
        Collider::new(
            trigger,
            SharedShape::cuboid(0.5, 0.5, 0.5),
            Isometry::translation(x, 0.0, 9.0),
        )
        .trigger(),
    );
    // Triggers are invisible: no material at all.
    stage.insert_object(trigger, SceneObject::default());

    let slab = target_id(lane, 3);
    physics.insert(Collider::new(
        slab,
        SharedShape::cuboid(2.0, 2.0, 0.25),
        Isometry::translation(x, 0.0, 12.0),
    ));
    stage.insert_object(
        slab,
        SceneObject {
            material: Some(Material::default()),
            mesh: Some(SLAB_MESH),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use castscope::scenario::ScenarioKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_scenario_per_kind() {
        let scene = DemoScene::new();
        let kinds: Vec<ScenarioKind> = scene.scenarios.iter().map(Scenario::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScenarioKind::Raycast,
                ScenarioKind::RaycastAll,
                ScenarioKind::Spherecast,
                ScenarioKind::SpherecastAll,
                ScenarioKind::Capsulecast,
                ScenarioKind::CapsulecastAll,
                ScenarioKind::Boxcast,
                ScenarioKind::BoxcastAll,
            ]
        );
    }

    #[test]
    fn swept_scenarios_have_proxies() {
        let scene = DemoScene::new();
        for scenario in &scene.scenarios {
            match scenario.proxy {
                Some(id) => assert!(scene.stage.proxy(id).is_some(), "{id:?}"),
                None => assert!(!scenario.shape.is_swept()),
            }
        }
    }
}
