//! [`PhysicsQueries`] answered by [`parry3d`].
//!
//! Castscope works in `f64`; parry3d in `f32`. Conversions happen only at this boundary.

use castscope::math::{FreeCoordinate, FreePoint, FreeVector, Rotation};
use castscope::physics::{CastRequest, CastVolume, PhysicsQueries};
use castscope::query::{Hit, TargetId};

use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::na::{Quaternion, Translation3, UnitQuaternion};
use parry3d::query::{Ray, ShapeCastOptions};
use parry3d::shape::SharedShape;

/// One solid (or trigger) object in a [`ParryWorld`].
#[derive(Clone)]
pub struct Collider {
    /// Which scene object this collider belongs to.
    pub target: TargetId,
    /// Geometry, in the collider's local coordinates.
    pub shape: SharedShape,
    /// Placement of the local coordinates in the scene.
    pub position: Isometry<Real>,
    /// Collision layer, `0..32`.
    pub layer: u8,
    /// Whether this is a trigger volume rather than a solid.
    pub is_trigger: bool,
}

impl Collider {
    /// A solid collider on layer 0.
    pub fn new(target: TargetId, shape: SharedShape, position: Isometry<Real>) -> Self {
        Self {
            target,
            shape,
            position,
            layer: 0,
            is_trigger: false,
        }
    }

    /// Moves the collider to `layer`.
    #[must_use]
    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    /// Makes the collider a trigger volume.
    #[must_use]
    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }
}

impl std::fmt::Debug for Collider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collider")
            .field("target", &self.target)
            .field("shape", &self.shape.shape_type())
            .field("position", &self.position.translation.vector)
            .field("layer", &self.layer)
            .field("is_trigger", &self.is_trigger)
            .finish()
    }
}

/// A flat list of static colliders, searched exhaustively on every cast.
#[derive(Clone, Debug)]
pub struct ParryWorld {
    colliders: Vec<Collider>,
    /// Whether casts with [`TriggerPolicy::UseGlobal`] hit triggers.
    ///
    /// [`TriggerPolicy::UseGlobal`]: castscope::scenario::TriggerPolicy::UseGlobal
    pub queries_hit_triggers: bool,
}

impl Default for ParryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ParryWorld {
    /// Constructs an empty world in which casts hit triggers by default.
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
            queries_hit_triggers: true,
        }
    }

    /// Adds a collider.
    pub fn insert(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    /// Returns all colliders, in insertion order.
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Hits, in collider order, of every collider the request admits.
    fn hits<'a>(
        &'a self,
        volume: &'a CastVolume,
        request: &'a CastRequest,
    ) -> impl Iterator<Item = Hit> + 'a {
        let global_triggers = self.queries_hit_triggers;
        let caster = Caster::new(volume, request);
        self.colliders
            .iter()
            .filter(move |c| {
                request.layers.includes_layer(c.layer)
                    && (!c.is_trigger || request.triggers.includes_triggers(global_triggers))
            })
            .filter_map(move |c| caster.cast_against(c))
    }
}

impl PhysicsQueries for ParryWorld {
    fn cast_nearest(&self, volume: &CastVolume, request: &CastRequest) -> Option<Hit> {
        self.hits(volume, request)
            .min_by(|a, b| a.distance().total_cmp(&b.distance()))
    }

    fn cast_all(&self, volume: &CastVolume, request: &CastRequest) -> Vec<Hit> {
        self.hits(volume, request).collect()
    }
}

/// A cast converted to parry3d's terms.
struct Caster {
    /// [`None`] for rays.
    shape: Option<(SharedShape, Isometry<Real>)>,
    origin: Point<Real>,
    direction: Vector<Real>,
    max_distance: Real,
}

impl Caster {
    fn new(volume: &CastVolume, request: &CastRequest) -> Self {
        let origin = point(request.origin);
        let at_origin = Isometry::from_parts(Translation3::from(origin.coords), UnitQuaternion::identity());
        let shape = match *volume {
            CastVolume::Ray => None,
            CastVolume::Sphere { radius } => Some((SharedShape::ball(radius as Real), at_origin)),
            CastVolume::Box {
                half_extents,
                orientation,
            } => Some((
                SharedShape::cuboid(
                    half_extents.x as Real,
                    half_extents.y as Real,
                    half_extents.z as Real,
                ),
                Isometry::from_parts(Translation3::from(origin.coords), quaternion(orientation)),
            )),
            CastVolume::Capsule {
                point1,
                point2,
                radius,
            } => Some((
                SharedShape::capsule(
                    Point::from(vector(point1 - request.origin)),
                    Point::from(vector(point2 - request.origin)),
                    radius as Real,
                ),
                at_origin,
            )),
        };
        Self {
            shape,
            origin,
            direction: vector(request.direction),
            // f64::MAX would become infinity
            max_distance: request.max_distance.min(FreeCoordinate::from(Real::MAX)) as Real,
        }
    }

    fn cast_against(&self, collider: &Collider) -> Option<Hit> {
        let (distance, point) = match &self.shape {
            None => {
                let ray = Ray::new(self.origin, self.direction);
                let toi = collider
                    .shape
                    .cast_ray(&collider.position, &ray, self.max_distance, true)?;
                (toi, ray.point_at(toi))
            }
            Some((shape, position)) => {
                let hit = parry3d::query::cast_shapes(
                    position,
                    &self.direction,
                    &**shape,
                    &collider.position,
                    &Vector::zeros(),
                    &*collider.shape,
                    ShapeCastOptions::with_max_time_of_impact(self.max_distance),
                )
                .ok()??;
                // The collider is stationary, so its witness point is where contact happens.
                (
                    hit.time_of_impact,
                    collider.position.transform_point(&hit.witness2),
                )
            }
        };
        Hit::new(
            FreeCoordinate::from(distance),
            FreePoint::new(
                FreeCoordinate::from(point.x),
                FreeCoordinate::from(point.y),
                FreeCoordinate::from(point.z),
            ),
            collider.target,
        )
        .ok()
    }
}

fn point(p: FreePoint) -> Point<Real> {
    Point::new(p.x as Real, p.y as Real, p.z as Real)
}

fn vector(v: FreeVector) -> Vector<Real> {
    Vector::new(v.x as Real, v.y as Real, v.z as Real)
}

fn quaternion(rotation: Rotation) -> UnitQuaternion<Real> {
    UnitQuaternion::new_normalize(Quaternion::new(
        rotation.r as Real,
        rotation.i as Real,
        rotation.j as Real,
        rotation.k as Real,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use castscope::euclid::{point3, vec3};
    use castscope::scenario::{LayerMask, TriggerPolicy};

    fn request() -> CastRequest {
        CastRequest {
            origin: point3(0., 0., 0.),
            direction: vec3(0., 0., 1.),
            max_distance: f64::MAX,
            layers: LayerMask::all(),
            triggers: TriggerPolicy::UseGlobal,
        }
    }

    fn cube_at(target: u32, z: Real) -> Collider {
        Collider::new(
            TargetId(target),
            SharedShape::cuboid(0.5, 0.5, 0.5),
            Isometry::translation(0.0, 0.0, z),
        )
    }

    fn world() -> ParryWorld {
        let mut world = ParryWorld::new();
        world.insert(cube_at(1, 9.0));
        world.insert(cube_at(2, 3.0).on_layer(1));
        world.insert(cube_at(3, 6.0).trigger());
        world
    }

    fn assert_near(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn ray_nearest() {
        let hit = world().cast_nearest(&CastVolume::Ray, &request()).unwrap();
        assert_eq!(hit.target(), TargetId(2));
        assert_near(hit.distance(), 2.5);
        assert_near(hit.point().z, 2.5);
    }

    #[test]
    fn ray_all_in_collider_order() {
        let hits = world().cast_all(&CastVolume::Ray, &request());
        assert_eq!(
            hits.iter().map(Hit::target).collect::<Vec<_>>(),
            vec![TargetId(1), TargetId(2), TargetId(3)]
        );
    }

    #[test]
    fn layers_and_triggers() {
        let filtered = CastRequest {
            layers: LayerMask::DEFAULT,
            triggers: TriggerPolicy::Ignore,
            ..request()
        };
        let hits = world().cast_all(&CastVolume::Ray, &filtered);
        assert_eq!(
            hits.iter().map(Hit::target).collect::<Vec<_>>(),
            vec![TargetId(1)]
        );

        let mut no_global_triggers = world();
        no_global_triggers.queries_hit_triggers = false;
        assert_eq!(
            no_global_triggers
                .cast_all(&CastVolume::Ray, &request())
                .len(),
            2
        );
    }

    #[test]
    fn max_distance() {
        let short = CastRequest {
            max_distance: 1.0,
            ..request()
        };
        assert_eq!(world().cast_nearest(&CastVolume::Ray, &short), None);
    }

    #[test]
    fn sphere_stops_at_surface() {
        let hit = world()
            .cast_nearest(&CastVolume::Sphere { radius: 0.5 }, &request())
            .unwrap();
        assert_eq!(hit.target(), TargetId(2));
        assert_near(hit.distance(), 2.0);
        assert_near(hit.point().z, 2.5);
    }

    #[test]
    fn capsule_and_box() {
        let capsule = CastVolume::Capsule {
            point1: point3(0., 0.5, 0.),
            point2: point3(0., -0.5, 0.),
            radius: 0.25,
        };
        assert_near(
            world().cast_nearest(&capsule, &request()).unwrap().distance(),
            2.25,
        );

        let cuboid = CastVolume::Box {
            half_extents: vec3(0.25, 0.25, 0.25),
            orientation: Rotation::identity(),
        };
        assert_near(
            world().cast_nearest(&cuboid, &request()).unwrap().distance(),
            2.25,
        );
    }
}
