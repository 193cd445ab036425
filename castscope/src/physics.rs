//! The seam between castscope and the physics engine which answers casts.
//!
//! Castscope does not implement any intersection tests itself. The host supplies a
//! [`PhysicsQueries`] implementation backed by whatever collision engine holds its scene.

use alloc::vec::Vec;

use crate::math::{FreeCoordinate, FreePoint, FreeVector, Rotation};
use crate::query::Hit;
use crate::scenario::{LayerMask, TriggerPolicy};

/// The geometry of one cast, fully resolved into scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CastVolume {
    /// A ray starting at [`CastRequest::origin`].
    Ray,
    /// A sphere centred on [`CastRequest::origin`].
    Sphere {
        /// Radius of the sphere.
        radius: FreeCoordinate,
    },
    /// A box centred on [`CastRequest::origin`].
    Box {
        /// Half the size of the box along each of its local axes.
        half_extents: FreeVector,
        /// Orientation of the box's local axes.
        orientation: Rotation,
    },
    /// A capsule: all points within `radius` of the segment from `point1` to `point2`.
    Capsule {
        /// Centre of one end cap.
        point1: FreePoint,
        /// Centre of the other end cap.
        point2: FreePoint,
        /// Radius of the caps and body.
        radius: FreeCoordinate,
    },
}

/// The parameters shared by every kind of cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastRequest {
    /// Where the cast starts. For capsules this is the midpoint of the two caps.
    pub origin: FreePoint,
    /// Unit vector the cast travels along.
    pub direction: FreeVector,
    /// Farthest distance a hit may be at.
    pub max_distance: FreeCoordinate,
    /// Layers to consider.
    pub layers: LayerMask,
    /// Whether trigger volumes count as hits.
    pub triggers: TriggerPolicy,
}

/// A physics engine capable of answering casts.
///
/// Implementations should treat a cast which cannot hit anything as a normal outcome
/// (returning [`None`] or an empty list); there is no error path.
pub trait PhysicsQueries {
    /// Casts `volume` and returns the nearest hit, if any.
    fn cast_nearest(&self, volume: &CastVolume, request: &CastRequest) -> Option<Hit>;

    /// Casts `volume` and returns every hit, in any order.
    fn cast_all(&self, volume: &CastVolume, request: &CastRequest) -> Vec<Hit>;
}

impl<T: PhysicsQueries + ?Sized> PhysicsQueries for &T {
    fn cast_nearest(&self, volume: &CastVolume, request: &CastRequest) -> Option<Hit> {
        (**self).cast_nearest(volume, request)
    }

    fn cast_all(&self, volume: &CastVolume, request: &CastRequest) -> Vec<Hit> {
        (**self).cast_all(volume, request)
    }
}
