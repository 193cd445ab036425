//! Mathematical types shared by the rest of the crate.

use euclid::{Point3D, Rotation3D, Vector3D, vec3};

mod color;
pub use color::*;

/// Coordinates that are not locked to any grid; the scalar type of [`FreePoint`]
/// and [`FreeVector`].
pub type FreeCoordinate = f64;

/// Unit-of-measure type for scene (world) coordinates.
#[derive(Debug, Eq, PartialEq)]
pub enum World {}

/// A position in the scene.
pub type FreePoint = Point3D<FreeCoordinate, World>;

/// A displacement or direction in the scene.
pub type FreeVector = Vector3D<FreeCoordinate, World>;

/// An orientation in the scene.
pub type Rotation = Rotation3D<FreeCoordinate, World, World>;

/// A position together with an orientation, such as the origin of a cast.
///
/// The local axes follow the usual left-handed scene convention: +Z is forward and
/// +Y is up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Where the pose is.
    pub position: FreePoint,
    /// Which way the pose faces.
    pub rotation: Rotation,
}

impl Pose {
    /// Constructs a [`Pose`] from convertible types (e.g. tuples or 3-element arrays).
    pub fn new(position: impl Into<FreePoint>, rotation: Rotation) -> Self {
        Self {
            position: position.into(),
            rotation,
        }
    }

    /// Constructs a [`Pose`] at `position` with no rotation, facing +Z.
    pub fn at(position: impl Into<FreePoint>) -> Self {
        Self::new(position, Rotation::identity())
    }

    /// Returns the unit vector this pose faces along (its local +Z axis).
    pub fn forward(&self) -> FreeVector {
        self.rotation.transform_vector3d(vec3(0., 0., 1.))
    }

    /// Returns the unit vector of this pose's local +Y axis.
    pub fn up(&self) -> FreeVector {
        self.rotation.transform_vector3d(vec3(0., 1., 0.))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at([0., 0., 0.])
    }
}

/// Linear interpolation from `from` to `to`, with `t` clamped to `0..=1`.
///
/// A NaN `t` is treated as 1, so a degenerate zero-length interpolation lands on `to`.
pub fn lerp_clamped(from: FreePoint, to: FreePoint, t: FreeCoordinate) -> FreePoint {
    let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
    from.lerp(to, t)
}
