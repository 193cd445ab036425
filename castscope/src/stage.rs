//! The seam between castscope and the visible scene.
//!
//! A presentation changes three kinds of things:
//!
//! * the [`LineDisplay`], which draws ray casts;
//! * [`ProxyObject`]s, which stand in for the volume of swept casts;
//! * the colors of hit objects, reached through the optional capabilities of
//!   [`Surfaces`].
//!
//! The host exposes all of these through one [`Stage`]. [`SceneObjects`] is a
//! self-contained implementation, used by the headless runner and by tests.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use euclid::vec3;

use crate::math::{FreeCoordinate, FreePoint, FreeVector, Rgba, Rotation};
use crate::query::TargetId;
use crate::scenario::{CameraTargetId, ProxyId};

mod memory;
pub use memory::*;

// -------------------------------------------------------------------------------------------------

/// A polyline renderer: an ordered list of endpoints and a width.
///
/// Ray presentations use two endpoints, the cast origin and the current tip of the ray.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineDisplay {
    positions: Vec<FreePoint>,
    width: FreeCoordinate,
}

impl LineDisplay {
    /// Constructs a line display with no endpoints and zero width.
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            width: 0.0,
        }
    }

    /// Returns how many endpoints the line has. Zero means nothing is drawn.
    pub fn endpoint_count(&self) -> usize {
        self.positions.len()
    }

    /// Changes how many endpoints the line has. New endpoints are placed at the scene origin.
    pub fn set_endpoint_count(&mut self, count: usize) {
        self.positions.resize(count, FreePoint::origin());
    }

    /// Removes every endpoint, so that nothing is drawn.
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Returns all endpoints.
    pub fn positions(&self) -> &[FreePoint] {
        &self.positions
    }

    /// Returns the endpoint at `index`, if there is one.
    pub fn position(&self, index: usize) -> Option<FreePoint> {
        self.positions.get(index).copied()
    }

    /// Moves the endpoint at `index`. Indices beyond [`Self::endpoint_count()`] are ignored.
    pub fn set_position(&mut self, index: usize, position: FreePoint) {
        if let Some(slot) = self.positions.get_mut(index) {
            *slot = position;
        }
    }

    /// Returns the width of the line.
    pub fn width(&self) -> FreeCoordinate {
        self.width
    }

    /// Sets the width of the line.
    pub fn set_width(&mut self, width: FreeCoordinate) {
        self.width = width;
    }
}

// -------------------------------------------------------------------------------------------------

/// One of the three pieces a capsule proxy object is built from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, strum::EnumIter)]
pub enum CapsulePart {
    /// The sphere at the `+up` end.
    TopCap,
    /// The sphere at the `-up` end.
    BottomCap,
    /// The cylinder joining the caps.
    Body,
}

/// Placement of a [`CapsulePart`] relative to its [`ProxyObject`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProxyPart {
    /// Offset from the proxy object's position.
    pub offset: FreeVector,
    /// Size of the part along each axis.
    pub scale: FreeVector,
}

impl Default for ProxyPart {
    fn default() -> Self {
        Self {
            offset: FreeVector::zero(),
            scale: vec3(1., 1., 1.),
        }
    }
}

/// The visual stand-in for a swept cast: a sphere, box, or capsule which is moved along
/// the cast path.
///
/// Capsule proxies are assembled from three [parts](CapsulePart) which must all be present.
#[derive(Clone, Debug, PartialEq)]
pub struct ProxyObject {
    /// Position of the object's centre.
    pub position: FreePoint,
    /// Orientation; a capsule's axis follows this rotation's up axis.
    pub rotation: Rotation,
    /// Size along each axis (for spheres and boxes).
    pub scale: FreeVector,
    /// Whether the object is drawn.
    pub visible: bool,
    parts: BTreeMap<CapsulePart, ProxyPart>,
}

impl ProxyObject {
    /// Constructs a visible, unrotated proxy object of unit scale with no parts.
    pub fn new(position: impl Into<FreePoint>) -> Self {
        Self {
            position: position.into(),
            rotation: Rotation::identity(),
            scale: vec3(1., 1., 1.),
            visible: true,
            parts: BTreeMap::new(),
        }
    }

    /// Adds all three capsule parts, at default placement.
    #[must_use]
    pub fn with_capsule_parts(mut self) -> Self {
        use strum::IntoEnumIterator as _;
        for part in CapsulePart::iter() {
            self.parts.insert(part, ProxyPart::default());
        }
        self
    }

    /// Sets the orientation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns the unit vector of this object's local +Y axis.
    pub fn up(&self) -> FreeVector {
        self.rotation.transform_vector3d(vec3(0., 1., 0.))
    }

    /// Returns the placement of `part`, if the object has it.
    pub fn part(&self, part: CapsulePart) -> Option<&ProxyPart> {
        self.parts.get(&part)
    }

    /// Returns the placement of `part` for modification, if the object has it.
    pub fn part_mut(&mut self, part: CapsulePart) -> Option<&mut ProxyPart> {
        self.parts.get_mut(&part)
    }

    /// Adds or replaces a part.
    pub fn insert_part(&mut self, part: CapsulePart, placement: ProxyPart) {
        self.parts.insert(part, placement);
    }

    /// Removes a part, returning its placement.
    pub fn remove_part(&mut self, part: CapsulePart) -> Option<ProxyPart> {
        self.parts.remove(&part)
    }

    /// Returns where `part` currently is in the scene.
    pub fn part_position(&self, part: CapsulePart) -> Option<FreePoint> {
        self.parts.get(&part).map(|p| self.position + p.offset)
    }
}

// -------------------------------------------------------------------------------------------------

/// Access to a material's base color property.
pub trait ColorAccessor {
    /// Returns the current base color.
    fn color(&self) -> Rgba;
    /// Replaces the base color.
    fn set_color(&mut self, color: Rgba);
}

/// Access to a mesh's per-vertex colors.
///
/// Note that meshes may be shared between several objects, in which case changing the
/// colors through one object changes them for all.
pub trait VertexColorAccessor {
    /// Returns a copy of the vertex colors. May be empty if the mesh has none.
    fn vertex_colors(&self) -> Vec<Rgba>;
    /// Replaces the vertex colors.
    fn set_vertex_colors(&mut self, colors: &[Rgba]);
}

/// The optional color capabilities of scene objects.
///
/// Either capability may be absent for any object (no renderer, a material without a
/// base color, no mesh); callers treat absence as "nothing to do".
pub trait Surfaces {
    /// Returns the base color of `target`'s material, if it has one.
    fn base_color(&mut self, target: TargetId) -> Option<&mut dyn ColorAccessor>;

    /// Returns the vertex colors of `target`'s mesh, if it has one.
    fn vertex_colors(&mut self, target: TargetId) -> Option<&mut dyn VertexColorAccessor>;
}

/// Everything a presentation may change in the scene.
pub trait Stage: Surfaces {
    /// Returns the line display used for ray casts.
    fn line_mut(&mut self) -> &mut LineDisplay;

    /// Returns the proxy object `proxy`, if it exists.
    fn proxy_mut(&mut self, proxy: ProxyId) -> Option<&mut ProxyObject>;
}

/// A camera which can be told what to follow and look at.
pub trait CameraRig {
    /// Makes the camera follow `target`.
    fn set_follow(&mut self, target: CameraTargetId);
    /// Makes the camera look at `target`.
    fn set_look_at(&mut self, target: CameraTargetId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{Angle, point3};
    use pretty_assertions::assert_eq;

    #[test]
    fn line_display_endpoints() {
        let mut line = LineDisplay::new();
        assert_eq!(line.endpoint_count(), 0);
        line.set_endpoint_count(2);
        assert_eq!(line.positions(), &[FreePoint::origin(); 2]);
        line.set_position(1, point3(0., 0., 4.));
        line.set_position(5, point3(9., 9., 9.)); // ignored
        assert_eq!(line.position(1), Some(point3(0., 0., 4.)));
        assert_eq!(line.position(5), None);
        line.clear();
        assert_eq!(line.endpoint_count(), 0);
    }

    #[test]
    fn proxy_parts() {
        let mut proxy = ProxyObject::new([1., 0., 0.]).with_capsule_parts();
        proxy.part_mut(CapsulePart::TopCap).unwrap().offset = vec3(0., 0.5, 0.);
        assert_eq!(
            proxy.part_position(CapsulePart::TopCap),
            Some(point3(1., 0.5, 0.))
        );
        assert!(proxy.remove_part(CapsulePart::Body).is_some());
        assert_eq!(proxy.part(CapsulePart::Body), None);
        assert_eq!(ProxyObject::new([0., 0., 0.]).part(CapsulePart::TopCap), None);
    }

    #[test]
    fn proxy_up_follows_rotation() {
        let proxy = ProxyObject::new([0., 0., 0.])
            .with_rotation(Rotation::around_z(Angle::degrees(90.0)));
        let up = proxy.up();
        assert!((up.x + 1.0).abs() < 1e-9, "{up:?}");
        assert!(up.y.abs() < 1e-9, "{up:?}");
    }
}
