//! Authored descriptions of casts to perform and present.

use core::fmt;

use euclid::vec3;

use crate::math::{FreeCoordinate, FreeVector, Pose};

// -------------------------------------------------------------------------------------------------

/// Identifies a proxy object in the [`Stage`](crate::stage::Stage): the visual stand-in
/// moved along the path of a swept cast.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProxyId(pub u32);

impl fmt::Debug for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProxyId({})", self.0)
    }
}

/// Identifies something a [`CameraRig`](crate::stage::CameraRig) can follow and look at.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CameraTargetId(pub u32);

impl fmt::Debug for CameraTargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CameraTargetId({})", self.0)
    }
}

// -------------------------------------------------------------------------------------------------

/// The geometry swept along a cast, with only the parameters that geometry uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CastShape {
    /// An infinitely thin ray.
    Ray,
    /// A sphere.
    Sphere {
        /// Radius of the sphere.
        radius: FreeCoordinate,
    },
    /// A box, oriented like the scenario's origin.
    Box {
        /// Half the size of the box along each of its local axes.
        half_extents: FreeVector,
    },
    /// A capsule whose axis lies along the proxy object's up axis.
    Capsule {
        /// Radius of the capsule's end caps and body.
        radius: FreeCoordinate,
        /// Distance between the centres of the two end caps.
        height: FreeCoordinate,
    },
}

impl CastShape {
    /// Default sphere radius for newly authored scenarios.
    pub const DEFAULT_RADIUS: FreeCoordinate = 0.5;
    /// Default capsule height for newly authored scenarios.
    pub const DEFAULT_HEIGHT: FreeCoordinate = 0.25;

    /// A sphere with [the default radius](Self::DEFAULT_RADIUS).
    pub const fn default_sphere() -> Self {
        Self::Sphere {
            radius: Self::DEFAULT_RADIUS,
        }
    }

    /// A box with half-extents of 0.25 on every axis.
    pub fn default_box() -> Self {
        Self::Box {
            half_extents: vec3(0.25, 0.25, 0.25),
        }
    }

    /// A capsule with the default radius and height.
    pub const fn default_capsule() -> Self {
        Self::Capsule {
            radius: Self::DEFAULT_RADIUS,
            height: Self::DEFAULT_HEIGHT,
        }
    }

    /// Whether this shape has volume and is therefore shown with a proxy object
    /// rather than a line.
    pub fn is_swept(&self) -> bool {
        !matches!(self, Self::Ray)
    }
}

/// Whether a cast stops at the nearest hit or reports every hit.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CastMode {
    /// Report at most one hit, the nearest.
    Nearest,
    /// Report every object along the cast, in no particular order.
    All,
}

/// The eight kinds of scenario, combining [`CastShape`] and [`CastMode`].
///
/// This is a summary for display and logging; the shape parameters live in [`CastShape`].
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum ScenarioKind {
    /// Ray, nearest hit.
    Raycast,
    /// Ray, every hit.
    RaycastAll,
    /// Sphere, nearest hit.
    Spherecast,
    /// Sphere, every hit.
    SpherecastAll,
    /// Capsule, nearest hit.
    Capsulecast,
    /// Capsule, every hit.
    CapsulecastAll,
    /// Box, nearest hit.
    Boxcast,
    /// Box, every hit.
    BoxcastAll,
}

impl ScenarioKind {
    /// Returns the [`CastMode`] this kind uses.
    pub fn mode(self) -> CastMode {
        use ScenarioKind::*;
        match self {
            Raycast | Spherecast | Capsulecast | Boxcast => CastMode::Nearest,
            RaycastAll | SpherecastAll | CapsulecastAll | BoxcastAll => CastMode::All,
        }
    }
}

// -------------------------------------------------------------------------------------------------

bitflags::bitflags! {
    /// Which collision layers a cast considers. Bit `n` selects layer `n`.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct LayerMask: u32 {
        /// The layer objects are on unless authored otherwise.
        const DEFAULT = 1;
        // Any other bit is a valid layer.
        const _ = !0;
    }
}

impl LayerMask {
    /// Returns the mask selecting only layer `layer`. Layers beyond 31 select nothing.
    pub const fn layer(layer: u8) -> Self {
        match 1u32.checked_shl(layer as u32) {
            Some(bits) => Self::from_bits_retain(bits),
            None => Self::empty(),
        }
    }

    /// Returns whether this mask selects layer `layer`.
    pub const fn includes_layer(self, layer: u8) -> bool {
        self.intersects(Self::layer(layer))
    }
}

impl Default for LayerMask {
    /// All layers.
    fn default() -> Self {
        Self::all()
    }
}

/// Whether a cast may hit trigger volumes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum TriggerPolicy {
    /// Do whatever the physics engine does by default.
    #[default]
    UseGlobal,
    /// Never hit triggers.
    Ignore,
    /// Always hit triggers.
    Collide,
}

impl TriggerPolicy {
    /// Resolves this policy against the engine's global setting.
    pub fn includes_triggers(self, global_default: bool) -> bool {
        match self {
            Self::UseGlobal => global_default,
            Self::Ignore => false,
            Self::Collide => true,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// An authored cast: what to cast, from where, against what, and what the camera
/// should look at while it is presented.
///
/// Scenarios are data; nothing in this crate modifies them.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Scenario {
    /// Geometry of the cast.
    pub shape: CastShape,
    /// Nearest hit or all hits.
    pub mode: CastMode,
    /// Where the cast starts; it travels along [`Pose::forward()`].
    pub origin: Pose,
    /// Maximum distance of the cast.
    pub length: FreeCoordinate,
    /// Layers the cast considers.
    pub layers: LayerMask,
    /// Whether the cast hits triggers.
    pub triggers: TriggerPolicy,
    /// What the camera follows while this scenario is selected.
    pub camera_target: CameraTargetId,
    /// The proxy object shown moving along swept casts. Unused by rays.
    pub proxy: Option<ProxyId>,
}

impl Scenario {
    /// Constructs a scenario with unlimited length, all layers, the global trigger policy,
    /// and no proxy object.
    pub fn new(
        shape: CastShape,
        mode: CastMode,
        origin: Pose,
        camera_target: CameraTargetId,
    ) -> Self {
        Self {
            shape,
            mode,
            origin,
            length: FreeCoordinate::MAX,
            layers: LayerMask::all(),
            triggers: TriggerPolicy::UseGlobal,
            camera_target,
            proxy: None,
        }
    }

    /// Sets the proxy object.
    #[must_use]
    pub fn with_proxy(mut self, proxy: ProxyId) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Sets the maximum cast length.
    #[must_use]
    pub fn with_length(mut self, length: FreeCoordinate) -> Self {
        self.length = length;
        self
    }

    /// Sets the layer filter.
    #[must_use]
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    /// Sets the trigger policy.
    #[must_use]
    pub fn with_triggers(mut self, triggers: TriggerPolicy) -> Self {
        self.triggers = triggers;
        self
    }

    /// Returns which of the eight kinds of scenario this is.
    pub fn kind(&self) -> ScenarioKind {
        use ScenarioKind::*;
        match (self.shape, self.mode) {
            (CastShape::Ray, CastMode::Nearest) => Raycast,
            (CastShape::Ray, CastMode::All) => RaycastAll,
            (CastShape::Sphere { .. }, CastMode::Nearest) => Spherecast,
            (CastShape::Sphere { .. }, CastMode::All) => SpherecastAll,
            (CastShape::Box { .. }, CastMode::Nearest) => Boxcast,
            (CastShape::Box { .. }, CastMode::All) => BoxcastAll,
            (CastShape::Capsule { .. }, CastMode::Nearest) => Capsulecast,
            (CastShape::Capsule { .. }, CastMode::All) => CapsulecastAll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use alloc::string::ToString as _;
    use strum::IntoEnumIterator as _;

    #[test]
    fn kind_round_trips_mode() {
        let shapes = [
            CastShape::Ray,
            CastShape::default_sphere(),
            CastShape::default_box(),
            CastShape::default_capsule(),
        ];
        let mut kinds = alloc::vec::Vec::new();
        for shape in shapes {
            for mode in [CastMode::Nearest, CastMode::All] {
                let scenario = Scenario::new(shape, mode, Pose::default(), CameraTargetId(0));
                assert_eq!(scenario.kind().mode(), mode);
                kinds.push(scenario.kind());
            }
        }
        // every kind is reachable exactly once
        for kind in ScenarioKind::iter() {
            assert_eq!(kinds.iter().filter(|&&k| k == kind).count(), 1, "{kind}");
        }
    }

    #[test]
    fn kind_names() {
        assert_eq!(ScenarioKind::SpherecastAll.to_string(), "SpherecastAll");
        assert_eq!(
            "BoxcastAll".parse::<ScenarioKind>(),
            Ok(ScenarioKind::BoxcastAll)
        );
    }

    #[test]
    fn layer_mask() {
        assert!(LayerMask::DEFAULT.includes_layer(0));
        assert!(!LayerMask::DEFAULT.includes_layer(1));
        assert!(LayerMask::all().includes_layer(31));
        assert!(!LayerMask::all().includes_layer(32));
        assert_eq!(LayerMask::layer(3).bits(), 0b1000);
        assert_eq!(LayerMask::default(), LayerMask::all());
    }

    #[test]
    fn trigger_policy() {
        assert!(TriggerPolicy::UseGlobal.includes_triggers(true));
        assert!(!TriggerPolicy::UseGlobal.includes_triggers(false));
        assert!(!TriggerPolicy::Ignore.includes_triggers(true));
        assert!(TriggerPolicy::Collide.includes_triggers(false));
    }

    #[test]
    fn builder() {
        let scenario = Scenario::new(
            CastShape::Ray,
            CastMode::All,
            Pose::default(),
            CameraTargetId(4),
        )
        .with_length(12.0)
        .with_layers(LayerMask::DEFAULT)
        .with_triggers(TriggerPolicy::Ignore)
        .with_proxy(ProxyId(2));
        assert_eq!(scenario.length, 12.0);
        assert_eq!(scenario.layers, LayerMask::DEFAULT);
        assert_eq!(scenario.triggers, TriggerPolicy::Ignore);
        assert_eq!(scenario.proxy, Some(ProxyId(2)));
        assert!(!scenario.shape.is_swept());
    }
}
