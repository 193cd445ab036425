//! In-memory implementations of the [`Stage`] and [`CameraRig`] traits.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::math::Rgba;
use crate::query::TargetId;
use crate::scenario::{CameraTargetId, ProxyId};
use crate::stage::{
    CameraRig, ColorAccessor, LineDisplay, ProxyObject, Stage, Surfaces, VertexColorAccessor,
};

/// Identifies a [`Mesh`] in a [`SceneObjects`]. Several objects may share one mesh.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MeshId(pub u32);

impl fmt::Debug for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MeshId({})", self.0)
    }
}

/// A material's base color property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseColor(pub Rgba);

impl ColorAccessor for BaseColor {
    fn color(&self) -> Rgba {
        self.0
    }

    fn set_color(&mut self, color: Rgba) {
        self.0 = color;
    }
}

/// A material. Not every material has a base color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Material {
    /// The base color property, if this material has one.
    pub base_color: Option<BaseColor>,
}

impl Material {
    /// A material whose base color is `color`.
    pub fn colored(color: Rgba) -> Self {
        Self {
            base_color: Some(BaseColor(color)),
        }
    }
}

/// Per-vertex color data of a mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// One color per vertex. May be empty.
    pub colors: Vec<Rgba>,
}

impl VertexColorAccessor for Mesh {
    fn vertex_colors(&self) -> Vec<Rgba> {
        self.colors.clone()
    }

    fn set_vertex_colors(&mut self, colors: &[Rgba]) {
        self.colors.clear();
        self.colors.extend_from_slice(colors);
    }
}

/// A hittable object: an optional material and an optional reference to a mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneObject {
    /// The object's material, if it is rendered at all.
    pub material: Option<Material>,
    /// The object's mesh, if it has one.
    pub mesh: Option<MeshId>,
}

/// A complete [`Stage`] held in memory.
///
/// A target whose [`SceneObject::mesh`] refers to a mesh which was never
/// [inserted](Self::insert_mesh) is treated as having no mesh.
#[derive(Clone, Debug, Default)]
pub struct SceneObjects {
    objects: HashMap<TargetId, SceneObject>,
    meshes: HashMap<MeshId, Mesh>,
    proxies: HashMap<ProxyId, ProxyObject>,
    line: LineDisplay,
}

impl SceneObjects {
    /// Constructs an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a hittable object.
    pub fn insert_object(&mut self, target: TargetId, object: SceneObject) {
        self.objects.insert(target, object);
    }

    /// Adds or replaces a mesh.
    pub fn insert_mesh(&mut self, id: MeshId, mesh: Mesh) {
        self.meshes.insert(id, mesh);
    }

    /// Adds or replaces a proxy object.
    pub fn insert_proxy(&mut self, id: ProxyId, proxy: ProxyObject) {
        self.proxies.insert(id, proxy);
    }

    /// Returns the object `target`, if it exists.
    pub fn object(&self, target: TargetId) -> Option<&SceneObject> {
        self.objects.get(&target)
    }

    /// Returns the current base color of `target`, if it has one.
    pub fn color_of(&self, target: TargetId) -> Option<Rgba> {
        self.objects
            .get(&target)?
            .material?
            .base_color
            .map(|BaseColor(color)| color)
    }

    /// Returns the current vertex colors of `target`'s mesh, if it has one.
    pub fn vertex_colors_of(&self, target: TargetId) -> Option<&[Rgba]> {
        let mesh_id = self.objects.get(&target)?.mesh?;
        self.meshes.get(&mesh_id).map(|mesh| &*mesh.colors)
    }

    /// Returns the mesh `id`, if it exists.
    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(&id)
    }

    /// Returns the proxy object `id`, if it exists.
    pub fn proxy(&self, id: ProxyId) -> Option<&ProxyObject> {
        self.proxies.get(&id)
    }

    /// Returns the line display.
    pub fn line(&self) -> &LineDisplay {
        &self.line
    }
}

impl Surfaces for SceneObjects {
    fn base_color(&mut self, target: TargetId) -> Option<&mut dyn ColorAccessor> {
        let material = self.objects.get_mut(&target)?.material.as_mut()?;
        let color = material.base_color.as_mut()?;
        Some(color)
    }

    fn vertex_colors(&mut self, target: TargetId) -> Option<&mut dyn VertexColorAccessor> {
        let mesh_id = self.objects.get(&target)?.mesh?;
        let mesh = self.meshes.get_mut(&mesh_id)?;
        Some(mesh)
    }
}

impl Stage for SceneObjects {
    fn line_mut(&mut self) -> &mut LineDisplay {
        &mut self.line
    }

    fn proxy_mut(&mut self, proxy: ProxyId) -> Option<&mut ProxyObject> {
        self.proxies.get_mut(&proxy)
    }
}

// -------------------------------------------------------------------------------------------------

/// A [`CameraRig`] which just remembers what it was told.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FollowCamera {
    /// The target last passed to [`CameraRig::set_follow()`].
    pub follow: Option<CameraTargetId>,
    /// The target last passed to [`CameraRig::set_look_at()`].
    pub look_at: Option<CameraTargetId>,
}

impl CameraRig for FollowCamera {
    fn set_follow(&mut self, target: CameraTargetId) {
        log::debug!("camera follows {target:?}");
        self.follow = Some(target);
    }

    fn set_look_at(&mut self, target: CameraTargetId) {
        self.look_at = Some(target);
    }
}
