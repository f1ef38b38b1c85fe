//! Scene assembly: objects, materials and their contract tags
//!
//! Construction functions take a `&mut SceneBuilder`, create what they need
//! and return the typed ids of the entities they made. The finished [`Scene`]
//! is the only thing handed to export.

mod export;

pub use export::{scene_to_glb, write_glb};

use crate::contract::{ContractTag, EntityRef, TagRegistry};
use crate::error::Result;
use crate::mesh::{Mesh, PathCurve};
use glam::Vec3;

/// Handle to a material owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(pub(crate) usize);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to an object owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Surface description referenced by mesh faces
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Linear RGBA
    pub base_color: [f32; 4],
    pub roughness: f32,
    /// Texture file name, bound by convention at load time
    pub texture: Option<String>,
}

impl Material {
    pub fn new(name: impl Into<String>, base_color: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            base_color,
            roughness: 0.7,
            texture: None,
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_texture(mut self, file_name: impl Into<String>) -> Self {
        self.texture = Some(file_name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Mesh(Mesh),
    Path(PathCurve),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub geometry: Geometry,
    pub translation: Vec3,
}

/// Finished scene ready for export
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    materials: Vec<Material>,
    tags: TagRegistry,
}

impl Scene {
    pub fn objects(&self) -> impl ExactSizeIterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    pub fn materials(&self) -> impl ExactSizeIterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i), m))
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn tag_of(&self, entity: impl Into<EntityRef>) -> Option<&ContractTag> {
        self.tags.get(entity)
    }

    /// Objects carrying `tag`, in creation order
    pub fn objects_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a SceneObject> + 'a {
        self.tags.find(tag).filter_map(move |entity| match entity {
            EntityRef::Object(id) => self.object(id),
            EntityRef::Material(_) => None,
        })
    }

    /// Entities that never received a tag
    pub fn untagged(&self) -> Vec<EntityRef> {
        let objects = (0..self.objects.len()).map(|i| EntityRef::Object(ObjectId(i)));
        let materials = (0..self.materials.len()).map(|i| EntityRef::Material(MaterialId(i)));
        objects
            .chain(materials)
            .filter(|e| self.tags.get(*e).is_none())
            .collect()
    }
}

/// Explicit replacement for a global "current scene"
#[derive(Debug, Default)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.scene.materials.len());
        tracing::debug!(name = %material.name, id = id.0, "material");
        self.scene.materials.push(material);
        id
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        if let Geometry::Mesh(mesh) = &object.geometry {
            debug_assert!(mesh.is_valid());
            debug_assert!(
                mesh.faces
                    .iter()
                    .filter_map(|f| f.material)
                    .all(|m| m.0 < self.scene.materials.len())
            );
        }
        let id = ObjectId(self.scene.objects.len());
        self.scene.objects.push(object);
        id
    }

    /// Attach a contract tag; fails if the entity already has one
    pub fn tag(&mut self, entity: impl Into<EntityRef>, id: &str) -> Result<()> {
        let entity = entity.into();
        let tag = self.scene.tags.tag(entity, id)?;
        tracing::debug!(%entity, tag = %tag, "tagged");
        Ok(())
    }

    /// Create and tag a material in one step
    pub fn material(&mut self, material: Material, tag: &str) -> Result<MaterialId> {
        let id = self.add_material(material);
        self.tag(id, tag)?;
        Ok(id)
    }

    /// Create and tag a mesh object in one step
    pub fn mesh(
        &mut self,
        name: impl Into<String>,
        mesh: Mesh,
        translation: Vec3,
        tag: &str,
    ) -> Result<ObjectId> {
        let id = self.add_object(SceneObject {
            name: name.into(),
            geometry: Geometry::Mesh(mesh),
            translation,
        });
        self.tag(id, tag)?;
        Ok(id)
    }

    /// Create and tag a path object in one step
    pub fn path(
        &mut self,
        name: impl Into<String>,
        path: PathCurve,
        translation: Vec3,
        tag: &str,
    ) -> Result<ObjectId> {
        let id = self.add_object(SceneObject {
            name: name.into(),
            geometry: Geometry::Path(path),
            translation,
        });
        self.tag(id, tag)?;
        Ok(id)
    }

    pub fn build(self) -> Scene {
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::vocabulary;
    use crate::error::GenError;
    use crate::mesh::{extrude, generate_stadium, LoftOptions, ProfileCurve, StadiumParams};

    fn block() -> Mesh {
        let profile = ProfileCurve::rectangle(1.0, 1.0).unwrap();
        extrude(&profile, Vec3::ZERO, Vec3::X, &LoftOptions::default()).unwrap()
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let mut builder = SceneBuilder::new();
        let paint = builder.add_material(Material::new("Paint", [1.0, 0.6, 0.0, 1.0]));
        let a = builder.add_object(SceneObject {
            name: "A".into(),
            geometry: Geometry::Mesh(block().with_material(paint)),
            translation: Vec3::ZERO,
        });
        let b = builder.add_object(SceneObject {
            name: "B".into(),
            geometry: Geometry::Mesh(block()),
            translation: Vec3::Z,
        });
        assert_eq!((paint.index(), a.index(), b.index()), (0, 0, 1));

        let scene = builder.build();
        assert_eq!(scene.object(b).unwrap().name, "B");
        assert_eq!(scene.objects().len(), 2);
        assert_eq!(scene.untagged().len(), 3);
    }

    #[test]
    fn test_second_tag_is_rejected() {
        let mut builder = SceneBuilder::new();
        let id = builder
            .mesh("Body", block(), Vec3::ZERO, vocabulary::CHASSIS)
            .unwrap();
        let err = builder.tag(id, vocabulary::CABIN).unwrap_err();
        assert!(matches!(err, GenError::DuplicateTag { .. }));

        let scene = builder.build();
        assert_eq!(scene.tag_of(id).unwrap().as_str(), vocabulary::CHASSIS);
    }

    #[test]
    fn test_lookup_by_tag() {
        let mut builder = SceneBuilder::new();
        let metal = builder
            .material(Material::new("DarkMetal", [0.2, 0.2, 0.2, 1.0]), vocabulary::TRACK_METAL)
            .unwrap();
        let path = generate_stadium(&StadiumParams::default()).unwrap();
        builder
            .path("Path_L", path.clone(), Vec3::new(-1.5, 0.0, 0.5), vocabulary::PATH_L)
            .unwrap();
        builder
            .path("Path_R", path, Vec3::new(1.5, 0.0, 0.5), vocabulary::PATH_R)
            .unwrap();

        let scene = builder.build();
        let right: Vec<_> = scene.objects_tagged(vocabulary::PATH_R).collect();
        assert_eq!(right.len(), 1);
        assert_eq!(right[0].translation.x, 1.5);
        assert_eq!(scene.tag_of(metal).unwrap().as_str(), "track_metal");
        assert!(scene.untagged().is_empty());
    }
}
