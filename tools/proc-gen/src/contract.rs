//! Contract tags: stable semantic ids for generated entities
//!
//! The runtime finds geometry by these strings (e.g. it scales whatever is
//! tagged `plow_wing` when the player buys an upgrade), so they are a contract
//! between the generator and its consumers rather than free-form labels.
//!
//! Tagging does not check vocabulary membership. The generator only emits
//! ids from [`vocabulary`]; consumers validate at bind time.

use crate::error::{GenError, Result};
use crate::scene::{MaterialId, ObjectId};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata key the tag is stored under in exported files
pub const CONTRACT_KEY: &str = "damp_id";

/// Agreed tag values
pub mod vocabulary {
    pub const CHASSIS: &str = "chassis";
    pub const WHEEL: &str = "wheel";
    pub const CABIN: &str = "cabin";
    pub const TRACK_LINK: &str = "track_link";
    pub const PATH_L: &str = "path_l";
    pub const PATH_R: &str = "path_r";
    pub const PLOW_SEGMENT: &str = "plow_segment";
    pub const PLOW_WING: &str = "plow_wing";
    pub const PLOW_TOOTH: &str = "plow_tooth";

    // Materials
    pub const BODY_PAINT: &str = "body_paint";
    pub const TRACK_METAL: &str = "track_metal";
    pub const PLOW: &str = "plow";

    pub const ALL: &[&str] = &[
        CHASSIS,
        WHEEL,
        CABIN,
        TRACK_LINK,
        PATH_L,
        PATH_R,
        PLOW_SEGMENT,
        PLOW_WING,
        PLOW_TOOTH,
        BODY_PAINT,
        TRACK_METAL,
        PLOW,
    ];

    pub fn is_known(tag: &str) -> bool {
        ALL.contains(&tag)
    }
}

/// Canonical lowercase identifier (`[a-z0-9_]+`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractTag(String);

impl ContractTag {
    pub fn new(id: &str) -> Result<Self> {
        let canonical = !id.is_empty()
            && id
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
        if canonical {
            Ok(Self(id.to_string()))
        } else {
            Err(GenError::InvalidTag(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can carry a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityRef {
    Object(ObjectId),
    Material(MaterialId),
}

impl From<ObjectId> for EntityRef {
    fn from(id: ObjectId) -> Self {
        EntityRef::Object(id)
    }
}

impl From<MaterialId> for EntityRef {
    fn from(id: MaterialId) -> Self {
        EntityRef::Material(id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Object(id) => write!(f, "object #{}", id.index()),
            EntityRef::Material(id) => write!(f, "material #{}", id.index()),
        }
    }
}

/// Write-once map from entity to tag
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: BTreeMap<EntityRef, ContractTag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `id` to `entity`; a second tag on the same entity fails
    pub fn tag(&mut self, entity: impl Into<EntityRef>, id: &str) -> Result<&ContractTag> {
        let entity = entity.into();
        let tag = ContractTag::new(id)?;
        if let Some(existing) = self.tags.get(&entity) {
            return Err(GenError::DuplicateTag {
                entity: entity.to_string(),
                existing: existing.to_string(),
                attempted: tag.0,
            });
        }
        Ok(self.tags.entry(entity).or_insert(tag))
    }

    pub fn get(&self, entity: impl Into<EntityRef>) -> Option<&ContractTag> {
        self.tags.get(&entity.into())
    }

    /// Entities carrying `id`, in creation order
    pub fn find<'a>(&'a self, id: &'a str) -> impl Iterator<Item = EntityRef> + 'a {
        self.tags
            .iter()
            .filter(move |(_, tag)| tag.as_str() == id)
            .map(|(entity, _)| *entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityRef, &ContractTag)> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
