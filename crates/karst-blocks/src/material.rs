use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::{BlockKind, MaterialId};

#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub texture: Option<PathBuf>,
}

/// Materials plus the block-kind -> material mapping, loaded from TOML.
#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
    kind_table: HashMap<BlockKind, MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    /// Material a block of `kind` renders with. Unmapped kinds fall back to
    /// material 0 so a grid never fails to mesh over a table gap.
    #[inline]
    pub fn material_for_kind(&self, kind: BlockKind) -> MaterialId {
        self.kind_table
            .get(&kind)
            .copied()
            .unwrap_or(MaterialId(0))
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so
        // MaterialId assignment is stable across loads.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let texture = match entry {
                MaterialEntry::Texture(path) => Some(PathBuf::from(path)),
                MaterialEntry::Detail { texture } => texture.map(PathBuf::from),
            };
            let id = MaterialId(catalog.materials.len() as u16);
            catalog.by_key.insert(key.clone(), id);
            catalog.materials.push(Material { id, key, texture });
        }
        for (kind_name, material_key) in &cfg.kinds {
            let kind = kind_by_name(kind_name)
                .ok_or_else(|| format!("unknown block kind {:?}", kind_name))?;
            let id = catalog
                .get_id(material_key)
                .ok_or_else(|| format!("kind {:?} maps to unknown material {:?}", kind_name, material_key))?;
            catalog.kind_table.insert(kind, id);
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

fn kind_by_name(name: &str) -> Option<BlockKind> {
    [BlockKind::Default].into_iter().find(|k| k.name() == name)
}

// --- Config ---

#[derive(Deserialize)]
struct MaterialsConfig {
    materials: HashMap<String, MaterialEntry>,
    #[serde(default)]
    kinds: HashMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaterialEntry {
    // Simple: material = "assets/blocks/foo.png"
    Texture(String),
    // Detailed: material = { texture = "..." } (texture optional)
    Detail { texture: Option<String> },
}
