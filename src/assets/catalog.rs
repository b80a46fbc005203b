use crate::assets::path::AssetPath;
use crate::io::document::ObjectRecord;
use std::collections::HashSet;

/// The distinct material interface paths referenced anywhere in the export.
///
/// Entries whose path doesn't normalize are dropped here already, the engine
/// never sees them. The catalog is a set: processing order across materials
/// carries no meaning.
#[derive(Debug, Default)]
pub struct MaterialCatalog {
    paths: HashSet<AssetPath>,
}

impl MaterialCatalog {
    pub fn collect(records: &[ObjectRecord]) -> Self {
        let mut paths = HashSet::new();
        for record in records {
            for material in &record.static_materials {
                if let Some(path) = AssetPath::normalize(&material.material_interface.object_path) {
                    paths.insert(path);
                }
            }
        }
        MaterialCatalog { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetPath> {
        self.paths.iter()
    }
}
