use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One entry of the object-info export. Read-only input, never mutated.
#[derive(Debug, Default, Deserialize)]
pub struct ObjectRecord {
    #[serde(default, rename = "StaticMaterials")]
    pub static_materials: Vec<StaticMaterialEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StaticMaterialEntry {
    #[serde(default, rename = "MaterialInterface")]
    pub material_interface: ObjectRef,
    #[serde(default, rename = "TextureParameterValues")]
    pub texture_parameter_values: Vec<TextureParameterEntry>,
}

/// A reference to another asset by its raw (un-normalized) object path.
#[derive(Debug, Default, Deserialize)]
pub struct ObjectRef {
    #[serde(default, rename = "ObjectPath")]
    pub object_path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextureParameterEntry {
    #[serde(default, rename = "ObjectPath")]
    pub object_path: String,
}

/// Loads the export document. Any read or parse failure is fatal for the run,
/// no repository mutation has happened at this point.
pub fn load_object_info(path: &Path) -> anyhow::Result<Vec<ObjectRecord>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read object info document {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse object info document {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    pub fn parses_the_export_shape() {
        let json = r#"[
            {
                "StaticMaterials": [
                    {
                        "MaterialInterface": { "ObjectPath": "Game/Props/MI_Crate.0" },
                        "TextureParameterValues": [
                            { "ObjectPath": "Game/Props/T_Crate_BR.0" },
                            { "ObjectPath": "Game/Props/T_Crate_NM.0" }
                        ]
                    }
                ]
            }
        ]"#;

        let records: Vec<ObjectRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].static_materials.len(), 1);
        let mat = &records[0].static_materials[0];
        assert_eq!(mat.material_interface.object_path, "Game/Props/MI_Crate.0");
        assert_eq!(mat.texture_parameter_values.len(), 2);
        assert_eq!(
            mat.texture_parameter_values[1].object_path,
            "Game/Props/T_Crate_NM.0"
        );
    }

    #[test]
    pub fn tolerates_missing_fields() {
        // Exports in the wild omit whole sections.
        let json = r#"[
            {},
            { "StaticMaterials": [ {} ] },
            { "StaticMaterials": [ { "MaterialInterface": {} } ] }
        ]"#;

        let records: Vec<ObjectRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].static_materials.is_empty());
        assert_eq!(records[1].static_materials[0].material_interface.object_path, "");
        assert!(records[2].static_materials[0].texture_parameter_values.is_empty());
    }

    #[test]
    pub fn ignores_unrelated_fields() {
        let json = r#"[ { "ObjectName": "SM_Crate", "StaticMaterials": [] } ]"#;
        let records: Vec<ObjectRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    pub fn unparsable_document_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(load_object_info(file.path()).is_err());
    }

    #[test]
    pub fn missing_document_is_an_error() {
        assert!(load_object_info(Path::new("/nonexistent/ObjectInfo.json")).is_err());
    }
}
