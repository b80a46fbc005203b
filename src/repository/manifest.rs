use crate::assets::params::TextureSlot;
use crate::assets::path::AssetPath;
use crate::repository::{
    AssetRepository, Error, InstanceHandle, MasterHandle, ShadingOutput, TextureHandle,
};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";

/// A directory-backed asset repository.
///
/// All asset state lives in a `manifest.json` under the repository root;
/// imported texture files are copied below the root, mirroring their asset
/// paths. Existence checks re-read whatever a previous run left behind,
/// which is what makes repeated runs settle into all-skips.
pub struct ManifestRepository {
    root: PathBuf,
    manifest: Manifest,
    // handle id -> asset path, for every handle kind
    handles: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    #[serde(default)]
    assets: BTreeMap<String, AssetEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
enum AssetEntry {
    Material {
        /// Sampler parameter name -> shading output it feeds.
        #[serde(default)]
        parameters: BTreeMap<String, String>,
    },
    MaterialInstance {
        parent: String,
        /// Sampler parameter name -> bound texture asset path.
        #[serde(default)]
        bindings: BTreeMap<String, String>,
    },
    Texture {
        /// Repository-relative file the import produced.
        file: String,
    },
}

impl ManifestRepository {
    pub fn open(root: &Path) -> Result<Self, Error> {
        fs::create_dir_all(root)?;
        let manifest_path = root.join(MANIFEST_FILE);
        let manifest = if manifest_path.is_file() {
            serde_json::from_str(&fs::read_to_string(&manifest_path)?)?
        } else {
            Manifest::default()
        };

        trace!(
            "Opened repository at {} with {} known assets",
            root.display(),
            manifest.assets.len()
        );

        Ok(ManifestRepository {
            root: root.to_path_buf(),
            manifest,
            handles: Vec::new(),
        })
    }

    fn mint(&mut self, path: String) -> u64 {
        self.handles.push(path);
        (self.handles.len() - 1) as u64
    }

    fn path_for(&self, id: u64) -> Result<String, Error> {
        self.handles
            .get(id as usize)
            .cloned()
            .ok_or(Error::UnknownHandle(id))
    }

    fn write_manifest(&self) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(&self.manifest)?;
        fs::write(self.root.join(MANIFEST_FILE), json)?;
        Ok(())
    }
}

impl AssetRepository for ManifestRepository {
    fn exists(&self, path: &AssetPath) -> bool {
        self.manifest.assets.contains_key(path.as_str())
    }

    fn load_material(&mut self, path: &AssetPath) -> Result<MasterHandle, Error> {
        match self.manifest.assets.get(path.as_str()) {
            Some(AssetEntry::Material { .. }) => Ok(MasterHandle(self.mint(path.as_str().into()))),
            _ => Err(Error::NotFound(path.as_str().into())),
        }
    }

    fn load_texture(&mut self, path: &AssetPath) -> Option<TextureHandle> {
        match self.manifest.assets.get(path.as_str()) {
            Some(AssetEntry::Texture { .. }) => Some(TextureHandle(self.mint(path.as_str().into()))),
            _ => None,
        }
    }

    fn create_material(&mut self, name: &str, folder: &str) -> Result<MasterHandle, Error> {
        let path = format!("{}/{}", folder, name);
        if self.manifest.assets.contains_key(&path) {
            return Err(Error::AlreadyExists(path));
        }
        self.manifest.assets.insert(
            path.clone(),
            AssetEntry::Material {
                parameters: BTreeMap::new(),
            },
        );
        Ok(MasterHandle(self.mint(path)))
    }

    fn create_material_instance(
        &mut self,
        name: &str,
        folder: &str,
        parent: MasterHandle,
    ) -> Result<InstanceHandle, Error> {
        let parent_path = self.path_for(parent.0)?;
        let path = format!("{}/{}", folder, name);
        if self.manifest.assets.contains_key(&path) {
            return Err(Error::AlreadyExists(path));
        }
        self.manifest.assets.insert(
            path.clone(),
            AssetEntry::MaterialInstance {
                parent: parent_path,
                bindings: BTreeMap::new(),
            },
        );
        Ok(InstanceHandle(self.mint(path)))
    }

    fn connect_master_parameter(
        &mut self,
        master: MasterHandle,
        slot: TextureSlot,
        output: ShadingOutput,
    ) -> Result<(), Error> {
        let path = self.path_for(master.0)?;
        match self.manifest.assets.get_mut(&path) {
            Some(AssetEntry::Material { parameters }) => {
                parameters.insert(slot.parameter_name().into(), output.name().into());
                Ok(())
            }
            _ => Err(Error::NotFound(path)),
        }
    }

    fn import_texture(
        &mut self,
        disk_path: &Path,
        dest_folder: &str,
        dest_name: &str,
    ) -> Result<TextureHandle, Error> {
        let path = format!("{}/{}", dest_folder, dest_name);

        let mut relative = format!("{}/{}", dest_folder.trim_start_matches('/'), dest_name);
        if let Some(ext) = disk_path.extension() {
            relative = format!("{}.{}", relative, ext.to_string_lossy());
        }
        let dest_file = self.root.join(&relative);
        if let Some(parent) = dest_file.parent() {
            fs::create_dir_all(parent)?;
        }
        // Re-imports replace the previous file.
        fs::copy(disk_path, &dest_file)?;

        self.manifest
            .assets
            .insert(path.clone(), AssetEntry::Texture { file: relative });
        Ok(TextureHandle(self.mint(path)))
    }

    fn bind_texture_parameter(
        &mut self,
        instance: InstanceHandle,
        slot: TextureSlot,
        texture: TextureHandle,
    ) -> Result<(), Error> {
        let instance_path = self.path_for(instance.0)?;
        let texture_path = self.path_for(texture.0)?;
        match self.manifest.assets.get_mut(&instance_path) {
            Some(AssetEntry::MaterialInstance { bindings, .. }) => {
                bindings.insert(slot.parameter_name().into(), texture_path);
                Ok(())
            }
            _ => Err(Error::NotFound(instance_path)),
        }
    }

    fn save(&mut self, path: &AssetPath) -> Result<(), Error> {
        if !self.manifest.assets.contains_key(path.as_str()) {
            return Err(Error::NotFound(path.as_str().into()));
        }
        self.write_manifest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(path: &str) -> AssetPath {
        AssetPath::normalize(path).unwrap()
    }

    #[test]
    pub fn created_masters_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut repo = ManifestRepository::open(dir.path()).unwrap();
            let master = repo.create_material("M_Crate", "/Game/Props").unwrap();
            repo.connect_master_parameter(master, TextureSlot::BaseColor, ShadingOutput::BaseColor)
                .unwrap();
            repo.save(&asset("/Game/Props/M_Crate")).unwrap();
        }

        let mut repo = ManifestRepository::open(dir.path()).unwrap();
        assert!(repo.exists(&asset("/Game/Props/M_Crate")));
        repo.load_material(&asset("/Game/Props/M_Crate")).unwrap();
    }

    #[test]
    pub fn unsaved_assets_are_not_persisted() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut repo = ManifestRepository::open(dir.path()).unwrap();
            repo.create_material("M_Crate", "/Game/Props").unwrap();
            // no save
        }

        let repo = ManifestRepository::open(dir.path()).unwrap();
        assert!(!repo.exists(&asset("/Game/Props/M_Crate")));
    }

    #[test]
    pub fn import_copies_the_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("T_Crate_BR.png");
        fs::write(&source, b"not really a png").unwrap();

        let mut repo = ManifestRepository::open(dir.path()).unwrap();
        repo.import_texture(&source, "/Game/Props", "T_Crate_BR")
            .unwrap();

        assert!(repo.exists(&asset("/Game/Props/T_Crate_BR")));
        assert!(dir.path().join("Game/Props/T_Crate_BR.png").is_file());
    }

    #[test]
    pub fn load_material_rejects_other_asset_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("T_Thing.png");
        fs::write(&source, b"px").unwrap();

        let mut repo = ManifestRepository::open(dir.path()).unwrap();
        repo.import_texture(&source, "/Game/Props", "T_Thing").unwrap();

        assert!(repo.load_material(&asset("/Game/Props/T_Thing")).is_err());
        assert!(repo.load_texture(&asset("/Game/Props/T_Thing")).is_some());
        assert!(repo.load_texture(&asset("/Game/Props/Missing")).is_none());
    }

    #[test]
    pub fn double_create_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = ManifestRepository::open(dir.path()).unwrap();
        repo.create_material("M_Crate", "/Game/Props").unwrap();
        assert!(repo.create_material("M_Crate", "/Game/Props").is_err());
    }

    #[test]
    pub fn instance_bindings_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("T_Crate_BR.png");
        fs::write(&source, b"px").unwrap();

        let mut repo = ManifestRepository::open(dir.path()).unwrap();
        let master = repo.create_material("M_Crate", "/Game/Props").unwrap();
        let instance = repo
            .create_material_instance("MI_Crate", "/Game/Props", master)
            .unwrap();
        let texture = repo
            .import_texture(&source, "/Game/Props", "T_Crate_BR")
            .unwrap();
        repo.bind_texture_parameter(instance, TextureSlot::BaseColor, texture)
            .unwrap();
        repo.save(&asset("/Game/Props/MI_Crate")).unwrap();

        let repo = ManifestRepository::open(dir.path()).unwrap();
        match repo.manifest.assets.get("/Game/Props/MI_Crate") {
            Some(AssetEntry::MaterialInstance { parent, bindings }) => {
                assert_eq!(parent, "/Game/Props/M_Crate");
                assert_eq!(
                    bindings.get("BaseTexture"),
                    Some(&"/Game/Props/T_Crate_BR".to_string())
                );
            }
            other => panic!("Unexpected manifest entry: {:?}", other),
        }
    }

    #[test]
    pub fn save_of_unknown_asset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = ManifestRepository::open(dir.path()).unwrap();
        assert!(repo.save(&asset("/Game/Props/M_Nothing")).is_err());
    }
}
