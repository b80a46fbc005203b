use crate::assets::catalog::MaterialCatalog;
use crate::assets::params::TextureSlot;
use crate::assets::path::AssetPath;
use crate::io::document::{ObjectRecord, TextureParameterEntry};
use crate::repository::{AssetRepository, Error, InstanceHandle, MasterHandle, ShadingOutput};
use itertools::Itertools;
use log::info;
use std::path::PathBuf;

/// Explicit run configuration, handed in at construction.
#[derive(Debug, Clone)]
pub struct ReconcileSettings {
    /// Directory holding the texture source files, laid out like the game
    /// namespace of the asset tree.
    pub texture_source_root: PathBuf,
    pub image_extension: String,
}

/// Drives one reconciliation pass: for every distinct material path in the
/// export, make sure a (master, instance, texture bindings) state exists in
/// the repository.
///
/// Failures stay local to one material or one texture entry and degrade to
/// skips; only a hard repository error aborts the run.
pub struct ReconciliationEngine<'a, R: AssetRepository> {
    repository: &'a mut R,
    settings: ReconcileSettings,
}

impl<'a, R: AssetRepository> ReconciliationEngine<'a, R> {
    pub fn new(repository: &'a mut R, settings: ReconcileSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn run(&mut self, records: &[ObjectRecord]) -> Result<(), Error> {
        let catalog = MaterialCatalog::collect(records);
        info!("Found {} unique material paths", catalog.len());

        // Set order carries no meaning, sort purely so the log reads stably.
        for mi_path in catalog.iter().sorted() {
            self.reconcile_material(mi_path, records)?;
        }
        Ok(())
    }

    fn reconcile_material(
        &mut self,
        mi_path: &AssetPath,
        records: &[ObjectRecord],
    ) -> Result<(), Error> {
        if mi_path.is_engine() {
            info!("[SKIP] Engine material: {}", mi_path);
            return Ok(());
        }

        let mi_name = mi_path.name();
        let mi_folder = mi_path.folder();
        // Every "MI_" occurrence is replaced, not just a leading one. That
        // matches the naming convention the exports actually follow.
        let mm_name = format!("M_{}", mi_name.replace("MI_", ""));
        let mm_path = AssetPath::in_folder(mi_folder, &mm_name);

        let master = self.resolve_master(&mm_path)?;

        if self.repository.exists(mi_path) {
            info!("[SKIP] MI exists: {}", mi_path);
            return Ok(());
        }

        let instance = self
            .repository
            .create_material_instance(mi_name, mi_folder, master)?;

        // The catalog discarded record identity, so re-scan the input for the
        // entries belonging to this material. Input order matters here: when
        // two textures classify to the same slot, the later binding wins.
        for material in records.iter().flat_map(|record| &record.static_materials) {
            let matches = AssetPath::normalize(&material.material_interface.object_path)
                .is_some_and(|path| &path == mi_path);
            if !matches {
                continue;
            }

            for entry in &material.texture_parameter_values {
                self.assign_texture(instance, mi_name, entry)?;
            }
        }

        self.repository.save(mi_path)?;
        info!("[DONE] Created and assigned textures for MI: {}", mi_path);
        Ok(())
    }

    /// Loads the master if it is already there, otherwise creates it with the
    /// fixed three-sampler wiring. The wiring never depends on the input.
    fn resolve_master(&mut self, mm_path: &AssetPath) -> Result<MasterHandle, Error> {
        if self.repository.exists(mm_path) {
            return self.repository.load_material(mm_path);
        }

        let master = self
            .repository
            .create_material(mm_path.name(), mm_path.folder())?;
        for (slot, output) in [
            (TextureSlot::BaseColor, ShadingOutput::BaseColor),
            (TextureSlot::NormalMap, ShadingOutput::Normal),
            (TextureSlot::Orm, ShadingOutput::AmbientOcclusion),
        ] {
            self.repository.connect_master_parameter(master, slot, output)?;
        }
        self.repository.save(mm_path)?;
        Ok(master)
    }

    fn assign_texture(
        &mut self,
        instance: InstanceHandle,
        mi_name: &str,
        entry: &TextureParameterEntry,
    ) -> Result<(), Error> {
        let Some(tex_path) = AssetPath::normalize(&entry.object_path) else {
            return Ok(());
        };

        let tex_name = tex_path.name().to_owned();
        let slot = TextureSlot::classify(&tex_name);
        let disk_path = self.disk_source(&tex_path);

        if !self.repository.exists(&tex_path) {
            if disk_path.is_file() {
                self.repository
                    .import_texture(&disk_path, tex_path.folder(), &tex_name)?;
                info!("  [IMPORT] {}", tex_name);
            } else {
                info!("  [MISSING FILE] {}", disk_path.display());
                return Ok(());
            }
        }

        // A texture that fails to load is skipped like a missing one.
        let Some(texture) = self.repository.load_texture(&tex_path) else {
            return Ok(());
        };
        self.repository.bind_texture_parameter(instance, slot, texture)?;
        info!("  [SET] {} -> {} = {}", mi_name, slot.parameter_name(), tex_name);
        Ok(())
    }

    fn disk_source(&self, tex_path: &AssetPath) -> PathBuf {
        let file = format!("{}.{}", tex_path.game_relative(), self.settings.image_extension);
        self.settings.texture_source_root.join(file)
    }
}
