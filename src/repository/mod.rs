use crate::assets::params::TextureSlot;
use crate::assets::path::AssetPath;
use std::path::Path;

pub mod manifest;

/// Handles are run-local ids minted by the repository implementation. They
/// are only meaningful towards the repository that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MasterHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// The material property a master's sampler parameter feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingOutput {
    BaseColor,
    Normal,
    AmbientOcclusion,
}

impl ShadingOutput {
    pub fn name(&self) -> &'static str {
        match self {
            ShadingOutput::BaseColor => "BaseColor",
            ShadingOutput::Normal => "Normal",
            ShadingOutput::AmbientOcclusion => "AmbientOcclusion",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Repository I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt repository manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("No asset of the expected kind at {0}")]
    NotFound(String),
    #[error("An asset already exists at {0}")]
    AlreadyExists(String),
    #[error("Stale or foreign handle {0}")]
    UnknownHandle(u64),
}

/// The narrow surface the reconciliation engine needs from an asset
/// repository. Everything behind it is an external collaborator; the engine
/// never assumes more than these operations.
///
/// A hard failure from any operation aborts the whole run, per-unit skips
/// are decided by the engine before calling in.
pub trait AssetRepository {
    fn exists(&self, path: &AssetPath) -> bool;

    /// Loads an existing master material.
    fn load_material(&mut self, path: &AssetPath) -> Result<MasterHandle, Error>;

    /// Loads a texture asset; `None` mirrors a load failure the caller is
    /// expected to skip over rather than abort on.
    fn load_texture(&mut self, path: &AssetPath) -> Option<TextureHandle>;

    /// Creates a new master material with a default shading graph.
    fn create_material(&mut self, name: &str, folder: &str) -> Result<MasterHandle, Error>;

    fn create_material_instance(
        &mut self,
        name: &str,
        folder: &str,
        parent: MasterHandle,
    ) -> Result<InstanceHandle, Error>;

    /// Wires a sampler parameter of a master to a shading output. Only used
    /// at master creation time.
    fn connect_master_parameter(
        &mut self,
        master: MasterHandle,
        slot: TextureSlot,
        output: ShadingOutput,
    ) -> Result<(), Error>;

    fn import_texture(
        &mut self,
        disk_path: &Path,
        dest_folder: &str,
        dest_name: &str,
    ) -> Result<TextureHandle, Error>;

    /// Binds a texture onto an instance's sampler slot, overwriting any
    /// previous binding for that slot.
    fn bind_texture_parameter(
        &mut self,
        instance: InstanceHandle,
        slot: TextureSlot,
        texture: TextureHandle,
    ) -> Result<(), Error>;

    /// Persists the asset at the given path.
    fn save(&mut self, path: &AssetPath) -> Result<(), Error>;
}
