use std::fmt;

/// A canonical asset path: a single leading separator followed by a root
/// namespace segment, e.g. `/Game/Props/MI_Crate`.
///
/// Only [AssetPath::normalize] and path derivation within this crate produce
/// values, so holding one means the canonical form is already established.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetPath(String);

impl AssetPath {
    /// Canonicalizes a raw object path from the export.
    ///
    /// Exports append a numeric index suffix (`.0`) to object paths; every
    /// literal `.0` is stripped before any other rule runs. That is a
    /// workaround for the export format, not a real path rule, and is
    /// deliberately not smarter than the data it cleans up. Unrecognized
    /// forms yield `None` and the caller is expected to drop the entry.
    pub fn normalize(raw: &str) -> Option<AssetPath> {
        let path = raw.replace(".0", "");
        if let Some(rest) = path.strip_prefix("Game/") {
            Some(AssetPath(format!("/Game/{}", rest)))
        } else if let Some(rest) = path.strip_prefix("Engine/") {
            Some(AssetPath(format!("/Engine/{}", rest)))
        } else if path.starts_with('/') && (path.contains("/Game/") || path.contains("/Engine/")) {
            Some(AssetPath(path))
        } else {
            None
        }
    }

    /// Builds a path from a folder and an asset name that were both derived
    /// from an already-normalized path.
    pub fn in_folder(folder: &str, name: &str) -> AssetPath {
        AssetPath(format!("{}/{}", folder, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The asset name, i.e. everything after the last separator.
    pub fn name(&self) -> &str {
        match self.0.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.0,
        }
    }

    /// The containing folder, i.e. everything before the last separator.
    pub fn folder(&self) -> &str {
        match self.0.rsplit_once('/') {
            Some((folder, _)) => folder,
            None => "",
        }
    }

    /// Engine-namespace assets are authoritative and never touched.
    pub fn is_engine(&self) -> bool {
        self.0.contains("/Engine/")
    }

    /// The path relative to the game namespace, used to locate the on-disk
    /// source file. Every `/Game/` occurrence is removed, not just a prefix.
    pub fn game_relative(&self) -> String {
        self.0.replace("/Game/", "")
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
