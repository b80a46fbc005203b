/// The semantic role a texture plays on a material instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    BaseColor,
    NormalMap,
    /// Packed occlusion/roughness/metallic map.
    Orm,
    /// Fallback for anything the naming convention doesn't cover.
    Generic,
}

impl TextureSlot {
    /// Guesses the slot from a texture name, case-insensitively, in fixed
    /// priority order. The tokens are substrings, so a name carrying both
    /// "BR" and "NM" resolves to base color by priority. That ambiguity is
    /// inherent to the naming convention and is kept as-is.
    pub fn classify(texture_name: &str) -> TextureSlot {
        let name = texture_name.to_uppercase();
        if name.contains("BR") {
            TextureSlot::BaseColor
        } else if name.contains("NMA") || name.contains("NM") {
            TextureSlot::NormalMap
        } else if name.contains("ORM") {
            TextureSlot::Orm
        } else {
            TextureSlot::Generic
        }
    }

    /// The parameter name as it appears on the material graph.
    pub fn parameter_name(&self) -> &'static str {
        match self {
            TextureSlot::BaseColor => "BaseTexture",
            TextureSlot::NormalMap => "NormalMap",
            TextureSlot::Orm => "ORM",
            TextureSlot::Generic => "Texture",
        }
    }
}
