/// A named design aesthetic sent verbatim to the image model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StylePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
    pub swatch: &'static str,
}

impl StylePreset {
    /// Label stored on the generated image, e.g. "Scandinavian Style".
    pub fn label(&self) -> String {
        format!("{} Style", self.name)
    }
}

pub const STYLE_PRESETS: &[StylePreset] = &[
    StylePreset {
        id: "modern",
        name: "Modern",
        prompt: "modern interior design with clean lines, a neutral palette with bold accents, sleek furniture and polished materials",
        swatch: "#4b5563",
    },
    StylePreset {
        id: "scandinavian",
        name: "Scandinavian",
        prompt: "Scandinavian interior design with light wood, white walls, cozy wool and linen textiles, functional minimal furniture and plenty of natural light",
        swatch: "#e7dccb",
    },
    StylePreset {
        id: "industrial",
        name: "Industrial",
        prompt: "industrial loft interior design with exposed brick, raw concrete, black steel fixtures, leather seating and Edison bulb lighting",
        swatch: "#6b4f3a",
    },
    StylePreset {
        id: "bohemian",
        name: "Bohemian",
        prompt: "bohemian interior design with layered patterned rugs, rattan and macrame, abundant houseplants and warm earthy colors",
        swatch: "#c2703d",
    },
    StylePreset {
        id: "mid-century",
        name: "Mid-Century Modern",
        prompt: "mid-century modern interior design with walnut furniture on tapered legs, organic curves, mustard and teal accents and statement lighting",
        swatch: "#b7791f",
    },
    StylePreset {
        id: "minimalist",
        name: "Minimalist",
        prompt: "minimalist interior design with an uncluttered space, a monochrome palette, hidden storage and a few carefully chosen pieces",
        swatch: "#f5f5f4",
    },
    StylePreset {
        id: "coastal",
        name: "Coastal",
        prompt: "coastal interior design with soft blues and sandy whites, slipcovered furniture, woven textures and an airy beach-house feel",
        swatch: "#7fb3d5",
    },
    StylePreset {
        id: "japandi",
        name: "Japandi",
        prompt: "Japandi interior design blending Japanese and Scandinavian aesthetics with low-profile furniture, muted tones, natural wood and paper lighting",
        swatch: "#a8a29e",
    },
];

pub fn find_style(id: &str) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|preset| preset.id == id)
}
