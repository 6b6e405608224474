use serde::{Deserialize, Serialize};
use std::fmt;

/// Roof surface a household collects from.
///
/// Parsing never fails: anything outside the known vocabulary becomes
/// [`RoofMaterial::Unrecognized`] and is charged the default coefficient.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum RoofMaterial {
    Rcc,
    Terrace,
    MetalSheet,
    TileRoof,
    Tile,
    Asbestos,
    RoughSurface,
    GreenRoof,
    Soil,
    Unrecognized,
}

impl RoofMaterial {
    /// Match an already upper-cased roof type label.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "RCC" => RoofMaterial::Rcc,
            "TERRACE" => RoofMaterial::Terrace,
            "METAL SHEET" => RoofMaterial::MetalSheet,
            "TILE ROOF" => RoofMaterial::TileRoof,
            "TILE" => RoofMaterial::Tile,
            "ASBESTOS" => RoofMaterial::Asbestos,
            "ROUGH SURFACE" => RoofMaterial::RoughSurface,
            "GREEN ROOF" => RoofMaterial::GreenRoof,
            "SOIL" => RoofMaterial::Soil,
            _ => RoofMaterial::Unrecognized,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoofMaterial::Rcc => "RCC",
            RoofMaterial::Terrace => "TERRACE",
            RoofMaterial::MetalSheet => "METAL SHEET",
            RoofMaterial::TileRoof => "TILE ROOF",
            RoofMaterial::Tile => "TILE",
            RoofMaterial::Asbestos => "ASBESTOS",
            RoofMaterial::RoughSurface => "ROUGH SURFACE",
            RoofMaterial::GreenRoof => "GREEN ROOF",
            RoofMaterial::Soil => "SOIL",
            RoofMaterial::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for RoofMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Runoff coefficients grouped by surface class.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RunoffTable {
    /// RCC, terrace and metal sheet roofs
    #[serde(default = "default_impervious")]
    pub impervious: f64,
    /// Tiled roofs
    #[serde(default = "default_tiled")]
    pub tiled: f64,
    /// Asbestos and rough surfaces
    #[serde(default = "default_rough")]
    pub rough: f64,
    /// Green roofs and bare soil
    #[serde(default = "default_vegetated")]
    pub vegetated: f64,
    /// Anything the table does not know
    #[serde(default = "default_coefficient")]
    pub default: f64,
}

fn default_impervious() -> f64 {
    0.85
}

fn default_tiled() -> f64 {
    0.75
}

fn default_rough() -> f64 {
    0.60
}

fn default_vegetated() -> f64 {
    0.40
}

fn default_coefficient() -> f64 {
    0.80
}

impl Default for RunoffTable {
    fn default() -> Self {
        RunoffTable {
            impervious: default_impervious(),
            tiled: default_tiled(),
            rough: default_rough(),
            vegetated: default_vegetated(),
            default: default_coefficient(),
        }
    }
}

impl RunoffTable {
    pub fn coefficient(&self, material: RoofMaterial) -> f64 {
        match material {
            RoofMaterial::Rcc | RoofMaterial::Terrace | RoofMaterial::MetalSheet => self.impervious,
            RoofMaterial::TileRoof | RoofMaterial::Tile => self.tiled,
            RoofMaterial::Asbestos | RoofMaterial::RoughSurface => self.rough,
            RoofMaterial::GreenRoof | RoofMaterial::Soil => self.vegetated,
            RoofMaterial::Unrecognized => self.default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_parse_case_insensitively() {
        assert_eq!(RoofMaterial::from_label("rcc"), RoofMaterial::Rcc);
        assert_eq!(RoofMaterial::from_label("Metal Sheet"), RoofMaterial::MetalSheet);
        assert_eq!(RoofMaterial::from_label(" tile roof "), RoofMaterial::TileRoof);
        assert_eq!(RoofMaterial::from_label("GREEN ROOF"), RoofMaterial::GreenRoof);
    }

    #[test]
    fn unknown_label_falls_back() {
        assert_eq!(
            RoofMaterial::from_label("UNKNOWN_MATERIAL"),
            RoofMaterial::Unrecognized
        );
        assert_eq!(RoofMaterial::from_label(""), RoofMaterial::Unrecognized);
    }

    #[test]
    fn default_table_coefficients() {
        let table = RunoffTable::default();
        let expected = [
            ("RCC", 0.85),
            ("TERRACE", 0.85),
            ("METAL SHEET", 0.85),
            ("TILE ROOF", 0.75),
            ("TILE", 0.75),
            ("ASBESTOS", 0.60),
            ("ROUGH SURFACE", 0.60),
            ("GREEN ROOF", 0.40),
            ("SOIL", 0.40),
            ("THATCH", 0.80),
        ];
        for (label, coefficient) in expected {
            let material = RoofMaterial::from_label(label);
            assert_eq!(table.coefficient(material), coefficient, "{}", label);
        }
    }

    #[test]
    fn label_round_trips_known_materials() {
        assert_eq!(RoofMaterial::from_label(RoofMaterial::Asbestos.label()), RoofMaterial::Asbestos);
        assert_eq!(RoofMaterial::Soil.to_string(), "SOIL");
    }
}
