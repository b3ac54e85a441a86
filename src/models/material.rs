//! Material property table used for weight and cost estimates.

use serde::{Deserialize, Serialize};

/// Known board materials. Unknown names fall back to pine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// Solid pine
    #[default]
    Pine,
    /// Plywood
    Plywood,
    /// Medium-density fibreboard
    Mdf,
    /// Laminated board
    Laminated,
}

/// Physical and commercial properties of a material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialProperties {
    /// Density in kg/m³
    pub density: f64,
    /// Bending strength in N/mm²
    pub strength: f64,
    /// Price per square meter
    pub cost_per_m2: f64,
}

impl Material {
    /// All known materials.
    pub const ALL: [Self; 4] = [Self::Pine, Self::Plywood, Self::Mdf, Self::Laminated];

    /// Resolves a material name, falling back to pine.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    /// Resolves a material name exactly (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pine => "pine",
            Self::Plywood => "plywood",
            Self::Mdf => "mdf",
            Self::Laminated => "laminated",
        }
    }

    /// Property table lookup.
    #[must_use]
    pub const fn properties(self) -> MaterialProperties {
        match self {
            Self::Pine => MaterialProperties {
                density: 500.0,
                strength: 40.0,
                cost_per_m2: 3000.0,
            },
            Self::Plywood => MaterialProperties {
                density: 600.0,
                strength: 60.0,
                cost_per_m2: 2500.0,
            },
            Self::Mdf => MaterialProperties {
                density: 750.0,
                strength: 25.0,
                cost_per_m2: 2000.0,
            },
            Self::Laminated => MaterialProperties {
                density: 450.0,
                strength: 50.0,
                cost_per_m2: 4500.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_material_falls_back_to_pine() {
        assert_eq!(Material::from_name("oak"), Material::Pine);
        assert_eq!(Material::from_name("MDF"), Material::Mdf);
        assert!(Material::parse("oak").is_none());
    }

    #[test]
    fn test_pine_density() {
        assert!((Material::Pine.properties().density - 500.0).abs() < f64::EPSILON);
    }
}
