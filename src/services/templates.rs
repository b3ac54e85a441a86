//! Layout templates that expand into one or more modules.

use serde::{Deserialize, Serialize};

use crate::models::{ModuleId, Size3, Vec3};
use crate::services::registry::ComponentRegistry;

/// Edge length (cm) of the cubbies used by the L-shape template.
const CUBBY_SIZE: f64 = 40.0;

/// Depth (cm) of the cubbies used by the L-shape template.
const CUBBY_DEPTH: f64 = 35.0;

/// A predefined arrangement of modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    /// One default module at the origin
    #[default]
    Single,
    /// Five cubbies: a row of three along X and a column of two on the left end
    LShape,
}

impl Template {
    /// Module origins and sizes this template places.
    #[must_use]
    pub fn placements(self, default_size: Size3) -> Vec<(Vec3, Size3)> {
        match self {
            Self::Single => vec![(Vec3::ZERO, default_size)],
            Self::LShape => {
                let cubby = Size3::new(CUBBY_SIZE, CUBBY_SIZE, CUBBY_DEPTH);
                [
                    (0.0, 0.0),
                    (CUBBY_SIZE, 0.0),
                    (CUBBY_SIZE * 2.0, 0.0),
                    (0.0, CUBBY_SIZE),
                    (0.0, CUBBY_SIZE * 2.0),
                ]
                .into_iter()
                .map(|(x, y)| (Vec3::new(x, y, 0.0), cubby))
                .collect()
            }
        }
    }

    /// Adds this template's modules to the registry and returns their ids.
    pub fn expand(self, registry: &mut ComponentRegistry) -> Vec<ModuleId> {
        let default_size = registry.defaults().module_size();
        self.placements(default_size)
            .into_iter()
            .map(|(position, size)| registry.add_module_sized(position, size).id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_template() {
        let mut registry = ComponentRegistry::default();
        let ids = Template::Single.expand(&mut registry);
        assert_eq!(ids, vec![1]);
        assert_eq!(registry.module(1).unwrap().size, Size3::new(80.0, 180.0, 35.0));
    }

    #[test]
    fn test_l_shape_places_five_modules() {
        let mut registry = ComponentRegistry::default();
        let ids = Template::LShape.expand(&mut registry);
        assert_eq!(ids.len(), 5);

        let positions: Vec<_> = registry.modules().iter().map(|m| m.position).collect();
        assert_eq!(positions[2], Vec3::new(80.0, 0.0, 0.0));
        assert_eq!(positions[4], Vec3::new(0.0, 80.0, 0.0));
        assert!(registry.modules().iter().all(|m| m.boards.iter().count() == 5));
    }
}
