//! Property schemas per category of body.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::units::Dimension;

/// Category of a celestial body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
}

const STAR_QUANTITIES: &[(&str, Dimension)] = &[
    ("mass", Dimension::Mass),
    ("radius", Dimension::Length),
    ("volumetric_mean_radius", Dimension::Length),
];

const PLANET_QUANTITIES: &[(&str, Dimension)] = &[
    ("mass", Dimension::Mass),
    ("radius", Dimension::Length),
    ("equatorial_radius", Dimension::Length),
    ("polar_radius", Dimension::Length),
    ("volumetric_mean_radius", Dimension::Length),
    ("semimajor_axis", Dimension::Length),
    ("sidereal_orbit_period", Dimension::Time),
    ("mean_orbital_velocity", Dimension::Speed),
];

const STAR_TEXT: &[&str] = &["spectral_type"];
const PLANET_TEXT: &[&str] = &[];

const STAR_FALLBACKS: &[(&str, &[&str])] = &[("radius", &["volumetric_mean_radius"])];
const PLANET_FALLBACKS: &[(&str, &[&str])] =
    &[("radius", &["equatorial_radius", "volumetric_mean_radius"])];

impl BodyKind {
    pub const ALL: [BodyKind; 2] = [BodyKind::Star, BodyKind::Planet];

    /// Plural collection label, e.g. `"planets"`.
    pub fn category(self) -> &'static str {
        match self {
            BodyKind::Star => "stars",
            BodyKind::Planet => "planets",
        }
    }

    /// Declared quantity properties with their expected dimension.
    pub fn quantity_properties(self) -> &'static [(&'static str, Dimension)] {
        match self {
            BodyKind::Star => STAR_QUANTITIES,
            BodyKind::Planet => PLANET_QUANTITIES,
        }
    }

    pub fn text_properties(self) -> &'static [&'static str] {
        match self {
            BodyKind::Star => STAR_TEXT,
            BodyKind::Planet => PLANET_TEXT,
        }
    }

    /// Expected dimension of `property`, or `None` if it is not a declared quantity.
    pub fn expected_dimension(self, property: &str) -> Option<Dimension> {
        self.quantity_properties()
            .iter()
            .find(|(name, _)| *name == property)
            .map(|&(_, dimension)| dimension)
    }

    pub fn accepts_text(self, property: &str) -> bool {
        self.text_properties().contains(&property)
    }

    /// Properties consulted, in order, when `property` itself is absent.
    pub fn fallbacks(self, property: &str) -> &'static [&'static str] {
        let table = match self {
            BodyKind::Star => STAR_FALLBACKS,
            BodyKind::Planet => PLANET_FALLBACKS,
        };
        table
            .iter()
            .find(|(name, _)| *name == property)
            .map(|&(_, chain)| chain)
            .unwrap_or(&[])
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BodyKind::Star => "Star",
            BodyKind::Planet => "Planet",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_radius_falls_back_to_equatorial_then_mean() {
        assert_eq!(
            BodyKind::Planet.fallbacks("radius"),
            &["equatorial_radius", "volumetric_mean_radius"]
        );
        assert!(BodyKind::Planet.fallbacks("mass").is_empty());
    }

    #[test]
    fn schemas_declare_dimensions() {
        assert_eq!(BodyKind::Star.expected_dimension("mass"), Some(Dimension::Mass));
        assert_eq!(
            BodyKind::Planet.expected_dimension("mean_orbital_velocity"),
            Some(Dimension::Speed)
        );
        assert_eq!(BodyKind::Star.expected_dimension("semimajor_axis"), None);
        assert!(BodyKind::Star.accepts_text("spectral_type"));
        assert!(!BodyKind::Planet.accepts_text("spectral_type"));
    }

    #[test]
    fn fallback_targets_are_declared() {
        for kind in BodyKind::ALL {
            for (property, _) in kind.quantity_properties() {
                for target in kind.fallbacks(property) {
                    assert_eq!(kind.expected_dimension(target), kind.expected_dimension(property));
                }
            }
        }
    }
}
