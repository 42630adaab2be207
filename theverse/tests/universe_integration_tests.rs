//! Integration tests for the embedded universe.

use std::sync::Arc;

use approx::assert_relative_eq;
use theverse::units::{Dimension, Unit};
use theverse::{Body, Quantity, Universe, UniverseError};

fn all_collections(universe: &Universe) -> Vec<&theverse::NamedCollection<Body>> {
    let mut collections = vec![universe.stars(), universe.planets(), universe.bodies()];
    for (_, system) in universe.planetary_systems() {
        collections.push(system.stars());
        collections.push(system.planets());
    }
    collections
}

#[test]
fn test_key_and_name_lookup_are_identical() {
    let universe = theverse::universe().unwrap();
    for collection in all_collections(universe) {
        for (key, record) in collection.iter() {
            let by_key = collection.get_by_key(key).unwrap();
            let by_name = collection.get_by_name(&key.to_lowercase()).unwrap();
            assert!(Arc::ptr_eq(by_key, by_name), "{} in {}", key, collection.label());
            assert!(Arc::ptr_eq(record, by_key));
        }
    }
}

#[test]
fn test_primaries_belong_to_the_universe() {
    let universe = theverse::universe().unwrap();
    for (_, body) in universe.bodies() {
        if let Some(primary) = body.primary() {
            let registered = universe.bodies().get_by_key(primary.name()).unwrap();
            assert!(Arc::ptr_eq(&primary, registered));
        }
    }
}

#[test]
fn test_construction_is_deterministic() {
    let first = Universe::embedded().unwrap();
    let second = Universe::embedded().unwrap();
    assert_eq!(
        first.planets().keys().collect::<Vec<_>>(),
        second.planets().keys().collect::<Vec<_>>()
    );
    assert_eq!(
        first.stars().keys().collect::<Vec<_>>(),
        second.stars().keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_missing_planet_is_key_not_found() {
    let universe = theverse::universe().unwrap();
    assert_eq!(
        universe.planets().get_by_key("Pluto").unwrap_err(),
        UniverseError::KeyNotFound {
            collection: "planets".into(),
            key: "Pluto".into()
        }
    );
}

#[test]
fn test_collections_reject_mutation() {
    let universe = theverse::universe().unwrap();
    let earth = theverse::earth().unwrap().clone();

    assert!(matches!(
        universe.planets().insert("Pluto", earth.clone()),
        Err(UniverseError::ImmutableCollection { .. })
    ));
    assert!(matches!(
        universe.planets().remove("Earth"),
        Err(UniverseError::ImmutableCollection { .. })
    ));
    assert!(matches!(
        universe.planets().update("Earth", earth),
        Err(UniverseError::ImmutableCollection { .. })
    ));
    assert!(universe.planets().contains_key("Earth"));
    assert!(!universe.planets().contains_key("Pluto"));
}

#[test]
fn test_mass_plus_length_is_dimension_mismatch() {
    let earth = theverse::earth().unwrap();
    let err = earth
        .mass()
        .unwrap()
        .checked_add(earth.equatorial_radius().unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        UniverseError::DimensionMismatch {
            operation: "add",
            lhs: Dimension::Mass,
            rhs: Dimension::Length,
        }
    );
}

#[test]
fn test_earth_mass_is_cited() {
    let universe = theverse::universe().unwrap();
    let mass = universe.planets().get_by_key("Earth").unwrap().mass().unwrap();

    assert_eq!(*mass, Quantity::new(5.9724e24, Unit::Kilogram));
    assert_eq!(mass.name(), Some("mass"));
    assert_eq!(mass.object(), Some("Earth"));
    assert_eq!(
        mass.reference_url(),
        Some("https://nssdc.gsfc.nasa.gov/planetary/factsheet/earthfact.html")
    );
    assert!(mass.reference().is_some_and(|r| r.contains("Earth Fact Sheet")));
}

#[test]
fn test_earth_orbits_the_sun() {
    let universe = theverse::universe().unwrap();
    let earth = universe.planets().get_by_name("earth").unwrap();
    let sun = earth.primary().unwrap();

    assert_eq!(sun.name(), "Sun");
    assert!(Arc::ptr_eq(&sun, theverse::sun().unwrap()));
    assert!(Arc::ptr_eq(&earth.star().unwrap(), &sun));
}

#[test]
fn test_planets_in_orbital_order() {
    let universe = theverse::universe().unwrap();
    let names: Vec<&str> = universe.planets().keys().collect();
    assert_eq!(&names[..3], ["Mercury", "Venus", "Earth"]);

    let axes: Vec<f64> = universe
        .planets()
        .values()
        .map(|p| p.semimajor_axis().unwrap().value())
        .collect();
    assert!(axes.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_solar_system_shares_records() {
    let universe = theverse::universe().unwrap();
    let solar_system = theverse::solar_system().unwrap();

    assert!(Arc::ptr_eq(
        solar_system,
        universe.planetary_systems().get_by_name("solar_system").unwrap()
    ));
    assert_eq!(
        solar_system.planets().keys().collect::<Vec<_>>(),
        universe.planets().keys().collect::<Vec<_>>()
    );
    for (key, planet) in solar_system.planets() {
        assert!(Arc::ptr_eq(planet, universe.planets().get_by_key(key).unwrap()));
    }
    assert!(Arc::ptr_eq(solar_system.primary().unwrap(), theverse::sun().unwrap()));
}

#[test]
fn test_back_references() {
    let sun = theverse::sun().unwrap();
    let earth = theverse::earth().unwrap();

    assert!(Arc::ptr_eq(&earth.planetary_system().unwrap(), theverse::solar_system().unwrap()));
    assert_eq!(sun.satellites().len(), 8);
    assert!(Arc::ptr_eq(sun.satellites().get_by_name("earth").unwrap(), earth));
    assert!(earth.satellites().is_empty());
}

#[test]
fn test_earth_properties() {
    let earth = theverse::earth().unwrap();

    assert_relative_eq!(earth.radius().unwrap().to(Unit::Kilometer).unwrap(), 6378.137, epsilon = 1e-9);
    assert_relative_eq!(earth.polar_radius().unwrap().to(Unit::Kilometer).unwrap(), 6356.752, epsilon = 1e-9);
    assert_relative_eq!(
        earth.volumetric_mean_radius().unwrap().to(Unit::Kilometer).unwrap(),
        6371.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        earth.semimajor_axis().unwrap().to(Unit::AstronomicalUnit).unwrap(),
        1.0,
        epsilon = 1e-3
    );
    assert_relative_eq!(
        earth.sidereal_orbit_period().unwrap().to(Unit::JulianYear).unwrap(),
        1.0,
        epsilon = 1e-4
    );
    assert_relative_eq!(
        earth.mean_orbital_velocity().unwrap().to(Unit::KilometerPerSecond).unwrap(),
        29.78,
        epsilon = 1e-9
    );
    assert!(matches!(
        earth.get("albedo"),
        Err(UniverseError::AttributeNotFound { .. })
    ));
}

#[test]
fn test_sun_properties() {
    let sun = theverse::sun().unwrap();

    assert_eq!(sun.spectral_type().unwrap(), "G2 V");
    assert_relative_eq!(sun.mass().unwrap().to(Unit::SolarMass).unwrap(), 1.0, epsilon = 1e-3);
    assert_relative_eq!(sun.radius().unwrap().to(Unit::SolarRadius).unwrap(), 1.0, epsilon = 1e-3);
    assert!(sun.primary().is_none());
}

#[test]
fn test_derived_quantities() {
    let earth = theverse::earth().unwrap();

    // Circumference over period should be close to the tabulated mean velocity.
    let circumference = earth.semimajor_axis().unwrap().scale(2.0 * std::f64::consts::PI);
    let speed = circumference.checked_div(earth.sidereal_orbit_period().unwrap()).unwrap();
    assert_eq!(speed.dimension(), Dimension::Speed);
    assert_eq!(speed.reference(), None);
    assert_relative_eq!(
        speed.to(Unit::KilometerPerSecond).unwrap(),
        earth.mean_orbital_velocity().unwrap().to(Unit::KilometerPerSecond).unwrap(),
        max_relative = 1e-3
    );
}
