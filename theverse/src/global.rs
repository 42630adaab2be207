//! Process-wide handle on the embedded dataset.
//!
//! The canonical universe is built on first access and shared read-only for the rest of
//! the process. A failed build is not cached, so every call reports the error.
//!
//! # Examples
//!
//! ```rust
//! let earth = theverse::earth()?;
//! let sun = earth.primary().expect("Earth orbits the Sun");
//! assert_eq!(sun.name(), "Sun");
//! # Ok::<(), theverse::UniverseError>(())
//! ```

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::body::Body;
use crate::error::UniverseResult;
use crate::system::PlanetarySystem;
use crate::universe::Universe;

/// Global universe instance initialized once
static UNIVERSE: OnceCell<Universe> = OnceCell::new();

/// Get the embedded universe, building it on first use.
///
/// # Errors
///
/// Returns the construction error if the embedded dataset fails to load.
pub fn universe() -> UniverseResult<&'static Universe> {
    UNIVERSE.get_or_try_init(Universe::embedded)
}

/// The Sun.
pub fn sun() -> UniverseResult<&'static Arc<Body>> {
    universe()?.stars().get_by_key("Sun")
}

/// The Earth.
pub fn earth() -> UniverseResult<&'static Arc<Body>> {
    universe()?.planets().get_by_key("Earth")
}

/// The Solar System.
pub fn solar_system() -> UniverseResult<&'static Arc<PlanetarySystem>> {
    universe()?.solar_system()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_is_built_once() {
        let first = universe().unwrap();
        let second = universe().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_shortcuts_share_records() {
        let universe = universe().unwrap();
        assert!(Arc::ptr_eq(sun().unwrap(), universe.stars().get_by_name("sun").unwrap()));
        assert!(Arc::ptr_eq(earth().unwrap(), universe.planets().get_by_name("earth").unwrap()));
        assert!(Arc::ptr_eq(
            earth().unwrap(),
            solar_system().unwrap().planets().get_by_key("Earth").unwrap()
        ));
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| universe().map(|u| u as *const Universe as usize)))
            .collect();
        let addresses: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}
