#[cfg(test)]
mod tests {
    use crate::collection::{normalize, Named, NamedCollection};
    use crate::error::UniverseError;
    use proptest::prelude::*;
    use std::sync::Arc;

    #[derive(Debug, serde::Serialize)]
    struct Moon {
        name: String,
    }

    impl Named for Moon {
        fn name(&self) -> &str {
            &self.name
        }
    }

    fn moon(name: &str) -> Arc<Moon> {
        Arc::new(Moon {
            name: name.to_string(),
        })
    }

    fn moons(names: &[&str]) -> NamedCollection<Moon> {
        NamedCollection::from_named("moons", names.iter().map(|n| moon(n))).unwrap()
    }

    /// Test identifier normalization of canonical keys
    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Sun"), "sun");
        assert_eq!(normalize("Solar System"), "solar_system");
        assert_eq!(normalize("Alpha Centauri A"), "alpha_centauri_a");
        assert_eq!(normalize("HD-189733_b"), "hd_189733_b");
    }

    /// Test that key and name lookup resolve to the same record
    #[test]
    fn test_key_and_name_lookup_share_identity() {
        let collection = moons(&["Io", "Europa", "Ganymede"]);
        let by_key = collection.get_by_key("Europa").unwrap();
        let by_name = collection.get_by_name("europa").unwrap();
        assert!(Arc::ptr_eq(by_key, by_name));
        assert!(Arc::ptr_eq(by_key, collection.get_by_name("Europa").unwrap()));
    }

    /// Test that a key starting with a digit keeps it in its identifier
    #[test]
    fn test_digit_leading_key() {
        let collection = moons(&["61 Cygni A", "Io"]);
        let by_key = collection.get_by_key("61 Cygni A").unwrap();
        assert!(Arc::ptr_eq(by_key, collection.get_by_name("61_cygni_a").unwrap()));
        assert!(Arc::ptr_eq(by_key, collection.get_by_name("61 Cygni A").unwrap()));
        assert_eq!(
            collection.identifiers().collect::<Vec<_>>(),
            vec!["61_cygni_a".to_string(), "io".to_string()]
        );
    }

    /// Test that exact-key lookup is case-sensitive
    #[test]
    fn test_key_lookup_is_exact() {
        let collection = moons(&["Io"]);
        assert_eq!(
            collection.get_by_key("io").unwrap_err(),
            UniverseError::KeyNotFound {
                collection: "moons".into(),
                key: "io".into()
            }
        );
    }

    /// Test missing identifier lookup
    #[test]
    fn test_name_lookup_missing() {
        let collection = moons(&["Io"]);
        assert!(matches!(
            collection.get_by_name("callisto"),
            Err(UniverseError::AttributeNotFound { ref attribute, .. }) if attribute == "callisto"
        ));
    }

    /// Test that insertion order is preserved
    #[test]
    fn test_iteration_order() {
        let collection = moons(&["Io", "Europa", "Ganymede", "Callisto"]);
        let keys: Vec<&str> = collection.keys().collect();
        assert_eq!(keys, ["Io", "Europa", "Ganymede", "Callisto"]);

        let names: Vec<&str> = collection.iter().map(|(_, m)| m.name()).collect();
        assert_eq!(names, keys);
        assert_eq!(collection.len(), 4);
        assert!(!collection.is_empty());
    }

    /// Test that keys differing only in case are rejected
    #[test]
    fn test_identifier_collision_fails_construction() {
        let result = NamedCollection::from_named("moons", vec![moon("Io"), moon("IO")]);
        assert_eq!(
            result.unwrap_err(),
            UniverseError::NameCollision {
                collection: "moons".into(),
                identifier: "io".into(),
                existing: "Io".into(),
                incoming: "IO".into(),
            }
        );
    }

    /// Test that a repeated key is rejected
    #[test]
    fn test_duplicate_key_fails_construction() {
        let result = NamedCollection::from_named("moons", vec![moon("Io"), moon("Io")]);
        assert!(matches!(result, Err(UniverseError::DuplicateName { .. })));
    }

    /// Test that every write operation fails
    #[test]
    fn test_mutation_is_rejected() {
        let collection = moons(&["Io"]);
        let immutable = |operation| UniverseError::ImmutableCollection {
            collection: "moons".into(),
            operation,
        };

        assert_eq!(collection.insert("Europa", moon("Europa")).unwrap_err(), immutable("insert"));
        assert_eq!(collection.remove("Io").unwrap_err(), immutable("remove"));
        assert_eq!(collection.update("Io", moon("Io")).unwrap_err(), immutable("update"));
        assert_eq!(collection.len(), 1);
    }

    /// Test that clones share records
    #[test]
    fn test_clone_shares_records() {
        let collection = moons(&["Io"]);
        let copy = collection.clone();
        assert!(Arc::ptr_eq(
            collection.get_by_key("Io").unwrap(),
            copy.get_by_key("Io").unwrap()
        ));
    }

    /// Test serialization as an ordered map
    #[test]
    fn test_serialize_as_map() {
        let collection = moons(&["Io", "Europa"]);
        let json = serde_json::to_string(&collection).unwrap();
        assert_eq!(json, r#"{"Io":{"name":"Io"},"Europa":{"name":"Europa"}}"#);
    }

    proptest! {
        #[test]
        fn test_every_key_reachable_by_normalized_name(
            names in prop::collection::hash_set("[A-Za-z][a-z]{0,7}( [A-Z][a-z]{0,5})?", 1..12)
        ) {
            let mut seen = std::collections::HashSet::new();
            let names: Vec<String> = names
                .into_iter()
                .filter(|n| seen.insert(normalize(n)))
                .collect();
            let collection =
                NamedCollection::from_named("bodies", names.iter().map(|n| moon(n))).unwrap();

            for key in &names {
                let by_key = collection.get_by_key(key).unwrap();
                let by_name = collection.get_by_name(&normalize(key)).unwrap();
                prop_assert!(Arc::ptr_eq(by_key, by_name));
            }
        }

        #[test]
        fn test_construction_is_deterministic(
            names in prop::collection::vec("[a-z]{1,8}", 0..16)
        ) {
            let mut seen = std::collections::HashSet::new();
            let names: Vec<String> = names.into_iter().filter(|n| seen.insert(n.clone())).collect();
            let a = NamedCollection::from_named("a", names.iter().map(|n| moon(n))).unwrap();
            let b = NamedCollection::from_named("b", names.iter().map(|n| moon(n))).unwrap();
            prop_assert_eq!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
        }
    }
}
