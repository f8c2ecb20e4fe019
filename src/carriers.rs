//! Carrier display-name to provider carrier-code registry.

use std::collections::HashMap;

use once_cell::sync::Lazy;

const BUNDLED: &str = include_str!("../data/carriers.json");

// Lazy gives the one-load guarantee for concurrent first use; afterwards the
// table is immutable.
static BUNDLED_REGISTRY: Lazy<CarrierRegistry> = Lazy::new(|| {
    CarrierRegistry::from_json(BUNDLED)
        .expect("bundled carrier dataset is malformed; the crate was packaged wrong")
});

/// Immutable map from carrier display name to the provider's carrier code.
///
/// Lookups are case-insensitive exact matches; there is no fuzzy or prefix
/// matching. Built once from the bundled dataset (or caller-supplied JSON)
/// and never mutated.
#[derive(Debug)]
pub struct CarrierRegistry {
    names: Vec<String>,
    by_name: HashMap<String, String>,
}

impl CarrierRegistry {
    /// The registry built from the dataset shipped with the crate. Loaded on
    /// first use; a malformed bundle is a packaging defect and panics.
    pub fn bundled() -> &'static CarrierRegistry {
        &BUNDLED_REGISTRY
    }

    /// Build a registry from a flat JSON object of display name → code.
    pub fn from_json(json: &str) -> Result<CarrierRegistry, serde_json::Error> {
        let table: HashMap<String, String> = serde_json::from_str(json)?;
        let mut names: Vec<String> = table.keys().cloned().collect();
        names.sort();
        let by_name = table
            .into_iter()
            .map(|(name, code)| (name.to_lowercase(), code))
            .collect();
        Ok(CarrierRegistry { names, by_name })
    }

    /// Resolve a display name to a carrier code; `None` when unknown.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name.get(&name.to_lowercase()).map(String::as_str)
    }

    /// All known display names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Display names supported by the bundled dataset.
pub fn carrier_names() -> impl Iterator<Item = &'static str> {
    CarrierRegistry::bundled().names()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_loads_and_is_nonempty() {
        assert!(carrier_names().count() > 0);
    }

    #[test]
    fn resolve_is_case_insensitive_for_every_name() {
        let registry = CarrierRegistry::bundled();
        for name in registry.names() {
            let code = registry.resolve(name).expect("listed name resolves");
            assert_eq!(registry.resolve(&name.to_uppercase()), Some(code));
            assert_eq!(registry.resolve(&name.to_lowercase()), Some(code));
        }
    }

    #[test]
    fn resolve_known_aliases() {
        let registry = CarrierRegistry::bundled();
        assert_eq!(registry.resolve("SF"), Some("shunfeng"));
        assert_eq!(registry.resolve("sf"), Some("shunfeng"));
        assert_eq!(registry.resolve("Sf"), Some("shunfeng"));
        assert_eq!(registry.resolve("顺丰速运"), Some("shunfeng"));
    }

    #[test]
    fn resolve_unknown_is_none() {
        assert_eq!(CarrierRegistry::bundled().resolve("not-a-real-carrier"), None);
    }

    #[test]
    fn resolve_is_idempotent() {
        let registry = CarrierRegistry::bundled();
        assert_eq!(registry.resolve("EMS"), registry.resolve("EMS"));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(CarrierRegistry::from_json("not json").is_err());
        assert!(CarrierRegistry::from_json(r#"["array","not","object"]"#).is_err());
    }

    #[test]
    fn from_json_builds_injectable_registry() {
        let registry = CarrierRegistry::from_json(r#"{"Acme Express":"acme"}"#).unwrap();
        assert_eq!(registry.resolve("acme express"), Some("acme"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Acme Express"]);
    }
}
