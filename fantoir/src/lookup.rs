//! Table de correspondance des natures de voie
//!
//! Le fichier des voies encode la nature de chaque voie sur un code court
//! ("AV", "BD", "CHE"...). La table associe chaque code à un libellé en
//! minuscules ("avenue", "boulevard", "chemin"). Elle est chargée une fois
//! et reste immuable.

use std::collections::HashMap;
use std::path::Path;

use crate::FantoirError;

/// Correspondance code FANTOIR vers libellé de nature de voie
#[derive(Debug, Clone)]
pub struct TypeVoieLookup {
    types: HashMap<String, String>,
}

impl TypeVoieLookup {
    /// Table embarquée couvrant les natures de voie FANTOIR courantes
    pub fn embedded() -> Result<Self, FantoirError> {
        Self::from_json("<embedded>", include_str!("presets/types_voie.json"))
    }

    /// Charge une table depuis un fichier JSON `{"AV": "avenue", ...}`
    pub fn from_path(path: &Path) -> Result<Self, FantoirError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FantoirError::LookupUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_json(&path.display().to_string(), &content)
    }

    fn from_json(origin: &str, json: &str) -> Result<Self, FantoirError> {
        let types: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| FantoirError::LookupUnreadable {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { types })
    }

    /// Libellé (minuscules) pour un code, ou `None` si le code est inconnu
    ///
    /// Un code inconnu est signalé au parsing de la voie concernée, jamais
    /// remplacé par un libellé par défaut.
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.types.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_lookup() {
        let lookup = TypeVoieLookup::embedded().unwrap();

        assert_eq!(lookup.resolve("AV"), Some("avenue"));
        assert_eq!(lookup.resolve("RUE"), Some("rue"));
        assert_eq!(lookup.resolve("BD"), Some("boulevard"));
        assert_eq!(lookup.resolve("ZZZ"), None);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = TypeVoieLookup::from_json("<test>", "pas du json");
        assert!(matches!(
            result,
            Err(FantoirError::LookupUnreadable { .. })
        ));
    }

    #[test]
    fn test_from_path_missing() {
        let result = TypeVoieLookup::from_path(Path::new("/nonexistent/types.json"));
        assert!(matches!(
            result,
            Err(FantoirError::LookupUnreadable { .. })
        ));
    }
}
