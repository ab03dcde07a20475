//! Configuration du pipeline d'analyse
//!
//! Tous les paramètres réglables sont ici: aucun seuil ni liste suivie n'est
//! caché en constante dans les modules d'analyse.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Types de voie suivis par défaut lors de la fusion géométrique
pub const DEFAULT_TYPES: &[&str] = &[
    "Allee",
    "Avenue",
    "Boulevard",
    "Chemin",
    "Cite",
    "Cours",
    "Levee",
    "Place",
    "Promenade",
    "Quai",
    "Route",
    "Rue",
    "Square",
    "Villa",
];

/// Mots recherchés par défaut dans les libellés de voie
pub const DEFAULT_MOTS: &[&str] = &["mouette", "vigne", "chataign", "paris"];

/// Mode de classement des communes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RankMode {
    /// Par part du type de voie dans la commune
    #[default]
    Pourcentage,
    /// Par nombre brut de voies du type
    Compte,
}

/// Noms des propriétés lues dans la source géométrique
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeometryFields {
    pub nom: String,
    pub insee: String,
    pub population: String,
}

impl Default for GeometryFields {
    fn default() -> Self {
        // Schéma des contours IGN Admin Express
        Self {
            nom: "NOM".to_string(),
            insee: "INSEE_COM".to_string(),
            population: "POPULATION".to_string(),
        }
    }
}

/// Paramètres de l'analyse et de la fusion
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    /// Type de voie cible du classement
    pub type_voie: String,

    /// Nombre de communes affichées dans le classement
    pub nb_top: usize,

    /// Mode de classement
    pub mode: RankMode,

    /// Nombre minimal de voies pour qu'une commune soit classée
    pub min_voies: u64,

    /// Types de voie suivis lors de la fusion géométrique
    pub types_suivis: Vec<String>,

    /// Mots recherchés dans les libellés de voie
    pub mots_suivis: Vec<String>,

    /// Propriétés lues dans la source géométrique
    pub geometrie: GeometryFields,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            type_voie: "Avenue".to_string(),
            nb_top: 10,
            mode: RankMode::default(),
            min_voies: 10,
            types_suivis: DEFAULT_TYPES.iter().map(|s| s.to_string()).collect(),
            mots_suivis: DEFAULT_MOTS.iter().map(|s| s.to_string()).collect(),
            geometrie: GeometryFields::default(),
        }
    }
}

impl Options {
    /// Charge des options depuis un fichier JSON
    ///
    /// Les champs absents prennent leur valeur par défaut.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }
}
