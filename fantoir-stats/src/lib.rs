//! # fantoir-stats
//!
//! Statistiques des types de voie du référentiel FANTOIR par commune:
//! distribution, classements, fusion sur les contours communaux et export
//! géospatial.
//!
//! ## Features
//!
//! - Classement des communes par part ou nombre de voies d'un type donné
//! - Position nationale d'une commune ("top X%")
//! - Fusion des agrégats sur des contours GeoJSON, jointures explicites
//! - Export FlatGeobuf ou GeoJSON
//! - Séries de données pour camembert et nuage de points
//!
//! ## Usage CLI
//!
//! ```bash
//! # Classement des communes par part d'avenues
//! fantoir-stats rank --voies ./fantoir/voies.txt --communes ./fantoir/communes.txt
//!
//! # Fusion et export FlatGeobuf
//! fantoir-stats export --geometry ./communes.geojson --output ./communes.fgb
//! ```

pub mod analyse;
pub mod chart;
pub mod config;
pub mod export;
pub mod geometry;
pub mod merge;
pub mod report;

pub use analyse::{analyse_type_voie, TypeVoieRow};
pub use config::{Options, RankMode};
pub use merge::{merge_voies_communes, CommuneEnrichie};
