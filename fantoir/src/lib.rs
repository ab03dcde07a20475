//! # fantoir
//!
//! Parser pour le format FANTOIR (Fichier ANnuaire TOpographique Initialisé
//! Réduit) publié par la DGFiP: le référentiel national des voies.
//!
//! ## Features
//!
//! - Parsing des enregistrements à largeur fixe (communes et voies)
//! - Décodage ISO-8859-15 (Latin-9) des extraits
//! - Résolution des natures de voie via une table embarquée ou fournie
//! - Erreurs fatales explicites: aucune collection partielle n'est retournée
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fantoir::{parse_communes, parse_voies, TypeVoieLookup};
//! use std::path::Path;
//!
//! let communes = parse_communes(Path::new("fantoir/communes.txt"))?;
//! let types = TypeVoieLookup::embedded()?;
//! let voies = parse_voies(Path::new("fantoir/voies.txt"), &communes, &types)?;
//!
//! println!("{} voies dans {} communes", voies.len(), communes.len());
//! ```

pub mod error;
pub mod lookup;
pub mod parser;
pub mod types;

pub use error::FantoirError;
pub use lookup::TypeVoieLookup;
pub use parser::communes::{parse_communes, parse_communes_bytes};
pub use parser::voies::{parse_voies, parse_voies_bytes};
pub use types::{CommuneIndex, Voie};
