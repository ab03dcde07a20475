//! Parser du fichier des communes
//!
//! Chaque enregistrement décrit une commune: le code INSEE est la
//! concaténation du département (octets 0..2) et du code commune
//! (octets 3..6), le nom occupe les octets 11..33.

use std::path::Path;

use tracing::debug;

use crate::parser::{field, lines};
use crate::types::CommuneIndex;
use crate::FantoirError;

/// Largeur minimale d'un enregistrement commune (le nom se termine à l'octet 33)
const MIN_WIDTH: usize = 33;

/// Parse le fichier des communes et construit le référentiel INSEE vers nom
pub fn parse_communes(path: &Path) -> Result<CommuneIndex, FantoirError> {
    let data = std::fs::read(path)?;
    let index = parse_communes_bytes(&data)?;
    debug!(communes = index.len(), "Référentiel communes chargé");

    Ok(index)
}

/// Parse un contenu déjà chargé en mémoire
///
/// Une ligne trop courte interrompt le chargement: aucun référentiel
/// partiel n'est retourné.
pub fn parse_communes_bytes(data: &[u8]) -> Result<CommuneIndex, FantoirError> {
    let mut index = CommuneIndex::new();

    for (line_no, line) in lines(data) {
        if line.len() < MIN_WIDTH {
            return Err(FantoirError::malformed(
                line_no,
                format!(
                    "commune record is {} bytes, expected at least {}",
                    line.len(),
                    MIN_WIDTH
                ),
            ));
        }

        let insee = format!("{}{}", field(line, 0, 2), field(line, 3, 6));
        let nom = field(line, 11, 33);

        // Dernier gagnant si un code apparaît deux fois
        index.insert(insee, nom);
    }

    Ok(index)
}
