//! Parser du fichier des voies
//!
//! Chaque enregistrement décrit une voie: code INSEE (octets 0..2 et 3..6),
//! code de nature de voie (octets 11..15), libellé (octets 15..33) et mot
//! directeur en fin d'enregistrement (octets 112 et suivants).

use std::path::Path;

use tracing::debug;

use crate::lookup::TypeVoieLookup;
use crate::parser::{field, lines};
use crate::types::{CommuneIndex, Voie};
use crate::FantoirError;

/// Largeur minimale d'un enregistrement voie (le libellé se termine à l'octet 33)
const MIN_WIDTH: usize = 33;

/// Position du mot directeur en fin d'enregistrement
const MOT_OFFSET: usize = 112;

/// Parse le fichier des voies
pub fn parse_voies(
    path: &Path,
    communes: &CommuneIndex,
    types: &TypeVoieLookup,
) -> Result<Vec<Voie>, FantoirError> {
    let data = std::fs::read(path)?;
    let voies = parse_voies_bytes(&data, communes, types)?;
    debug!(voies = voies.len(), "Fichier des voies parsé");

    Ok(voies)
}

/// Parse un contenu déjà chargé en mémoire
///
/// L'ordre des enregistrements du fichier est conservé. Toute ligne trop
/// courte, tout code de nature inconnu et toute commune absente du
/// référentiel interrompent le parsing: une collection partielle fausserait
/// silencieusement les statistiques en aval.
pub fn parse_voies_bytes(
    data: &[u8],
    communes: &CommuneIndex,
    types: &TypeVoieLookup,
) -> Result<Vec<Voie>, FantoirError> {
    let mut voies = Vec::new();

    for (line_no, line) in lines(data) {
        if line.len() < MIN_WIDTH {
            return Err(FantoirError::malformed(
                line_no,
                format!(
                    "voie record is {} bytes, expected at least {}",
                    line.len(),
                    MIN_WIDTH
                ),
            ));
        }

        let code_type = field(line, 11, 15);
        let type_voie = match types.resolve(&code_type) {
            Some(libelle) => capitalize(libelle),
            None => {
                return Err(FantoirError::UnknownTypeVoie {
                    line: line_no,
                    code: code_type,
                })
            }
        };

        let insee = format!("{}{}", field(line, 0, 2), field(line, 3, 6));
        let commune = match communes.get(&insee) {
            Some(nom) => nom.to_string(),
            None => {
                return Err(FantoirError::UnknownCommune {
                    line: line_no,
                    insee,
                })
            }
        };

        voies.push(Voie {
            insee,
            commune,
            type_voie,
            nom_voie: field(line, 15, 33),
            mot_voie: field(line, MOT_OFFSET, line.len()),
        });
    }

    Ok(voies)
}

/// Met en majuscule la première lettre d'un libellé ("avenue" devient "Avenue")
pub fn capitalize(libelle: &str) -> String {
    let mut chars = libelle.chars();
    match chars.next() {
        Some(premier) => premier.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
