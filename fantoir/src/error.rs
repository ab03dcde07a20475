//! Types d'erreurs pour le crate fantoir

use thiserror::Error;

/// Erreurs pouvant survenir lors du parsing FANTOIR
#[derive(Debug, Error)]
pub enum FantoirError {
    /// Erreur d'I/O lors de la lecture d'un fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Enregistrement trop court ou champ illisible
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Code de nature de voie absent de la table de correspondance
    #[error("Unknown way type code {code:?} at line {line}")]
    UnknownTypeVoie { line: usize, code: String },

    /// Voie référençant une commune absente du référentiel
    #[error("Unknown commune {insee} at line {line}")]
    UnknownCommune { line: usize, insee: String },

    /// Table de correspondance des natures de voie illisible
    #[error("Cannot read way type lookup {path}: {reason}")]
    LookupUnreadable { path: String, reason: String },
}

impl FantoirError {
    /// Crée une erreur d'enregistrement malformé avec contexte
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
