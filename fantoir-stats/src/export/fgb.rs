//! Export FlatGeobuf via geozero
//!
//! Une feature par commune enrichie: géométrie plus colonnes dérivées, dans
//! le système de coordonnées de la source (aucune reprojection).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use flatgeobuf::{ColumnType, FgbWriter, GeometryType};
use geozero::ColumnValue;
use geozero::PropertyProcessor;
use tracing::{info, warn};

use crate::export::{columns, Champ};
use crate::merge::CommuneEnrichie;

/// Écrit la table enrichie dans un fichier FlatGeobuf
pub fn export_fgb(communes: &[CommuneEnrichie], output_path: &Path) -> Result<()> {
    let Some(premiere) = communes.first() else {
        anyhow::bail!("Aucune commune à exporter");
    };

    // Les contours mélangent Polygon et MultiPolygon
    let mut fgb = FgbWriter::create("communes", GeometryType::Unknown)
        .context("Failed to create FlatGeobuf writer")?;

    // Le schéma des colonnes est identique pour toutes les communes
    for (nom, champ) in columns(premiere) {
        let col_type = match champ {
            Champ::Texte(_) => ColumnType::String,
            Champ::Entier(_) => ColumnType::ULong,
            Champ::Reel(_) => ColumnType::Double,
            Champ::Drapeau(_) => ColumnType::Bool,
        };
        fgb.add_column(&nom, col_type, |_, _| {});
    }

    for commune in communes {
        fgb.add_feature_geom(commune.geometry.clone(), |feature| {
            for (i, (nom, champ)) in columns(commune).iter().enumerate() {
                let ecrit = match champ {
                    Champ::Texte(s) => feature.property(i, nom, &ColumnValue::String(s.as_str())),
                    Champ::Entier(n) => feature.property(i, nom, &ColumnValue::ULong(*n)),
                    Champ::Reel(x) => feature.property(i, nom, &ColumnValue::Double(*x)),
                    Champ::Drapeau(b) => feature.property(i, nom, &ColumnValue::Bool(*b)),
                };
                if let Err(e) = ecrit {
                    warn!(colonne = %nom, erreur = %e, "Colonne non écrite");
                }
            }
        })
        .context("Failed to append feature")?;
    }

    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    fgb.write(&mut writer).context("Failed to write FlatGeobuf")?;

    info!(
        communes = communes.len(),
        output = %output_path.display(),
        "Export FlatGeobuf terminé"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::commune_fixture;

    #[test]
    fn test_export_fgb() {
        let communes = vec![commune_fixture()];
        let output_path = std::env::temp_dir().join(format!(
            "fantoir_stats_test_{}.fgb",
            std::process::id()
        ));

        export_fgb(&communes, &output_path).unwrap();

        // Nombre magique FlatGeobuf en tête de fichier
        let content = std::fs::read(&output_path).unwrap();
        assert!(content.len() > 8);
        assert_eq!(&content[..3], &b"fgb"[..]);

        std::fs::remove_file(output_path).ok();
    }

    #[test]
    fn test_export_empty_fails() {
        let output_path = std::env::temp_dir().join("fantoir_stats_empty.fgb");
        let result = export_fgb(&[], &output_path);

        assert!(result.is_err());
    }
}
