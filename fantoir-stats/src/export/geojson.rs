//! Export GeoJSON avec geozero (streaming)
//!
//! Sortie alternative au FlatGeobuf, lisible sans outillage géospatial.
//! Mêmes features et mêmes colonnes que l'export binaire.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;
use tracing::info;

use crate::export::{columns, Champ};
use crate::merge::CommuneEnrichie;

/// Écrit la table enrichie dans une FeatureCollection GeoJSON
pub fn export_geojson(communes: &[CommuneEnrichie], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    write!(writer, r#"{{"type":"FeatureCollection","features":["#)?;

    for (i, commune) in communes.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write_feature(&mut writer, commune)?;
    }

    write!(writer, "]}}")?;
    writer.flush()?;

    info!(
        communes = communes.len(),
        output = %output_path.display(),
        "Export GeoJSON terminé"
    );
    Ok(())
}

/// Écrit une feature: géométrie via geozero, colonnes dérivées en propriétés
fn write_feature<W: Write>(writer: &mut W, commune: &CommuneEnrichie) -> Result<()> {
    write!(writer, r#"{{"type":"Feature","geometry":"#)?;

    let mut geom_buf = Vec::new();
    let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
    commune.geometry.process_geom(&mut geom_writer)?;
    writer.write_all(&geom_buf)?;

    write!(writer, r#","properties":{{"#)?;
    for (i, (nom, champ)) in columns(commune).iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        match champ {
            Champ::Texte(s) => write!(
                writer,
                r#""{}":"{}""#,
                escape_json(nom),
                escape_json(s)
            )?,
            Champ::Entier(n) => write!(writer, r#""{}":{}"#, escape_json(nom), n)?,
            Champ::Reel(x) => write!(writer, r#""{}":{}"#, escape_json(nom), x)?,
            Champ::Drapeau(b) => write!(writer, r#""{}":{}"#, escape_json(nom), b)?,
        }
    }
    write!(writer, "}}}}")?;

    Ok(())
}

/// Échappe une chaîne pour JSON
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}
