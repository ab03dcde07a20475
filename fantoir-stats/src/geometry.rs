//! Chargement de la source géométrique des contours communaux
//!
//! Adaptateur mince: une FeatureCollection GeoJSON est lue en mémoire et
//! réduite aux champs {insee, nom, population, geometry}. Les géométries ne
//! sont jamais modifiées, aucune reprojection n'est effectuée.

use std::path::Path;

use anyhow::{Context, Result};
use geo::Geometry;
use geojson::FeatureCollection;
use tracing::{debug, warn};

use crate::config::GeometryFields;

/// Contour d'une commune avec ses attributs
#[derive(Debug, Clone)]
pub struct CommuneGeometry {
    pub insee: String,
    pub nom: String,
    pub population: f64,
    pub geometry: Geometry,
}

/// Charge les contours communaux depuis une FeatureCollection GeoJSON
///
/// Les features sans code INSEE ou sans géométrie sont écartées avec un
/// warning: la source géométrique est externe, son incomplétude n'interrompt
/// pas l'analyse.
pub fn load_communes_geojson(path: &Path, fields: &GeometryFields) -> Result<Vec<CommuneGeometry>> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read geometry file: {}", path.display()))?;
    let collection: FeatureCollection = content
        .parse()
        .context("Failed to parse GeoJSON FeatureCollection")?;

    let mut communes = Vec::with_capacity(collection.features.len());

    for feature in collection.features {
        let Some(geom) = feature.geometry else {
            warn!("Feature sans géométrie, écartée");
            continue;
        };
        let geometry =
            Geometry::<f64>::try_from(geom).context("Unsupported GeoJSON geometry type")?;

        let insee = feature
            .properties
            .as_ref()
            .and_then(|p| p.get(&fields.insee))
            .and_then(string_prop);
        let Some(insee) = insee else {
            warn!(field = %fields.insee, "Feature sans code INSEE, écartée");
            continue;
        };

        let nom = feature
            .properties
            .as_ref()
            .and_then(|p| p.get(&fields.nom))
            .and_then(string_prop)
            .unwrap_or_default();

        let population = feature
            .properties
            .as_ref()
            .and_then(|p| p.get(&fields.population))
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0);

        communes.push(CommuneGeometry {
            insee,
            nom,
            population,
            geometry,
        });
    }

    debug!(communes = communes.len(), "Contours communaux chargés");
    Ok(communes)
}

fn string_prop(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
