//! Séries de données pour les adaptateurs de rendu graphique
//!
//! Le rendu (camembert, nuage de points) est laissé à un outil externe; ce
//! module ne produit que les séries, sérialisables en JSON.

use std::collections::HashMap;

use serde::Serialize;

use fantoir::Voie;

use crate::analyse::group_by_insee;
use crate::geometry::CommuneGeometry;

/// Une part du camembert des types de voie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,

    /// Part à détacher visuellement (type mis en avant)
    pub pulled: bool,
}

/// Restriction du camembert: toute la collection, ou une seule commune
#[derive(Debug, Clone, Default)]
pub struct PieFilter {
    /// Par nom de commune (insensible à la casse)
    pub commune: Option<String>,

    /// Par code INSEE; ignoré si `commune` est renseigné
    pub insee: Option<String>,
}

/// Répartition des types de voie, une part par type
///
/// Les types marginaux (moins de 1% de la sélection) sont étiquetés "Autre"
/// mais gardent leur valeur propre. Les parts sont émises par libellé
/// croissant pour une sortie déterministe.
pub fn pie_type_voie(voies: &[Voie], filter: &PieFilter, type_mis_en_avant: &str) -> Vec<PieSlice> {
    let selection: Vec<&Voie> = match filter {
        PieFilter {
            commune: Some(nom), ..
        } => {
            let cible = nom.to_uppercase();
            voies.iter().filter(|v| v.commune == cible).collect()
        }
        PieFilter {
            insee: Some(insee), ..
        } => voies.iter().filter(|v| v.insee == *insee).collect(),
        _ => voies.iter().collect(),
    };

    let total = selection.len() as f64;
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for voie in &selection {
        *counts.entry(voie.type_voie.as_str()).or_insert(0) += 1;
    }

    let mut entries: Vec<(&str, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    entries
        .into_iter()
        .map(|(type_voie, value)| {
            let label = if (value as f64) < 0.01 * total {
                "Autre".to_string()
            } else {
                type_voie.to_string()
            };
            PieSlice {
                label,
                value,
                pulled: type_voie == type_mis_en_avant,
            }
        })
        .collect()
}

/// Point du nuage population / nombre de voies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub population: f64,
    pub nb_voies: u64,
    pub commune: String,
}

/// Population contre nombre de voies, jointure interne sur le code INSEE
///
/// Les contours sans voie connue sont absents de la série, comme de la
/// fusion géométrique.
pub fn population_vs_nb_voies(
    geometries: &[CommuneGeometry],
    voies: &[Voie],
) -> Vec<ScatterPoint> {
    let totaux = group_by_insee(voies, None);

    geometries
        .iter()
        .filter_map(|g| {
            totaux.get(g.insee.as_str()).map(|&nb_voies| ScatterPoint {
                population: g.population,
                nb_voies,
                commune: g.nom.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyse::tests::voie;
    use geo::{Geometry, Point};

    fn voies_fixture() -> Vec<Voie> {
        let mut voies = Vec::new();
        for i in 0..150 {
            voies.push(voie("75056", "Rue", &format!("R{i}")));
        }
        voies.push(voie("75056", "Avenue", "FOCH"));
        voies.push(voie("94052", "Boulevard", "DE STRASBOURG"));
        voies
    }

    #[test]
    fn test_pie_marginal_types_become_autre() {
        // 151 voies à Paris: 1 avenue < 1%, 150 rues
        let voies = voies_fixture();
        let slices = pie_type_voie(
            &voies,
            &PieFilter {
                insee: Some("75056".to_string()),
                ..Default::default()
            },
            "Avenue",
        );

        assert_eq!(slices.len(), 2);
        let avenue = slices.iter().find(|s| s.value == 1).unwrap();
        assert_eq!(avenue.label, "Autre");
        assert!(avenue.pulled);

        let rue = slices.iter().find(|s| s.value == 150).unwrap();
        assert_eq!(rue.label, "Rue");
        assert!(!rue.pulled);
    }

    #[test]
    fn test_pie_filter_by_commune_name() {
        let voies = voies_fixture();
        let slices = pie_type_voie(
            &voies,
            &PieFilter {
                commune: Some("Commune 94052".to_string()),
                ..Default::default()
            },
            "Avenue",
        );

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "Boulevard");
        assert_eq!(slices[0].value, 1);
    }

    #[test]
    fn test_scatter_inner_join() {
        let voies = voies_fixture();
        let geometries = vec![
            CommuneGeometry {
                insee: "75056".to_string(),
                nom: "Paris".to_string(),
                population: 2145906.0,
                geometry: Geometry::Point(Point::new(2.35, 48.85)),
            },
            CommuneGeometry {
                insee: "69123".to_string(),
                nom: "Lyon".to_string(),
                population: 522250.0,
                geometry: Geometry::Point(Point::new(4.84, 45.76)),
            },
        ];

        let points = population_vs_nb_voies(&geometries, &voies);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].commune, "Paris");
        assert_eq!(points[0].nb_voies, 151);
    }
}
