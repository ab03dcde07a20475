//! Export de la table enrichie
//!
//! Deux sorties: FlatGeobuf (conteneur binaire, défaut) et GeoJSON. Les deux
//! écrivent une feature par commune avec la géométrie intacte et les mêmes
//! colonnes dérivées, dans le même ordre.

pub mod fgb;
pub mod geojson;

use crate::merge::CommuneEnrichie;

/// Valeur d'une colonne dérivée
#[derive(Debug, Clone, PartialEq)]
pub enum Champ {
    Texte(String),
    Entier(u64),
    Reel(f64),
    Drapeau(bool),
}

/// Colonnes dérivées d'une commune enrichie, dans un ordre stable
///
/// L'ordre et les noms sont identiques pour toutes les communes d'un même
/// export: attributs, agrégats globaux, puis compte et part par type suivi,
/// puis un drapeau par mot suivi.
pub fn columns(commune: &CommuneEnrichie) -> Vec<(String, Champ)> {
    let mut cols = vec![
        ("insee".to_string(), Champ::Texte(commune.insee.clone())),
        ("commune".to_string(), Champ::Texte(commune.nom.clone())),
        (
            "population".to_string(),
            Champ::Reel(commune.population),
        ),
        ("nb_voies".to_string(), Champ::Entier(commune.nb_voies)),
        (
            "voie_predominante".to_string(),
            Champ::Texte(commune.voie_predominante.clone()),
        ),
    ];

    for stat in &commune.types {
        cols.push((
            format!("compte_{}", stat.type_voie),
            Champ::Entier(stat.compte),
        ));
        cols.push((
            format!("pourcentage_{}", stat.type_voie),
            Champ::Reel(stat.pourcentage),
        ));
    }

    for flag in &commune.mots {
        cols.push((
            format!("voie_contient_{}", flag.mot),
            Champ::Drapeau(flag.present),
        ));
    }

    cols
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::merge::{MotFlag, TypeStat};
    use geo::{Geometry, Point};

    pub(crate) fn commune_fixture() -> CommuneEnrichie {
        CommuneEnrichie {
            insee: "75056".to_string(),
            nom: "Paris".to_string(),
            population: 2145906.0,
            geometry: Geometry::Point(Point::new(2.35, 48.85)),
            nb_voies: 10,
            voie_predominante: "Rue".to_string(),
            types: vec![
                TypeStat {
                    type_voie: "Avenue".to_string(),
                    compte: 1,
                    pourcentage: 0.1,
                },
                TypeStat {
                    type_voie: "Rue".to_string(),
                    compte: 9,
                    pourcentage: 0.9,
                },
            ],
            mots: vec![
                MotFlag {
                    mot: "mouette".to_string(),
                    present: true,
                },
                MotFlag {
                    mot: "paris".to_string(),
                    present: false,
                },
            ],
        }
    }

    #[test]
    fn test_columns_order_and_names() {
        let commune = commune_fixture();
        let cols = columns(&commune);
        let noms: Vec<&str> = cols.iter().map(|(n, _)| n.as_str()).collect();

        assert_eq!(
            noms,
            vec![
                "insee",
                "commune",
                "population",
                "nb_voies",
                "voie_predominante",
                "compte_Avenue",
                "pourcentage_Avenue",
                "compte_Rue",
                "pourcentage_Rue",
                "voie_contient_mouette",
                "voie_contient_paris",
            ]
        );
    }

    #[test]
    fn test_columns_values() {
        let cols = columns(&commune_fixture());

        assert_eq!(cols[0].1, Champ::Texte("75056".to_string()));
        assert_eq!(cols[3].1, Champ::Entier(10));
        assert_eq!(cols[9].1, Champ::Drapeau(true));
        assert_eq!(cols[10].1, Champ::Drapeau(false));
    }
}
