//! Fusion des agrégats par commune sur les contours communaux
//!
//! Chaque étape est une jointure nommée sur le code INSEE avec une politique
//! explicite: interne (la ligne sans correspondance est abandonnée) ou
//! externe (valeur par défaut). La géométrie est la table pilote et n'est
//! jamais modifiée.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use fantoir::Voie;

use crate::analyse::{analyse_type_voie, group_by_insee};
use crate::config::{Options, RankMode};
use crate::geometry::CommuneGeometry;

/// Compte et part d'un type de voie suivi
#[derive(Debug, Clone, PartialEq)]
pub struct TypeStat {
    pub type_voie: String,
    pub compte: u64,
    pub pourcentage: f64,
}

/// Présence d'un mot suivi dans les libellés de voie d'une commune
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotFlag {
    pub mot: String,
    pub present: bool,
}

/// Une commune enrichie des colonnes dérivées, prête à l'export
#[derive(Debug, Clone)]
pub struct CommuneEnrichie {
    pub insee: String,
    pub nom: String,
    pub population: f64,
    pub geometry: geo::Geometry,

    /// Nombre total de voies de la commune
    pub nb_voies: u64,

    /// Type de voie le plus fréquent
    pub voie_predominante: String,

    /// Une entrée par type suivi, dans l'ordre de la configuration
    pub types: Vec<TypeStat>,

    /// Un drapeau par mot suivi, dans l'ordre de la configuration
    pub mots: Vec<MotFlag>,
}

/// Fusionne les agrégats dérivés du fichier des voies sur les contours
///
/// Étapes, dans l'ordre:
/// 1. nombre total de voies, jointure interne (commune sans voie abandonnée);
/// 2. type prédominant, même espace de clés que l'étape 1;
/// 3. compte et part par type suivi, table d'analyse remplie à zéro sur tout
///    l'espace de clés du fichier des voies avant jointure (non destructif);
/// 4. drapeau par mot suivi, jointure externe (défaut `false`).
pub fn merge_voies_communes(
    voies: &[Voie],
    geometries: Vec<CommuneGeometry>,
    options: &Options,
) -> Vec<CommuneEnrichie> {
    let totaux = group_by_insee(voies, None);
    let predominants = predominant_types(voies);

    // Une table d'analyse par type suivi, indexée par code INSEE
    let analyses: Vec<HashMap<String, (u64, f64)>> = options
        .types_suivis
        .iter()
        .map(|type_voie| {
            analyse_type_voie(voies, type_voie, RankMode::Pourcentage)
                .into_iter()
                .map(|r| (r.insee, (r.compte_voies, r.pourcentage_voies)))
                .collect()
        })
        .collect();

    // Communes contenant chaque mot suivi
    let mots: Vec<HashSet<&str>> = options
        .mots_suivis
        .iter()
        .map(|mot| communes_with_mot(voies, mot))
        .collect();

    let nb_geometries = geometries.len();
    let mut enriched = Vec::with_capacity(nb_geometries);

    for geom in geometries {
        // 1. Jointure interne: commune absente du fichier des voies abandonnée
        let Some(&nb_voies) = totaux.get(geom.insee.as_str()) else {
            debug!(insee = %geom.insee, "Commune sans voie, retirée de la fusion");
            continue;
        };

        // 2. Même espace de clés que `totaux`: présent si l'étape 1 a joint
        let Some(voie_predominante) = predominants.get(geom.insee.as_str()).cloned() else {
            continue;
        };

        // 3. La table d'analyse couvre tout l'espace de clés du fichier des
        // voies; le repli (0, 0.0) garde la jointure non destructive même si
        // la source géométrique et le fichier divergent
        let types = options
            .types_suivis
            .iter()
            .zip(&analyses)
            .map(|(type_voie, table)| {
                let (compte, pourcentage) =
                    table.get(geom.insee.as_str()).copied().unwrap_or((0, 0.0));
                TypeStat {
                    type_voie: type_voie.clone(),
                    compte,
                    pourcentage,
                }
            })
            .collect();

        // 4. Jointure externe: l'absence du mot donne `false`, jamais d'abandon
        let mots = options
            .mots_suivis
            .iter()
            .zip(&mots)
            .map(|(mot, communes)| MotFlag {
                mot: mot.clone(),
                present: communes.contains(geom.insee.as_str()),
            })
            .collect();

        enriched.push(CommuneEnrichie {
            insee: geom.insee,
            nom: geom.nom,
            population: geom.population,
            geometry: geom.geometry,
            nb_voies,
            voie_predominante,
            types,
            mots,
        });
    }

    info!(
        communes = enriched.len(),
        ecartees = nb_geometries - enriched.len(),
        "Fusion des agrégats terminée"
    );
    enriched
}

/// Type de voie le plus fréquent par commune
///
/// Égalités tranchées par ordre lexicographique du libellé: exactement une
/// ligne par commune, sortie déterministe quelle que soit l'itération des
/// tables de hachage.
fn predominant_types(voies: &[Voie]) -> HashMap<String, String> {
    let mut counts: HashMap<&str, HashMap<&str, u64>> = HashMap::new();
    for voie in voies {
        *counts
            .entry(voie.insee.as_str())
            .or_default()
            .entry(voie.type_voie.as_str())
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter_map(|(insee, par_type)| {
            let mut types: Vec<(&str, u64)> = par_type.into_iter().collect();
            types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            types
                .first()
                .map(|(type_voie, _)| (insee.to_string(), type_voie.to_string()))
        })
        .collect()
}

/// Communes dont au moins un libellé de voie contient le mot
///
/// Comparaison insensible à la casse (les libellés du référentiel sont en
/// majuscules).
fn communes_with_mot<'a>(voies: &'a [Voie], mot: &str) -> HashSet<&'a str> {
    let mot = mot.to_uppercase();
    voies
        .iter()
        .filter(|v| v.nom_voie.to_uppercase().contains(&mot))
        .map(|v| v.insee.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyse::tests::voie;
    use geo::{Geometry, Point};

    fn geom(insee: &str, nom: &str, population: f64) -> CommuneGeometry {
        CommuneGeometry {
            insee: insee.to_string(),
            nom: nom.to_string(),
            population,
            geometry: Geometry::Point(Point::new(2.35, 48.85)),
        }
    }

    fn options() -> Options {
        Options {
            types_suivis: vec!["Avenue".to_string(), "Rue".to_string()],
            mots_suivis: vec!["mouette".to_string(), "paris".to_string()],
            ..Options::default()
        }
    }

    fn voies_fixture() -> Vec<Voie> {
        vec![
            voie("75056", "Avenue", "DES MOUETTES"),
            voie("75056", "Rue", "DE RIVOLI"),
            voie("75056", "Rue", "DU FAUBOURG"),
            voie("94052", "Avenue", "DE PARIS"),
            voie("13001", "Boulevard", "DU PRADO"),
        ]
    }

    #[test]
    fn test_inner_join_drops_communes_without_voies() {
        // 5 contours, 3 communes seulement dans le fichier des voies
        let geometries = vec![
            geom("75056", "Paris", 2e6),
            geom("94052", "Nogent-sur-Marne", 33e3),
            geom("13001", "Marseille", 870e3),
            geom("69123", "Lyon", 520e3),
            geom("31555", "Toulouse", 490e3),
        ];

        let enriched = merge_voies_communes(&voies_fixture(), geometries, &options());
        let codes: Vec<&str> = enriched.iter().map(|c| c.insee.as_str()).collect();

        assert_eq!(codes, vec!["75056", "94052", "13001"]);
    }

    #[test]
    fn test_total_and_type_columns() {
        let geometries = vec![geom("75056", "Paris", 2e6)];
        let enriched = merge_voies_communes(&voies_fixture(), geometries, &options());

        let paris = &enriched[0];
        assert_eq!(paris.nb_voies, 3);
        assert_eq!(paris.types.len(), 2);

        let avenue = &paris.types[0];
        assert_eq!(avenue.type_voie, "Avenue");
        assert_eq!(avenue.compte, 1);
        assert!((avenue.pourcentage - 1.0 / 3.0).abs() < 1e-12);

        let rue = &paris.types[1];
        assert_eq!(rue.compte, 2);
        assert!((rue.pourcentage - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_tracked_type_absent_is_zero_filled() {
        // Marseille n'a ni avenue ni rue: colonnes à zéro, ligne conservée
        let geometries = vec![geom("13001", "Marseille", 870e3)];
        let enriched = merge_voies_communes(&voies_fixture(), geometries, &options());

        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].types[0].compte, 0);
        assert_eq!(enriched[0].types[0].pourcentage, 0.0);
        assert_eq!(enriched[0].types[1].compte, 0);
    }

    #[test]
    fn test_predominant_type() {
        let geometries = vec![geom("75056", "Paris", 2e6)];
        let enriched = merge_voies_communes(&voies_fixture(), geometries, &options());

        assert_eq!(enriched[0].voie_predominante, "Rue");
    }

    #[test]
    fn test_predominant_tie_breaks_lexicographically() {
        let voies = vec![
            voie("94052", "Villa", "A"),
            voie("94052", "Avenue", "B"),
        ];
        let geometries = vec![geom("94052", "Nogent-sur-Marne", 33e3)];

        let enriched = merge_voies_communes(&voies, geometries, &options());
        assert_eq!(enriched[0].voie_predominante, "Avenue");
    }

    #[test]
    fn test_keyword_flags_outer_join() {
        let geometries = vec![
            geom("75056", "Paris", 2e6),
            geom("94052", "Nogent-sur-Marne", 33e3),
            geom("13001", "Marseille", 870e3),
        ];
        let enriched = merge_voies_communes(&voies_fixture(), geometries, &options());

        fn flags(commune: &CommuneEnrichie) -> Vec<bool> {
            commune.mots.iter().map(|m| m.present).collect()
        }

        // mots_suivis = [mouette, paris]
        let paris = &enriched[0];
        assert_eq!(paris.mots[0].mot, "mouette");
        assert_eq!(flags(paris), vec![true, false]);

        let nogent = &enriched[1];
        assert_eq!(flags(nogent), vec![false, true]);

        // Aucun mot: drapeaux à false, la ligne n'est pas abandonnée
        let marseille = &enriched[2];
        assert_eq!(flags(marseille), vec![false, false]);
    }

    #[test]
    fn test_geometry_is_untouched() {
        let geometries = vec![geom("75056", "Paris", 2e6)];
        let enriched = merge_voies_communes(&voies_fixture(), geometries, &options());

        assert_eq!(
            enriched[0].geometry,
            Geometry::Point(Point::new(2.35, 48.85))
        );
    }
}
