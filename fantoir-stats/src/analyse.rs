//! Analyse de la distribution des types de voie par commune
//!
//! Les regroupements sont des jointures nommées sur le code INSEE, chacune
//! avec une politique explicite: remplissage à zéro ou abandon de ligne,
//! jamais de valeur manquante implicite.

use std::collections::{HashMap, HashSet};

use fantoir::Voie;

use crate::config::RankMode;

/// Une ligne de la table d'analyse pour un type de voie cible
#[derive(Debug, Clone, PartialEq)]
pub struct TypeVoieRow {
    /// Code INSEE de la commune
    pub insee: String,

    /// Nombre de voies du type cible
    pub compte_voies: u64,

    /// Nombre total de voies de la commune
    pub compte_toutes_voies: u64,

    /// Part du type cible, 0.0 quand la commune n'a aucune voie
    pub pourcentage_voies: f64,
}

/// Table complète pour un type cible, triée en ascendant
///
/// Jointure externe sur l'espace de clés du regroupement non restreint: une
/// commune sans aucune voie du type cible apparaît avec un compte de 0,
/// jamais absente. Les lignes sont produites dans l'ordre de première
/// apparition du code INSEE dans la collection, puis triées avec un tri
/// stable: les égalités conservent cet ordre, la sortie est reproductible.
pub fn analyse_type_voie(voies: &[Voie], type_voie: &str, mode: RankMode) -> Vec<TypeVoieRow> {
    let cible = group_by_insee(voies, Some(type_voie));
    let toutes = group_by_insee(voies, None);

    let mut rows: Vec<TypeVoieRow> = insee_order(voies)
        .into_iter()
        .map(|insee| {
            let total = toutes.get(insee).copied().unwrap_or(0);
            // Remplissage à zéro explicite pour les communes sans voie du type
            let compte = cible.get(insee).copied().unwrap_or(0);

            TypeVoieRow {
                insee: insee.to_string(),
                compte_voies: compte,
                compte_toutes_voies: total,
                pourcentage_voies: share(compte, total),
            }
        })
        .collect();

    sort_ascending(&mut rows, mode);
    rows
}

/// Compte les voies par commune, optionnellement restreint à un type
pub(crate) fn group_by_insee<'a>(
    voies: &'a [Voie],
    type_voie: Option<&str>,
) -> HashMap<&'a str, u64> {
    let mut counts = HashMap::new();
    for voie in voies {
        if type_voie.map_or(true, |t| voie.type_voie == t) {
            *counts.entry(voie.insee.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// Codes INSEE dans leur ordre de première apparition
fn insee_order(voies: &[Voie]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    for voie in voies {
        if seen.insert(voie.insee.as_str()) {
            order.push(voie.insee.as_str());
        }
    }
    order
}

/// Part d'un type, avec garde explicite contre la division par zéro
///
/// `total == 0` ne peut pas sortir du regroupement non restreint, la garde
/// couvre les appels directs.
fn share(compte: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        compte as f64 / total as f64
    }
}

/// Tri ascendant stable selon le mode de classement
pub(crate) fn sort_ascending(rows: &mut [TypeVoieRow], mode: RankMode) {
    match mode {
        RankMode::Pourcentage => rows.sort_by(|a, b| {
            a.pourcentage_voies
                .total_cmp(&b.pourcentage_voies)
                .then_with(|| a.compte_toutes_voies.cmp(&b.compte_toutes_voies))
        }),
        RankMode::Compte => rows.sort_by(|a, b| {
            a.compte_voies
                .cmp(&b.compte_voies)
                .then_with(|| a.compte_toutes_voies.cmp(&b.compte_toutes_voies))
        }),
    }
}

/// Tri descendant stable, pour l'affichage des meilleures communes
pub(crate) fn sort_descending(rows: &mut [TypeVoieRow], mode: RankMode) {
    match mode {
        RankMode::Pourcentage => rows.sort_by(|a, b| {
            b.pourcentage_voies
                .total_cmp(&a.pourcentage_voies)
                .then_with(|| b.compte_toutes_voies.cmp(&a.compte_toutes_voies))
        }),
        RankMode::Compte => rows.sort_by(|a, b| {
            b.compte_voies
                .cmp(&a.compte_voies)
                .then_with(|| b.compte_toutes_voies.cmp(&a.compte_toutes_voies))
        }),
    }
}
