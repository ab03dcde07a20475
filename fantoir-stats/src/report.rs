//! Rapport console du classement des communes
//!
//! Vue filtrée de la table d'analyse: les communes trop petites pour être
//! significatives sont écartées de l'affichage, jamais de la table complète.

use thiserror::Error;
use tracing::debug;

use fantoir::{CommuneIndex, Voie};

use crate::analyse::{analyse_type_voie, sort_descending, TypeVoieRow};
use crate::config::Options;

/// Demande utilisateur invalide: le rapport l'affiche et continue
#[derive(Debug, Error)]
pub enum RankError {
    /// Le nom demandé ne correspond à aucun code INSEE du référentiel
    #[error("La commune {0} n'a pas de code INSEE")]
    CommuneNotFound(String),

    /// La commune existe mais est sous le seuil de voies du classement
    #[error("La commune {0} n'est pas classée (moins de voies que le seuil)")]
    CommuneNotRanked(String),
}

/// Position nationale d'une commune dans la vue filtrée
#[derive(Debug, Clone, PartialEq)]
pub struct Percentile {
    pub insee: String,

    /// Part du type cible dans la commune
    pub pourcentage_voies: f64,

    /// "Top X%" national: (1 - rang / taille de la vue) * 100
    pub top_pourcent: f64,

    /// Nombre de communes classées
    pub communes_classees: usize,
}

/// Vue du classement: communes au-dessus du seuil, ordre ascendant conservé
pub fn classement(rows: &[TypeVoieRow], min_voies: u64) -> Vec<TypeVoieRow> {
    rows.iter()
        .filter(|r| r.compte_toutes_voies >= min_voies)
        .cloned()
        .collect()
}

/// Les meilleures communes: queue du tri ascendant, re-triée en descendant
///
/// Le re-tri descendant est stable, les égalités gardent l'ordre de la queue.
pub fn top(vue: &[TypeVoieRow], nb_top: usize, mode: crate::config::RankMode) -> Vec<TypeVoieRow> {
    let debut = vue.len().saturating_sub(nb_top);
    let mut meilleures = vue[debut..].to_vec();
    sort_descending(&mut meilleures, mode);
    meilleures
}

/// Position nationale d'une commune désignée par son nom
///
/// La part vient de la table complète, le rang de la vue filtrée, comme dans
/// le rapport affiché.
pub fn percentile(
    table: &[TypeVoieRow],
    vue: &[TypeVoieRow],
    communes: &CommuneIndex,
    nom: &str,
) -> Result<Percentile, RankError> {
    let insee = communes
        .insee_for_name(nom)
        .ok_or_else(|| RankError::CommuneNotFound(nom.to_string()))?;

    let pourcentage_voies = table
        .iter()
        .find(|r| r.insee == insee)
        .map(|r| r.pourcentage_voies)
        .unwrap_or(0.0);

    let rang = vue
        .iter()
        .position(|r| r.insee == insee)
        .ok_or_else(|| RankError::CommuneNotRanked(nom.to_string()))?;

    Ok(Percentile {
        insee: insee.to_string(),
        pourcentage_voies,
        top_pourcent: (1.0 - rang as f64 / vue.len() as f64) * 100.0,
        communes_classees: vue.len(),
    })
}

/// Calcule et affiche le classement, puis la position d'une commune si demandée
pub fn print_report(
    voies: &[Voie],
    communes: &CommuneIndex,
    options: &Options,
    commune: Option<&str>,
) -> Vec<TypeVoieRow> {
    let table = analyse_type_voie(voies, &options.type_voie, options.mode);
    let vue = classement(&table, options.min_voies);
    debug!(
        communes = table.len(),
        classees = vue.len(),
        "Table d'analyse calculée"
    );

    println!(
        "Top {} des communes avec le plus de voies de type {}:",
        options.nb_top, options.type_voie
    );
    for (i, row) in top(&vue, options.nb_top, options.mode).iter().enumerate() {
        let nom = communes.get(&row.insee).unwrap_or("?");
        let nom_complet = format!("{} ({})", title_case(nom), &row.insee[..2]);
        println!(
            "{:>2}. {:<29} — {:.2}% ({:>4} / {:<4})",
            i + 1,
            nom_complet,
            row.pourcentage_voies * 100.0,
            row.compte_voies,
            row.compte_toutes_voies,
        );
    }

    if let Some(nom) = commune {
        println!();
        match percentile(&table, &vue, communes, nom) {
            Ok(p) => println!(
                "La commune {nom} a {:.2}% de voies de type {}.\n\
                 Elle se classe dans le top {:.2}% des communes françaises \
                 avec le plus de voies de type {}, sur {} communes en tout.",
                p.pourcentage_voies * 100.0,
                options.type_voie,
                p.top_pourcent,
                options.type_voie,
                p.communes_classees,
            ),
            // Erreur récupérable: message utilisateur, le reste de l'exécution continue
            Err(e) => println!("Erreur : {e}"),
        }
    }

    table
}

/// Majuscule initiale de chaque mot ("NOGENT-SUR-MARNE" devient "Nogent-Sur-Marne")
fn title_case(nom: &str) -> String {
    let mut out = String::with_capacity(nom.len());
    let mut debut_de_mot = true;

    for c in nom.chars() {
        if c.is_alphabetic() {
            if debut_de_mot {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            debut_de_mot = false;
        } else {
            out.push(c);
            debut_de_mot = true;
        }
    }

    out
}
