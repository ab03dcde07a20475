//! Définition et implémentation des commandes CLI
//!
//! Trois commandes:
//! - `rank`: classement des communes par type de voie
//! - `export`: fusion sur les contours et export FlatGeobuf ou GeoJSON
//! - `chart`: séries de données pour graphiques (JSON)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use tracing::info;

use fantoir::{parse_communes, parse_voies, CommuneIndex, TypeVoieLookup, Voie};

use crate::chart::{pie_type_voie, population_vs_nb_voies, PieFilter};
use crate::config::{Options, RankMode};
use crate::export;
use crate::geometry::load_communes_geojson;
use crate::merge::merge_voies_communes;
use crate::report;

/// Chemins des fichiers FANTOIR, communs à toutes les commandes
#[derive(Args)]
pub struct SourceArgs {
    /// Fichier FANTOIR des voies
    #[arg(long, default_value = "./fantoir/voies.txt")]
    pub voies: PathBuf,

    /// Fichier FANTOIR des communes
    #[arg(long, default_value = "./fantoir/communes.txt")]
    pub communes: PathBuf,

    /// Table des natures de voie (JSON), sinon table embarquée
    #[arg(long)]
    pub types: Option<PathBuf>,
}

/// Format de sortie de l'export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// FlatGeobuf (binaire)
    Fgb,
    /// GeoJSON
    Geojson,
}

/// Genre de graphique
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Camembert des types de voie
    Pie,
    /// Nuage population / nombre de voies
    Scatter,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classement des communes par type de voie
    Rank {
        #[command(flatten)]
        source: SourceArgs,

        /// Type de voie cible (ex: Avenue, Rue)
        #[arg(long, default_value = "Avenue")]
        type_voie: String,

        /// Nombre de communes affichées
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Classement par part ou par nombre brut
        #[arg(long, value_enum, default_value_t = RankMode::Pourcentage)]
        by: RankMode,

        /// Nombre minimal de voies pour qu'une commune soit classée
        #[arg(long, default_value_t = 10)]
        min_voies: u64,

        /// Afficher la position nationale de cette commune (par nom)
        #[arg(long, conflicts_with = "insee")]
        commune: Option<String>,

        /// Afficher la position nationale de cette commune (par code INSEE)
        #[arg(long)]
        insee: Option<String>,
    },

    /// Fusion des agrégats sur les contours communaux et export
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// FeatureCollection GeoJSON des contours communaux
        #[arg(short, long)]
        geometry: PathBuf,

        /// Fichier de sortie
        #[arg(short, long, default_value = "./communes.fgb")]
        output: PathBuf,

        /// Format de sortie
        #[arg(long, value_enum, default_value_t = Format::Fgb)]
        format: Format,

        /// Fichier JSON d'options (types suivis, mots, seuils)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Séries de données pour graphiques (JSON sur stdout ou fichier)
    Chart {
        #[command(flatten)]
        source: SourceArgs,

        /// Genre de graphique
        #[arg(long, value_enum, default_value_t = ChartKind::Pie)]
        kind: ChartKind,

        /// Restreindre le camembert à une commune (par nom)
        #[arg(long, conflicts_with = "insee")]
        commune: Option<String>,

        /// Restreindre le camembert à une commune (par code INSEE)
        #[arg(long)]
        insee: Option<String>,

        /// Type de voie mis en avant dans le camembert
        #[arg(long, default_value = "Avenue")]
        type_voie: String,

        /// Contours communaux (requis pour le nuage population/voies)
        #[arg(long)]
        geometry: Option<PathBuf>,

        /// Fichier de sortie JSON (défaut: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Charge le référentiel des communes, la table des natures et les voies
fn load_sources(source: &SourceArgs) -> Result<(CommuneIndex, Vec<Voie>)> {
    let communes = parse_communes(&source.communes)
        .context("Échec du chargement du référentiel des communes")?;

    let types = match &source.types {
        Some(path) => TypeVoieLookup::from_path(path)?,
        None => TypeVoieLookup::embedded()?,
    };
    info!(
        communes = communes.len(),
        types = types.len(),
        "Référentiels chargés"
    );

    let voies = parse_voies(&source.voies, &communes, &types)
        .context("Échec du parsing du fichier des voies")?;
    info!(voies = voies.len(), "Voies chargées");

    Ok((communes, voies))
}

/// Exécute la commande rank
#[allow(clippy::too_many_arguments)]
pub fn cmd_rank(
    source: &SourceArgs,
    type_voie: &str,
    top: usize,
    by: RankMode,
    min_voies: u64,
    commune: Option<&str>,
    insee: Option<&str>,
) -> Result<()> {
    let (communes, voies) = load_sources(source)?;

    let options = Options {
        type_voie: type_voie.to_string(),
        nb_top: top,
        mode: by,
        min_voies,
        ..Options::default()
    };

    // Le filtre par code INSEE est ramené au nom du référentiel
    let commune = match (commune, insee) {
        (Some(nom), _) => Some(nom.to_string()),
        (None, Some(code)) => match communes.get(code) {
            Some(nom) => Some(nom.to_string()),
            None => {
                println!("Erreur : aucune commune pour le code INSEE {code}");
                None
            }
        },
        (None, None) => None,
    };

    report::print_report(&voies, &communes, &options, commune.as_deref());
    Ok(())
}

/// Exécute la commande export
pub fn cmd_export(
    source: &SourceArgs,
    geometry: &PathBuf,
    output: &PathBuf,
    format: Format,
    config: Option<&PathBuf>,
) -> Result<()> {
    let (_communes, voies) = load_sources(source)?;

    let options = match config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let geometries = load_communes_geojson(geometry, &options.geometrie)?;
    info!(contours = geometries.len(), "Contours communaux chargés");

    let enriched = merge_voies_communes(&voies, geometries, &options);

    match format {
        Format::Fgb => export::fgb::export_fgb(&enriched, output),
        Format::Geojson => export::geojson::export_geojson(&enriched, output),
    }
}

/// Exécute la commande chart
#[allow(clippy::too_many_arguments)]
pub fn cmd_chart(
    source: &SourceArgs,
    kind: ChartKind,
    commune: Option<String>,
    insee: Option<String>,
    type_voie: &str,
    geometry: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let (_communes, voies) = load_sources(source)?;

    let json = match kind {
        ChartKind::Pie => {
            let filter = PieFilter { commune, insee };
            serde_json::to_string_pretty(&pie_type_voie(&voies, &filter, type_voie))?
        }
        ChartKind::Scatter => {
            let geometry =
                geometry.context("--geometry est requis pour le nuage population/voies")?;
            let geometries = load_communes_geojson(geometry, &Options::default().geometrie)?;
            serde_json::to_string_pretty(&population_vs_nb_voies(&geometries, &voies))?
        }
    };

    match output {
        Some(path) => std::fs::write(path, json)
            .context(format!("Failed to write chart data: {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}
