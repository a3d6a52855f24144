use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, error::ErrorKind};

use crate::config::{Algorithm, NameLevel, NameType, resolve_data_root};
use crate::constants::taxonomy::{LEVEL_COUNT, LEVEL_NAMES};
use crate::errors::TaxonomyError;
use crate::metadata::GroupMetadata;
use crate::store::TaxonomyStore;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgArg {
    Cooccurrence,
    Centroids,
    Imbalanced,
}

impl From<AlgArg> for Algorithm {
    fn from(value: AlgArg) -> Self {
        match value {
            AlgArg::Cooccurrence => Algorithm::Cooccurrence,
            AlgArg::Centroids => Algorithm::Centroids,
            AlgArg::Imbalanced => Algorithm::Imbalanced,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NameTypeArg {
    Chatgpt,
    Entities,
}

impl From<NameTypeArg> for NameType {
    fn from(value: NameTypeArg) -> Self {
        match value {
            NameTypeArg::Chatgpt => NameType::ChatGpt,
            NameTypeArg::Entities => NameType::Entities,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "taxonomy_lookup",
    disable_help_subcommand = true,
    about = "Look up the innovation taxonomy and its group names",
    long_about = "Read taxonomy tables and group name files from a data root and print them.",
    after_help = "The data root is resolved in order by --data-dir, the INNOVATION_TAXONOMY_DATA_DIR environment variable, then ./data."
)]
/// CLI for `taxonomy_lookup`.
///
/// Common usage:
/// - Summarize the default taxonomy: `taxonomy --limit 5`
/// - Print level-2 names: `names --level 2`
/// - Place one entity: `entity "Machine learning"`
struct TaxonomyCli {
    #[arg(
        long = "data-dir",
        value_name = "PATH",
        global = true,
        help = "Data root holding taxonomies/ and group_names/"
    )]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the row count and leading rows of a taxonomy table.
    Taxonomy {
        #[arg(long, value_enum, default_value = "cooccurrence")]
        alg: AlgArg,
        #[arg(long, default_value_t = 10, help = "Number of rows to print")]
        limit: usize,
    },
    /// Print the distinct group labels at a level.
    Groups {
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        level: u8,
        #[arg(long, value_enum, default_value = "cooccurrence")]
        alg: AlgArg,
    },
    /// Print group names for a level.
    Names {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..=3))]
        level: i64,
        #[arg(long = "name-type", value_enum, default_value = "chatgpt")]
        name_type: NameTypeArg,
    },
    /// Print the labels of one entity, named where names are available.
    Entity {
        name: String,
        #[arg(long, value_enum, default_value = "cooccurrence")]
        alg: AlgArg,
    },
    /// Report which artifacts are present under the data root.
    Inventory,
}

/// Run the lookup CLI over `args_iter` (program name excluded), printing to stdout.
pub fn run_taxonomy_cli<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<TaxonomyCli, _>(
        std::iter::once("taxonomy_lookup".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

fn execute(cli: TaxonomyCli, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let store = TaxonomyStore::new(resolve_data_root(cli.data_dir));
    match cli.command {
        Command::Taxonomy { alg, limit } => {
            let table = store.load_taxonomy(alg.into())?;
            writeln!(out, "{} rows ({})", table.len(), table.algorithm())?;
            writeln!(out, "{}", table.columns().join("\t"))?;
            for row in table.rows().iter().take(limit) {
                writeln!(out, "{}\t{}", row.levels.join("\t"), row.entity)?;
            }
        }
        Command::Groups { level, alg } => {
            let table = store.load_taxonomy(alg.into())?;
            let groups = table.groups_at(usize::from(level));
            writeln!(
                out,
                "{} {} at level {}",
                groups.len(),
                LEVEL_NAMES[usize::from(level) - 1],
                level
            )?;
            for label in groups {
                writeln!(out, "{label}")?;
            }
        }
        Command::Names { level, name_type } => {
            let level = NameLevel::try_from(level)?;
            let metadata = store.load_group_metadata(level, name_type.into())?;
            for label in metadata.labels() {
                let name = metadata.display_name(label).unwrap_or_default();
                writeln!(out, "{label}\t{name}")?;
            }
        }
        Command::Entity { name, alg } => {
            let alg: Algorithm = alg.into();
            let table = store.load_taxonomy(alg)?;
            let Some(row) = table.find_entity(&name) else {
                return Err(format!("entity '{name}' is not in the {alg} taxonomy").into());
            };
            let names = if alg == Algorithm::Cooccurrence {
                load_names_if_present(&store)?
            } else {
                Vec::new()
            };
            for level in 1..=LEVEL_COUNT {
                let label = row.label(level).unwrap_or_default();
                let group_name = names
                    .get(level - 1)
                    .and_then(|metadata| metadata.as_ref())
                    .and_then(|metadata| metadata.display_name(label));
                match group_name {
                    Some(group_name) => writeln!(
                        out,
                        "Level_{level} ({})\t{label}\t{group_name}",
                        LEVEL_NAMES[level - 1]
                    )?,
                    None => writeln!(out, "Level_{level} ({})\t{label}", LEVEL_NAMES[level - 1])?,
                }
            }
        }
        Command::Inventory => {
            let inventory = store.inventory();
            writeln!(out, "data root: {}", store.root().display())?;
            for path in &inventory.present {
                writeln!(out, "present\t{}", path.display())?;
            }
            for path in &inventory.missing {
                writeln!(out, "missing\t{}", path.display())?;
            }
            for path in &inventory.unexpected {
                writeln!(out, "unexpected\t{}", path.display())?;
            }
        }
    }
    Ok(())
}

/// Model-assigned names per named level; absent files yield `None`.
fn load_names_if_present(
    store: &TaxonomyStore,
) -> Result<Vec<Option<GroupMetadata>>, TaxonomyError> {
    NameLevel::ALL
        .into_iter()
        .map(
            |level| match store.load_group_metadata(level, NameType::ChatGpt) {
                Ok(metadata) => Ok(Some(metadata)),
                Err(err) if err.is_not_found() => Ok(None),
                Err(err) => Err(err),
            },
        )
        .collect()
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
