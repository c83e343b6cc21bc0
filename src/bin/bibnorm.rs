//! Normalize a BibTeX file into publication JSON

use bibtex_normalizer::{
    Normalizer, NormalizerConfig, PublicationQuery, PublicationType, Result, YearFilter,
};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bibnorm", version, about, long_about = None)]
struct Cli {
    /// BibTeX file to normalize
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Name of the site owner, highlighted in author lists
    #[arg(long, value_name = "NAME")]
    highlight: Option<String>,

    /// Site JSON configuration providing `author.name`
    #[arg(long, value_name = "PATH")]
    site_config: Option<PathBuf>,

    /// Only keep publications whose title, authors or venue contain this text
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,

    /// Only keep this year or status label
    #[arg(long, value_name = "YEAR")]
    year: Option<YearFilter>,

    /// Only keep this publication type (journal, conference, ...)
    #[arg(long = "type", value_name = "TYPE")]
    publication_type: Option<PublicationType>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "normalization failed");
            eprintln!("bibnorm: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.site_config {
        Some(path) => NormalizerConfig::from_site_file(path)?,
        None => NormalizerConfig::default(),
    };
    if let Some(name) = &cli.highlight {
        config = config.highlight_name(name.as_str());
    }

    let publications = Normalizer::new(config).parse_file(&cli.input)?;

    let mut query = PublicationQuery::new();
    if let Some(text) = &cli.search {
        query = query.search(text.as_str());
    }
    if let Some(year) = &cli.year {
        query = query.year(year.clone());
    }
    if let Some(ty) = cli.publication_type {
        query = query.publication_type(ty);
    }
    let selected = query.filter(&publications);

    tracing::debug!(
        total = publications.len(),
        selected = selected.len(),
        "filtered publications"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&selected)?
    } else {
        serde_json::to_string(&selected)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
