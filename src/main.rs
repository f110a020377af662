use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scholar_profile::config::{find_config_file, get_config, load_config};
use scholar_profile::models::{FetchQuantity, Publication, SortCriterion};
use scholar_profile::utils::{with_retry, RetryConfig};
use scholar_profile::ScholarClient;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scholar Profile - fetch publications, metrics and co-authors of a scholar profile
#[derive(Parser, Debug)]
#[command(name = "scholar-profile")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch publications, metrics and co-authors of a scholar profile", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Attempts per operation when the network fails
    #[arg(long, global = true, default_value_t = 1)]
    retries: u32,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

/// Sort order of the publication list
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortField {
    /// Citation count, descending
    #[value(name = "citedby")]
    CitedBy,
    /// Publication year, descending
    Year,
}

impl From<SortField> for SortCriterion {
    fn from(field: SortField) -> Self {
        match field {
            SortField::CitedBy => SortCriterion::CitedBy,
            SortField::Year => SortCriterion::Year,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List an author's publications
    #[command(alias = "p")]
    Publications {
        /// Profile identifier (the `user` parameter of the profile URL)
        author: String,

        /// Maximum number of publications (default: all)
        #[arg(long, short)]
        max: Option<usize>,

        /// Sort order
        #[arg(long, short, value_enum, default_value_t = SortField::CitedBy)]
        sort: SortField,
    },

    /// Lifetime citations, h-index and i10-index from the profile summary
    Metrics {
        /// Profile identifier
        author: String,
    },

    /// Citation total and publication count computed over every publication
    AuthorMetrics {
        /// Profile identifier
        author: String,
    },

    /// Co-authors listed on the profile
    CoAuthors {
        /// Profile identifier
        author: String,
    },

    /// Name, affiliation and interests of an author
    Profile {
        /// Profile identifier
        author: String,
    },

    /// Details of one article
    Article {
        /// Absolute link to the article detail page
        link: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("scholar_profile={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        get_config().context("Failed to read configuration from environment")?
    };

    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }

    let client = ScholarClient::new(&config)?;
    let retry = RetryConfig::default().max_attempts(cli.retries);
    let format = resolve_format(cli.output);

    match cli.command {
        Commands::Publications { author, max, sort } => {
            let quantity = FetchQuantity::from(max);
            let sort = SortCriterion::from(sort);
            let publications =
                with_retry(retry, || client.publications(&author, quantity, sort)).await?;
            if !cli.quiet {
                eprintln!("Found {} publications for {}", publications.len(), author);
            }
            output_publications(&publications, format)?;
        }
        Commands::Metrics { author } => {
            let metrics = with_retry(retry, || client.citation_metrics(&author)).await?;
            output_record(
                &metrics,
                &[
                    ("Cited by", metrics.cited_by.to_string()),
                    ("h-index", metrics.h_index.to_string()),
                    ("i10-index", metrics.i10_index.to_string()),
                ],
                format,
            )?;
        }
        Commands::AuthorMetrics { author } => {
            let metrics = with_retry(retry, || client.author_metrics(&author)).await?;
            output_record(
                &metrics,
                &[
                    ("Total citations", metrics.total_citations.to_string()),
                    ("Publications", metrics.publication_count.to_string()),
                ],
                format,
            )?;
        }
        Commands::CoAuthors { author } => {
            let co_authors = with_retry(retry, || client.co_authors(&author)).await?;
            match format {
                OutputFormat::Table => {
                    let mut table = new_table(vec!["Id", "Name", "Affiliation"]);
                    for co_author in &co_authors {
                        table.add_row(vec![
                            comfy_table::Cell::new(&co_author.info.id),
                            comfy_table::Cell::new(&co_author.info.name)
                                .add_attribute(comfy_table::Attribute::Bold),
                            comfy_table::Cell::new(&co_author.info.affiliation),
                        ]);
                    }
                    println!("{table}");
                }
                _ => println!("{}", serde_json::to_string_pretty(&co_authors)?),
            }
        }
        Commands::Profile { author } => {
            let profile = with_retry(retry, || client.profile(&author)).await?;
            output_record(
                &profile,
                &[
                    ("Name", profile.info.name.clone()),
                    ("Affiliation", profile.info.affiliation.clone()),
                    ("Interests", profile.interests.join(", ")),
                    ("Picture", profile.info.picture_url.clone()),
                ],
                format,
            )?;
        }
        Commands::Article { link } => {
            let article = with_retry(retry, || client.article(&link)).await?;
            output_record(
                &article,
                &[
                    ("Title", article.title.clone()),
                    ("Authors", article.authors.clone()),
                    ("Published", article.publication_date.clone()),
                    ("Publication", article.publication.clone()),
                    ("Citations", article.total_citations.clone()),
                    ("Description", article.description.clone()),
                ],
                format,
            )?;
        }
    }

    Ok(())
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn new_table(header: Vec<&str>) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(header);
    table
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn output_publications(publications: &[Publication], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell};
            let mut table = new_table(vec!["Title", "Year", "Cited by", "Id"]);

            for publication in publications {
                table.add_row(vec![
                    Cell::new(truncate(&publication.title, 60)).add_attribute(Attribute::Bold),
                    Cell::new(&publication.year),
                    Cell::new(&publication.citations),
                    Cell::new(&publication.id),
                ]);
            }
            println!("{table}");
        }
        _ => println!("{}", serde_json::to_string_pretty(publications)?),
    }
    Ok(())
}

fn output_record<T: Serialize>(
    record: &T,
    fields: &[(&str, String)],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut table = new_table(vec!["Field", "Value"]);
            for (name, value) in fields {
                table.add_row(vec![
                    comfy_table::Cell::new(name).add_attribute(comfy_table::Attribute::Bold),
                    comfy_table::Cell::new(truncate(value, 100)),
                ]);
            }
            println!("{table}");
        }
        _ => println!("{}", serde_json::to_string_pretty(record)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publications_defaults() {
        let cli = Cli::parse_from(["scholar-profile", "publications", "JicYPdAAAAAJ"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert_eq!(cli.retries, 1);
        assert!(cli.timeout.is_none());
        match cli.command {
            Commands::Publications { author, max, sort } => {
                assert_eq!(author, "JicYPdAAAAAJ");
                assert_eq!(max, None);
                assert_eq!(sort, SortField::CitedBy);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_publications_options() {
        let cli = Cli::parse_from([
            "scholar-profile",
            "-vv",
            "publications",
            "X",
            "--max",
            "25",
            "--sort",
            "year",
            "-o",
            "json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Publications { max, sort, .. } => {
                assert_eq!(FetchQuantity::from(max), FetchQuantity::Limit(25));
                assert_eq!(SortCriterion::from(sort), SortCriterion::Year);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_other_subcommands() {
        let cli = Cli::parse_from(["scholar-profile", "co-authors", "X"]);
        assert!(matches!(cli.command, Commands::CoAuthors { .. }));

        let cli = Cli::parse_from(["scholar-profile", "author-metrics", "X", "--retries", "3"]);
        assert!(matches!(cli.command, Commands::AuthorMetrics { .. }));
        assert_eq!(cli.retries, 3);

        let cli = Cli::parse_from(["scholar-profile", "article", "https://example.com/a"]);
        assert!(matches!(cli.command, Commands::Article { .. }));
    }

    #[test]
    fn test_missing_author_is_rejected() {
        assert!(Cli::try_parse_from(["scholar-profile", "publications"]).is_err());
        assert!(Cli::try_parse_from(["scholar-profile", "publications", "X", "--sort", "title"]).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a lon...");
    }
}
