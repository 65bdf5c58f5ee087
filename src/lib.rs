pub mod config;
pub mod model;
pub mod search;
pub mod store;
pub mod ui;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use config::CatalogConfig;
use model::types::{Category, Record, Tab};
use search::query::{FilterState, QueryOutcome, evaluate};
use store::{DataRoot, RecordStore};
use ui::display::{LOAD_ERROR_MESSAGE, capitalize, display_label, no_results_message};
use ui::links;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "catsearch",
    version,
    about = "Filter, search and rank the patent and laboratory catalog"
)]
pub struct Cli {
    /// Path to the config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory or http(s) base URL holding the datasets
    #[arg(long, global = true, env = "CATALOG_DATA_ROOT")]
    pub data_root: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter and rank catalog records
    Search {
        /// Active tab: patentes or laboratorios
        #[arg(long, default_value = "patentes", value_parser = parse_tab)]
        tab: Tab,

        /// Category / area key (repeatable); none selects the whole tab
        #[arg(long = "category", value_parser = parse_category)]
        categories: Vec<Category>,

        /// Nature facet value (repeatable, case-insensitive)
        #[arg(long = "nature")]
        natures: Vec<String>,

        /// Free-text search over every text field
        #[arg(long, short)]
        query: Option<String>,

        /// Initial search taken from a page query string (`?q=...`)
        #[arg(long, conflicts_with = "query")]
        from_url: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List categories with their tab and dataset path
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// Print the normalized form of TEXT
    Normalize { text: String },
    /// Print TEXT formatted as a display name
    Capitalize { text: String },
    /// Build navigation links
    Link {
        #[command(subcommand)]
        target: LinkTarget,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

#[derive(Subcommand, Debug)]
pub enum LinkTarget {
    /// Search page URL for a free-text term
    Search { term: String },
    /// Detail page URL for a record id
    Detail { id: String },
}

fn parse_tab(s: &str) -> Result<Tab, String> {
    Tab::parse(s).ok_or_else(|| format!("unknown tab `{s}` (expected patentes or laboratorios)"))
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        let known: Vec<&str> = Category::all().map(|c| c.key()).collect();
        format!("unknown category `{s}` (expected one of: {})", known.join(", "))
    })
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    run_with(cli).await
}

pub async fn run_with(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search {
            tab,
            categories,
            natures,
            query,
            from_url,
            json,
        } => {
            let config = load_config(cli.config.as_deref(), cli.data_root)?;
            let search = query
                .or_else(|| from_url.as_deref().and_then(links::initial_search))
                .unwrap_or_default();
            for category in &categories {
                if category.tab() != tab {
                    bail!(
                        "category `{}` belongs to tab `{}`, not `{}`",
                        category,
                        category.tab(),
                        tab
                    );
                }
            }
            let state = FilterState::new(tab)
                .with_categories(categories)
                .with_natures(&natures)
                .with_search(&search);
            run_search(&config, &state, json).await
        }
        Commands::Categories { json } => {
            print_categories(json)?;
            Ok(())
        }
        Commands::Normalize { text } => {
            println!("{}", search::normalize(&text));
            Ok(())
        }
        Commands::Capitalize { text } => {
            println!("{}", capitalize(&text));
            Ok(())
        }
        Commands::Link { target } => {
            let config = load_config(cli.config.as_deref(), cli.data_root)?;
            match target {
                LinkTarget::Search { term } => match links::search_url(&config.search_page, &term) {
                    Some(url) => println!("{url}"),
                    None => bail!("search term is empty"),
                },
                LinkTarget::Detail { id } => {
                    let id = model::types::RecordId::Text(id);
                    println!("{}", links::detail_url(&config.detail_page, &id));
                }
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "catsearch", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>, data_root: Option<String>) -> Result<CatalogConfig> {
    let mut config = match path {
        Some(p) => CatalogConfig::load_from(p)
            .with_context(|| format!("loading config from {}", p.display()))?,
        None => CatalogConfig::load().context("loading config")?,
    };
    if let Some(root) = data_root {
        config.data_root = root;
        config.validate()?;
    }
    Ok(config)
}

#[derive(Debug, Serialize)]
struct SearchReport {
    tab: Tab,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    results: Vec<ResultEntry>,
}

#[derive(Debug, Serialize)]
struct ResultEntry {
    id: Option<String>,
    label: String,
    category: Category,
    natureza: Option<String>,
    detail_url: Option<String>,
}

impl ResultEntry {
    fn from_record(record: &Record, detail_page: &str) -> Self {
        Self {
            id: record.id.as_ref().map(|id| id.as_text()),
            label: display_label(record),
            category: record.category,
            natureza: record.natureza.clone(),
            detail_url: record
                .id
                .as_ref()
                .map(|id| links::detail_url(detail_page, id)),
        }
    }
}

async fn run_search(config: &CatalogConfig, state: &FilterState, json: bool) -> Result<()> {
    let root: DataRoot = config.data_root();
    let store = RecordStore::load_from_root(&root)
        .await
        .map_err(|e| anyhow::Error::new(e).context(LOAD_ERROR_MESSAGE))?;

    let outcome = evaluate(&store, state);
    let report = match &outcome {
        QueryOutcome::Results(records) => SearchReport {
            tab: state.tab(),
            count: records.len(),
            message: None,
            results: records
                .iter()
                .map(|r| ResultEntry::from_record(r, &config.detail_page))
                .collect(),
        },
        QueryOutcome::NoResults { tab } => SearchReport {
            tab: *tab,
            count: 0,
            message: Some(no_results_message(*tab)),
            results: Vec::new(),
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(message) = report.message {
        println!("{message}");
        return Ok(());
    }
    for entry in &report.results {
        match &entry.detail_url {
            Some(url) => println!("{}  {}", console::style(&entry.label).bold(), url),
            None => println!("{}", console::style(&entry.label).bold()),
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct CategoryEntry {
    key: &'static str,
    tab: Tab,
    dataset: String,
}

fn print_categories(json: bool) -> Result<()> {
    let entries: Vec<CategoryEntry> = Category::all()
        .map(|c| CategoryEntry {
            key: c.key(),
            tab: c.tab(),
            dataset: c.dataset_path().to_string_lossy().into_owned(),
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for e in &entries {
            println!("{:<13} {:<28} {}", e.tab.as_str(), e.key, e.dataset);
        }
    }
    Ok(())
}
