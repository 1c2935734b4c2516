use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use dojo::corpus::{Corpus, loader};
use dojo::packages::{PackageStore, extract_pool, generate, stats_for, validate_size};
use dojo::storage::FileStore;
use dojo::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dojo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Corpus file to use instead of the installed one
    #[arg(short, long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a corpus file and install it as the active corpus
    Import {
        /// Path to a JSON Lines corpus file
        path: PathBuf,
    },
    /// List the topics in the active corpus
    Topics,
    /// Show the active package set and its progress
    Packages,
    /// Generate a package set without entering the TUI
    Generate {
        /// Questions per package
        #[arg(short, long, default_value = "50")]
        size: String,
    },
    /// Clear the package set and all its progress
    Reset,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dojo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Import { path }) => {
            let (dest, count) = loader::import(&path)?;
            println!("Imported {} topics to {}", count, dest.display());
        }
        Some(Commands::Topics) => {
            let corpus = load_corpus(cli.corpus.as_deref(), &config)?;
            print_topics(&corpus);
        }
        Some(Commands::Packages) => {
            let store = FileStore::new(Config::state_dir()?);
            print_packages(&store);
        }
        Some(Commands::Generate { size }) => {
            let corpus = load_corpus(cli.corpus.as_deref(), &config)?;
            let pool = extract_pool(&corpus);
            let size = validate_size(&size, pool.len())?;

            let package_config = generate(&pool, size);
            let store = FileStore::new(Config::state_dir()?);
            PackageStore::new(&store).replace(&package_config)?;
            println!(
                "Generated {} packages from {} questions (seed {})",
                package_config.packages.len(),
                package_config.total_questions,
                package_config.seed
            );
        }
        Some(Commands::Reset) => {
            let store = FileStore::new(Config::state_dir()?);
            PackageStore::new(&store).reset()?;
            println!("Package set and progress cleared");
        }
        None => {
            // Launch TUI
            let corpus = load_corpus(cli.corpus.as_deref(), &config)?;
            if corpus.is_empty() {
                bail!("The corpus is empty. Import one with: dojo import <path>");
            }
            let mut app = App::new(config, corpus)?;
            app.run()?;
        }
    }

    Ok(())
}

/// Load the corpus the CLI flag or config points at
fn load_corpus(override_path: Option<&Path>, config: &Config) -> Result<Corpus> {
    let path = loader::resolve_path(override_path, config)?;
    Ok(loader::load(&path)?)
}

fn print_topics(corpus: &Corpus) {
    for category in corpus.categories() {
        println!("{category}");
        for topic in corpus.topics.iter().filter(|t| t.category == category) {
            println!("  {} ({})", topic.name, topic.knowledge_depth.label());
        }
    }
    println!();
    println!("{} topics, {} questions", corpus.len(), corpus.question_count());
}

fn print_packages(store: &FileStore) {
    let package_store = PackageStore::new(store);
    let Some(config) = package_store.load_config() else {
        println!("No package set. Generate one with: dojo generate --size <n>");
        return;
    };
    let progress = package_store.load_progress();

    println!("Seed: {}", config.seed);
    println!("Created: {}", config.created_at);
    println!("Questions per package: {}", config.questions_per_package);
    println!();
    for package in &config.packages {
        let stats = stats_for(&progress, &package.id);
        if stats.attempted() {
            println!(
                "  {}  {}/{} correct, last attempt {}",
                package.name, stats.correct, package.total_questions, stats.last_attempt
            );
        } else {
            println!("  {}  not attempted", package.name);
        }
    }
}
