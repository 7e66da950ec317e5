//! Command-line front end for the library catalog. It resolves settings,
//! installs logging, and forwards each subcommand to the `Catalog` facade.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use library_catalog::{AuthorName, Book, Catalog, DatabaseSettings, NewBook, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "library-catalog")]
#[command(about = "Manage a library's book inventory", long_about = None)]
struct Cli {
    /// Config file (defaults to $LIBRARY_CATALOG_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, overriding the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every book with its author and physical copy
    List,
    /// Find books whose title contains PATTERN (case-insensitive)
    Search { pattern: String },
    /// Add a book with one author and one physical copy
    Add {
        #[arg(long)]
        title: String,
        /// Author name, stored as given
        #[arg(long)]
        author: String,
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        dewey: String,
        /// Publisher ID (see `publishers`)
        #[arg(long)]
        publisher: i64,
        #[arg(long)]
        pages: i64,
        #[arg(long)]
        language: String,
        #[arg(long)]
        genre: String,
    },
    /// Rename the book currently titled FROM
    Retitle {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Delete a book and every row referencing it
    Delete { book_id: i64 },
    /// List publishers
    Publishers,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load()?,
    };
    if let Some(db) = &cli.db {
        settings.database = DatabaseSettings::at(db);
    }
    setup_logging(cli.verbose, &settings.log_level);

    let mut catalog = Catalog::new(&settings);
    let result = execute(&mut catalog, cli.command);
    catalog.close().context("failed to close database")?;
    result
}

fn execute(catalog: &mut Catalog, command: Commands) -> Result<()> {
    match command {
        Commands::List => {
            let books = catalog.get_books().context("failed to load books")?;
            print_books(&books);
        }
        Commands::Search { pattern } => {
            let books = catalog
                .search_books(&pattern)
                .context("failed to search books")?;
            print_books(&books);
        }
        Commands::Add {
            title,
            author,
            isbn,
            dewey,
            publisher,
            pages,
            language,
            genre,
        } => {
            let book = NewBook {
                title,
                author: AuthorName::single(author),
                isbn,
                dewey,
                publisher_id: publisher,
                number_of_pages: pages,
                language,
                genre,
            };
            let ids = catalog
                .insert_book(&book)
                .context("failed to insert book")?;
            println!("Added book {}", ids.book_id);
        }
        Commands::Retitle { from, to } => {
            let book = catalog
                .search_books(&from)
                .context("failed to search books")?
                .into_iter()
                .find(|book| book.title == from)
                .ok_or_else(|| anyhow!("no book titled '{from}'"))?;
            let updated = catalog
                .update_book(&to, &book)
                .context("failed to update book")?;
            println!("Renamed {updated} publication(s) to '{to}'");
        }
        Commands::Delete { book_id } => {
            catalog
                .delete_book_and_references(book_id)
                .context("failed to delete book")?;
            println!("Deleted book {book_id}");
        }
        Commands::Publishers => {
            let publishers = catalog
                .get_publishers()
                .context("failed to load publishers")?;
            for publisher in publishers {
                match &publisher.website {
                    Some(site) => println!("{}\t{}\t{}", publisher.id, publisher, site),
                    None => println!("{}\t{}", publisher.id, publisher),
                }
            }
        }
    }
    Ok(())
}

fn print_books(books: &[Book]) {
    for book in books {
        let copy = match &book.physical {
            Some(p) => format!("{} pages, {}, {}", p.number_of_pages, p.language, p.genre),
            None => "no physical copy".to_string(),
        };
        println!(
            "{}\t{}\t{}\tISBN {}\tDewey {}\tpublisher {}\t{}",
            book.id,
            book.title,
            book.authors.trim(),
            book.isbn,
            book.dewey,
            book.publisher_id,
            copy
        );
    }
}

fn setup_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("library_catalog=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
