use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use library_catalog::{
    BookQuery, Isbn, Library, LibraryConfig, LoanLogger, NewBook, NewUser, UserId, UserQuery,
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the catalog demo
#[derive(Parser, Debug)]
#[command(name = "catalog", author, version, about, long_about = None)]
struct Args {
    /// JSON catalog configuration; the sample catalog is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every catalog operation at debug level
    #[arg(short, long)]
    verbose: bool,

    /// What to run against the seeded catalog
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through adding, searching, borrowing, returning and removing records
    Demo,
    /// Print the seeded catalog as JSON
    Snapshot,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &args.config {
        Some(path) => LibraryConfig::from_path(path)?,
        None => LibraryConfig::sample(),
    };
    let mut library = Library::with_config(config)?;
    library.register_observer(Box::new(LoanLogger));

    match args.command {
        Command::Demo => demo(&mut library),
        Command::Snapshot => {
            println!("{}", serde_json::to_string_pretty(&library.snapshot())?);
        }
    }

    Ok(())
}

/// Runs the scripted walk-through against `library`
fn demo(library: &mut Library) {
    println!("{}", "Library Catalog Demonstration".green().bold());
    println!("=====================================\n");

    println!("{}", "Adding a user".yellow().bold());
    println!("  {}", library.add_user(NewUser::new("Tobi")).message());

    println!("{}", "Adding a book".yellow().bold());
    let added = library.add_book(NewBook::new(
        "Harry Potter and the Prisoner of Azkaban",
        "J.K Rowling",
        Isbn(12347),
    ));
    println!("  {}", added.message());

    println!("{}", "Searching".yellow().bold());
    match library.search_user(&UserQuery::by_id(UserId(1))) {
        Some(found) => println!("  user 1: {found}"),
        None => println!("  user 1: not found"),
    }
    for book in library.search_book(&BookQuery::by_author("J.K Rowling")).to_books() {
        println!("  by J.K Rowling: {book}");
    }

    let (user_id, isbn) = (UserId(1), Isbn(12345));

    println!("{}", "Borrowing".yellow().bold());
    println!("  {}", library.borrow_book(user_id, isbn).message());
    println!("  {}", library.borrow_book(user_id, isbn).message());
    println!("  available: {}", library.is_book_available(isbn).message());

    println!("{}", "Returning".yellow().bold());
    println!("  {}", library.return_book(user_id, isbn).message());
    println!("  {}", library.return_book(user_id, isbn).message());
    println!("  available: {}", library.is_book_available(isbn).message());

    println!("{}", "Removing".yellow().bold());
    println!("  removed user: {}", library.remove_user(user_id).message());
    println!("  removed book: {}", library.remove_book(isbn).message());
    println!("  removed book again: {}", library.remove_book(isbn).message());

    println!("\n{}", "Loan history:".green().bold());
    for record in library.history() {
        println!("  {:?} at {}s", record.event, record.at.seconds);
    }

    println!("\n{}", "Demonstration complete!".green().bold());
}
