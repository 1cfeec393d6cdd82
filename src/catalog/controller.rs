use std::io::{BufRead, Write};

use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::books::domain::model::{AddOutcome, BookUpdate, Stats};
use crate::catalog::command::add_or_update_book_cmd::{AddOrUpdateBookCommand, AddOrUpdateBookCommandRequest};
use crate::catalog::command::get_stats_cmd::{GetStatsCommand, GetStatsCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::load_catalog_cmd::{LoadCatalogCommand, LoadCatalogCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::save_catalog_cmd::{SaveCatalogCommand, SaveCatalogCommandRequest};
use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::{BookField, LibraryResult, LoadStatus, SearchKind, StatsKind};
use crate::utils::validation::parse_quantity;

const CANCEL_WORDS: [&str; 2] = ["cancel", "отмена"];

/// Line-oriented terminal: prompts on `output`, reads answers from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> LibraryResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    // None once input is exhausted
    pub fn prompt(&mut self, text: &str) -> LibraryResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    // re-prompts until the answer is a valid quantity
    pub fn prompt_quantity(&mut self, text: &str) -> LibraryResult<Option<u64>> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse_quantity(&answer) {
                Ok(quantity) => return Ok(Some(quantity)),
                Err(err) => {
                    tracing::debug!(input = answer.as_str(), "quantity rejected");
                    self.say(&format!("Invalid quantity: {}. Please enter a number.", err))?;
                }
            }
        }
    }

    fn table<T: Tabled>(&mut self, title: &str, rows: &[T]) -> LibraryResult<()> {
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();
        self.say(title)?;
        self.say(&table)
    }
}

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Books")]
    books: usize,
}

/// Runs the main menu until the user exits or input ends.
pub async fn run_menu<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                            console: &mut Console<R, W>) -> LibraryResult<()> {
    loop {
        console.say("")?;
        console.say("1: Show all books")?;
        console.say("2: Search books by author or genre")?;
        console.say("3: Add a book or update an existing one")?;
        console.say("4: Delete books")?;
        console.say("5: Catalog statistics")?;
        console.say(&format!("6: Save catalog to {}", catalog_service.store_location()))?;
        console.say(&format!("7: Load catalog from {}", catalog_service.store_location()))?;
        console.say("0: Exit")?;
        let Some(choice) = console.prompt("\nChoose an action: ")? else {
            break;
        };
        match choice.trim() {
            "1" => show_all_books(catalog_service, console).await?,
            "2" => search_books(catalog_service, console).await?,
            "3" => add_or_update_book(catalog_service, console).await?,
            "4" => delete_books(catalog_service, console).await?,
            "5" => show_stats(catalog_service, console).await?,
            "6" => save_catalog(catalog_service, console).await?,
            "7" => load_catalog(catalog_service, console).await?,
            "0" => break,
            _ => console.say("Invalid choice. Please try again.")?,
        }
    }
    console.say("Bye.")
}

fn report<R: BufRead, W: Write>(console: &mut Console<R, W>, err: &CommandError) -> LibraryResult<()> {
    tracing::warn!(error = %err, "operation failed");
    console.say(&format!("Error: {}", err))
}

pub async fn show_all_books<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                                  console: &mut Console<R, W>) -> LibraryResult<()> {
    match ListBooksCommand::new(catalog_service).execute(ListBooksCommandRequest::default()).await {
        Ok(res) if res.books.is_empty() => console.say("The catalog is empty."),
        Ok(res) => console.table("Library catalog", &res.books),
        Err(err) => report(console, &err),
    }
}

pub async fn search_books<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                                console: &mut Console<R, W>) -> LibraryResult<()> {
    let Some(kind) = console.prompt("Search by author or genre? (author/genre): ")? else {
        return Ok(());
    };
    let kind = match SearchKind::try_from(kind.as_str()) {
        Ok(kind) => kind,
        Err(_) => return console.say("Unknown search type. Please choose \"author\" or \"genre\"."),
    };
    let label = match kind {
        SearchKind::Author => "author",
        SearchKind::Genre => "genre",
    };
    let Some(query) = console.prompt(&format!("Enter the {} to search for: ", label))? else {
        return Ok(());
    };
    match SearchBooksCommand::new(catalog_service).execute(SearchBooksCommandRequest::new(kind, &query)).await {
        Ok(res) if res.titles.is_empty() => console.say("No books found."),
        Ok(res) => {
            console.say("Books found:")?;
            for title in res.titles {
                console.say(&title)?;
            }
            Ok(())
        }
        Err(err) => report(console, &err),
    }
}

pub async fn add_or_update_book<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                                      console: &mut Console<R, W>) -> LibraryResult<()> {
    let Some(title) = console.prompt("Enter the book title: ")? else {
        return Ok(());
    };
    if catalog_service.contains_book(&title).await {
        update_book(catalog_service, console, &title).await
    } else {
        add_book(catalog_service, console, &title).await
    }
}

async fn add_book<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                        console: &mut Console<R, W>, title: &str) -> LibraryResult<()> {
    let Some(author) = console.prompt("Enter the author: ")? else {
        return Ok(());
    };
    let Some(genre) = console.prompt("Enter the genre: ")? else {
        return Ok(());
    };
    let Some(quantity) = console.prompt_quantity("Enter the number of copies: ")? else {
        return Ok(());
    };
    let req = AddOrUpdateBookCommandRequest::add(title, &author, &genre, quantity);
    match AddOrUpdateBookCommand::new(catalog_service).execute(req).await {
        Ok(_) => console.say(&format!("Book '{}' added.", title)),
        Err(err) => report(console, &err),
    }
}

async fn update_book<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                           console: &mut Console<R, W>, title: &str) -> LibraryResult<()> {
    loop {
        console.say(&format!("Book '{}' is already in the catalog. What should be updated?", title))?;
        console.say("1: Author")?;
        console.say("2: Genre")?;
        console.say("3: Number of copies")?;
        console.say("4: Back")?;
        let Some(choice) = console.prompt("Choose an action: ")? else {
            return Ok(());
        };
        if choice.trim() == "4" {
            return console.say("Returning to the previous menu...");
        }
        let update = match BookField::from_choice(&choice) {
            Some(BookField::Author) => {
                let Some(author) = console.prompt("Enter the new author: ")? else {
                    return Ok(());
                };
                BookUpdate::Author(author)
            }
            Some(BookField::Genre) => {
                let Some(genre) = console.prompt("Enter the new genre: ")? else {
                    return Ok(());
                };
                BookUpdate::Genre(genre)
            }
            Some(BookField::Quantity) => {
                let Some(quantity) = console.prompt_quantity("Enter the new number of copies: ")? else {
                    return Ok(());
                };
                BookUpdate::Quantity(quantity)
            }
            None => {
                console.say("Invalid choice.")?;
                continue;
            }
        };
        let req = AddOrUpdateBookCommandRequest::update(title, update);
        match AddOrUpdateBookCommand::new(&mut *catalog_service).execute(req).await {
            Ok(res) => {
                if let AddOutcome::Updated(field) = res.outcome {
                    console.say(&format!("{} of '{}' updated.", field, title))?;
                }
            }
            Err(err) => report(console, &err)?,
        }
    }
}

pub async fn delete_books<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                                console: &mut Console<R, W>) -> LibraryResult<()> {
    loop {
        console.say("Choose a delete mode:")?;
        console.say("1: Delete one book by title")?;
        console.say("2: Delete all books whose title starts with given text")?;
        console.say("3: Back to the main menu")?;
        let Some(choice) = console.prompt("Choose an action: ")? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => delete_by_title(&mut *catalog_service, console).await?,
            "2" => {
                let Some(prefix) = console.prompt("Enter the first letters of the titles to delete: ")? else {
                    return Ok(());
                };
                let req = RemoveBookCommandRequest::by_prefix(&prefix);
                match RemoveBookCommand::new(&mut *catalog_service).execute(req).await {
                    Ok(res) if res.removed.is_empty() => {
                        console.say(&format!("No books start with \"{}\".", prefix))?
                    }
                    Ok(res) => console.say(&format!("Deleted {} book(s) starting with \"{}\": {}.",
                                                    res.removed.len(), prefix, res.removed.join(", ")))?,
                    Err(err) => report(console, &err)?,
                }
            }
            "3" => return Ok(()),
            _ => console.say("Invalid choice. Please try again.")?,
        }
    }
}

// asks again until a title is deleted or the user cancels
async fn delete_by_title<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                               console: &mut Console<R, W>) -> LibraryResult<()> {
    loop {
        let Some(title) = console.prompt("Enter the title to delete (or \"cancel\" to go back): ")? else {
            return Ok(());
        };
        if CANCEL_WORDS.contains(&title.trim().to_lowercase().as_str()) {
            return Ok(());
        }
        match RemoveBookCommand::new(&mut *catalog_service).execute(RemoveBookCommandRequest::by_title(&title)).await {
            Ok(_) => return console.say(&format!("Book \"{}\" deleted.", title)),
            Err(CommandError::NotFound { .. }) => {
                console.say(&format!("Book \"{}\" was not found. Please try again.", title))?
            }
            Err(err) => return report(console, &err),
        }
    }
}

pub async fn show_stats<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                              console: &mut Console<R, W>) -> LibraryResult<()> {
    loop {
        console.say("Choose statistics:")?;
        console.say("1: Total number of books")?;
        console.say("2: Total number of copies")?;
        console.say("3: Books per genre")?;
        console.say("4: Books per author")?;
        console.say("5: Back to the main menu")?;
        let Some(choice) = console.prompt("Choose an action: ")? else {
            return Ok(());
        };
        if choice.trim() == "5" {
            return Ok(());
        }
        let Some(kind) = StatsKind::from_choice(&choice) else {
            console.say("Invalid choice. Please try again.")?;
            continue;
        };
        match GetStatsCommand::new(&*catalog_service).execute(GetStatsCommandRequest::new(kind)).await {
            Ok(res) => render_stats(console, res.stats)?,
            Err(err) => report(console, &err)?,
        }
    }
}

fn render_stats<R: BufRead, W: Write>(console: &mut Console<R, W>, stats: Stats) -> LibraryResult<()> {
    match stats {
        Stats::TotalBooks(count) => {
            console.table("Total books", &[TotalRow { metric: "Books", value: count.to_string() }])
        }
        Stats::TotalCopies(count) => {
            console.table("Total copies", &[TotalRow { metric: "Copies", value: count.to_string() }])
        }
        Stats::ByGenre(counts) => {
            let rows: Vec<CountRow> = counts.into_iter().map(|(name, books)| CountRow { name, books }).collect();
            console.table("Books per genre", &rows)
        }
        Stats::ByAuthor(counts) => {
            let rows: Vec<CountRow> = counts.into_iter().map(|(name, books)| CountRow { name, books }).collect();
            console.table("Books per author", &rows)
        }
    }
}

pub async fn save_catalog<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                                console: &mut Console<R, W>) -> LibraryResult<()> {
    match SaveCatalogCommand::new(catalog_service).execute(SaveCatalogCommandRequest::default()).await {
        Ok(res) => console.say(&format!("Saved {} book(s) to '{}'.", res.saved, res.location)),
        Err(err) => report(console, &err),
    }
}

pub async fn load_catalog<R: BufRead, W: Write>(catalog_service: &mut dyn CatalogService,
                                                console: &mut Console<R, W>) -> LibraryResult<()> {
    match LoadCatalogCommand::new(catalog_service).execute(LoadCatalogCommandRequest::default()).await {
        Ok(res) if res.status == LoadStatus::CreatedNew => {
            console.say(&format!("File '{}' not found. Started a new catalog.", res.location))
        }
        Ok(res) => console.say(&format!("Catalog loaded from '{}'.", res.location)),
        Err(err) => {
            report(console, &err)?;
            console.say("The current catalog was kept.")
        }
    }
}
