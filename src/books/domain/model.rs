use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tabled::Tabled;
use crate::core::library::{BookField, LibraryError, LibraryResult, SearchKind, StatsKind};

// BookRecord holds the metadata of one title; the title itself is the key in
// the catalog. Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredBookRecord")]
pub struct BookRecord {
    pub authors: Vec<String>,
    pub genres: Vec<String>,
    pub quantity: u64,
}

// On-disk shape of a record before the list invariants are checked.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredBookRecord {
    authors: Vec<String>,
    genres: Vec<String>,
    quantity: u64,
}

impl TryFrom<StoredBookRecord> for BookRecord {
    type Error = String;

    fn try_from(stored: StoredBookRecord) -> Result<Self, Self::Error> {
        if stored.authors.is_empty() {
            return Err("record has no authors".to_string());
        }
        if stored.genres.is_empty() {
            return Err("record has no genres".to_string());
        }
        Ok(Self {
            authors: stored.authors,
            genres: stored.genres,
            quantity: stored.quantity,
        })
    }
}

impl BookRecord {
    pub fn new(author: &str, genre: &str, quantity: u64) -> Self {
        Self {
            authors: vec![author.to_string()],
            genres: vec![genre.to_string()],
            quantity,
        }
    }

    pub fn with_lists(authors: &[&str], genres: &[&str], quantity: u64) -> Self {
        Self {
            authors: authors.iter().map(|a| a.to_string()).collect(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            quantity,
        }
    }

    fn field_values(&self, kind: SearchKind) -> &[String] {
        match kind {
            SearchKind::Author => &self.authors,
            SearchKind::Genre => &self.genres,
        }
    }

    // replaces the selected field wholesale; authors and genres become a
    // one-element list
    fn apply(&mut self, update: BookUpdate) {
        match update {
            BookUpdate::Author(author) => self.authors = vec![author],
            BookUpdate::Genre(genre) => self.genres = vec![genre],
            BookUpdate::Quantity(quantity) => self.quantity = quantity,
        }
    }
}

// Data for a title that is not in the catalog yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub author: String,
    pub genre: String,
    pub quantity: u64,
}

impl NewBook {
    pub fn new(author: &str, genre: &str, quantity: u64) -> Self {
        Self {
            author: author.to_string(),
            genre: genre.to_string(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookUpdate {
    Author(String),
    Genre(String),
    Quantity(u64),
}

impl BookUpdate {
    pub fn field(&self) -> BookField {
        match self {
            BookUpdate::Author(_) => BookField::Author,
            BookUpdate::Genre(_) => BookField::Genre,
            BookUpdate::Quantity(_) => BookField::Quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookChange {
    Create(NewBook),
    Update(BookUpdate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Updated(BookField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stats {
    TotalBooks(usize),
    TotalCopies(u64),
    ByGenre(IndexMap<String, usize>),
    ByAuthor(IndexMap<String, usize>),
}

// One display row of the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct BookRow {
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Authors")]
    pub authors: String,
    #[tabled(rename = "Genres")]
    pub genres: String,
    #[tabled(rename = "Quantity")]
    pub quantity: u64,
}

// Catalog maps a case-sensitive title to its record. Titles iterate in the
// order they were first added or loaded, which is also the order they are
// saved and listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    books: IndexMap<String, BookRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed() -> Self {
        let mut catalog = Catalog::new();
        catalog.insert("Солярис", BookRecord::with_lists(
            &["Станислав Лем"],
            &["Научная фантастика", "Психологический роман"], 3));
        catalog.insert("1984", BookRecord::with_lists(
            &["Джордж Оруэлл"],
            &["Дистопия", "Научная фантастика"], 4));
        catalog.insert("Сумеречный дозор", BookRecord::with_lists(
            &["Сергей Лукьяненко", "Владимир Васильев"],
            &["Фэнтези", "Городское фэнтези", "Научная фантастика"], 4));
        catalog.insert("Властелин колец", BookRecord::with_lists(
            &["Дж. Р. Р. Толкин"],
            &["Фэнтези", "Эпическое фэнтези"], 5));
        catalog.insert("Игра престолов", BookRecord::with_lists(
            &["Джордж Р. Р. Мартин"],
            &["Фэнтези", "Политический триллер"], 5));
        catalog
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.books.contains_key(title)
    }

    pub fn get(&self, title: &str) -> LibraryResult<&BookRecord> {
        self.books.get(title).ok_or_else(|| {
            LibraryError::not_found(format!("book '{}' not found", title).as_str())
        })
    }

    // unconditional insert, used for seeding and loading
    pub fn insert(&mut self, title: &str, record: BookRecord) -> Option<BookRecord> {
        self.books.insert(title.to_string(), record)
    }

    pub fn add_or_update(&mut self, title: &str, change: BookChange) -> LibraryResult<AddOutcome> {
        match change {
            BookChange::Create(book) => {
                if self.books.contains_key(title) {
                    return Err(LibraryError::duplicate_key(format!("book '{}' already exists", title).as_str()));
                }
                self.books.insert(title.to_string(),
                                  BookRecord::new(&book.author, &book.genre, book.quantity));
                Ok(AddOutcome::Added)
            }
            BookChange::Update(update) => {
                let record = self.books.get_mut(title).ok_or_else(|| {
                    LibraryError::not_found(format!("book '{}' not found", title).as_str())
                })?;
                let field = update.field();
                record.apply(update);
                Ok(AddOutcome::Updated(field))
            }
        }
    }

    pub fn delete_by_title(&mut self, title: &str) -> LibraryResult<BookRecord> {
        self.books.shift_remove(title).ok_or_else(|| {
            LibraryError::not_found(format!("book '{}' not found", title).as_str())
        })
    }

    // removes every title starting with prefix, ignoring case; returns the
    // removed titles in catalog order
    pub fn delete_by_prefix(&mut self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        let matched: Vec<String> = self.books.keys()
            .filter(|title| title.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        self.books.retain(|title, _| !title.to_lowercase().starts_with(&prefix));
        matched
    }

    pub fn search(&self, kind: SearchKind, query: &str) -> Vec<String> {
        let query = query.to_lowercase();
        self.books.iter()
            .filter(|(_, record)| {
                record.field_values(kind).iter().any(|value| value.to_lowercase().contains(&query))
            })
            .map(|(title, _)| title.clone())
            .collect()
    }

    pub fn compute_stats(&self, kind: StatsKind) -> Stats {
        match kind {
            StatsKind::TotalBooks => Stats::TotalBooks(self.books.len()),
            StatsKind::TotalCopies => Stats::TotalCopies(
                self.books.values().fold(0u64, |total, record| total.saturating_add(record.quantity))),
            StatsKind::ByGenre => Stats::ByGenre(self.membership_counts(SearchKind::Genre)),
            StatsKind::ByAuthor => Stats::ByAuthor(self.membership_counts(SearchKind::Author)),
        }
    }

    // counts are keyed in order of first appearance
    fn membership_counts(&self, kind: SearchKind) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for record in self.books.values() {
            for value in record.field_values(kind) {
                *counts.entry(value.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn list_all(&self) -> Vec<BookRow> {
        self.books.iter()
            .map(|(title, record)| BookRow {
                title: title.clone(),
                authors: record.authors.join(", "),
                genres: record.genres.join(", "),
                quantity: record.quantity,
            })
            .collect()
    }
}
