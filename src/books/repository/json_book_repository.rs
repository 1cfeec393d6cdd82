use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::books::domain::model::Catalog;
use crate::core::library::{LibraryError, LibraryResult, LoadStatus};
use crate::core::repository::{Loaded, Repository};

const INDENT: &[u8] = b"    ";

// Stores the whole catalog as one pretty-printed JSON object keyed by title.
#[derive(Debug)]
pub struct JsonBookRepository {
    path: PathBuf,
}

impl JsonBookRepository {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

pub(crate) fn to_json(catalog: &Catalog) -> LibraryResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    catalog.serialize(&mut ser).map_err(|err| {
        LibraryError::io(format!("failed to serialize catalog {}", err).as_str(), None)
    })?;
    buf.push(b'\n');
    Ok(buf)
}

pub(crate) fn from_json(bytes: &[u8]) -> LibraryResult<Catalog> {
    Ok(serde_json::from_slice::<Catalog>(bytes)?)
}

#[async_trait]
impl Repository<Catalog> for JsonBookRepository {
    async fn load(&self) -> LibraryResult<Loaded<Catalog>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "store not found, starting a new catalog");
                return Ok(Loaded::new(Catalog::new(), LoadStatus::CreatedNew));
            }
            Err(err) => {
                tracing::error!(path = %self.path.display(), error = %err, "failed to read store");
                return Err(LibraryError::io(
                    format!("failed to read '{}': {}", self.path.display(), err).as_str(),
                    Some(format!("{:?}", err.kind()))));
            }
        };
        let catalog = from_json(&bytes).map_err(|err| {
            tracing::error!(path = %self.path.display(), error = %err, "store content is malformed");
            LibraryError::corrupt_data(format!("'{}' is not a valid catalog: {}", self.path.display(), err).as_str())
        })?;
        tracing::info!(path = %self.path.display(), books = catalog.len(), "catalog loaded");
        Ok(Loaded::new(catalog, LoadStatus::Loaded))
    }

    async fn save(&self, catalog: &Catalog) -> LibraryResult<usize> {
        let bytes = to_json(catalog)?;
        let tmp = self.temp_path();
        // write aside and rename so the target is never left half-written
        if let Err(err) = tokio::fs::write(&tmp, &bytes).await {
            tracing::error!(path = %tmp.display(), error = %err, "failed to write store");
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(LibraryError::io(
                format!("failed to write '{}': {}", self.path.display(), err).as_str(),
                Some(format!("{:?}", err.kind()))));
        }
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            tracing::error!(path = %self.path.display(), error = %err, "failed to replace store");
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(LibraryError::io(
                format!("failed to write '{}': {}", self.path.display(), err).as_str(),
                Some(format!("{:?}", err.kind()))));
        }
        tracing::info!(path = %self.path.display(), books = catalog.len(), "catalog saved");
        Ok(catalog.len())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use crate::books::domain::model::{BookRecord, Catalog};
    use crate::books::repository::json_book_repository::{from_json, to_json, JsonBookRepository};
    use crate::core::library::{LibraryError, LoadStatus, SearchKind};
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_round_trip_catalog() {
        let dir = TempDir::new().expect("should create temp dir");
        let repo = JsonBookRepository::new(&dir.path().join("library.json"));

        let catalog = Catalog::seed();
        let written = repo.save(&catalog).await.expect("should save catalog");
        assert_eq!(5, written);

        let loaded = repo.load().await.expect("should load catalog");
        assert_eq!(LoadStatus::Loaded, loaded.status);
        assert_eq!(catalog, loaded.entity);
    }

    #[tokio::test]
    async fn test_should_create_new_when_missing() {
        let dir = TempDir::new().expect("should create temp dir");
        let repo = JsonBookRepository::new(&dir.path().join("nonexistent.json"));

        let loaded = repo.load().await.expect("missing store is not an error");
        assert_eq!(LoadStatus::CreatedNew, loaded.status);
        assert!(loaded.entity.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_malformed_store() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = dir.path().join("library.json");
        let repo = JsonBookRepository::new(&path);

        for content in [
            "{ not json",
            "[]",
            r#"{"1984": {"authors": ["a"], "genres": ["b"]}}"#,
            r#"{"1984": {"authors": ["a"], "genres": ["b"], "quantity": -1}}"#,
            r#"{"1984": {"authors": ["a"], "genres": ["b"], "quantity": 1.5}}"#,
            r#"{"1984": {"authors": "a", "genres": ["b"], "quantity": 1}}"#,
            r#"{"1984": {"authors": ["a"], "genres": ["b"], "quantity": 1, "isbn": "x"}}"#,
            r#"{"1984": {"authors": [], "genres": ["b"], "quantity": 1}}"#,
            r#"{"1984": {"authors": ["a"], "genres": [], "quantity": 1}}"#,
            r#"{"1984": {"authors": ["a"], "genres": ["b"], "quantity": 99999999999999999999999}}"#,
        ] {
            std::fs::write(&path, content).expect("should write fixture");
            let res = repo.load().await;
            assert!(matches!(res, Err(LibraryError::CorruptData { .. })), "accepted {}", content);
        }
    }

    #[tokio::test]
    async fn test_should_keep_file_order_across_load_and_save() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{
            "Zeta": {"authors": ["Автор"], "genres": ["Роман"], "quantity": 5000000000},
            "Alpha": {"authors": ["Автор"], "genres": ["Роман"], "quantity": 1}
        }"#).expect("should write fixture");
        let repo = JsonBookRepository::new(&path);

        let mut catalog = repo.load().await.expect("should load catalog").entity;
        let titles: Vec<String> = catalog.list_all().into_iter().map(|row| row.title).collect();
        assert_eq!(vec!["Zeta", "Alpha"], titles);
        assert_eq!(vec!["Zeta", "Alpha"], catalog.search(SearchKind::Author, "автор"));
        assert_eq!(5_000_000_000, catalog.get("Zeta").expect("should return book").quantity);

        catalog.insert("Beta", BookRecord::new("Автор", "Роман", 2));
        let _ = repo.save(&catalog).await.expect("should save catalog");
        let text = std::fs::read_to_string(&path).expect("should read store");
        let zeta = text.find("\"Zeta\"").expect("Zeta saved");
        let alpha = text.find("\"Alpha\"").expect("Alpha saved");
        let beta = text.find("\"Beta\"").expect("Beta saved");
        assert!(zeta < alpha && alpha < beta, "unexpected order in {}", text);
    }

    #[tokio::test]
    async fn test_should_fail_save_into_missing_dir() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = dir.path().join("missing").join("library.json");
        let repo = JsonBookRepository::new(&path);

        let res = repo.save(&Catalog::seed()).await;
        assert!(matches!(res, Err(LibraryError::Io { .. })));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_should_overwrite_existing_store() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = dir.path().join("library.json");
        std::fs::write(&path, "stale content").expect("should write fixture");
        let repo = JsonBookRepository::new(&path);

        let mut catalog = Catalog::new();
        catalog.insert("Дюна", BookRecord::new("Фрэнк Герберт", "Научная фантастика", 2));
        let _ = repo.save(&catalog).await.expect("should save catalog");

        let loaded = repo.load().await.expect("should load catalog");
        assert_eq!(catalog, loaded.entity);
        assert!(!dir.path().join("library.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_should_write_stable_field_order() {
        let mut catalog = Catalog::new();
        catalog.insert("1984", BookRecord::new("Джордж Оруэлл", "Дистопия", 4));
        let text = String::from_utf8(to_json(&catalog).expect("should serialize")).expect("utf-8");
        let expected = r#"{
    "1984": {
        "authors": [
            "Джордж Оруэлл"
        ],
        "genres": [
            "Дистопия"
        ],
        "quantity": 4
    }
}
"#;
        assert_eq!(expected, text);
        assert_eq!(catalog, from_json(text.as_bytes()).expect("should parse"));
    }
}
