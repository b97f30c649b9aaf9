use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use idcard_directory::EmployeeRecord;

use super::{CardRepository, DOMAINS_KEY, DomainAdditions, RECORDS_KEY};
use crate::error::PersistenceError;

/// Repository keeping one pretty-printed JSON document per key in a directory:
/// `{dir}/ids.json` and `{dir}/domains.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, PersistenceError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(key, path = %path.display(), "no stored document yet");
                return Ok(T::default());
            }
            Err(err) => return Err(PersistenceError::io(path, err)),
        };

        if raw.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&raw).map_err(|err| PersistenceError::corrupt(key, err))
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|err| PersistenceError::io(&self.dir, err))?;

        let payload =
            serde_json::to_string_pretty(value).map_err(|err| PersistenceError::encode(key, err))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, payload).map_err(|err| PersistenceError::io(&tmp, err))?;
        fs::rename(&tmp, &path).map_err(|err| PersistenceError::io(&path, err))?;

        tracing::debug!(key, path = %path.display(), "stored document");
        Ok(())
    }
}

impl CardRepository for JsonFileRepository {
    fn load_records(&self) -> Result<Vec<EmployeeRecord>, PersistenceError> {
        self.read(RECORDS_KEY)
    }

    fn save_records(&self, records: &[EmployeeRecord]) -> Result<(), PersistenceError> {
        self.write(RECORDS_KEY, records)
    }

    fn load_domains(&self) -> Result<DomainAdditions, PersistenceError> {
        self.read(DOMAINS_KEY)
    }

    fn save_domains(&self, domains: &DomainAdditions) -> Result<(), PersistenceError> {
        self.write(DOMAINS_KEY, domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(tmp.path().join("not-created-yet"));
        assert!(repo.load_records().unwrap().is_empty());
        assert!(repo.load_domains().unwrap().is_empty());
    }

    #[test]
    fn save_creates_directory_and_round_trips_domains() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(tmp.path().join("nested"));

        let mut domains = DomainAdditions::new();
        domains.insert("Machine Learning".to_string(), 25);
        domains.insert("Legal".to_string(), 40);
        repo.save_domains(&domains).unwrap();

        assert!(repo.path_for(DOMAINS_KEY).exists());
        let loaded = repo.load_domains().unwrap();
        assert_eq!(loaded, domains);
        assert_eq!(
            loaded.keys().collect::<Vec<_>>(),
            vec!["Machine Learning", "Legal"]
        );
    }

    #[test]
    fn unreadable_json_is_corrupt_not_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(tmp.path());
        fs::write(repo.path_for(RECORDS_KEY), "{ not json").unwrap();

        match repo.load_records() {
            Err(PersistenceError::Corrupt { key, .. }) => assert_eq!(key, RECORDS_KEY),
            other => panic!("Expected Corrupt error, got {other:?}"),
        }
    }

    #[test]
    fn non_array_record_document_is_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(tmp.path());
        fs::write(repo.path_for(RECORDS_KEY), r#"{"empId":"EMPP2021301"}"#).unwrap();

        assert!(matches!(
            repo.load_records(),
            Err(PersistenceError::Corrupt { .. })
        ));
    }

    #[test]
    fn blank_document_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(tmp.path());
        fs::write(repo.path_for(RECORDS_KEY), "  \n").unwrap();
        assert!(repo.load_records().unwrap().is_empty());
    }
}
