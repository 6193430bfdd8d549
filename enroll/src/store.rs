//! Append-only identity records kept as `id,name,phone` lines.
//!
//! Fields are written verbatim. A name or phone number containing a comma or
//! newline corrupts the line it is written to. Nothing locks the file, so two
//! concurrent enrollments can hand out the same id.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed identity record on line {line}: {content:?}")]
    Malformed { line: usize, content: String },
    #[error("identity ids exhausted: {0} is already on record")]
    IdsExhausted(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub id: u32,
    pub name: String,
    pub phone: String,
}

impl IdentityRecord {
    pub fn new(id: u32, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
        }
    }

    fn to_line(&self) -> String {
        format!("{},{},{}\n", self.id, self.name, self.phone)
    }
}

#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blank lines with their 1-based line numbers. A missing file reads
    /// as empty.
    fn lines(&self) -> Result<Vec<(usize, String)>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, line.to_string()))
            .collect())
    }

    /// Id for the next enrollment: one past the largest id on record, or 1.
    pub fn next_id(&self) -> Result<u32, StoreError> {
        let mut max = 0;
        for (line, content) in self.lines()? {
            let id = content
                .split(',')
                .next()
                .and_then(|field| field.trim().parse::<u32>().ok());
            match id {
                Some(id) => max = max.max(id),
                None => return Err(StoreError::Malformed { line, content }),
            }
        }
        max.checked_add(1).ok_or(StoreError::IdsExhausted(max))
    }

    /// Parse every record. The name is everything between the first and the
    /// last separator.
    pub fn records(&self) -> Result<Vec<IdentityRecord>, StoreError> {
        self.lines()?
            .into_iter()
            .map(|(line, content)| {
                let parsed = content.split_once(',').and_then(|(id, rest)| {
                    let (name, phone) = rest.rsplit_once(',')?;
                    Some(IdentityRecord::new(id.trim().parse().ok()?, name, phone))
                });
                parsed.ok_or(StoreError::Malformed { line, content })
            })
            .collect()
    }

    pub fn append(&self, record: &IdentityRecord) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.to_line().as_bytes())?;
        info!(id = record.id, path = %self.path.display(), "identity recorded");
        Ok(())
    }
}
