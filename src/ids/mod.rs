//! Identifier generators for record insertion
//!
//! An [`IdGenerator`] holds exactly as many IDs as there are records to insert and
//! serializes as a plain JSON array of strings.

use crate::error::{IdError, Result};
use rand::Rng;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::ops::{Deref, Index};
use tracing::debug;
use uuid::Uuid;

/// Default NanoID alphabet
pub const NANOID_ALPHABET: &str = "_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default NanoID length
pub const NANOID_SIZE: usize = 21;

/// Endless source of UUID v4 strings
pub fn uuid_ids() -> impl Iterator<Item = String> {
    std::iter::repeat_with(|| Uuid::new_v4().to_string())
}

/// Endless source of ULID strings
pub fn ulid_ids() -> impl Iterator<Item = String> {
    std::iter::repeat_with(|| ulid::Ulid::new().to_string())
}

/// Endless source of hex SHA-256 digests of 16 random bytes
pub fn random_sha256_ids() -> impl Iterator<Item = String> {
    std::iter::repeat_with(|| {
        let random_data: [u8; 16] = rand::random();
        hex::encode(Sha256::digest(random_data))
    })
}

/// Hex SHA-256 digest of each document, in document order
pub fn document_sha256_ids<I, S>(documents: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    documents
        .into_iter()
        .map(|doc| hex::encode(Sha256::digest(doc.as_ref().as_bytes())))
}

/// Endless source of NanoIDs drawn from `alphabet`
pub fn nano_ids(alphabet: &str, size: usize) -> Result<impl Iterator<Item = String>> {
    let symbols: Vec<char> = alphabet.chars().collect();
    if symbols.is_empty() {
        return Err(IdError::EmptyAlphabet.into());
    }
    if size == 0 {
        return Err(IdError::InvalidSize(size).into());
    }

    Ok(std::iter::repeat_with(move || {
        let mut rng = rand::thread_rng();
        (0..size)
            .map(|_| symbols[rng.gen_range(0..symbols.len())])
            .collect()
    }))
}

/// A fixed-length list of generated record IDs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    ids: Vec<String>,
}

impl IdGenerator {
    /// Generate `len` UUID v4 IDs
    pub fn new(len: usize) -> Self {
        Self::uuid(len)
    }

    /// Take exactly `len` IDs from `source`
    pub fn from_source<I>(len: usize, source: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let ids: Vec<String> = source.into_iter().take(len).collect();
        if ids.len() < len {
            return Err(IdError::SourceExhausted {
                expected: len,
                produced: ids.len(),
            }
            .into());
        }
        debug!("Generated {} ids", ids.len());
        Ok(Self { ids })
    }

    pub fn uuid(len: usize) -> Self {
        Self {
            ids: uuid_ids().take(len).collect(),
        }
    }

    pub fn ulid(len: usize) -> Self {
        Self {
            ids: ulid_ids().take(len).collect(),
        }
    }

    pub fn random_sha256(len: usize) -> Self {
        Self {
            ids: random_sha256_ids().take(len).collect(),
        }
    }

    /// One content hash per document; identical documents get identical IDs
    pub fn document_sha256<S: AsRef<str>>(documents: &[S]) -> Self {
        Self {
            ids: document_sha256_ids(documents).collect(),
        }
    }

    /// NanoIDs with optional custom alphabet and size (defaults: 64 URL-safe symbols, 21 chars)
    pub fn nano_id(len: usize, alphabet: Option<&str>, size: Option<usize>) -> Result<Self> {
        let source = nano_ids(
            alphabet.unwrap_or(NANOID_ALPHABET),
            size.unwrap_or(NANOID_SIZE),
        )?;
        Self::from_source(len, source)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ids.iter()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.ids
    }
}

impl Deref for IdGenerator {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.ids
    }
}

impl Index<usize> for IdGenerator {
    type Output = String;

    fn index(&self, index: usize) -> &String {
        &self.ids[index]
    }
}

impl IntoIterator for IdGenerator {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a IdGenerator {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl From<IdGenerator> for Vec<String> {
    fn from(generator: IdGenerator) -> Self {
        generator.ids
    }
}

impl Serialize for IdGenerator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtrasError;
    use std::collections::HashSet;

    fn docs() -> Vec<String> {
        (0..10).map(|i| format!("Document {}", i)).collect()
    }

    #[test]
    fn test_default_generator_is_uuid_v4() {
        let ids = IdGenerator::new(10);
        assert_eq!(ids.len(), 10);
        for id in &ids {
            let parsed = Uuid::parse_str(id).unwrap();
            assert_eq!(parsed.get_version_num(), 4);
        }
    }

    #[test]
    fn test_custom_sequential_source() {
        let sequential = (10..).map(|n: u32| n.to_string());
        let ids = IdGenerator::from_source(10, sequential).unwrap();
        let expected: Vec<String> = (10..20).map(|n| n.to_string()).collect();
        assert_eq!(ids.into_inner(), expected);
    }

    #[test]
    fn test_exhausted_source() {
        let err = IdGenerator::from_source(5, vec!["a".to_string(), "b".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            ExtrasError::Id(IdError::SourceExhausted { expected: 5, produced: 2 })
        ));
    }

    #[test]
    fn test_nano_id_defaults() {
        let ids = IdGenerator::nano_id(10, None, None).unwrap();
        assert_eq!(ids.len(), 10);
        assert!(ids.iter().all(|id| id.chars().count() == NANOID_SIZE));
        assert!(ids.iter().all(|id| id.chars().all(|c| NANOID_ALPHABET.contains(c))));
    }

    #[test]
    fn test_nano_id_custom_alphabet() {
        let ids = IdGenerator::nano_id(5, Some("ab"), Some(8)).unwrap();
        assert!(ids.iter().all(|id| id.len() == 8 && id.chars().all(|c| c == 'a' || c == 'b')));
    }

    #[test]
    fn test_nano_id_rejects_bad_parameters() {
        assert!(IdGenerator::nano_id(1, Some(""), None).is_err());
        assert!(IdGenerator::nano_id(1, None, Some(0)).is_err());
    }

    #[test]
    fn test_ulid_ids_parse() {
        let ids = IdGenerator::ulid(10);
        assert_eq!(ids.len(), 10);
        assert!(ids.iter().all(|id| ulid::Ulid::from_string(id).is_ok()));
    }

    #[test]
    fn test_random_sha256_ids() {
        let ids = IdGenerator::random_sha256(10);
        assert!(ids.iter().all(|id| id.len() == 64));
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_document_sha256_is_deterministic() {
        let documents = docs();
        let first = IdGenerator::document_sha256(&documents);
        let second = IdGenerator::document_sha256(&documents);

        assert_eq!(first.len(), documents.len());
        assert!(first.iter().all(|id| id.len() == 64));
        assert_eq!(first, second);
        assert_eq!(
            IdGenerator::document_sha256(&["hello"])[0],
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_serializes_as_string_array() {
        let ids = IdGenerator::document_sha256(&["a", "b"]);
        let value = serde_json::to_value(&ids).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0], serde_json::Value::String(ids[0].clone()));
    }
}
