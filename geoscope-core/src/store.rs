use std::{collections::HashMap, path::Path};

use tracing::{info, warn};

use crate::{address::Address, error::LoadError};

/// Read-only index of the address dataset.
///
/// Records keep dataset order so scans are reproducible for a fixed file.
/// The store is never mutated after construction and is shared behind an
/// `Arc` without locking.
#[derive(Debug, Default)]
pub struct AddressStore {
    records: Vec<Address>,
    by_guid: HashMap<String, usize>,
}

impl AddressStore {
    /// Reads and parses a JSON array of addresses.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes =
            tokio::fs::read(path).await.map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let records: Vec<Address> =
            serde_json::from_slice(&bytes).map_err(|source| {
                LoadError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        let store = Self::from_records(records);
        info!(
            path = %path.display(),
            records = store.len(),
            "address dataset loaded"
        );
        Ok(store)
    }

    /// Builds the index. A repeated guid replaces the earlier record but
    /// keeps the earlier position.
    pub fn from_records(records: Vec<Address>) -> Self {
        let mut store = Self {
            records: Vec::with_capacity(records.len()),
            by_guid: HashMap::with_capacity(records.len()),
        };
        let mut duplicates = 0usize;

        for record in records {
            match store.by_guid.get(&record.guid) {
                Some(&idx) => {
                    store.records[idx] = record;
                    duplicates += 1;
                }
                None => {
                    store
                        .by_guid
                        .insert(record.guid.clone(), store.records.len());
                    store.records.push(record);
                }
            }
        }

        if duplicates > 0 {
            warn!(duplicates, "dataset contains repeated guids; last record wins");
        }

        store
    }

    pub fn get(&self, guid: &str) -> Option<&Address> {
        self.by_guid.get(guid).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, guid: &str) -> bool {
        self.by_guid.contains_key(guid)
    }

    /// All records carrying `tag` whose active flag equals `is_active`, in
    /// store order.
    pub fn filter_by_tag_and_status(
        &self,
        tag: &str,
        is_active: bool,
    ) -> Vec<Address> {
        self.records
            .iter()
            .filter(|record| record.is_active == is_active && record.has_tag(tag))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
