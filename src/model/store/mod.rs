//! Named collections of records on top of a [`Substrate`].
//!
//! Each collection is one JSON array under one key, read and written as a whole.
//! The store knows nothing about relationships between collections.

mod collection;

pub use collection::Collection;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::model::db::{Candidate, Vote, Voter};
use crate::model::substrate::Substrate;

/// The record store, owning its substrate.
#[derive(Debug)]
pub struct Store<S> {
    substrate: S,
}

impl<S> Store<S>
where
    S: Substrate,
{
    pub fn new(substrate: S) -> Self {
        Self { substrate }
    }

    /// Read a whole collection. Missing or corrupt collections read as empty.
    pub fn read<T: Collection>(&self) -> Result<Vec<T>> {
        match self.read_strict::<T>() {
            Err(Error::Corrupt { collection, source }) => {
                warn!("Collection '{collection}' is corrupt, treating it as empty: {source}");
                Ok(Vec::new())
            }
            result => result,
        }
    }

    /// Read a whole collection, failing with [`Error::Corrupt`] if it cannot be parsed.
    pub fn read_strict<T: Collection>(&self) -> Result<Vec<T>> {
        match self.substrate.get(T::NAME)? {
            Some(blob) => serde_json::from_str(&blob).map_err(|source| Error::Corrupt {
                collection: T::NAME,
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a whole collection.
    pub fn write<T: Collection>(&mut self, records: &[T]) -> Result<()> {
        let blob = serde_json::to_string(records)?;
        self.substrate.put(T::NAME, blob)?;
        debug!("Wrote {} record(s) to '{}'", records.len(), T::NAME);
        Ok(())
    }

    /// Seed the default candidates and initialise the other collections. Idempotent.
    pub fn ensure_seed(&mut self) -> Result<()> {
        if self.read::<Candidate>()?.is_empty() {
            let slate = Candidate::default_slate(Utc::now());
            debug!("Seeding {} default candidates", slate.len());
            self.write(&slate)?;
        }
        self.init_if_absent::<Voter>()?;
        self.init_if_absent::<Vote>()?;
        Ok(())
    }

    fn init_if_absent<T: Collection>(&mut self) -> Result<()> {
        if self.substrate.get(T::NAME)?.is_none() {
            debug!("Initialising empty collection '{}'", T::NAME);
            self.write::<T>(&[])?;
        }
        Ok(())
    }

    pub fn substrate(&self) -> &S {
        &self.substrate
    }

    pub fn substrate_mut(&mut self) -> &mut S {
        &mut self.substrate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::common::CandidateId;
    use crate::model::substrate::MemorySubstrate;

    fn store() -> Store<MemorySubstrate> {
        Store::new(MemorySubstrate::new())
    }

    #[test]
    fn unwritten_collections_are_empty() {
        let store = store();
        assert!(store.read::<Voter>().unwrap().is_empty());
        assert!(store.read_strict::<Vote>().unwrap().is_empty());
        assert_eq!(store.substrate().get("voters").unwrap(), None);
    }

    #[test]
    fn seeding_is_idempotent() {
        let mut store = store();
        store.ensure_seed().unwrap();

        let candidates = store.read::<Candidate>().unwrap();
        let ids = candidates.iter().map(|c| c.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["camilo-torres", "andrea-ruiz", "jorge-perez"]);
        assert_eq!(store.substrate().get("voters").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.substrate().get("votes").unwrap().as_deref(), Some("[]"));

        let before = store.substrate().get("candidates").unwrap();
        store.ensure_seed().unwrap();
        assert_eq!(store.substrate().get("candidates").unwrap(), before);
    }

    #[test]
    fn seeding_keeps_existing_candidates() {
        let mut store = store();
        let mut slate = Candidate::default_slate(Utc::now());
        slate.truncate(1);
        slate[0].id = CandidateId::new("solo");
        store.write(&slate).unwrap();

        store.ensure_seed().unwrap();
        assert_eq!(store.read::<Candidate>().unwrap(), slate);
    }

    #[test]
    fn corrupt_collections_read_as_empty() {
        let mut store = store();
        store
            .substrate_mut()
            .put("votes", "{ definitely not json".to_string())
            .unwrap();

        assert!(store.read::<Vote>().unwrap().is_empty());
        assert!(matches!(
            store.read_strict::<Vote>(),
            Err(Error::Corrupt {
                collection: "votes",
                ..
            })
        ));

        // Seeding only initialises collections that were never written.
        store.ensure_seed().unwrap();
        assert_eq!(
            store.substrate().get("votes").unwrap().as_deref(),
            Some("{ definitely not json")
        );
    }

    #[test]
    fn corrupt_candidates_are_reseeded() {
        let mut store = store();
        store
            .substrate_mut()
            .put("candidates", "[{\"id\": 7}]".to_string())
            .unwrap();

        store.ensure_seed().unwrap();
        assert_eq!(store.read_strict::<Candidate>().unwrap().len(), 3);
    }

    #[test]
    fn writes_replace_the_collection() {
        let mut store = store();
        let slate = Candidate::default_slate(Utc::now());
        store.write(&slate).unwrap();
        store.write(&slate[1..]).unwrap();
        assert_eq!(store.read::<Candidate>().unwrap(), slate[1..].to_vec());
    }
}
