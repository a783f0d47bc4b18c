use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

#[derive(Debug, Default)]
struct Table {
    lookup: HashMap<Arc<str>, u32>,
    values: Vec<Arc<str>>,
}

/// Append-only mapping between opaque string identifiers and small integers.
///
/// Ids are handed out densely in insertion order, starting at zero, and are
/// never reused or invalidated. Reads and inserts can happen from several
/// threads at once.
#[derive(Debug, Default)]
pub struct Interner {
    table: RwLock<Table>,
}

impl Interner {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the id for `value`, inserting it if it was never seen.
    pub fn intern(&self, value: &str) -> u32 {
        if let Some(id) = self.get(value) {
            return id;
        }
        let mut table = self.table.write().unwrap_or_else(|err| err.into_inner());
        // Another writer may have inserted it between the read and the write lock.
        if let Some(id) = table.lookup.get(value) {
            return *id;
        }
        let id = table.values.len() as u32;
        let value: Arc<str> = value.into();
        table.lookup.insert(value.clone(), id);
        table.values.push(value);
        id
    }

    pub fn get(&self, value: &str) -> Option<u32> {
        let table = self.table.read().unwrap_or_else(|err| err.into_inner());
        table.lookup.get(value).copied()
    }

    /// The string behind an id, cheap to clone.
    pub fn resolve(&self, id: u32) -> Option<Arc<str>> {
        let table = self.table.read().unwrap_or_else(|err| err.into_inner());
        table.values.get(id as usize).cloned()
    }

    pub fn len(&self) -> usize {
        let table = self.table.read().unwrap_or_else(|err| err.into_inner());
        table.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[test]
fn intern_is_dense_and_stable() {
    let interner = Interner::new();
    assert_eq!(interner.intern("a"), 0);
    assert_eq!(interner.intern("b"), 1);
    assert_eq!(interner.intern("a"), 0);
    assert_eq!(interner.len(), 2);
}

#[test]
fn intern_resolves_both_ways() {
    let interner = Interner::new();
    let id = interner.intern("9022050000001015");
    assert_eq!(interner.get("9022050000001015"), Some(id));
    assert_eq!(interner.resolve(id).as_deref(), Some("9022050000001015"));
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.resolve(42), None);
}

#[test]
fn intern_from_many_threads() {
    use rayon::prelude::*;

    let interner = Interner::new();
    (0..1000).into_par_iter().for_each(|i| {
        interner.intern(&format!("stop-{}", i % 100));
    });
    assert_eq!(interner.len(), 100);
    let mut ids: Vec<_> = (0..100)
        .map(|i| interner.get(&format!("stop-{i}")).unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, (0..100).collect::<Vec<u32>>());
}
