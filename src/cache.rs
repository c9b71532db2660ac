use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::{Arc, RwLock};

use crate::contracts::ListCache;
use crate::schema::{RecordPayload, ResourceKind};

#[derive(Default)]
struct CacheState {
    lists: BTreeMap<ResourceKind, Vec<RecordPayload>>,
    generations: BTreeMap<ResourceKind, u64>,
}

/// In-memory list snapshots keyed by resource kind, with a generation stamp
/// list views compare to decide whether to refetch.
#[derive(Clone)]
pub struct InMemoryListCache {
    state: Arc<RwLock<CacheState>>,
}

impl InMemoryListCache {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
        }
    }

    pub fn store(&self, kind: ResourceKind, records: Vec<RecordPayload>) {
        let mut state = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.lists.insert(kind, records);
    }

    pub fn load(&self, kind: ResourceKind) -> Option<Vec<RecordPayload>> {
        let state = match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.lists.get(&kind).cloned()
    }

    pub fn generation(&self, kind: ResourceKind) -> u64 {
        let state = match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.generations.get(&kind).copied().unwrap_or(0)
    }
}

impl Default for InMemoryListCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ListCache for InMemoryListCache {
    type Error = Infallible;

    fn invalidate(&self, kind: ResourceKind) -> Result<(), Self::Error> {
        let mut state = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.lists.remove(&kind);
        *state.generations.entry(kind).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKey, FieldValue};

    fn record(title: &str) -> RecordPayload {
        let mut payload = RecordPayload::new();
        payload.insert(
            FieldKey::new("title"),
            FieldValue::Text(title.to_string().into()),
        );
        payload
    }

    #[test]
    fn invalidate_drops_the_snapshot_and_bumps_the_generation() {
        let cache = InMemoryListCache::new();
        let kind = ResourceKind::new("products");
        cache.store(kind, vec![record("a"), record("b")]);
        assert_eq!(cache.load(kind).map(|list| list.len()), Some(2));
        assert_eq!(cache.generation(kind), 0);

        cache.invalidate(kind).expect("invalidate is infallible");
        assert!(cache.load(kind).is_none());
        assert_eq!(cache.generation(kind), 1);
    }

    #[test]
    fn generations_are_tracked_per_kind() {
        let cache = InMemoryListCache::new();
        let products = ResourceKind::new("products");
        let todos = ResourceKind::new("todos");
        cache.invalidate(products).expect("invalidate is infallible");
        cache.invalidate(products).expect("invalidate is infallible");
        assert_eq!(cache.generation(products), 2);
        assert_eq!(cache.generation(todos), 0);
    }
}
