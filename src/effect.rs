use std::sync::atomic::{AtomicBool, Ordering};

use crate::contracts::{ListCache, Navigator};
use crate::mutation::MutationStatus;
use crate::schema::{ResourceKind, Route};

/// Runs once on the first observed success: invalidate the list cache for
/// the resource kind, then navigate away.
pub struct PostMutationEffect<C, N>
where
    C: ListCache,
    N: Navigator,
{
    kind: ResourceKind,
    destination: Route,
    cache: C,
    navigator: N,
    fired: AtomicBool,
}

impl<C, N> PostMutationEffect<C, N>
where
    C: ListCache,
    N: Navigator,
{
    pub fn new(kind: ResourceKind, destination: Route, cache: C, navigator: N) -> Self {
        Self {
            kind,
            destination,
            cache,
            navigator,
            fired: AtomicBool::new(false),
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Reports whether this observation fired the effect. Navigation is not
    /// gated on invalidation succeeding; the next list fetch reconciles.
    pub fn observe(&self, status: &MutationStatus) -> bool {
        if !matches!(status, MutationStatus::Succeeded) {
            return false;
        }
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }

        if let Err(error) = self.cache.invalidate(self.kind) {
            log::warn!("list cache invalidation failed for {}: {error}", self.kind);
        }
        self.navigator.go_to(&self.destination);
        true
    }
}
