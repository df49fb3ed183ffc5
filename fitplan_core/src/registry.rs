//! In-memory plan registry.
//!
//! Plans live for the lifetime of the process and are never updated or
//! removed. The backing map sits behind the [`PlanStore`] trait so callers
//! (and tests) can supply their own.

use crate::Plan;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Storage backend for generated plans
pub trait PlanStore: Send + Sync {
    fn insert(&self, plan: Arc<Plan>);
    fn lookup(&self, id: &Uuid) -> Option<Arc<Plan>>;
    fn len(&self) -> usize;
}

/// Lock-guarded map safe to share across request handlers
#[derive(Default)]
pub struct MemoryStore {
    plans: RwLock<HashMap<Uuid, Arc<Plan>>>,
}

impl PlanStore for MemoryStore {
    fn insert(&self, plan: Arc<Plan>) {
        // Plans are immutable, so a poisoned lock still guards a consistent map
        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        plans.insert(plan.id, plan);
    }

    fn lookup(&self, id: &Uuid) -> Option<Arc<Plan>> {
        let plans = self.plans.read().unwrap_or_else(PoisonError::into_inner);
        plans.get(id).cloned()
    }

    fn len(&self) -> usize {
        self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Process-wide mapping from plan id to plan
pub struct PlanRegistry {
    store: Box<dyn PlanStore>,
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanRegistry {
    /// Registry backed by a fresh [`MemoryStore`]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::default())
    }

    pub fn with_store(store: impl PlanStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Store a plan and return the shared handle
    pub fn put(&self, plan: Plan) -> Arc<Plan> {
        let plan = Arc::new(plan);
        self.store.insert(Arc::clone(&plan));
        tracing::info!("Registered plan {}", plan.id);
        plan
    }

    /// Look up a plan; a miss is an ordinary `None`
    pub fn get(&self, id: &Uuid) -> Option<Arc<Plan>> {
        self.store.lookup(id)
    }

    /// Look up by textual id; malformed ids are simply not found
    pub fn find(&self, id: &str) -> Option<Arc<Plan>> {
        match Uuid::parse_str(id) {
            Ok(id) => self.get(&id),
            Err(_) => {
                tracing::debug!("Plan lookup with malformed id '{}'", id);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
