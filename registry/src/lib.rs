//! Instance registry — records which engines were created by whom.
//!
//! A thin external collaborator: it knows engine identities only, nothing
//! about internal engine state.

use quorum_types::AccountId;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("engine {0} is already registered")]
    DuplicateEngine(String),

    #[error("the zero identifier cannot be registered")]
    ZeroIdentifier,
}

/// Index of deployed engine instances by creator.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    /// Creator → engine identities, in creation order.
    by_creator: HashMap<AccountId, Vec<AccountId>>,
    /// Every registered engine identity.
    engines: HashSet<AccountId>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly constructed engine against its creator.
    pub fn record(&mut self, creator: AccountId, engine: AccountId) -> Result<(), RegistryError> {
        if creator.is_zero() || engine.is_zero() {
            return Err(RegistryError::ZeroIdentifier);
        }
        if !self.engines.insert(engine) {
            return Err(RegistryError::DuplicateEngine(engine.to_string()));
        }
        self.by_creator.entry(creator).or_default().push(engine);
        info!(%creator, %engine, "engine registered");
        Ok(())
    }

    /// How many engines a creator has registered.
    pub fn count_for(&self, creator: &AccountId) -> usize {
        self.by_creator.get(creator).map_or(0, Vec::len)
    }

    /// A creator's engines in creation order.
    pub fn instances_for(&self, creator: &AccountId) -> &[AccountId] {
        self.by_creator.get(creator).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, engine: &AccountId) -> bool {
        self.engines.contains(engine)
    }

    /// Total engines registered across all creators.
    pub fn total(&self) -> usize {
        self.engines.len()
    }
}
