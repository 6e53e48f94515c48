use std::{
    collections::{btree_map::Entry, BTreeMap},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    blueprint::{Blueprint, BlueprintDef, BlueprintId},
    circuit_sim::CircuitSim,
    error::{Error, Result},
    primitive::NAND_ID,
    validate,
};

/// What happens when a blueprint is registered under an id that is taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Fail with `DuplicateBlueprint`.
    #[default]
    Reject,
    /// Replace the entry. Blueprints already built on the old definition keep
    /// it; only later lookups see the new one.
    Overwrite,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub registration: RegistrationPolicy,
}

/// The namespace blueprints are built against and registered into.
///
/// Registrations take a write lock and are serialized; lookups only read.
/// `NAND` is always present and can never be replaced.
#[derive(Debug)]
pub struct Repository {
    config: RepositoryConfig,
    blueprints: RwLock<BTreeMap<BlueprintId, Arc<Blueprint>>>,
    next_id: AtomicU64,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    pub fn new() -> Self {
        Self::with_config(RepositoryConfig::default())
    }

    pub fn with_config(config: RepositoryConfig) -> Self {
        let mut blueprints = BTreeMap::new();
        blueprints.insert(NAND_ID.to_string(), Arc::new(Blueprint::nand()));
        Repository {
            config,
            blueprints: RwLock::new(blueprints),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Next free auto-generated id: a zero-padded counter local to this
    /// repository.
    fn next_id(&self) -> BlueprintId {
        loop {
            let id = format!("{:04}", self.next_id.fetch_add(1, Ordering::SeqCst));
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Validates `def` against the blueprints registered so far, without
    /// registering the result.
    pub fn build(&self, def: BlueprintDef) -> Result<Arc<Blueprint>> {
        let id = match &def.id {
            Some(id) => id.clone(),
            None => self.next_id(),
        };
        let blueprint = validate::construct(id, def, self)?;
        debug!(
            blueprint = blueprint.id(),
            inputs = blueprint.num_inputs(),
            outputs = blueprint.num_outputs(),
            "built blueprint"
        );
        Ok(Arc::new(blueprint))
    }

    pub fn register(&self, blueprint: Arc<Blueprint>) -> Result<()> {
        let id = blueprint.id().to_string();
        if id == NAND_ID {
            return Err(Error::DuplicateBlueprint(id));
        }
        let mut blueprints = self.blueprints.write();
        match blueprints.entry(id) {
            Entry::Vacant(entry) => {
                debug!(blueprint = entry.key().as_str(), "registered blueprint");
                entry.insert(blueprint);
            }
            Entry::Occupied(mut entry) => match self.config.registration {
                RegistrationPolicy::Reject => {
                    return Err(Error::DuplicateBlueprint(entry.key().clone()))
                }
                RegistrationPolicy::Overwrite => {
                    warn!(blueprint = entry.key().as_str(), "overwriting blueprint");
                    entry.insert(blueprint);
                }
            },
        }
        Ok(())
    }

    /// Builds and registers in one step.
    pub fn add(&self, def: BlueprintDef) -> Result<Arc<Blueprint>> {
        let blueprint = self.build(def)?;
        self.register(blueprint.clone())?;
        Ok(blueprint)
    }

    pub fn lookup(&self, id: &str) -> Result<Arc<Blueprint>> {
        self.blueprints
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownBlueprint(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.blueprints.read().contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<BlueprintId> {
        self.blueprints.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.blueprints.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.read().is_empty()
    }

    pub fn evaluate(&self, id: &str, inputs: &[bool]) -> Result<Vec<bool>> {
        self.lookup(id)?.evaluate(inputs)
    }
}
