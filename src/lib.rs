//! Combinational logic circuits built hierarchically from a single NAND
//! primitive. Blueprints are validated once when they are built and can then
//! be evaluated any number of times, from any thread.

pub mod blueprint;
pub mod circuit_builder;
pub mod circuit_sim;
pub mod components;
pub mod error;
mod evaluate;
pub mod persist;
pub mod primitive;
pub mod repository;
pub mod truth_table;
pub mod validate;

pub use blueprint::{
    Blueprint, BlueprintDef, BlueprintId, Circuit, Composite, Connections, NodeIndex, Owner,
    SinkPort, Source, SourcePort,
};
pub use circuit_builder::BlueprintBuilder;
pub use circuit_sim::CircuitSim;
pub use error::{Error, Result};
pub use repository::{RegistrationPolicy, Repository, RepositoryConfig};
pub use truth_table::TruthTable;
