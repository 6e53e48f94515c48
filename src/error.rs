use thiserror::Error;

use crate::blueprint::{BlueprintId, NodeIndex, SinkPort, SourcePort};

/// Everything that can go wrong while building, registering, evaluating or
/// persisting a blueprint.
#[derive(Debug, Error)]
pub enum Error {
    #[error("blueprint {blueprint}: expected {expected} inputs, got {got}")]
    ArityMismatch {
        blueprint: BlueprintId,
        expected: usize,
        got: usize,
    },

    #[error("blueprint {blueprint}: invalid connections to blueprint outputs (expected ports 0..{expected}, got {found:?})")]
    IncompleteBoundaryOutputs {
        blueprint: BlueprintId,
        expected: usize,
        found: Vec<usize>,
    },

    #[error("blueprint {blueprint}: invalid connections to node {node} ({node_type}) (expected ports 0..{expected}, got {found:?})")]
    IncompleteNodeInputs {
        blueprint: BlueprintId,
        node: NodeIndex,
        node_type: BlueprintId,
        expected: usize,
        found: Vec<usize>,
    },

    #[error("blueprint {blueprint}: source {origin} feeding {sink} is out of range (limit {limit})")]
    InvalidSourcePort {
        blueprint: BlueprintId,
        sink: SinkPort,
        origin: SourcePort,
        limit: usize,
    },

    #[error("blueprint {blueprint}: source {found} feeding {sink} is neither a port nor a boolean constant")]
    InvalidSourceType {
        blueprint: BlueprintId,
        sink: SinkPort,
        found: String,
    },

    #[error("blueprint {blueprint}: cycle detected at node {node} ({node_type})")]
    CycleDetected {
        blueprint: BlueprintId,
        node: NodeIndex,
        node_type: BlueprintId,
    },

    #[error("unknown blueprint: {0}")]
    UnknownBlueprint(BlueprintId),

    #[error("blueprint {blueprint}: node {node} has unregistered type {node_type}")]
    UnknownNodeType {
        blueprint: BlueprintId,
        node: NodeIndex,
        node_type: BlueprintId,
    },

    #[error("blueprint {blueprint}: sink {sink} names a node outside the node list ({nodes} nodes)")]
    UnknownSinkNode {
        blueprint: BlueprintId,
        sink: SinkPort,
        nodes: usize,
    },

    #[error("blueprint {blueprint}: sink {sink} is driven by more than one source")]
    DuplicateSink {
        blueprint: BlueprintId,
        sink: SinkPort,
    },

    #[error("blueprint {blueprint}: {side} labels must be empty or have {expected} entries, got {got}")]
    LabelMismatch {
        blueprint: BlueprintId,
        side: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("blueprint {0} is already registered")]
    DuplicateBlueprint(BlueprintId),

    #[error("blueprint {blueprint}: {inputs} inputs is too many for a truth table (max {max})")]
    TooManyInputs {
        blueprint: BlueprintId,
        inputs: usize,
        max: usize,
    },

    #[error("blueprint {blueprint}: width must be at least one bit")]
    ZeroWidth { blueprint: BlueprintId },

    #[error("blueprint {0} is primitive and has no wiring to persist")]
    NotPersistable(BlueprintId),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
