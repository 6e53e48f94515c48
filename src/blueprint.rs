use std::{collections::BTreeMap, fmt, ops::RangeInclusive, sync::Arc};

use crate::primitive::Nand;

pub type BlueprintId = String;
pub type NodeIndex = usize;

/// Who a port belongs to. `Boundary` is the enclosing blueprint itself: read
/// as a source it is one of the blueprint's inputs, read as a sink it is one of
/// its outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Owner {
    Boundary,
    Node(NodeIndex),
}

/// A place a value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePort {
    pub owner: Owner,
    pub port: usize,
}

impl SourcePort {
    pub fn input(port: usize) -> Self {
        Self {
            owner: Owner::Boundary,
            port,
        }
    }

    pub fn node(node: NodeIndex, port: usize) -> Self {
        Self {
            owner: Owner::Node(node),
            port,
        }
    }
}

impl fmt::Display for SourcePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Owner::Boundary => write!(f, "blueprint input {}", self.port),
            Owner::Node(node) => write!(f, "node {node} output {}", self.port),
        }
    }
}

/// A place a value goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkPort {
    pub owner: Owner,
    pub port: usize,
}

impl SinkPort {
    pub fn output(port: usize) -> Self {
        Self {
            owner: Owner::Boundary,
            port,
        }
    }

    pub fn node(node: NodeIndex, port: usize) -> Self {
        Self {
            owner: Owner::Node(node),
            port,
        }
    }

    /// Every sink port of `owner`, in ascending port order.
    pub(crate) fn all_of(owner: Owner) -> RangeInclusive<SinkPort> {
        SinkPort { owner, port: 0 }..=SinkPort {
            owner,
            port: usize::MAX,
        }
    }
}

impl fmt::Display for SinkPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Owner::Boundary => write!(f, "blueprint output {}", self.port),
            Owner::Node(node) => write!(f, "node {node} input {}", self.port),
        }
    }
}

/// What drives a sink: another port, or a fixed level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    Port(SourcePort),
    Constant(bool),
}

impl Source {
    pub fn input(port: usize) -> Self {
        Source::Port(SourcePort::input(port))
    }

    pub fn node(node: NodeIndex, port: usize) -> Self {
        Source::Port(SourcePort::node(node, port))
    }

    pub fn constant(value: bool) -> Self {
        Source::Constant(value)
    }
}

impl From<SourcePort> for Source {
    fn from(port: SourcePort) -> Self {
        Source::Port(port)
    }
}

impl From<bool> for Source {
    fn from(value: bool) -> Self {
        Source::Constant(value)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Port(port) => port.fmt(f),
            Source::Constant(value) => write!(f, "constant {}", u8::from(*value)),
        }
    }
}

/// Wiring table. Keyed by sink, so a sink can never have two sources.
pub type Connections = BTreeMap<SinkPort, Source>;

/// Everything needed to construct a composite blueprint. Nothing here has been
/// checked yet; see [`crate::Repository::build`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlueprintDef {
    pub id: Option<BlueprintId>,
    pub node_list: Vec<BlueprintId>,
    pub connections: Connections,
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub input_labels: Vec<String>,
    pub output_labels: Vec<String>,
}

/// A validated, immutable circuit definition.
///
/// Only obtainable through the repository (or as the built-in NAND), so every
/// `Blueprint` in existence has passed validation.
#[derive(Debug)]
pub struct Blueprint {
    pub(crate) id: BlueprintId,
    pub(crate) input_labels: Vec<String>,
    pub(crate) output_labels: Vec<String>,
    pub(crate) circuit: Circuit,
}

#[derive(Debug)]
pub enum Circuit {
    Primitive(Nand),
    Composite(Composite),
}

pub struct Composite {
    pub(crate) node_list: Vec<BlueprintId>,
    // Resolved once at construction; evaluation never goes back to the repository.
    pub(crate) node_types: Vec<Arc<Blueprint>>,
    pub(crate) connections: Connections,
    pub(crate) num_inputs: usize,
    pub(crate) num_outputs: usize,
}

impl Composite {
    pub fn node_list(&self) -> &[BlueprintId] {
        &self.node_list
    }

    pub fn node_type(&self, node: NodeIndex) -> Option<&Arc<Blueprint>> {
        self.node_types.get(node)
    }

    pub fn connections(&self) -> &Connections {
        &self.connections
    }

    /// Sources feeding the sinks of `owner`, in ascending sink port order.
    pub(crate) fn sources(&self, owner: Owner) -> impl Iterator<Item = (&SinkPort, &Source)> {
        self.connections.range(SinkPort::all_of(owner))
    }

    pub(crate) fn node_name(&self, node: NodeIndex) -> BlueprintId {
        self.node_list.get(node).cloned().unwrap_or_default()
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("node_list", &self.node_list)
            .field("connections", &self.connections)
            .field("num_inputs", &self.num_inputs)
            .field("num_outputs", &self.num_outputs)
            .finish()
    }
}

impl Blueprint {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input_labels(&self) -> &[String] {
        &self.input_labels
    }

    pub fn output_labels(&self) -> &[String] {
        &self.output_labels
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.circuit, Circuit::Primitive(_))
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match &self.circuit {
            Circuit::Primitive(_) => None,
            Circuit::Composite(composite) => Some(composite),
        }
    }

    /// The construction input this blueprint was built from, with its id
    /// filled in. `None` for the primitive gate, which has no wiring.
    pub fn to_def(&self) -> Option<BlueprintDef> {
        let composite = self.as_composite()?;
        Some(BlueprintDef {
            id: Some(self.id.clone()),
            node_list: composite.node_list.clone(),
            connections: composite.connections.clone(),
            num_inputs: composite.num_inputs,
            num_outputs: composite.num_outputs,
            input_labels: self.input_labels.clone(),
            output_labels: self.output_labels.clone(),
        })
    }
}
