use std::sync::Arc;

use crate::{
    blueprint::{Blueprint, BlueprintDef, BlueprintId, NodeIndex, SinkPort, Source},
    error::{Error, Result},
    repository::Repository,
};

/// Assembles a [`BlueprintDef`] one node and one wire at a time.
///
/// ```
/// use nandkit::{circuit_builder::BlueprintBuilder, primitive::NAND_ID, CircuitSim, Repository, Source};
///
/// let repository = Repository::new();
/// let mut builder = BlueprintBuilder::new(1, 1).id("NOT");
/// let nand = builder.gate(NAND_ID, [Source::input(0), Source::constant(true)]);
/// builder.output(0, Source::node(nand, 0));
/// let not = builder.register(&repository).unwrap();
/// assert_eq!(not.evaluate(&[false]).unwrap(), vec![true]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BlueprintBuilder {
    def: BlueprintDef,
    rewired: Vec<SinkPort>,
}

impl BlueprintBuilder {
    pub fn new(num_inputs: usize, num_outputs: usize) -> Self {
        BlueprintBuilder {
            def: BlueprintDef {
                num_inputs,
                num_outputs,
                ..Default::default()
            },
            rewired: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<BlueprintId>) -> Self {
        self.def.id = Some(id.into());
        self
    }

    pub fn input_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.def.input_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn output_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.def.output_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one instance of `node_type`, unwired.
    pub fn node(&mut self, node_type: &str) -> NodeIndex {
        self.def.node_list.push(node_type.to_string());
        self.def.node_list.len() - 1
    }

    pub fn nodes(&mut self, node_type: &str, count: usize) -> Vec<NodeIndex> {
        (0..count).map(|_| self.node(node_type)).collect()
    }

    /// Adds one instance of `node_type` and wires `inputs` to its input ports
    /// 0, 1, 2, ... in order.
    pub fn gate<I>(&mut self, node_type: &str, inputs: I) -> NodeIndex
    where
        I: IntoIterator<Item = Source>,
    {
        let node = self.node(node_type);
        for (port, source) in inputs.into_iter().enumerate() {
            self.connect(source, SinkPort::node(node, port));
        }
        node
    }

    pub fn connect(&mut self, source: impl Into<Source>, sink: SinkPort) -> &mut Self {
        if self.def.connections.insert(sink, source.into()).is_some() {
            self.rewired.push(sink);
        }
        self
    }

    pub fn output(&mut self, port: usize, source: impl Into<Source>) -> &mut Self {
        self.connect(source, SinkPort::output(port))
    }

    /// The finished definition. A sink wired twice is an error rather than a
    /// silent last-one-wins.
    pub fn finish(self) -> Result<BlueprintDef> {
        match self.rewired.first() {
            Some(sink) => Err(Error::DuplicateSink {
                blueprint: self.def.id.unwrap_or_default(),
                sink: *sink,
            }),
            None => Ok(self.def),
        }
    }

    pub fn build(self, repository: &Repository) -> Result<Arc<Blueprint>> {
        repository.build(self.finish()?)
    }

    pub fn register(self, repository: &Repository) -> Result<Arc<Blueprint>> {
        repository.add(self.finish()?)
    }
}
