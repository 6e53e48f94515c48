//! Memoized pull evaluation of a composite blueprint.
//!
//! Nodes are resolved with an explicit work-list rather than native recursion,
//! so wide or long chains inside one blueprint never grow the call stack. Call
//! depth only grows with the nesting depth of the hierarchy, since each node
//! hands its inputs to its own blueprint's evaluator.
//!
//! All state lives in a [`Resolver`] owned by a single call; nothing survives
//! between calls, so a blueprint may be evaluated from any number of threads.

use tracing::trace;

use crate::{
    blueprint::{Blueprint, Circuit, Composite, NodeIndex, Owner, Source, SourcePort},
    circuit_sim::CircuitSim,
    error::{Error, Result},
};

#[derive(Debug)]
enum NodeState {
    Unvisited,
    InProgress,
    Done(Vec<bool>),
}

#[derive(Clone, Copy, Debug)]
enum Visit {
    Enter(NodeIndex),
    Exit(NodeIndex),
}

pub(crate) struct Resolver<'a> {
    id: &'a str,
    composite: &'a Composite,
    inputs: &'a [bool],
    states: Vec<NodeState>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(id: &'a str, composite: &'a Composite, inputs: &'a [bool]) -> Self {
        let states = composite
            .node_list
            .iter()
            .map(|_| NodeState::Unvisited)
            .collect();
        Resolver {
            id,
            composite,
            inputs,
            states,
        }
    }

    /// Resolves `root` and everything it depends on. Reaching a node that is
    /// still in progress means the wiring loops back on itself.
    pub(crate) fn resolve(&mut self, root: NodeIndex) -> Result<()> {
        let mut work = vec![Visit::Enter(root)];
        while let Some(visit) = work.pop() {
            match visit {
                Visit::Enter(node) => match self.states[node] {
                    NodeState::Done(_) => {}
                    NodeState::InProgress => return Err(self.cycle(node)),
                    NodeState::Unvisited => {
                        self.states[node] = NodeState::InProgress;
                        work.push(Visit::Exit(node));
                        for (_, source) in self.composite.sources(Owner::Node(node)) {
                            if let Source::Port(SourcePort {
                                owner: Owner::Node(dependency),
                                ..
                            }) = source
                            {
                                work.push(Visit::Enter(*dependency));
                            }
                        }
                    }
                },
                Visit::Exit(node) => {
                    let inputs = self.gather(Owner::Node(node))?;
                    let outputs = self.composite.node_types[node].evaluate(&inputs)?;
                    trace!(
                        blueprint = self.id,
                        node,
                        node_type = %self.composite.node_list[node],
                        ?inputs,
                        ?outputs,
                        "resolved node"
                    );
                    self.states[node] = NodeState::Done(outputs);
                }
            }
        }
        Ok(())
    }

    /// Reads the values on the sinks of `owner`, in ascending port order. Every
    /// node feeding them must already be resolved.
    pub(crate) fn gather(&self, owner: Owner) -> Result<Vec<bool>> {
        self.composite
            .sources(owner)
            .map(|(_, source)| match *source {
                Source::Constant(value) => Ok(value),
                Source::Port(SourcePort {
                    owner: Owner::Boundary,
                    port,
                }) => Ok(self.inputs[port]),
                Source::Port(SourcePort {
                    owner: Owner::Node(node),
                    port,
                }) => match &self.states[node] {
                    NodeState::Done(outputs) => Ok(outputs[port]),
                    NodeState::Unvisited | NodeState::InProgress => Err(self.cycle(node)),
                },
            })
            .collect()
    }

    /// Resolves whatever the boundary outputs need and reads them.
    pub(crate) fn outputs(&mut self) -> Result<Vec<bool>> {
        let roots: Vec<NodeIndex> = self
            .composite
            .sources(Owner::Boundary)
            .filter_map(|(_, source)| match source {
                Source::Port(SourcePort {
                    owner: Owner::Node(node),
                    ..
                }) => Some(*node),
                _ => None,
            })
            .collect();
        for root in roots {
            self.resolve(root)?;
        }
        self.gather(Owner::Boundary)
    }

    /// Resolves every node, reachable from an output or not, then reads the
    /// outputs.
    pub(crate) fn everything(&mut self) -> Result<Vec<bool>> {
        for node in 0..self.states.len() {
            self.resolve(node)?;
        }
        self.gather(Owner::Boundary)
    }

    fn cycle(&self, node: NodeIndex) -> Error {
        Error::CycleDetected {
            blueprint: self.id.to_string(),
            node,
            node_type: self.composite.node_name(node),
        }
    }
}

impl CircuitSim for Blueprint {
    fn num_inputs(&self) -> usize {
        match &self.circuit {
            Circuit::Primitive(gate) => gate.num_inputs(),
            Circuit::Composite(composite) => composite.num_inputs,
        }
    }

    fn num_outputs(&self) -> usize {
        match &self.circuit {
            Circuit::Primitive(gate) => gate.num_outputs(),
            Circuit::Composite(composite) => composite.num_outputs,
        }
    }

    fn evaluate(&self, inputs: &[bool]) -> Result<Vec<bool>> {
        if inputs.len() != self.num_inputs() {
            return Err(Error::ArityMismatch {
                blueprint: self.id.clone(),
                expected: self.num_inputs(),
                got: inputs.len(),
            });
        }
        match &self.circuit {
            Circuit::Primitive(gate) => gate.evaluate(inputs),
            Circuit::Composite(composite) => Resolver::new(&self.id, composite, inputs).outputs(),
        }
    }
}
