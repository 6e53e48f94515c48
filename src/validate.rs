//! Structural checks run once when a blueprint is constructed.
//!
//! A candidate that fails here is dropped: it never reaches the repository and
//! is never handed to a caller.

use std::sync::Arc;

use crate::{
    blueprint::{
        Blueprint, BlueprintDef, BlueprintId, Circuit, Composite, Owner, SinkPort, Source,
        SourcePort,
    },
    circuit_sim::CircuitSim,
    error::{Error, Result},
    evaluate::Resolver,
    repository::Repository,
};

/// Turns a definition into a validated blueprint, resolving its node types
/// against `repository`.
pub(crate) fn construct(
    id: BlueprintId,
    def: BlueprintDef,
    repository: &Repository,
) -> Result<Blueprint> {
    check_labels(&id, "input", def.num_inputs, &def.input_labels)?;
    check_labels(&id, "output", def.num_outputs, &def.output_labels)?;

    let node_types = def
        .node_list
        .iter()
        .enumerate()
        .map(|(node, node_type)| {
            repository
                .lookup(node_type)
                .map_err(|_| Error::UnknownNodeType {
                    blueprint: id.clone(),
                    node,
                    node_type: node_type.clone(),
                })
        })
        .collect::<Result<Vec<Arc<Blueprint>>>>()?;

    let blueprint = Blueprint {
        id,
        input_labels: def.input_labels,
        output_labels: def.output_labels,
        circuit: Circuit::Composite(Composite {
            node_list: def.node_list,
            node_types,
            connections: def.connections,
            num_inputs: def.num_inputs,
            num_outputs: def.num_outputs,
        }),
    };
    validate(&blueprint)?;
    Ok(blueprint)
}

/// Checks, in order: boundary outputs are fully wired, every sink belongs to
/// a real node, every node input is fully wired, every source exists, and the
/// wiring is acyclic.
///
/// The last check resolves every node once with all inputs held low, through
/// the same routine evaluation uses, so it also proves every value computable.
pub fn validate(blueprint: &Blueprint) -> Result<()> {
    let composite = match &blueprint.circuit {
        Circuit::Primitive(_) => return Ok(()),
        Circuit::Composite(composite) => composite,
    };
    let id = blueprint.id();

    let outputs: Vec<usize> = composite
        .sources(Owner::Boundary)
        .map(|(sink, _)| sink.port)
        .collect();
    if !is_exactly_ports(&outputs, composite.num_outputs) {
        return Err(Error::IncompleteBoundaryOutputs {
            blueprint: id.to_string(),
            expected: composite.num_outputs,
            found: outputs,
        });
    }

    let nodes = composite.node_list.len();
    if let Some(sink) = composite.connections.keys().find(|sink| match sink.owner {
        Owner::Boundary => false,
        Owner::Node(node) => node >= nodes,
    }) {
        return Err(Error::UnknownSinkNode {
            blueprint: id.to_string(),
            sink: *sink,
            nodes,
        });
    }

    for (node, node_type) in composite.node_types.iter().enumerate() {
        let inputs: Vec<usize> = composite
            .sources(Owner::Node(node))
            .map(|(sink, _)| sink.port)
            .collect();
        if !is_exactly_ports(&inputs, node_type.num_inputs()) {
            return Err(Error::IncompleteNodeInputs {
                blueprint: id.to_string(),
                node,
                node_type: node_type.id().to_string(),
                expected: node_type.num_inputs(),
                found: inputs,
            });
        }
    }

    for (sink, source) in composite.connections.iter() {
        if let Source::Port(origin) = source {
            check_source(id, composite, sink, origin)?;
        }
    }

    let inputs = vec![false; composite.num_inputs];
    Resolver::new(id, composite, &inputs).everything()?;
    Ok(())
}

fn check_source(
    id: &str,
    composite: &Composite,
    sink: &SinkPort,
    origin: &SourcePort,
) -> Result<()> {
    let limit = match origin.owner {
        Owner::Boundary => composite.num_inputs,
        Owner::Node(node) => match composite.node_types.get(node) {
            Some(node_type) => node_type.num_outputs(),
            None => {
                return Err(Error::InvalidSourcePort {
                    blueprint: id.to_string(),
                    sink: *sink,
                    origin: *origin,
                    limit: composite.node_types.len(),
                })
            }
        },
    };
    if origin.port >= limit {
        return Err(Error::InvalidSourcePort {
            blueprint: id.to_string(),
            sink: *sink,
            origin: *origin,
            limit,
        });
    }
    Ok(())
}

fn check_labels(id: &str, side: &'static str, arity: usize, labels: &[String]) -> Result<()> {
    if labels.is_empty() || labels.len() == arity {
        Ok(())
    } else {
        Err(Error::LabelMismatch {
            blueprint: id.to_string(),
            side,
            expected: arity,
            got: labels.len(),
        })
    }
}

// `ports` comes out of the wiring map already sorted and free of repeats.
fn is_exactly_ports(ports: &[usize], arity: usize) -> bool {
    ports.len() == arity && ports.iter().enumerate().all(|(i, port)| i == *port)
}
