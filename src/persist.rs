//! The on-disk JSON layout of a blueprint.
//!
//! ```json
//! {
//!     "node_list": ["NAND"],
//!     "connections": [
//!         {"sink": {"node": null, "port": 0}, "source": {"node": 0, "port": 0}},
//!         {"sink": {"node": 0, "port": 0}, "source": {"node": null, "port": 0}},
//!         {"sink": {"node": 0, "port": 1}, "source": {"constant": true}}
//!     ],
//!     "num_inputs": 1,
//!     "num_outputs": 1,
//!     "input_labels": [],
//!     "output_labels": [],
//!     "id": "NOT"
//! }
//! ```
//!
//! A `null` node is the blueprint's own boundary. Decoding always goes through
//! the validator.

use std::{fs, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    blueprint::{
        Blueprint, BlueprintDef, BlueprintId, Connections, NodeIndex, Owner, SinkPort, Source,
        SourcePort,
    },
    error::{Error, Result},
    repository::Repository,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRecord {
    pub node: Option<NodeIndex>,
    pub port: usize,
}

impl PortRecord {
    fn owner(&self) -> Owner {
        match self.node {
            Some(node) => Owner::Node(node),
            None => Owner::Boundary,
        }
    }

    fn from_owner(owner: Owner, port: usize) -> Self {
        let node = match owner {
            Owner::Boundary => None,
            Owner::Node(node) => Some(node),
        };
        PortRecord { node, port }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceRecord {
    Port(PortRecord),
    Constant { constant: bool },
    /// Anything else found in a file. Never produced by encoding; rejected on
    /// decoding with `InvalidSourceType`.
    Other(serde_json::Value),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub sink: PortRecord,
    pub source: SourceRecord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlueprintRecord {
    pub node_list: Vec<BlueprintId>,
    pub connections: Vec<ConnectionRecord>,
    pub num_inputs: usize,
    pub num_outputs: usize,
    #[serde(default)]
    pub input_labels: Vec<String>,
    #[serde(default)]
    pub output_labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlueprintId>,
}

impl From<BlueprintDef> for BlueprintRecord {
    fn from(def: BlueprintDef) -> Self {
        let connections = def
            .connections
            .iter()
            .map(|(sink, source)| ConnectionRecord {
                sink: PortRecord::from_owner(sink.owner, sink.port),
                source: match source {
                    Source::Port(origin) => {
                        SourceRecord::Port(PortRecord::from_owner(origin.owner, origin.port))
                    }
                    Source::Constant(constant) => SourceRecord::Constant {
                        constant: *constant,
                    },
                },
            })
            .collect();
        BlueprintRecord {
            node_list: def.node_list,
            connections,
            num_inputs: def.num_inputs,
            num_outputs: def.num_outputs,
            input_labels: def.input_labels,
            output_labels: def.output_labels,
            id: def.id,
        }
    }
}

impl BlueprintRecord {
    /// Fails with `NotPersistable` for the primitive gate.
    pub fn from_blueprint(blueprint: &Blueprint) -> Result<Self> {
        blueprint
            .to_def()
            .map(Into::into)
            .ok_or_else(|| Error::NotPersistable(blueprint.id().to_string()))
    }

    /// Converts back to a construction input. Only the shape is checked here;
    /// wiring is left to the validator.
    pub fn into_def(self) -> Result<BlueprintDef> {
        let blueprint = self.id.clone().unwrap_or_default();
        let mut connections = Connections::new();
        for ConnectionRecord { sink, source } in self.connections {
            let sink = SinkPort {
                owner: sink.owner(),
                port: sink.port,
            };
            let source = match source {
                SourceRecord::Port(origin) => Source::Port(SourcePort {
                    owner: origin.owner(),
                    port: origin.port,
                }),
                SourceRecord::Constant { constant } => Source::Constant(constant),
                SourceRecord::Other(found) => {
                    return Err(Error::InvalidSourceType {
                        blueprint,
                        sink,
                        found: found.to_string(),
                    })
                }
            };
            if connections.insert(sink, source).is_some() {
                return Err(Error::DuplicateSink { blueprint, sink });
            }
        }
        Ok(BlueprintDef {
            id: self.id,
            node_list: self.node_list,
            connections,
            num_inputs: self.num_inputs,
            num_outputs: self.num_outputs,
            input_labels: self.input_labels,
            output_labels: self.output_labels,
        })
    }
}

pub fn to_json(blueprint: &Blueprint) -> Result<String> {
    Ok(serde_json::to_string_pretty(&BlueprintRecord::from_blueprint(
        blueprint,
    )?)?)
}

/// Decodes and validates, without registering.
pub fn from_json(repository: &Repository, json: &str) -> Result<Arc<Blueprint>> {
    let record: BlueprintRecord = serde_json::from_str(json)?;
    repository.build(record.into_def()?)
}

pub fn save(blueprint: &Blueprint, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(blueprint)?)?;
    debug!(blueprint = blueprint.id(), path = %path.display(), "saved blueprint");
    Ok(())
}

/// Reads and validates a blueprint file, without registering.
pub fn load(repository: &Repository, path: impl AsRef<Path>) -> Result<Arc<Blueprint>> {
    let path = path.as_ref();
    let blueprint = from_json(repository, &fs::read_to_string(path)?)?;
    debug!(blueprint = blueprint.id(), path = %path.display(), "loaded blueprint");
    Ok(blueprint)
}

/// Reads, validates and registers a blueprint file.
pub fn import(repository: &Repository, path: impl AsRef<Path>) -> Result<Arc<Blueprint>> {
    let blueprint = load(repository, path)?;
    repository.register(blueprint.clone())?;
    Ok(blueprint)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn boundary_ports_are_null_nodes() {
        let record = ConnectionRecord {
            sink: PortRecord::from_owner(Owner::Boundary, 0),
            source: SourceRecord::Port(PortRecord::from_owner(Owner::Node(2), 1)),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"sink": {"node": null, "port": 0}, "source": {"node": 2, "port": 1}})
        );
    }

    #[test]
    fn constants_encode_as_objects() {
        let source = SourceRecord::Constant { constant: true };
        assert_eq!(serde_json::to_value(&source).unwrap(), json!({"constant": true}));
        let decoded: SourceRecord = serde_json::from_value(json!({"constant": false})).unwrap();
        assert_eq!(decoded, SourceRecord::Constant { constant: false });
    }

    #[test]
    fn integer_constant_is_not_a_boolean() {
        let record: BlueprintRecord = serde_json::from_value(json!({
            "node_list": [],
            "connections": [{"sink": {"node": null, "port": 0}, "source": {"constant": 1}}],
            "num_inputs": 0,
            "num_outputs": 1,
            "id": "ONE"
        }))
        .unwrap();
        assert!(matches!(
            record.into_def(),
            Err(Error::InvalidSourceType { blueprint, .. }) if blueprint == "ONE"
        ));
    }

    #[test]
    fn repeated_sink_is_rejected() {
        let record: BlueprintRecord = serde_json::from_value(json!({
            "node_list": [],
            "connections": [
                {"sink": {"node": null, "port": 0}, "source": {"node": null, "port": 0}},
                {"sink": {"node": null, "port": 0}, "source": {"constant": true}}
            ],
            "num_inputs": 1,
            "num_outputs": 1,
            "input_labels": [],
            "output_labels": [],
            "id": "TWICE"
        }))
        .unwrap();
        assert!(matches!(record.into_def(), Err(Error::DuplicateSink { .. })));
    }

    #[test]
    fn primitive_is_not_persistable() {
        let repository = Repository::new();
        let nand = repository.lookup(crate::primitive::NAND_ID).unwrap();
        assert!(matches!(to_json(&nand), Err(Error::NotPersistable(_))));
    }
}
