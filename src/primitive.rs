use crate::{
    blueprint::{Blueprint, Circuit},
    circuit_sim::CircuitSim,
    error::{Error, Result},
};

/// Reserved id of the primitive gate, present in every repository.
pub const NAND_ID: &str = "NAND";

/// The only gate computed directly instead of by composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Nand;

impl CircuitSim for Nand {
    fn num_inputs(&self) -> usize {
        2
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[bool]) -> Result<Vec<bool>> {
        match inputs {
            [a, b] => Ok(vec![!(*a && *b)]),
            _ => Err(Error::ArityMismatch {
                blueprint: NAND_ID.to_string(),
                expected: 2,
                got: inputs.len(),
            }),
        }
    }
}

impl Blueprint {
    pub(crate) fn nand() -> Self {
        Blueprint {
            id: NAND_ID.to_string(),
            input_labels: vec!["A".to_string(), "B".to_string()],
            output_labels: vec!["Q".to_string()],
            circuit: Circuit::Primitive(Nand),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nand_truth_table() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            assert_eq!(Nand.evaluate(&[a, b]).unwrap(), vec![!(a && b)], "{a} nand {b}");
        }
    }

    #[test]
    fn nand_rejects_wrong_arity() {
        assert!(matches!(
            Nand.evaluate(&[true]),
            Err(Error::ArityMismatch {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn nand_blueprint_dispatches_to_gate() {
        let nand = Blueprint::nand();
        assert!(nand.is_primitive());
        assert_eq!(nand.evaluate(&[true, true]).unwrap(), vec![false]);
        assert!(nand.to_def().is_none());
    }
}
