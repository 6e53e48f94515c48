//! Single-bit logic gates built up from NAND, and bitwise banks of them.

use std::sync::Arc;

use crate::{
    blueprint::{Blueprint, Source},
    circuit_builder::BlueprintBuilder,
    circuit_sim::CircuitSim,
    error::Result,
    primitive::NAND_ID,
    repository::Repository,
};

pub const NOT: &str = "NOT";
pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const XOR: &str = "XOR";
pub const NOR: &str = "NOR";
pub const XNOR: &str = "XNOR";

fn binary(id: &str) -> BlueprintBuilder {
    BlueprintBuilder::new(2, 1)
        .id(id)
        .input_labels(["A", "B"])
        .output_labels(["R"])
}

/// NAND with its second input tied high.
pub fn register_not(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = BlueprintBuilder::new(1, 1).id(NOT);
    let nand = builder.gate(NAND_ID, [Source::input(0), Source::constant(true)]);
    builder.output(0, Source::node(nand, 0));
    builder.register(repository)
}

pub fn register_and(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = binary(AND);
    let nand = builder.gate(NAND_ID, [Source::input(0), Source::input(1)]);
    let invert = builder.gate(NAND_ID, [Source::node(nand, 0), Source::node(nand, 0)]);
    builder.output(0, Source::node(invert, 0));
    builder.register(repository)
}

/// NAND(NOT a, NOT b)
pub fn register_or(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = binary(OR);
    let not_a = builder.gate(NOT, [Source::input(0)]);
    let not_b = builder.gate(NOT, [Source::input(1)]);
    let nand = builder.gate(NAND_ID, [Source::node(not_a, 0), Source::node(not_b, 0)]);
    builder.output(0, Source::node(nand, 0));
    builder.register(repository)
}

/// OR(AND(a, NOT b), AND(NOT a, b))
pub fn register_xor(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = binary(XOR);
    let not_a = builder.gate(NOT, [Source::input(0)]);
    let not_b = builder.gate(NOT, [Source::input(1)]);
    let left = builder.gate(AND, [Source::input(0), Source::node(not_b, 0)]);
    let right = builder.gate(AND, [Source::node(not_a, 0), Source::input(1)]);
    let or = builder.gate(OR, [Source::node(left, 0), Source::node(right, 0)]);
    builder.output(0, Source::node(or, 0));
    builder.register(repository)
}

fn register_inverted(repository: &Repository, id: &str, gate: &str) -> Result<Arc<Blueprint>> {
    let mut builder = binary(id);
    let inner = builder.gate(gate, [Source::input(0), Source::input(1)]);
    let not = builder.gate(NOT, [Source::node(inner, 0)]);
    builder.output(0, Source::node(not, 0));
    builder.register(repository)
}

pub fn register_nor(repository: &Repository) -> Result<Arc<Blueprint>> {
    register_inverted(repository, NOR, OR)
}

pub fn register_xnor(repository: &Repository) -> Result<Arc<Blueprint>> {
    register_inverted(repository, XNOR, XOR)
}

/// `bits` copies of a one- or two-input `gate` side by side, registered as
/// `{bits}BIT_{gate}`. Two-input gates take operand `a` on inputs `0..bits`
/// and operand `b` on `bits..2 * bits`.
pub fn register_bitwise(
    repository: &Repository,
    gate: &str,
    bits: usize,
) -> Result<Arc<Blueprint>> {
    let operands = repository.lookup(gate)?.num_inputs();
    let mut builder =
        BlueprintBuilder::new(operands * bits, bits).id(format!("{bits}BIT_{gate}"));
    for bit in 0..bits {
        let node = builder.gate(
            gate,
            (0..operands).map(|operand| Source::input(operand * bits + bit)),
        );
        builder.output(bit, Source::node(node, 0));
    }
    builder.register(repository)
}

pub fn register_all(repository: &Repository) -> Result<()> {
    register_not(repository)?;
    register_and(repository)?;
    register_or(repository)?;
    register_xor(repository)?;
    register_nor(repository)?;
    register_xnor(repository)?;
    for gate in [AND, OR, NOT] {
        register_bitwise(repository, gate, 8)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::components::wire::{from_bits, to_bits};

    fn gates() -> Repository {
        let repository = Repository::new();
        register_all(&repository).unwrap();
        repository
    }

    fn gate_test_gen(repository: &Repository, name: &str, expecteds: [bool; 4]) {
        let gate = repository.lookup(name).unwrap();
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        for ((a, b), expected) in cases.into_iter().zip(expecteds) {
            let result = gate.evaluate(&[a, b]).unwrap();
            assert_eq!(result, vec![expected], "{a} {name} {b} = {expected}");
        }
    }

    #[test]
    fn gate_tests() {
        let repository = gates();
        gate_test_gen(&repository, NAND_ID, [true, true, true, false]);
        gate_test_gen(&repository, AND, [false, false, false, true]);
        gate_test_gen(&repository, OR, [false, true, true, true]);
        gate_test_gen(&repository, XOR, [false, true, true, false]);
        gate_test_gen(&repository, NOR, [true, false, false, false]);
        gate_test_gen(&repository, XNOR, [true, false, false, true]);
    }

    #[test]
    fn not_gate() {
        let repository = gates();
        assert_eq!(repository.evaluate(NOT, &[false]).unwrap(), vec![true]);
        assert_eq!(repository.evaluate(NOT, &[true]).unwrap(), vec![false]);
    }

    #[test]
    fn bitwise_banks() {
        let repository = gates();
        for (a, b) in [(0u8, 0u8), (0xa5, 0x0f), (0xff, 0x81), (0x3c, 0xc3)] {
            let mut inputs = to_bits(a, 8);
            inputs.extend(to_bits(b, 8));
            let and = repository.evaluate("8BIT_AND", &inputs).unwrap();
            let or = repository.evaluate("8BIT_OR", &inputs).unwrap();
            let not = repository.evaluate("8BIT_NOT", &to_bits(a, 8)).unwrap();
            assert_eq!(from_bits::<u8>(&and), a & b);
            assert_eq!(from_bits::<u8>(&or), a | b);
            assert_eq!(from_bits::<u8>(&not), !a);
        }
    }
}
