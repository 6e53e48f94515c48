//! Adders. Every multi-bit adder shares one layout: operand `a` bits, then
//! operand `b` bits, then carry in; outputs are the sum bits, then carry out.
//! All bit vectors are least significant first.

use std::sync::Arc;

use crate::{
    blueprint::{Blueprint, SinkPort, Source},
    circuit_builder::BlueprintBuilder,
    error::Result,
    repository::Repository,
};

use super::{
    gates::{AND, OR, XOR},
    wire::{from_bits, to_bits},
};

pub const HALF_ADDER: &str = "HALF_ADDER";
pub const FULL_ADDER: &str = "FULL_ADDER";

/// (a, b) -> (a xor b, a and b)
pub fn register_half_adder(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = BlueprintBuilder::new(2, 2)
        .id(HALF_ADDER)
        .input_labels(["A", "B"])
        .output_labels(["S", "C"]);
    let sum = builder.gate(XOR, [Source::input(0), Source::input(1)]);
    let carry = builder.gate(AND, [Source::input(0), Source::input(1)]);
    builder.output(0, Source::node(sum, 0));
    builder.output(1, Source::node(carry, 0));
    builder.register(repository)
}

/// Two half adders; carry out is the OR of their carries.
pub fn register_full_adder(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = BlueprintBuilder::new(3, 2)
        .id(FULL_ADDER)
        .input_labels(["A", "B", "Cin"])
        .output_labels(["S", "Cout"]);
    let first = builder.gate(HALF_ADDER, [Source::input(0), Source::input(1)]);
    let second = builder.gate(HALF_ADDER, [Source::node(first, 0), Source::input(2)]);
    let carry = builder.gate(OR, [Source::node(first, 1), Source::node(second, 1)]);
    builder.output(0, Source::node(second, 0));
    builder.output(1, Source::node(carry, 0));
    builder.register(repository)
}

/// `bits` full adders chained through their carries, registered as
/// `{bits}BIT_RIPPLE_ADDER`.
pub fn register_ripple_adder(repository: &Repository, bits: usize) -> Result<Arc<Blueprint>> {
    let mut builder =
        BlueprintBuilder::new(2 * bits + 1, bits + 1).id(format!("{bits}BIT_RIPPLE_ADDER"));
    let mut carry = Source::input(2 * bits);
    for bit in 0..bits {
        let adder = builder.gate(
            FULL_ADDER,
            [Source::input(bit), Source::input(bits + bit), carry],
        );
        builder.output(bit, Source::node(adder, 0));
        carry = Source::node(adder, 1);
    }
    builder.output(bits, carry);
    builder.register(repository)
}

/// An adder twice as wide as `half`, built from two copies of it: the low
/// half's carry out feeds the high half's carry in. Registered as
/// `{2 * half_bits}BIT_FULL_ADDER`.
pub fn register_doubled_adder(
    repository: &Repository,
    half: &str,
    half_bits: usize,
) -> Result<Arc<Blueprint>> {
    let bits = 2 * half_bits;
    let mut builder =
        BlueprintBuilder::new(2 * bits + 1, bits + 1).id(format!("{bits}BIT_FULL_ADDER"));
    let [low, high] = [builder.node(half), builder.node(half)];
    for (node, offset) in [(low, 0), (high, half_bits)] {
        for bit in 0..half_bits {
            builder.connect(Source::input(offset + bit), SinkPort::node(node, bit));
            builder.connect(
                Source::input(bits + offset + bit),
                SinkPort::node(node, half_bits + bit),
            );
            builder.output(offset + bit, Source::node(node, bit));
        }
    }
    builder.connect(Source::input(2 * bits), SinkPort::node(low, bits));
    builder.connect(Source::node(low, half_bits), SinkPort::node(high, bits));
    builder.output(bits, Source::node(high, half_bits));
    builder.register(repository)
}

/// Wraps a `bits`-wide adder so the carry in doubles as a subtract flag: each
/// `b` bit is XORed with it, giving `a + !b + 1 = a - b` when it is high.
/// Registered as `{adder}-SUBTRACTOR`.
pub fn register_adder_subtractor(
    repository: &Repository,
    adder: &str,
    bits: usize,
) -> Result<Arc<Blueprint>> {
    let mut builder =
        BlueprintBuilder::new(2 * bits + 1, bits + 1).id(format!("{adder}-SUBTRACTOR"));
    let subtract = Source::input(2 * bits);
    let flipped: Vec<Source> = (0..bits)
        .map(|bit| Source::node(builder.gate(XOR, [Source::input(bits + bit), subtract]), 0))
        .collect();
    let inner = builder.gate(
        adder,
        (0..bits)
            .map(Source::input)
            .chain(flipped)
            .chain([subtract]),
    );
    for bit in 0..=bits {
        builder.output(bit, Source::node(inner, bit));
    }
    builder.register(repository)
}

pub fn register_all(repository: &Repository) -> Result<()> {
    register_half_adder(repository)?;
    register_full_adder(repository)?;
    register_doubled_adder(repository, FULL_ADDER, 1)?;
    register_doubled_adder(repository, "2BIT_FULL_ADDER", 2)?;
    register_doubled_adder(repository, "4BIT_FULL_ADDER", 4)?;
    register_adder_subtractor(repository, "8BIT_FULL_ADDER", 8)?;
    Ok(())
}

/// Input vector for a `bits`-wide adder computing `a + b + carry`.
pub fn adder_inputs(a: u64, b: u64, bits: usize, carry: bool) -> Vec<bool> {
    let mut inputs = to_bits(a, bits);
    inputs.extend(to_bits(b, bits));
    inputs.push(carry);
    inputs
}

/// Splits an adder's outputs into the sum and the carry out.
pub fn adder_result(outputs: &[bool]) -> (u64, bool) {
    match outputs.split_last() {
        Some((carry, sum)) => (from_bits(sum), *carry),
        None => (0, false),
    }
}
