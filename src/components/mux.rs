use std::sync::Arc;

use crate::{
    blueprint::{Blueprint, NodeIndex, Source},
    circuit_builder::BlueprintBuilder,
    error::Result,
    repository::Repository,
};

use super::{
    decoder::DECODER_2X4,
    gates::{AND, NOT, OR},
};

pub const MUX2: &str = "MUX2";
pub const MUX4: &str = "MUX4";

/// Inputs `d0, d1, sel`: `d1` when `sel` is high, otherwise `d0`.
pub fn register_mux2(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = BlueprintBuilder::new(3, 1)
        .id(MUX2)
        .input_labels(["D0", "D1", "SEL"])
        .output_labels(["Q"]);
    let not_sel = builder.gate(NOT, [Source::input(2)]);
    let low = builder.gate(AND, [Source::input(0), Source::node(not_sel, 0)]);
    let high = builder.gate(AND, [Source::input(1), Source::input(2)]);
    let or = builder.gate(OR, [Source::node(low, 0), Source::node(high, 0)]);
    builder.output(0, Source::node(or, 0));
    builder.register(repository)
}

/// Inputs `d0..d3, s0, s1`: the decoder picks one data line, and the gated
/// lines are ORed together.
pub fn register_mux4(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = BlueprintBuilder::new(6, 1)
        .id(MUX4)
        .input_labels(["D0", "D1", "D2", "D3", "S0", "S1"])
        .output_labels(["Q"]);
    let decoder = builder.gate(
        DECODER_2X4,
        [Source::input(4), Source::input(5), Source::constant(true)],
    );
    let gated: Vec<NodeIndex> = (0..4)
        .map(|line| builder.gate(AND, [Source::input(line), Source::node(decoder, line)]))
        .collect();
    let low = builder.gate(OR, [Source::node(gated[0], 0), Source::node(gated[1], 0)]);
    let high = builder.gate(OR, [Source::node(gated[2], 0), Source::node(gated[3], 0)]);
    let or = builder.gate(OR, [Source::node(low, 0), Source::node(high, 0)]);
    builder.output(0, Source::node(or, 0));
    builder.register(repository)
}

pub fn register_all(repository: &Repository) -> Result<()> {
    register_mux2(repository)?;
    register_mux4(repository)?;
    Ok(())
}
