use std::sync::Arc;

use crate::{
    blueprint::{Blueprint, Source},
    circuit_builder::BlueprintBuilder,
    error::Result,
    repository::Repository,
};

use super::gates::{AND, NOT};

pub const DECODER_2X4: &str = "2X4BIT_DECODER";

/// Inputs `s0, s1, enable`. Output `i` is high iff `s0 + 2 * s1 == i` and
/// enable is high.
pub fn register_decoder(repository: &Repository) -> Result<Arc<Blueprint>> {
    let mut builder = BlueprintBuilder::new(3, 4)
        .id(DECODER_2X4)
        .input_labels(["S0", "S1", "EN"])
        .output_labels(["D0", "D1", "D2", "D3"]);
    let low = [
        builder.gate(NOT, [Source::input(0)]),
        builder.gate(NOT, [Source::input(1)]),
    ];
    for index in 0..4 {
        let [s0, s1] = [0, 1].map(|bit| match index >> bit & 1 {
            1 => Source::input(bit),
            _ => Source::node(low[bit], 0),
        });
        let select = builder.gate(AND, [s0, s1]);
        let enabled = builder.gate(AND, [Source::node(select, 0), Source::input(2)]);
        builder.output(index, Source::node(enabled, 0));
    }
    builder.register(repository)
}

pub fn register_all(repository: &Repository) -> Result<()> {
    register_decoder(repository)?;
    Ok(())
}
