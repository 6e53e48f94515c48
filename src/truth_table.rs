use std::fmt;

use crate::{
    blueprint::Blueprint,
    circuit_sim::CircuitSim,
    error::{Error, Result},
};

/// Largest input count a table will enumerate (2^16 rows).
pub const MAX_TRUTH_TABLE_INPUTS: usize = 16;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub rows: Vec<(Vec<bool>, Vec<bool>)>,
}

impl TruthTable {
    /// Evaluates `blueprint` on every input vector. Input 0 is the most
    /// significant column, so rows count up from all-low to all-high.
    pub fn generate(blueprint: &Blueprint) -> Result<Self> {
        let num_inputs = blueprint.num_inputs();
        if num_inputs > MAX_TRUTH_TABLE_INPUTS {
            return Err(Error::TooManyInputs {
                blueprint: blueprint.id().to_string(),
                inputs: num_inputs,
                max: MAX_TRUTH_TABLE_INPUTS,
            });
        }

        let rows = (0..1usize << num_inputs)
            .map(|row| {
                let inputs: Vec<bool> = (0..num_inputs)
                    .map(|i| (row >> (num_inputs - 1 - i)) & 1 == 1)
                    .collect();
                let outputs = blueprint.evaluate(&inputs)?;
                Ok((inputs, outputs))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TruthTable {
            inputs: headers(blueprint.input_labels(), num_inputs, false),
            outputs: headers(blueprint.output_labels(), blueprint.num_outputs(), true),
            rows,
        })
    }
}

// Labels when they line up with the arity, otherwise letters: A, B, C, ... for
// inputs and Z, Y, X, ... for outputs.
fn headers(labels: &[String], arity: usize, reversed: bool) -> Vec<String> {
    if labels.len() == arity {
        return labels.to_vec();
    }
    (0..arity)
        .map(|i| match (i < LETTERS.len(), reversed) {
            (true, false) => char::from(LETTERS[i]).to_string(),
            (true, true) => char::from(LETTERS[LETTERS.len() - 1 - i]).to_string(),
            (false, false) => format!("I{i}"),
            (false, true) => format!("O{i}"),
        })
        .collect()
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .inputs
            .iter()
            .chain(self.outputs.iter())
            .map(|header| header.chars().count().max(1))
            .collect();

        let rule = widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+");
        writeln!(f, "+{rule}+")?;
        let titles: Vec<String> = self
            .inputs
            .iter()
            .chain(self.outputs.iter())
            .cloned()
            .collect();
        write_cells(f, &titles, &widths)?;
        writeln!(f, "+{rule}+")?;
        for (inputs, outputs) in &self.rows {
            let cells: Vec<String> = inputs
                .iter()
                .chain(outputs.iter())
                .map(|bit| u8::from(*bit).to_string())
                .collect();
            write_cells(f, &cells, &widths)?;
        }
        writeln!(f, "+{rule}+")
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!(" {cell:^width$} "))
        .collect();
    writeln!(f, "|{}|", cells.join("|"))
}
