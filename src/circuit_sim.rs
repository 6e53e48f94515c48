use crate::error::Result;

/// Anything that maps a vector of input bits to a vector of output bits.
///
/// Implemented by the primitive [`crate::primitive::Nand`] and by every
/// [`crate::Blueprint`]; a blueprint dispatches to whichever of the two it wraps.
pub trait CircuitSim {
    fn num_inputs(&self) -> usize;
    fn num_outputs(&self) -> usize;

    /// Fails with `ArityMismatch` unless `inputs.len() == self.num_inputs()`.
    fn evaluate(&self, inputs: &[bool]) -> Result<Vec<bool>>;
}
