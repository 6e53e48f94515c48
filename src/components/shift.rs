//! Shifts through a carry bit. These are pure wiring: no nodes, just a
//! permutation of `bits` data inputs plus carry in onto `bits` data outputs
//! plus carry out.

use std::sync::Arc;

use crate::{
    blueprint::{Blueprint, Source},
    circuit_builder::BlueprintBuilder,
    error::{Error, Result},
    repository::Repository,
};

/// Carry in enters at bit 0, the top bit leaves as carry out. Registered as
/// `{bits}BIT_SHIFT_LEFT`.
pub fn register_shift_left(repository: &Repository, bits: usize) -> Result<Arc<Blueprint>> {
    let id = format!("{bits}BIT_SHIFT_LEFT");
    if bits == 0 {
        return Err(Error::ZeroWidth { blueprint: id });
    }
    let mut builder = BlueprintBuilder::new(bits + 1, bits + 1).id(id);
    builder.output(0, Source::input(bits));
    for bit in 1..bits {
        builder.output(bit, Source::input(bit - 1));
    }
    builder.output(bits, Source::input(bits - 1));
    builder.register(repository)
}

/// Carry in enters at the top bit, bit 0 leaves as carry out. Registered as
/// `{bits}BIT_SHIFT_RIGHT`.
pub fn register_shift_right(repository: &Repository, bits: usize) -> Result<Arc<Blueprint>> {
    let id = format!("{bits}BIT_SHIFT_RIGHT");
    if bits == 0 {
        return Err(Error::ZeroWidth { blueprint: id });
    }
    let mut builder = BlueprintBuilder::new(bits + 1, bits + 1).id(id);
    for bit in 0..bits - 1 {
        builder.output(bit, Source::input(bit + 1));
    }
    builder.output(bits - 1, Source::input(bits));
    builder.output(bits, Source::input(0));
    builder.register(repository)
}

pub fn register_all(repository: &Repository) -> Result<()> {
    register_shift_left(repository, 2)?;
    register_shift_left(repository, 8)?;
    register_shift_right(repository, 8)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        circuit_sim::CircuitSim,
        components::wire::{from_bits, to_bits},
    };

    fn shifters() -> Repository {
        let repository = Repository::new();
        register_all(&repository).unwrap();
        repository
    }

    fn shift(repository: &Repository, id: &str, value: u8, carry: bool) -> (u8, bool) {
        let mut inputs = to_bits(value, 8);
        inputs.push(carry);
        let outputs = repository.evaluate(id, &inputs).unwrap();
        (from_bits(&outputs[..8]), outputs[8])
    }

    #[test]
    fn two_bit_shift_left() {
        let repository = shifters();
        assert_eq!(
            repository.evaluate("2BIT_SHIFT_LEFT", &[true, false, false]).unwrap(),
            vec![false, true, false]
        );
        assert_eq!(
            repository.evaluate("2BIT_SHIFT_LEFT", &[false, true, true]).unwrap(),
            vec![true, false, true]
        );
    }

    #[test]
    fn byte_shifts() {
        let repository = shifters();
        for value in [0u8, 1, 0x80, 0xa5, 0x7f, 0xff] {
            for carry in [false, true] {
                let (left, out) = shift(&repository, "8BIT_SHIFT_LEFT", value, carry);
                assert_eq!(left, (value << 1) | u8::from(carry), "{value} << 1");
                assert_eq!(out, value & 0x80 != 0, "{value} << 1 carry");

                let (right, out) = shift(&repository, "8BIT_SHIFT_RIGHT", value, carry);
                assert_eq!(right, (value >> 1) | (u8::from(carry) << 7), "{value} >> 1");
                assert_eq!(out, value & 1 != 0, "{value} >> 1 carry");
            }
        }
    }

    #[test]
    fn zero_width_is_rejected() {
        let repository = Repository::new();
        assert!(matches!(
            register_shift_left(&repository, 0),
            Err(Error::ZeroWidth { blueprint }) if blueprint == "0BIT_SHIFT_LEFT"
        ));
        assert!(matches!(
            register_shift_right(&repository, 0),
            Err(Error::ZeroWidth { blueprint }) if blueprint == "0BIT_SHIFT_RIGHT"
        ));
        assert!(!repository.contains("0BIT_SHIFT_LEFT"));
    }

    #[test]
    fn one_bit_shifts() {
        let repository = Repository::new();
        let left = register_shift_left(&repository, 1).unwrap();
        let right = register_shift_right(&repository, 1).unwrap();
        assert_eq!(left.evaluate(&[true, false]).unwrap(), vec![false, true]);
        assert_eq!(right.evaluate(&[true, false]).unwrap(), vec![false, true]);
    }

    #[test]
    fn shifts_are_pure_wiring() {
        let repository = shifters();
        let left = repository.lookup("8BIT_SHIFT_LEFT").unwrap();
        assert!(left.as_composite().unwrap().node_list().is_empty());
    }
}
