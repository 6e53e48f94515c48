//! The standard blueprint library, built up from NAND. Each module registers
//! its blueprints into a [`Repository`]; later modules use earlier ones as
//! node types, so [`register_all`] runs them in dependency order.

use crate::{error::Result, repository::Repository};

pub mod adder;
pub mod decoder;
pub mod gates;
pub mod mux;
pub mod shift;
pub mod wire;

pub fn register_all(repository: &Repository) -> Result<()> {
    gates::register_all(repository)?;
    adder::register_all(repository)?;
    shift::register_all(repository)?;
    decoder::register_all(repository)?;
    mux::register_all(repository)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn library_registers_once() {
        let repository = Repository::new();
        register_all(&repository).unwrap();
        for id in ["XOR", "8BIT_FULL_ADDER-SUBTRACTOR", "8BIT_SHIFT_RIGHT", "MUX4"] {
            assert!(repository.contains(id), "{id} missing");
        }
        assert!(register_all(&repository).is_err());
    }
}
