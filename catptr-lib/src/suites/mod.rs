//! The self-check suites run by the `catptr` binary.

mod control_block;
mod exclusive;
pub mod fixtures;
mod non_owning;
mod shared;

use crate::harness::Registry;

pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .add(non_owning::suite())
        .add(exclusive::suite())
        .add(control_block::separate())
        .add(control_block::inplace())
        .add(shared::suite());
    registry
}

fn address_of<T: ?Sized>(value: &T) -> *const () {
    value as *const T as *const ()
}

#[cfg(test)]
mod test {
    use wasm_bindgen_test::wasm_bindgen_test;

    use crate::harness::{run_with, RunConfig};

    use super::registry;

    #[test]
    #[wasm_bindgen_test]
    fn test_all() {
        let registry = registry();
        let report = run_with(&RunConfig::default(), &registry);
        assert!(report.is_success(), "{report}");
        assert_eq!(report.passed(), registry.len());
    }
}
