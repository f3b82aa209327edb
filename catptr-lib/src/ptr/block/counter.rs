use core::cell::Cell;

/// Update a reference count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCounterUpdate {
    AddRef,
    Read,
    Release,
}

/// A non-atomic strong count.
#[derive(Debug, Default)]
#[repr(transparent)]
pub struct Counter(Cell<usize>);

impl Counter {
    #[inline(always)]
    pub const fn new(count: usize) -> Self {
        Self(Cell::new(count))
    }
    /// Applies `update` and returns the previous value.
    #[inline(always)]
    pub fn update(&self, update: RefCounterUpdate) -> usize {
        let result = self.0.get();
        match update {
            RefCounterUpdate::AddRef => self.0.set(result + 1),
            RefCounterUpdate::Read => {}
            RefCounterUpdate::Release => {
                debug_assert_ne!(result, 0);
                self.0.set(result - 1)
            }
        }
        result
    }
}

#[cfg(test)]
mod test {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::{Counter, RefCounterUpdate};

    #[test]
    #[wasm_bindgen_test]
    fn test() {
        let x = Counter::default();
        assert_eq!(x.update(RefCounterUpdate::Read), 0);
        assert_eq!(x.update(RefCounterUpdate::AddRef), 0);
        assert_eq!(x.update(RefCounterUpdate::AddRef), 1);
        assert_eq!(x.update(RefCounterUpdate::Release), 2);
        assert_eq!(x.update(RefCounterUpdate::Read), 1);
        assert_eq!(x.update(RefCounterUpdate::Release), 1);
        assert_eq!(x.update(RefCounterUpdate::Read), 0);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_initial() {
        let x = Counter::new(7);
        assert_eq!(x.update(RefCounterUpdate::Read), 7);
    }
}
