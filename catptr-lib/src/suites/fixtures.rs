//! Types shared by the suites and the unit tests: a small geometry hierarchy and counting mocks.

use core::{
    cell::Cell,
    sync::atomic::{AtomicUsize, Ordering},
};
use std::rc::Rc;

use crate::{dynamic, ptr::Dynamic, ref_aliases};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

pub trait Geometry: Dynamic {
    fn id(&self) -> usize;
}

pub trait PointBase: Dynamic {}

/// Implemented by nothing: casts to it always miss.
pub trait LineBase: Dynamic {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point2 {
    id: usize,
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { id: next_id(), x, y }
    }
}

impl Geometry for Point2 {
    fn id(&self) -> usize {
        self.id
    }
}

impl PointBase for Point2 {}

dynamic!(Point2 => dyn PointBase, dyn Geometry);

ref_aliases!(pub Point2);
ref_aliases!(pub dyn Geometry);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    id: usize,
    pub p1: Point2,
    pub p2: Point2,
}

impl Line {
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self {
            id: next_id(),
            p1,
            p2,
        }
    }
}

impl Geometry for Line {
    fn id(&self) -> usize {
        self.id
    }
}

impl PointBase for Line {}

dynamic!(Line => dyn PointBase, dyn Geometry);

/// Counts constructions.
#[derive(Debug)]
pub struct CtorMock;

impl CtorMock {
    pub fn new(counter: &Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Self
    }
}

pub trait DropMockBase: Dynamic {}

/// Counts drops.
#[derive(Debug)]
pub struct DropMock {
    counter: Rc<Cell<usize>>,
}

impl DropMock {
    pub fn new(counter: &Rc<Cell<usize>>) -> Self {
        Self {
            counter: counter.clone(),
        }
    }
}

impl Drop for DropMock {
    fn drop(&mut self) {
        self.counter.set(self.counter.get() + 1);
    }
}

impl DropMockBase for DropMock {}

dynamic!(DropMock => dyn DropMockBase);

#[cfg(test)]
mod test {
    use core::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::wasm_bindgen_test;

    use super::{CtorMock, DropMock, Geometry, Point2};

    #[test]
    #[wasm_bindgen_test]
    fn test_ids() {
        let a = Point2::new(0, 0);
        let b = Point2::new(0, 0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_mocks() {
        let constructed = Cell::new(0);
        let _mock = CtorMock::new(&constructed);
        assert_eq!(constructed.get(), 1);
        let dropped = Rc::new(Cell::new(0));
        drop(DropMock::new(&dropped));
        assert_eq!(dropped.get(), 1);
    }
}
