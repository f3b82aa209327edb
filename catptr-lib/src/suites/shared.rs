use core::{cell::Cell, ptr::null};
use std::rc::Rc;

use crate::{
    check, check_eq,
    harness::{CaseResult, Suite},
    ptr::SharedRef,
    suite,
};

use super::fixtures::{CtorMock, DropMock, DropMockBase, LineBase, Point2, PointBase};

pub fn suite() -> Suite {
    suite!(
        "SharedRef",
        test_ctor_1,
        test_ctor_2,
        test_ctor_3,
        test_ctor_4,
        test_clone,
        test_take,
        test_set_1,
        test_set_2,
        test_set_3,
        test_set_4,
        test_reset_1,
        test_reset_2,
        test_swap,
        test_as_1,
        test_as_2,
        test_as_3,
        test_as_shared_1,
        test_as_shared_2,
        test_as_shared_3,
        test_as_shared_4,
        test_is_null,
    )
}

fn test_ctor_1() -> CaseResult {
    let ptr = SharedRef::<i32>::null();
    check_eq!(ptr.addr(), null());
    check_eq!(ptr.count(), 0);
    Ok(())
}

fn test_ctor_2() -> CaseResult {
    let ptr = SharedRef::new(0);
    check!(!ptr.is_null());
    check_eq!(ptr.count(), 1);
    Ok(())
}

fn test_ctor_3() -> CaseResult {
    let counter = Cell::new(0);
    let _ptr = SharedRef::new(CtorMock::new(&counter));
    check_eq!(counter.get(), 1);
    Ok(())
}

fn test_ctor_4() -> CaseResult {
    let ptr = SharedRef::new(77);
    check_eq!(*ptr, 77);
    Ok(())
}

fn test_clone() -> CaseResult {
    let counter = Rc::new(Cell::new(0));
    let ptr = SharedRef::new(DropMock::new(&counter));
    let copies: Vec<_> = (0..4).map(|_| ptr.clone()).collect();
    check_eq!(ptr.count(), 5);
    drop(copies);
    check_eq!(ptr.count(), 1);
    drop(ptr);
    check_eq!(counter.get(), 1);
    Ok(())
}

fn test_take() -> CaseResult {
    let mut ptr1 = SharedRef::new(Point2::new(7, -7));
    let address = ptr1.addr();
    let ptr2 = ptr1.take();
    check!(ptr1.is_null());
    check_eq!(ptr2.addr(), address);
    check_eq!(ptr2.count(), 1);
    Ok(())
}

fn test_set_1() -> CaseResult {
    let ptr1 = SharedRef::new(0);
    let mut ptr2 = SharedRef::<i32>::null();
    ptr2.set(&ptr1);
    check_eq!(ptr1.count(), 2);
    check_eq!(ptr2.addr(), ptr1.addr());
    check!(ptr2 == ptr1);
    Ok(())
}

fn test_set_2() -> CaseResult {
    let ptr1 = SharedRef::new(1);
    let ptr2 = SharedRef::new(2);
    let mut ptr3 = ptr1.clone();
    ptr3.set(&ptr2);
    check_eq!(ptr1.count(), 1);
    check_eq!(ptr2.count(), 2);
    check_eq!(*ptr3, 2);
    Ok(())
}

fn test_set_3() -> CaseResult {
    let ptr1 = SharedRef::new(0);
    let mut ptr2 = ptr1.clone();
    ptr2.set(&ptr1);
    check_eq!(ptr1.count(), 2);
    ptr2.clone_from(&ptr1);
    check_eq!(ptr1.count(), 2);
    Ok(())
}

fn test_set_4() -> CaseResult {
    let counter = Rc::new(Cell::new(0));
    let mut ptr = SharedRef::new(DropMock::new(&counter));
    ptr.set(&SharedRef::null());
    check_eq!(counter.get(), 1);
    check!(ptr.is_null());
    Ok(())
}

fn test_reset_1() -> CaseResult {
    let counter = Rc::new(Cell::new(0));
    let mut ptr = SharedRef::new(DropMock::new(&counter));
    ptr.reset();
    check_eq!(counter.get(), 1);
    check!(ptr.is_null());
    Ok(())
}

fn test_reset_2() -> CaseResult {
    let mut ptr = SharedRef::<DropMock>::null();
    ptr.reset();
    check!(ptr.is_null());
    Ok(())
}

fn test_swap() -> CaseResult {
    let mut ptr1 = SharedRef::<i32>::null();
    let mut ptr2 = SharedRef::new(0);
    let address = ptr2.addr();
    ptr1.swap(&mut ptr2);
    check_eq!(ptr1.addr(), address);
    check_eq!(ptr1.count(), 1);
    check!(ptr2.is_null());
    Ok(())
}

fn test_as_1() -> CaseResult {
    let ptr = SharedRef::new(Point2::new(3, 5));
    let base = ptr.as_checked::<dyn PointBase>();
    check_eq!(base.addr(), ptr.addr());
    Ok(())
}

fn test_as_2() -> CaseResult {
    let ptr = SharedRef::new(Point2::new(3, 5));
    let base = ptr.as_checked::<dyn LineBase>();
    check_eq!(base.addr(), null());
    Ok(())
}

fn test_as_3() -> CaseResult {
    let ptr = SharedRef::<Point2>::null();
    let base = ptr.as_checked::<dyn PointBase>();
    check_eq!(base.addr(), null());
    Ok(())
}

fn test_as_shared_1() -> CaseResult {
    let ptr = SharedRef::new(Point2::new(3, 5));
    let base = ptr.as_checked_shared::<dyn PointBase>();
    check_eq!(base.addr(), ptr.addr());
    check_eq!(ptr.count(), 2);
    Ok(())
}

fn test_as_shared_2() -> CaseResult {
    let ptr = SharedRef::new(Point2::new(3, 5));
    let base = ptr.as_checked_shared::<dyn LineBase>();
    check!(base.is_null());
    check_eq!(ptr.count(), 1);
    Ok(())
}

fn test_as_shared_3() -> CaseResult {
    let ptr = SharedRef::<Point2>::null();
    let base = ptr.as_checked_shared::<dyn PointBase>();
    check!(base.is_null());
    Ok(())
}

fn test_as_shared_4() -> CaseResult {
    let counter = Rc::new(Cell::new(0));
    let mut ptr = SharedRef::new(DropMock::new(&counter));
    let mut base = ptr.as_checked_shared::<dyn DropMockBase>();
    ptr.reset();
    check_eq!(counter.get(), 0);
    base.reset();
    check_eq!(counter.get(), 1);
    Ok(())
}

fn test_is_null() -> CaseResult {
    check!(SharedRef::<i32>::null().is_null());
    Ok(())
}
