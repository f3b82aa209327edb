use core::ptr::null;

use crate::{
    check, check_eq,
    harness::{CaseResult, Suite},
    ptr::ExclusiveRef,
    suite,
};

use super::fixtures::{Geometry, Line, LineBase, Point2, PointBase};

pub fn suite() -> Suite {
    suite!(
        "ExclusiveRef",
        test_ctor_1,
        test_ctor_2,
        test_take,
        test_take_upcast,
        test_as_1,
        test_as_2,
        test_as_3,
        test_retype_checked,
        test_retype_checked_miss,
        test_is_null,
    )
}

fn test_ctor_1() -> CaseResult {
    let ptr = ExclusiveRef::<i32>::null();
    check_eq!(ptr.addr(), null());
    Ok(())
}

fn test_ctor_2() -> CaseResult {
    let val = 0;
    let ptr = ExclusiveRef::new(val);
    check!(!ptr.is_null());
    check_eq!(*ptr, val);
    Ok(())
}

fn test_take() -> CaseResult {
    let val = 0;
    let mut ptr1 = ExclusiveRef::new(val);
    let ptr2 = ptr1.take();
    check_eq!(ptr1.addr(), null());
    check_eq!(*ptr2, val);
    Ok(())
}

fn test_take_upcast() -> CaseResult {
    let mut ptr1 = ExclusiveRef::new(Point2::new(-5, 5));
    let address = ptr1.addr();
    let id = ptr1.id();
    let ptr2: ExclusiveRef<dyn Geometry> = ptr1.take().upcast();
    check_eq!(ptr1.addr(), null());
    check_eq!(ptr2.addr(), address);
    check_eq!(ptr2.id(), id);
    Ok(())
}

fn test_as_1() -> CaseResult {
    let ptr = ExclusiveRef::new(Point2::new(-5, 5));
    let base = ptr.as_checked::<dyn PointBase>();
    check_eq!(base.addr(), ptr.addr());
    Ok(())
}

fn test_as_2() -> CaseResult {
    let ptr = ExclusiveRef::new(Point2::new(-5, 5));
    let base = ptr.as_checked::<dyn LineBase>();
    check_eq!(base.addr(), null());
    Ok(())
}

fn test_as_3() -> CaseResult {
    let ptr = ExclusiveRef::<Point2>::null();
    let base = ptr.as_checked::<dyn PointBase>();
    check_eq!(base.addr(), null());
    Ok(())
}

fn test_retype_checked() -> CaseResult {
    let mut ptr: ExclusiveRef<dyn PointBase> =
        ExclusiveRef::new(Line::new(Point2::new(0, 0), Point2::new(3, 4))).upcast();
    let address = ptr.addr();
    let line = ptr.retype_checked::<Line>();
    check!(ptr.is_null());
    check_eq!(line.addr(), address);
    check_eq!((line.p2.x, line.p2.y), (3, 4));
    Ok(())
}

fn test_retype_checked_miss() -> CaseResult {
    let mut ptr: ExclusiveRef<dyn PointBase> = ExclusiveRef::new(Point2::new(1, 1)).upcast();
    let address = ptr.addr();
    let line = ptr.retype_checked::<Line>();
    check!(line.is_null());
    check_eq!(ptr.addr(), address);
    Ok(())
}

fn test_is_null() -> CaseResult {
    check!(ExclusiveRef::<i32>::null().is_null());
    Ok(())
}
