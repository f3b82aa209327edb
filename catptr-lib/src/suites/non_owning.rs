use core::ptr::null;

use crate::{
    check, check_eq,
    harness::{CaseResult, Suite},
    ptr::NonOwningRef,
    suite,
};

use super::{
    address_of,
    fixtures::{Geometry, LineBase, Point2, PointBase},
};

pub fn suite() -> Suite {
    suite!(
        "NonOwningRef",
        test_ctor_1,
        test_ctor_2,
        test_copy,
        test_take,
        test_take_upcast,
        test_upcast,
        test_as_1,
        test_as_2,
        test_as_3,
        test_is_null,
    )
}

fn test_ctor_1() -> CaseResult {
    let ptr = NonOwningRef::<i32>::null();
    check_eq!(ptr.addr(), null());
    Ok(())
}

fn test_ctor_2() -> CaseResult {
    let val = 0;
    let ptr = NonOwningRef::from_ref(&val);
    check!(!ptr.is_null());
    Ok(())
}

fn test_copy() -> CaseResult {
    let val = 0;
    let ptr1 = NonOwningRef::from_ref(&val);
    let ptr2 = ptr1;
    check_eq!(ptr1.addr(), address_of(&val));
    check_eq!(ptr2.addr(), address_of(&val));
    Ok(())
}

fn test_take() -> CaseResult {
    let val = 0;
    let mut ptr1 = NonOwningRef::from_ref(&val);
    let ptr2 = ptr1.take();
    check_eq!(ptr1.addr(), null());
    check_eq!(ptr2.addr(), address_of(&val));
    Ok(())
}

fn test_take_upcast() -> CaseResult {
    let val = Point2::new(-5, 5);
    let mut ptr1 = NonOwningRef::from_ref(&val);
    let ptr2 = ptr1.take().upcast::<dyn Geometry>();
    check!(ptr1.is_null());
    check_eq!(ptr2.addr(), address_of(&val));
    check_eq!(unsafe { ptr2.as_ref() }.map(|g| g.id()), Some(val.id()));
    Ok(())
}

fn test_upcast() -> CaseResult {
    let val = Point2::new(-5, 5);
    let ptr1 = NonOwningRef::from_ref(&val);
    let ptr2: NonOwningRef<dyn Geometry> = ptr1.upcast();
    check_eq!(ptr1.addr(), address_of(&val));
    check_eq!(ptr2.addr(), address_of(&val));
    check_eq!(unsafe { ptr2.as_ref() }.map(|g| g.id()), Some(val.id()));
    Ok(())
}

fn test_as_1() -> CaseResult {
    let val = Point2::new(3, 5);
    let ptr = NonOwningRef::from_ref(&val);
    let base = unsafe { ptr.as_checked::<dyn PointBase>() };
    check_eq!(base.addr(), ptr.addr());
    Ok(())
}

fn test_as_2() -> CaseResult {
    let val = Point2::new(3, 5);
    let ptr = NonOwningRef::from_ref(&val);
    let base = unsafe { ptr.as_checked::<dyn LineBase>() };
    check_eq!(base.addr(), null());
    Ok(())
}

fn test_as_3() -> CaseResult {
    let ptr = NonOwningRef::<Point2>::null();
    let base = unsafe { ptr.as_checked::<dyn PointBase>() };
    check_eq!(base.addr(), null());
    Ok(())
}

fn test_is_null() -> CaseResult {
    check!(NonOwningRef::<i32>::null().is_null());
    Ok(())
}
