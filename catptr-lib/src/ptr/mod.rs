mod aliases;
pub(crate) mod block;
mod cast;
mod exclusive;
mod non_owning;
mod shared;

use core::ptr::{null, NonNull};

pub use self::{
    cast::{Dynamic, Request, Upcast},
    exclusive::ExclusiveRef,
    non_owning::NonOwningRef,
    shared::SharedRef,
};

/// The data address of `ptr`, metadata dropped. Null for `None`.
#[inline(always)]
pub(crate) fn addr<T: ?Sized>(ptr: Option<NonNull<T>>) -> *const () {
    match ptr {
        Some(p) => p.cast::<()>().as_ptr(),
        None => null(),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn null_deref(kind: &str) -> ! {
    panic!("dereferenced a null {kind}")
}

#[cfg(test)]
mod test {
    use core::ptr::{null, NonNull};

    use wasm_bindgen_test::wasm_bindgen_test;

    use crate::suites::fixtures::{Geometry, Point2};

    use super::addr;

    #[test]
    #[wasm_bindgen_test]
    fn test_addr() {
        assert_eq!(addr::<i32>(None), null());
        let mut point = Point2::new(1, 1);
        let concrete = NonNull::from(&mut point);
        let geometry: NonNull<dyn Geometry> = concrete;
        assert_eq!(addr(Some(geometry)), addr(Some(concrete)));
        assert_eq!(addr(Some(concrete)), &point as *const Point2 as *const ());
    }
}
