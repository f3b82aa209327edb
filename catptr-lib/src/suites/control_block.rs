use crate::harness::Suite;

pub fn separate() -> Suite {
    use self::separate::*;
    crate::suite!(
        "Separate",
        test_ctor,
        test_increment,
        test_decrement_1,
        test_decrement_2,
        test_dispose_1,
        test_dispose_2,
    )
}

pub fn inplace() -> Suite {
    use self::inplace::*;
    crate::suite!(
        "Inplace",
        test_ctor,
        test_increment,
        test_decrement_1,
        test_decrement_2,
        test_dispose_1,
        test_dispose_2,
        test_payload,
    )
}

mod separate {
    use core::cell::Cell;
    use std::rc::Rc;

    use crate::{
        check, check_eq,
        harness::CaseResult,
        ptr::block::{BlockRef, ControlBlock, Separate},
        suites::fixtures::DropMock,
    };

    pub fn test_ctor() -> CaseResult {
        let (block, _) = BlockRef::alloc(Separate::new(7, Box::new(0)));
        let count = unsafe { block.count() };
        unsafe { block.dispose() };
        check_eq!(count, 7);
        Ok(())
    }

    pub fn test_increment() -> CaseResult {
        let (block, _) = BlockRef::alloc(Separate::new(7, Box::new(0)));
        let count = unsafe {
            block.increment();
            block.count()
        };
        unsafe { block.dispose() };
        check_eq!(count, 8);
        Ok(())
    }

    pub fn test_decrement_1() -> CaseResult {
        let (block, _) = BlockRef::alloc(Separate::new(7, Box::new(5)));
        let disposed = unsafe { block.decrement() };
        let count = unsafe { block.count() };
        unsafe { block.dispose() };
        check!(!disposed);
        check_eq!(count, 6);
        Ok(())
    }

    pub fn test_decrement_2() -> CaseResult {
        let counter = Rc::new(Cell::new(0));
        let (block, _) = BlockRef::alloc(Separate::new(1, Box::new(DropMock::new(&counter))));
        check!(unsafe { block.decrement() });
        check_eq!(counter.get(), 1);
        Ok(())
    }

    pub fn test_dispose_1() -> CaseResult {
        let counter = Rc::new(Cell::new(0));
        let (block, _) = BlockRef::alloc(Separate::new(7, Box::new(DropMock::new(&counter))));
        unsafe { block.dispose() };
        check_eq!(counter.get(), 1);
        Ok(())
    }

    pub fn test_dispose_2() -> CaseResult {
        let counter = Rc::new(Cell::new(0));
        let block: Box<dyn ControlBlock> =
            Box::new(Separate::new(7, Box::new(DropMock::new(&counter))));
        block.dispose();
        check_eq!(counter.get(), 1);
        Ok(())
    }
}

mod inplace {
    use core::{cell::Cell, mem::size_of};
    use std::rc::Rc;

    use crate::{
        check, check_eq,
        harness::CaseResult,
        ptr::block::{BlockRef, ControlBlock, Inplace},
        suites::fixtures::{CtorMock, DropMock},
    };

    pub fn test_ctor() -> CaseResult {
        let counter = Cell::new(0);
        let (block, _) = BlockRef::alloc(Inplace::new(8, CtorMock::new(&counter)));
        let count = unsafe { block.count() };
        unsafe { block.dispose() };
        check_eq!(count, 8);
        check_eq!(counter.get(), 1);
        Ok(())
    }

    pub fn test_increment() -> CaseResult {
        let (block, _) = BlockRef::alloc(Inplace::new(8, 0));
        let count = unsafe {
            block.increment();
            block.count()
        };
        unsafe { block.dispose() };
        check_eq!(count, 9);
        Ok(())
    }

    pub fn test_decrement_1() -> CaseResult {
        let (block, _) = BlockRef::alloc(Inplace::new(8, 0));
        let disposed = unsafe { block.decrement() };
        let count = unsafe { block.count() };
        unsafe { block.dispose() };
        check!(!disposed);
        check_eq!(count, 7);
        Ok(())
    }

    pub fn test_decrement_2() -> CaseResult {
        let counter = Rc::new(Cell::new(0));
        let (block, _) = BlockRef::alloc(Inplace::new(1, DropMock::new(&counter)));
        check!(unsafe { block.decrement() });
        check_eq!(counter.get(), 1);
        Ok(())
    }

    pub fn test_dispose_1() -> CaseResult {
        let counter = Rc::new(Cell::new(0));
        let (block, _) = BlockRef::alloc(Inplace::new(8, DropMock::new(&counter)));
        unsafe { block.dispose() };
        check_eq!(counter.get(), 1);
        Ok(())
    }

    pub fn test_dispose_2() -> CaseResult {
        let counter = Rc::new(Cell::new(0));
        let block: Box<dyn ControlBlock> = Box::new(Inplace::new(8, DropMock::new(&counter)));
        block.dispose();
        check_eq!(counter.get(), 1);
        Ok(())
    }

    pub fn test_payload() -> CaseResult {
        let (block, raw) = BlockRef::alloc(Inplace::new(8, 42u64));
        let payload = unsafe { Inplace::payload(raw) };
        let offset = payload.as_ptr() as usize - raw.as_ptr() as usize;
        let value = unsafe { *payload.as_ref() };
        unsafe { block.dispose() };
        check!(offset < size_of::<Inplace<u64>>());
        check_eq!(value, 42);
        Ok(())
    }
}
