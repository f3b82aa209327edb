use std::{any::Any, error, fmt};

/// Why a test case failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
    /// Turns the payload of a caught panic into a failure.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string payload".to_string()
        };
        Self::new(format!("panicked: {message}"))
    }
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl error::Error for Failure {}

pub type CaseResult = Result<(), Failure>;

/// Fails the enclosing test case unless `cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            return Err($crate::harness::Failure::new(format!(
                "{}:{}: check failed: {}",
                file!(),
                line!(),
                stringify!($cond)
            )));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::harness::Failure::new(format!(
                "{}:{}: {}",
                file!(),
                line!(),
                format_args!($($arg)+)
            )));
        }
    };
}

/// Fails the enclosing test case unless both sides compare equal.
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return Err($crate::harness::Failure::new(format!(
                        "{}:{}: {} != {}: {:?} != {:?}",
                        file!(),
                        line!(),
                        stringify!($left),
                        stringify!($right),
                        left,
                        right
                    )));
                }
            }
        }
    };
}

#[cfg(test)]
mod test {
    use std::panic::catch_unwind;

    use wasm_bindgen_test::wasm_bindgen_test;

    use super::{CaseResult, Failure};

    fn passes() -> CaseResult {
        check!(1 + 1 == 2);
        check_eq!(2 * 2, 4);
        Ok(())
    }

    fn fails_check() -> CaseResult {
        check!(1 > 2, "expected {} > {}", 1, 2);
        Ok(())
    }

    fn fails_check_eq() -> CaseResult {
        check_eq!(3, 4);
        Ok(())
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_check() {
        assert_eq!(passes(), Ok(()));
        let failure = fails_check().unwrap_err();
        assert!(failure.message().ends_with("expected 1 > 2"));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_check_eq() {
        let failure = fails_check_eq().unwrap_err();
        assert!(failure.message().ends_with("3 != 4: 3 != 4"));
        assert_eq!(failure.to_string(), failure.message());
    }

    #[test]
    fn test_from_panic() {
        let payload = catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(Failure::from_panic(payload).message(), "panicked: boom");
        let payload = catch_unwind(|| panic!("{}", 42)).unwrap_err();
        assert_eq!(Failure::from_panic(payload).message(), "panicked: 42");
    }
}
