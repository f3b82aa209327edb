use std::fmt;

use super::failure::Failure;

/// The outcome of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    passed: usize,
    skipped: usize,
    failures: Vec<(String, Failure)>,
}

impl Report {
    pub(crate) fn pass(&mut self) {
        self.passed += 1;
    }
    pub(crate) fn skip(&mut self) {
        self.skipped += 1;
    }
    pub(crate) fn fail(&mut self, name: String, failure: Failure) {
        self.failures.push((name, failure));
    }
    pub fn passed(&self) -> usize {
        self.passed
    }
    /// Cases left out by the filter.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
    /// Failed cases as `suite::case` names, in run order.
    pub fn failures(&self) -> &[(String, Failure)] {
        &self.failures
    }
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return writeln!(f, "SUCCESS running all tests.");
        }
        writeln!(f, "FAILURE in some tests:")?;
        for (name, failure) in &self.failures {
            writeln!(f, "    {name}: {failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use wasm_bindgen_test::wasm_bindgen_test;

    use crate::harness::Failure;

    use super::Report;

    #[test]
    #[wasm_bindgen_test]
    fn test_success() {
        let mut report = Report::default();
        report.pass();
        report.skip();
        assert!(report.is_success());
        assert_eq!((report.passed(), report.skipped()), (1, 1));
        assert_eq!(report.to_string(), "SUCCESS running all tests.\n");
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_failure() {
        let mut report = Report::default();
        report.pass();
        report.fail("a::b".to_string(), Failure::new("nope"));
        assert!(!report.is_success());
        assert_eq!(
            report.to_string(),
            "FAILURE in some tests:\n    a::b: nope\n"
        );
    }
}
