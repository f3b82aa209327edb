use super::failure::CaseResult;

/// A single named check.
#[derive(Debug, Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    pub run: fn() -> CaseResult,
}

/// Test cases run together under one name.
#[derive(Debug, Clone)]
pub struct Suite {
    name: &'static str,
    cases: Vec<TestCase>,
}

impl Suite {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cases: Vec::new(),
        }
    }
    pub fn case(mut self, name: &'static str, run: fn() -> CaseResult) -> Self {
        self.cases.push(TestCase { name, run });
        self
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }
}

/// Builds a [`Suite`](crate::harness::Suite) from functions, each named after its identifier.
#[macro_export]
macro_rules! suite {
    ($name:expr $(, $case:ident)* $(,)?) => {
        $crate::harness::Suite::new($name)$(.case(stringify!($case), $case))*
    };
}

/// Every suite known to a runner, in registration order.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    suites: Vec<Suite>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add(&mut self, suite: Suite) -> &mut Self {
        self.suites.push(suite);
        self
    }
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }
    /// The number of test cases over all suites.
    pub fn len(&self) -> usize {
        self.suites.iter().map(|s| s.cases.len()).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
