use std::io::{self, Error};

use io_trait::Io;

/// Runner options taken from the command line.
///
/// `catptr [FILTER] [--report PATH]`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Only cases whose `suite::case` name contains it are run.
    pub filter: Option<String>,
    /// Where to write the summary, besides standard output.
    pub report: Option<String>,
}

impl RunConfig {
    /// Parses `args`. The first item is the program name.
    pub fn parse(args: impl Iterator<Item = String>) -> io::Result<Self> {
        let mut result = Self::default();
        let mut args = args.skip(1);
        while let Some(arg) = args.next() {
            if arg == "--report" {
                match args.next() {
                    Some(path) => result.report = Some(path),
                    None => return Err(Error::other("--report requires a path")),
                }
            } else if arg.starts_with("--") {
                return Err(Error::other(format!("unknown option {arg}")));
            } else if let Some(filter) = &result.filter {
                return Err(Error::other(format!(
                    "more than one filter: {filter} and {arg}"
                )));
            } else {
                result.filter = Some(arg);
            }
        }
        Ok(result)
    }
    pub fn from_io(io: &impl Io) -> io::Result<Self> {
        Self::parse(io.args())
    }
    pub fn matches(&self, name: &str) -> bool {
        match &self.filter {
            Some(filter) => name.contains(filter.as_str()),
            None => true,
        }
    }
}
