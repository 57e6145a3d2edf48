use std::fmt;

/// Tool output did not have the shape we rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackError {
    pub what: String,
    pub expected: usize,
    pub found: usize,
}

impl UnpackError {
    pub fn new(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self {
            what: what.into(),
            expected,
            found,
        }
    }
}

impl fmt::Display for UnpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} {}, found {}",
            self.expected, self.what, self.found
        )
    }
}

impl std::error::Error for UnpackError {}
