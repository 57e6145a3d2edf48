use std::path::PathBuf;

use anyhow::Result;

use crate::error::UnpackError;
use crate::tool::Shell;

/// Make target that prints the loader, debug loader and kernel paths.
pub const ARTIFACTS_TARGET: &str = "print-debug-execs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub loader: PathBuf,
    /// Unstripped counterpart of `loader`, only used for symbols.
    pub debug_loader: PathBuf,
    pub kernel: PathBuf,
}

impl Artifacts {
    pub fn query(shell: &mut dyn Shell) -> Result<Self> {
        let out = shell.run(&format!("make {}", ARTIFACTS_TARGET))?;
        Ok(Self::parse(&out)?)
    }

    pub fn parse(out: &str) -> Result<Self, UnpackError> {
        let lines: Vec<&str> = out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        match lines.as_slice() {
            [loader, debug_loader, kernel] => Ok(Self {
                loader: PathBuf::from(loader),
                debug_loader: PathBuf::from(debug_loader),
                kernel: PathBuf::from(kernel),
            }),
            _ => Err(UnpackError::new(
                format!("paths from `make {}`", ARTIFACTS_TARGET),
                3,
                lines.len(),
            )),
        }
    }
}
