use std::path::PathBuf;

use crate::resolve::SymbolFile;

pub const ARCHITECTURE: &str = "i386:x86-64:intel";
pub const DEFAULT_REMOTE: &str = ":1234";

pub const CONFIRM_OFF: &str = "set confirm off";
pub const CONFIRM_ON: &str = "set confirm on";

/// The `-ex` commands gdb is started with.
#[derive(Debug, Clone)]
pub struct GdbScript {
    pub paginate: bool,
    pub architecture: String,
    pub symbol_files: Vec<SymbolFile>,
    pub remote: String,
    pub breakpoints: Option<PathBuf>,
}

impl Default for GdbScript {
    fn default() -> Self {
        Self {
            paginate: false,
            architecture: ARCHITECTURE.to_string(),
            symbol_files: Vec::new(),
            remote: DEFAULT_REMOTE.to_string(),
            breakpoints: None,
        }
    }
}

impl GdbScript {
    /// Symbol loading happens between `set confirm off` and `set confirm on`.
    /// Attaching and sourcing the breakpoints come last.
    pub fn commands(&self) -> Vec<String> {
        let mut cmds = Vec::new();

        if !self.paginate {
            cmds.push("set height unlimited".to_string());
        }
        cmds.push(CONFIRM_OFF.to_string());
        cmds.push(format!("set architecture {}", self.architecture));

        cmds.extend(self.symbol_files.iter().map(|f| f.to_string()));

        cmds.push(CONFIRM_ON.to_string());
        cmds.push(format!("target remote {}", self.remote));

        if let Some(bp) = &self.breakpoints {
            cmds.push(format!("source {}", bp.display()));
        }

        for cmd in &cmds {
            log::debug!("gdb command: {}", cmd);
        }
        cmds
    }

    pub fn to_args(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .flat_map(|cmd| ["-ex".to_string(), cmd])
            .collect()
    }
}
