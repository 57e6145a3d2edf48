use std::fmt;
use std::io::IsTerminal;
use std::process::{Command, Stdio};

use ansi_term::Style;
use anyhow::{Context, Result};

/// Seam for every external tool call.
pub trait Shell {
    /// Runs `cmd` to completion and returns its standard output.
    fn run(&mut self, cmd: &str) -> Result<String>;
}

#[derive(Debug)]
pub enum ToolError {
    /// The command ran and exited with a nonzero status.
    Exit { cmd: String, code: i32 },
}

impl ToolError {
    pub fn code(&self) -> i32 {
        match self {
            ToolError::Exit { code, .. } => *code,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Exit { cmd, code } => write!(f, "`{}` exited with status {}", cmd, code),
        }
    }
}

impl std::error::Error for ToolError {}

/// Runs commands through `sh -c`, echoing each one first.
#[derive(Default, Debug)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&mut self, cmd: &str) -> Result<String> {
        echo(cmd);

        let output = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("failed to run `{}`", cmd))?;

        if !output.status.success() {
            // killed by a signal has no code
            let code = output.status.code().unwrap_or(1);
            log::debug!("`{}` failed with {}", cmd, output.status);
            return Err(ToolError::Exit {
                cmd: cmd.to_string(),
                code,
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Prints a command line the way it is about to be run.
pub fn echo(line: &str) {
    if std::io::stdout().is_terminal() {
        println!("{}", Style::new().bold().paint(line));
    } else {
        println!("{}", line);
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned outputs in order and records what was asked for.
    #[derive(Default)]
    pub struct ScriptedShell {
        pub replies: VecDeque<std::result::Result<String, i32>>,
        pub calls: Vec<String>,
    }

    impl ScriptedShell {
        pub fn new<I>(replies: I) -> Self
        where
            I: IntoIterator<Item = std::result::Result<&'static str, i32>>,
        {
            Self {
                replies: replies
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
                calls: Vec::new(),
            }
        }
    }

    impl Shell for ScriptedShell {
        fn run(&mut self, cmd: &str) -> Result<String> {
            self.calls.push(cmd.to_string());
            match self.replies.pop_front() {
                Some(Ok(out)) => Ok(out),
                Some(Err(code)) => Err(ToolError::Exit {
                    cmd: cmd.to_string(),
                    code,
                }
                .into()),
                None => anyhow::bail!("unexpected command `{}`", cmd),
            }
        }
    }

    #[test]
    fn captures_stdout() {
        let out = SystemShell.run("printf 'a\\nb\\n'").unwrap();
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn nonzero_exit_keeps_the_code() {
        let err = SystemShell.run("exit 3").unwrap_err();
        let tool = err.downcast_ref::<ToolError>().unwrap();
        assert_eq!(tool.code(), 3);
        assert_eq!(err.to_string(), "`exit 3` exited with status 3");
    }

    #[test]
    fn pipelines_go_through_the_shell() {
        let out = SystemShell
            .run("printf ' 1 .text 00001000\\n' | awk '{ print $2 \" \" $3 }'")
            .unwrap();
        assert_eq!(out, ".text 00001000\n");
    }
}
