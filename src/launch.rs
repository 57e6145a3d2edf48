use std::fmt;
use std::process::Command;

use crate::tool::echo;

#[derive(Debug)]
pub struct LaunchError {
    pub program: String,
    pub source: std::io::Error,
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to launch {}", self.program)
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Quotes an argument for display when the shell would split it.
fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(quote)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces this process with `program`. Only returns on failure.
#[cfg(unix)]
pub fn exec(program: &str, args: &[String]) -> LaunchError {
    use std::os::unix::process::CommandExt;

    echo(&command_line(program, args));
    log::info!("exec {}", program);

    let source = Command::new(program).args(args).exec();
    LaunchError {
        program: program.to_string(),
        source,
    }
}

/// Runs `program` to completion and exits with its status.
#[cfg(not(unix))]
pub fn exec(program: &str, args: &[String]) -> LaunchError {
    echo(&command_line(program, args));
    log::info!("spawn {}", program);

    match Command::new(program).args(args).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => LaunchError {
            program: program.to_string(),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_commands_with_spaces() {
        let args = vec![
            "-ex".to_string(),
            "set confirm off".to_string(),
            "-ex".to_string(),
            "target remote :1234".to_string(),
        ];
        assert_eq!(
            command_line("gdb", &args),
            "gdb -ex 'set confirm off' -ex 'target remote :1234'"
        );
    }

    #[test]
    fn quotes_single_quotes() {
        assert_eq!(quote("it's"), r"'it'\''s'");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("build/kernel"), "build/kernel");
    }

    #[cfg(unix)]
    #[test]
    fn missing_program_is_a_launch_error() {
        let err = exec("efigdb-no-such-debugger", &[]);
        assert_eq!(err.program, "efigdb-no-such-debugger");
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }
}
