use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::artifacts::Artifacts;
use crate::breakpoints::DEFAULT_BREAKPOINTS;
use crate::hex::parse_hex;
use crate::resolve::{efi_symbol_file, kernel_symbol_file, KERNEL_BASE};
use crate::script::{GdbScript, DEFAULT_REMOTE};
use crate::sections::{ElfReader, ObjdumpReader, ReaderKind, SectionReader};
use crate::tool::{Shell, SystemShell, ToolError};

mod artifacts;
mod breakpoints;
mod error;
mod hex;
mod launch;
mod resolve;
mod script;
mod sections;
mod tool;

/// Start gdb with symbols for the EFI loader and the kernel
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// EFI loader base address
    #[arg(short, long, value_name = "ADDR", value_parser = parse_hex)]
    efi: Option<u64>,

    /// Add symbols for the kernel
    #[arg(short, long)]
    kernel: bool,

    /// gdb source file (from `save breakpoints`)
    #[arg(
        short,
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_BREAKPOINTS
    )]
    breakpoints: Option<PathBuf>,

    /// How section addresses are read
    #[arg(long, value_enum, default_value_t = ReaderKind::Objdump)]
    reader: ReaderKind,

    /// Debugger to launch
    #[arg(long, env = "EFIGDB_GDB", default_value = "gdb")]
    gdb: String,

    /// Remote target to attach to
    #[arg(long, default_value = DEFAULT_REMOTE)]
    remote: String,

    /// Keep gdb pagination on
    #[arg(long)]
    paginate: bool,

    /// Print the debugger command line instead of running it
    #[arg(long)]
    dry_run: bool,
}

/// Works out every gdb command for `args`, running the external tools
/// through `shell`.
fn plan(args: &Args, shell: &mut dyn Shell) -> Result<GdbScript> {
    let artifacts = Artifacts::query(shell)?;

    let mut objdump;
    let mut elf;
    let reader: &mut dyn SectionReader = match args.reader {
        ReaderKind::Objdump => {
            objdump = ObjdumpReader::new(shell);
            &mut objdump
        }
        ReaderKind::Elf => {
            elf = ElfReader;
            &mut elf
        }
    };
    log::info!("reading sections with {:?}", args.reader);

    let mut script = GdbScript {
        paginate: args.paginate,
        remote: args.remote.clone(),
        ..Default::default()
    };

    if let Some(base) = args.efi {
        let sections = reader.sections(&artifacts.loader)?;
        let file = efi_symbol_file(&artifacts.debug_loader, base, &sections)?;
        script.symbol_files.push(file);
    }

    if args.kernel {
        let sections = reader.sections(&artifacts.kernel)?;
        script
            .symbol_files
            .push(kernel_symbol_file(&artifacts.kernel, &sections, KERNEL_BASE));
    }

    if let Some(bp) = &args.breakpoints {
        script.breakpoints = Some(breakpoints::resolve(bp, Path::new(""))?);
    }

    Ok(script)
}

/// Tool failures keep their own exit status.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ToolError>().map_or(1, ToolError::code)
}

fn run() -> Result<()> {
    if std::env::args_os().len() == 1 {
        Args::command().print_help()?;
        return Ok(());
    }
    let args = Args::parse();
    log::debug!("{:?}", args);

    let script = plan(&args, &mut SystemShell)?;
    let gdb_args = script.to_args();

    if args.dry_run {
        println!("{}", launch::command_line(&args.gdb, &gdb_args));
        return Ok(());
    }

    Err(launch::exec(&args.gdb, &gdb_args).into())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        let code = exit_code(&err);
        if err.downcast_ref::<ToolError>().is_none() {
            eprintln!("error: {:#}", err);
        } else {
            log::error!("{:#}", err);
        }
        std::process::exit(code);
    }
}
