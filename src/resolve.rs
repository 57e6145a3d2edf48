use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::UnpackError;
use crate::hex::format_hex;
use crate::sections::Section;

/// Where the kernel image is linked to run: the top gigabyte of the
/// address space.
pub const KERNEL_BASE: u64 = 0xffff_ffff_c000_0000;

/// Load address of a section. Wraps at 2^64.
pub fn absolute(base: u64, offset: u64) -> u64 {
    base.wrapping_add(offset)
}

/// One `add-symbol-file` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFile {
    pub path: PathBuf,
    /// Address of `.text`, the primary argument.
    pub text: Option<u64>,
    /// Every other section, passed as `-s <name> <addr>`.
    pub extra: Vec<Section>,
}

impl fmt::Display for SymbolFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "add-symbol-file {}", self.path.display())?;
        if let Some(text) = self.text {
            write!(f, " {}", format_hex(text))?;
        }
        for s in &self.extra {
            write!(f, " -s {} {}", s.name, format_hex(s.addr))?;
        }
        Ok(())
    }
}

/// Symbols for the EFI loader loaded at `base`.
///
/// Only the two sections whose names mention `text` or `data` are
/// considered; they are taken in table order as `.text` then `.data`.
/// Anything other than exactly two is an [`UnpackError`].
pub fn efi_symbol_file(
    debug_loader: &Path,
    base: u64,
    sections: &[Section],
) -> Result<SymbolFile, UnpackError> {
    let picked: Vec<&Section> = sections
        .iter()
        .filter(|s| s.name.contains("text") || s.name.contains("data"))
        .collect();

    let (text, data) = match picked.as_slice() {
        [text, data] => (text.addr, data.addr),
        _ => {
            return Err(UnpackError::new(
                "text/data sections in the loader",
                2,
                picked.len(),
            ))
        }
    };

    log::debug!("loader .text {:#x} .data {:#x} at base {:#x}", text, data, base);

    Ok(SymbolFile {
        path: debug_loader.to_path_buf(),
        text: Some(absolute(base, text)),
        extra: vec![Section::new(".data", absolute(base, data))],
    })
}

/// Symbols for the kernel, every allocated section relocated by
/// `kernel_base`.
pub fn kernel_symbol_file(kernel: &Path, sections: &[Section], kernel_base: u64) -> SymbolFile {
    let mut file = SymbolFile {
        path: kernel.to_path_buf(),
        text: None,
        extra: Vec::new(),
    };

    for s in sections {
        if s.addr == 0 {
            continue;
        }
        let addr = absolute(kernel_base, s.addr);
        log::debug!("kernel {} {:#x} -> {:#x}", s.name, s.addr, addr);

        if s.name == ".text" {
            file.text = Some(addr);
        } else {
            file.extra.push(Section::new(s.name.clone(), addr));
        }
    }

    file
}
