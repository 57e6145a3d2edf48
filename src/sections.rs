use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use elf::endian::AnyEndian;

use crate::error::UnpackError;
use crate::hex::parse_hex;
use crate::tool::Shell;

/// One row of a section-header table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub addr: u64,
}

impl Section {
    pub fn new(name: impl Into<String>, addr: u64) -> Self {
        Self {
            name: name.into(),
            addr,
        }
    }
}

/// Reports the sections of a binary, in table order.
pub trait SectionReader {
    fn sections(&mut self, path: &Path) -> Result<Vec<Section>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReaderKind {
    /// `objdump -h` piped through awk
    #[default]
    Objdump,
    /// Parse ELF section headers directly (ELF images only)
    Elf,
}

pub struct ObjdumpReader<'a> {
    shell: &'a mut dyn Shell,
}

impl<'a> ObjdumpReader<'a> {
    pub fn new(shell: &'a mut dyn Shell) -> Self {
        Self { shell }
    }

    pub fn command(path: &Path) -> String {
        format!(
            r#"objdump -h {} | awk '/^\s*[0-9]/ {{ print $2 " " $4 }}'"#,
            path.display()
        )
    }
}

impl SectionReader for ObjdumpReader<'_> {
    fn sections(&mut self, path: &Path) -> Result<Vec<Section>> {
        let out = self.shell.run(&Self::command(path))?;
        parse_objdump_rows(&out)
    }
}

/// Parses the `name vma` rows printed by [`ObjdumpReader::command`].
pub fn parse_objdump_rows(out: &str) -> Result<Vec<Section>> {
    out.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| -> Result<Section> {
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [name, addr] => Ok(Section::new(*name, parse_hex(addr)?)),
                _ => Err(
                    UnpackError::new(format!("fields in {:?}", line), 2, fields.len()).into(),
                ),
            }
        })
        .collect()
}

#[derive(Default, Debug)]
pub struct ElfReader;

impl SectionReader for ElfReader {
    fn sections(&mut self, path: &Path) -> Result<Vec<Section>> {
        let content =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        elf_sections(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

pub fn elf_sections(content: &[u8]) -> Result<Vec<Section>> {
    let elf = elf::ElfBytes::<AnyEndian>::minimal_parse(content)?;

    let (headers, strtab) = elf.section_headers_with_strtab()?;
    let headers = headers.ok_or_else(|| anyhow!("no section headers"))?;
    let strtab = strtab.ok_or_else(|| anyhow!("no section name table"))?;

    let mut sections = Vec::new();
    for s in headers.iter() {
        let name = strtab.get(s.sh_name as usize)?;
        if name.is_empty() {
            continue;
        }
        sections.push(Section::new(name, s.sh_addr));
    }
    Ok(sections)
}
