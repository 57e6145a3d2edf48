use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Used when `-b` is given without a path.
pub const DEFAULT_BREAKPOINTS: &str = "breakpoints.gdb";
/// Copied to [`DEFAULT_BREAKPOINTS`] the first time it is needed.
pub const BREAKPOINTS_TEMPLATE: &str = "breakpoints.gdb.template";

/// Makes sure the default breakpoints file exists under `dir`.
///
/// An explicit path is returned untouched; gdb reports a missing file
/// itself.
pub fn resolve(requested: &Path, dir: &Path) -> Result<PathBuf> {
    if requested != Path::new(DEFAULT_BREAKPOINTS) {
        return Ok(requested.to_path_buf());
    }

    let path = dir.join(DEFAULT_BREAKPOINTS);
    if path.exists() {
        return Ok(path);
    }

    let template = dir.join(BREAKPOINTS_TEMPLATE);
    if template.exists() {
        log::info!("creating {} from {}", path.display(), template.display());
        std::fs::copy(&template, &path)
            .with_context(|| format!("copying {} to {}", template.display(), path.display()))?;
    } else {
        log::info!("creating empty {}", path.display());
        std::fs::write(&path, "")
            .with_context(|| format!("creating {}", path.display()))?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let got = resolve(Path::new("mine.gdb"), dir.path()).unwrap();
        assert_eq!(got, PathBuf::from("mine.gdb"));
        assert!(!dir.path().join(DEFAULT_BREAKPOINTS).exists());
    }

    #[test]
    fn default_copied_from_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BREAKPOINTS_TEMPLATE), "break efi_main\n").unwrap();

        let got = resolve(Path::new(DEFAULT_BREAKPOINTS), dir.path()).unwrap();
        assert_eq!(got, dir.path().join(DEFAULT_BREAKPOINTS));
        assert_eq!(std::fs::read_to_string(&got).unwrap(), "break efi_main\n");
    }

    #[test]
    fn default_created_empty() {
        let dir = tempfile::tempdir().unwrap();
        let got = resolve(Path::new(DEFAULT_BREAKPOINTS), dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(got).unwrap(), "");
    }

    #[test]
    fn existing_default_untouched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_BREAKPOINTS), "break kmain\n").unwrap();
        std::fs::write(dir.path().join(BREAKPOINTS_TEMPLATE), "break efi_main\n").unwrap();

        let got = resolve(Path::new(DEFAULT_BREAKPOINTS), dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(got).unwrap(), "break kmain\n");
    }
}
