//! Input expansion and output naming

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use glob::glob;
use crate::error::{Error, Result};

/// Suffix added to the file stem of every filtered copy
pub const FILTERED_SUFFIX: &str = "_filtered";

/// Derive the output path for a filtered copy of `input`
///
/// The input is made absolute against the current directory and
/// `_filtered.pdf` replaces its extension, so `docs/a.pdf` becomes
/// `<cwd>/docs/a_filtered.pdf`. An input without an extension still gets
/// the `.pdf` extension.
pub fn filtered_output_path(input: &Path) -> Result<PathBuf> {
    let target = std::path::absolute(input)?;

    let stem = target
        .file_stem()
        .ok_or_else(|| Error::General(format!("Not a file path: {}", input.display())))?;

    let mut name = OsString::from(stem);
    name.push(FILTERED_SUFFIX);
    name.push(".pdf");

    Ok(target.with_file_name(name))
}

/// Expand glob patterns in input paths
///
/// Literal paths are kept as given, including existing files whose names
/// contain glob characters such as `report[1].pdf`. Patterns contribute
/// their matches in sorted order at the position the pattern appeared, so
/// the overall order follows the command line.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        // An existing file is taken literally even if its name looks like a pattern
        if Path::new(pattern).exists() {
            paths.push(PathBuf::from(pattern));
        } else if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let entries = glob(pattern).map_err(|e| Error::InvalidGlob(format!("{}: {}", pattern, e)))?;

            let mut matched: Vec<PathBuf> = Vec::new();
            for entry in entries {
                match entry {
                    Ok(path) => matched.push(path),
                    Err(e) => tracing::warn!(pattern = %pattern, error = %e, "glob entry unreadable"),
                }
            }
            if matched.is_empty() {
                return Err(Error::NoFilesMatched(pattern.clone()));
            }

            matched.sort();
            paths.extend(matched);
        } else {
            // No glob characters, treat as literal path
            paths.push(PathBuf::from(pattern));
        }
    }

    Ok(paths)
}
