//! Appends rendered cases to the target test source.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::library::RenderError;

/// Written between consecutive cases. Case templates end in a newline, so
/// this leaves exactly one blank line.
pub const CASE_SEPARATOR: &str = "\n";

/// Errors raised while appending a suite.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The target could not be opened for appending.
    #[error("failed to open {} for appending", path.display())]
    Open {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Writing to the target failed part way.
    #[error("failed to append to {}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A case could not be rendered; earlier cases stay appended.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Appends `cases` to `path`, one blank line apart, and returns how many were
/// written.
///
/// The target is normally a pre-existing test source, but a missing file is
/// created rather than rejected, matching plain append-mode opening. Existing
/// content is never read or truncated. Nothing is written before the first
/// case or after the last. The handle is closed on every return path; bytes
/// written before a failure are kept.
///
/// # Errors
///
/// Returns [`WriteError::Open`] or [`WriteError::Write`] on I/O failure, and
/// [`WriteError::Render`] for the first case that failed to render.
pub fn append_suite<I, C>(path: &Path, cases: I) -> Result<usize, WriteError>
where
    I: IntoIterator<Item = Result<C, RenderError>>,
    C: AsRef<str>,
{
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| WriteError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let mut out = BufWriter::new(file);
    let write_err = |source: io::Error| WriteError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut written = 0;
    let mut sep = "";
    for case in cases {
        let case = case?;
        out.write_all(sep.as_bytes()).map_err(write_err)?;
        out.write_all(case.as_ref().as_bytes()).map_err(write_err)?;
        sep = CASE_SEPARATOR;
        written += 1;
    }
    out.flush().map_err(write_err)?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("spatula-writer-{}", std::process::id()));
        let _ = fs::create_dir_all(&dir);
        let path = dir.join(name);
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn separates_cases_with_blank_lines() -> Result<(), Box<dyn std::error::Error>> {
        let path = scratch("separates.cpp");
        let cases = ["A\n", "B\n", "C\n"].map(Ok::<_, RenderError>);
        assert_eq!(append_suite(&path, cases)?, 3);
        assert_eq!(fs::read_to_string(&path)?, "A\n\nB\n\nC\n");
        Ok(())
    }

    #[test]
    fn appends_after_existing_content() -> Result<(), Box<dyn std::error::Error>> {
        let path = scratch("existing.cpp");
        fs::write(&path, "#include <catch2/catch.hpp>\n")?;
        append_suite(&path, [Ok::<_, RenderError>("one\n")])?;
        append_suite(&path, [Ok::<_, RenderError>("two\n")])?;
        assert_eq!(
            fs::read_to_string(&path)?,
            "#include <catch2/catch.hpp>\none\ntwo\n"
        );
        Ok(())
    }

    #[test]
    fn missing_target_is_created() -> Result<(), Box<dyn std::error::Error>> {
        let path = scratch("created.cpp");
        assert!(!path.exists());
        assert_eq!(append_suite(&path, [Ok::<_, RenderError>("only\n")])?, 1);
        assert_eq!(fs::read_to_string(&path)?, "only\n");
        Ok(())
    }

    #[test]
    fn empty_suite_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let path = scratch("empty.cpp");
        fs::write(&path, "keep")?;
        let none: Vec<Result<String, RenderError>> = Vec::new();
        assert_eq!(append_suite(&path, none)?, 0);
        assert_eq!(fs::read_to_string(&path)?, "keep");
        Ok(())
    }

    #[test]
    fn render_failure_keeps_earlier_cases() -> Result<(), Box<dyn std::error::Error>> {
        let path = scratch("partial.cpp");
        let cases: Vec<Result<&str, RenderError>> = vec![
            Ok("first\n"),
            Err(RenderError::ComponentOutOfRange {
                index: 4,
                dimension: 4,
            }),
            Ok("never\n"),
        ];
        let err = append_suite(&path, cases).err();
        assert!(matches!(err, Some(WriteError::Render(_))));
        assert_eq!(fs::read_to_string(&path)?, "first\n");
        Ok(())
    }

    #[test]
    fn unwritable_target_fails_to_open() {
        let path = Path::new("/nonexistent/spatula/test_get_component.cpp");
        let err = append_suite(path, [Ok::<_, RenderError>("x")]).err();
        assert!(matches!(err, Some(WriteError::Open { .. })));
    }
}
