//! Input file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if path.is_file() && is_csv(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// CSV files in the directory of `path`, for "did you mean" hints.
pub(crate) fn sibling_csv_files(path: &Path) -> Vec<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    list_csv_files(dir).unwrap_or_default()
}

/// Resolves the input argument to one CSV file.
///
/// A directory must contain exactly one CSV file. A missing file is reported
/// with the CSV files found next to it.
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        let mut files = list_csv_files(path)?;
        return match files.len() {
            0 => Err(IngestError::NoInputFile {
                path: path.to_path_buf(),
            }),
            1 => {
                let file = files.remove(0);
                debug!(input = %file.display(), "resolved input directory");
                Ok(file)
            }
            _ => Err(IngestError::AmbiguousInput {
                path: path.to_path_buf(),
                candidates: files,
            }),
        };
    }
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
            candidates: sibling_csv_files(path),
        });
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "Nome\nAna").unwrap();
        }
        dir
    }

    #[test]
    fn test_list_csv_files_sorted() {
        let dir = create_test_dir(&["b.csv", "A.CSV", "notes.txt"]);
        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.CSV", "b.csv"]);
    }

    #[test]
    fn test_list_csv_files_not_a_directory() {
        let dir = create_test_dir(&["a.csv"]);
        let result = list_csv_files(&dir.path().join("a.csv"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_resolve_input_single_file_directory() {
        let dir = create_test_dir(&["planilha.csv", "leia-me.txt"]);
        let file = resolve_input(dir.path()).unwrap();
        assert_eq!(file, dir.path().join("planilha.csv"));
    }

    #[test]
    fn test_resolve_input_ambiguous_directory() {
        let dir = create_test_dir(&["a.csv", "b.csv"]);
        let result = resolve_input(dir.path());
        assert!(matches!(
            result,
            Err(IngestError::AmbiguousInput { candidates, .. }) if candidates.len() == 2
        ));
    }

    #[test]
    fn test_resolve_input_empty_directory() {
        let dir = create_test_dir(&[]);
        assert!(matches!(
            resolve_input(dir.path()),
            Err(IngestError::NoInputFile { .. })
        ));
    }

    #[test]
    fn test_resolve_input_missing_file_lists_siblings() {
        let dir = create_test_dir(&["Assistidos.csv"]);
        let result = resolve_input(&dir.path().join("planilha.csv"));
        match result {
            Err(IngestError::FileNotFound { candidates, .. }) => {
                assert_eq!(candidates, vec![dir.path().join("Assistidos.csv")]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
