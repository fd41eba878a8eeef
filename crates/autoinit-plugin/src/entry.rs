//! Starting manifest lookup

use std::fs;
use std::path::{Path, PathBuf};

use autoinit_manifest::MANIFEST_FILE;

use crate::error::PluginError;

/// The `package.json` next to `importer`.
///
/// Only the importer's own directory is checked; there is no upward search.
/// The importer is canonicalized first so the starting manifest has the same
/// identity a resolver would give it when reached as a dependency.
pub fn find_starting_manifest(importer: Option<&Path>) -> Result<PathBuf, PluginError> {
    let unavailable = || PluginError::ImporterUnavailable {
        importer: importer.map(Path::to_path_buf),
    };

    let importer = importer.filter(|path| path.is_file()).ok_or_else(unavailable)?;
    let importer = fs::canonicalize(importer).map_err(|_| unavailable())?;
    let dir = importer.parent().ok_or_else(unavailable)?;

    let manifest = dir.join(MANIFEST_FILE);
    if !manifest.is_file() {
        return Err(PluginError::ManifestNotFound {
            dir: dir.to_path_buf(),
        });
    }
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_manifest_is_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let importer = dir.path().join("main.js");
        fs::write(&importer, "import 'virtual:init-all-packages';").unwrap();

        let manifest = find_starting_manifest(Some(&importer)).unwrap();
        assert_eq!(manifest, fs::canonicalize(dir.path()).unwrap().join("package.json"));
    }

    #[test]
    fn test_missing_or_directory_importer() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            find_starting_manifest(None),
            Err(PluginError::ImporterUnavailable { importer: None })
        ));
        assert!(matches!(
            find_starting_manifest(Some(&dir.path().join("ghost.js"))),
            Err(PluginError::ImporterUnavailable { importer: Some(_) })
        ));
        assert!(matches!(
            find_starting_manifest(Some(dir.path())),
            Err(PluginError::ImporterUnavailable { .. })
        ));
    }

    #[test]
    fn test_no_upward_search() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        let importer = src.join("main.js");
        fs::write(&importer, "").unwrap();

        match find_starting_manifest(Some(&importer)) {
            Err(PluginError::ManifestNotFound { dir: reported }) => {
                assert_eq!(reported, fs::canonicalize(&src).unwrap());
            }
            other => panic!("Expected ManifestNotFound, got {:?}", other),
        }
    }
}
