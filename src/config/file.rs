//
//  abuseipdb-client
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Thin file-system helpers used by [`Config`](super::Config). Kept separate so
//! the path handling can be exercised without the JSON layer.

use std::path::Path;

use super::ConfigError;

/// Reads a configuration file into a string.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file cannot be opened or is not UTF-8.
pub fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks that a configuration file exists and is a regular file.
///
/// # Notes
///
/// - Returns `false` for directories
/// - Returns `false` for paths that cannot be inspected (permissions)
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_exists_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!config_exists(dir.path()));

        let file = dir.path().join("config.json");
        std::fs::write(&file, "{}").unwrap();
        assert!(config_exists(&file));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_config_file(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
