//! Path utilities for project organization.
//!
//! The project structure currently looks like this:
//!
//! ```text
//! ~
//!  └── .snowgrant
//!       └── connectors.yaml
//! pwd
//!  └── {project_name}
//!       └── role_grants.yaml
//! ```

use std::path::{Path, PathBuf};

use dirs::home_dir;
use lazy_static::lazy_static;

lazy_static! {
    static ref CONNECTOR_CFG: PathBuf = PathBuf::from("connectors.yaml");
    static ref PROFILE_CFG_DIR: PathBuf = PathBuf::from(".snowgrant");
    static ref ROLE_GRANTS_CFG: PathBuf = PathBuf::from("role_grants.yaml");
}

/// The path to the role grants configuration file
pub fn role_grants_cfg_path<P: AsRef<Path>>(project_path: P) -> PathBuf {
    project_path.as_ref().join(ROLE_GRANTS_CFG.as_path())
}

/// The directory holding user-level configuration, such as credentials.
pub fn profile_cfg_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(PROFILE_CFG_DIR.as_path()))
}

/// The default path for the connectors (credentials) configuration file.
pub fn connectors_cfg_path() -> Option<PathBuf> {
    profile_cfg_dir().map(|dir| dir.join(CONNECTOR_CFG.as_path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_grants_path_is_relative_to_project() {
        assert_eq!(
            role_grants_cfg_path("warehouse"),
            PathBuf::from("warehouse/role_grants.yaml")
        );
    }

    #[test]
    fn connectors_path_lives_in_profile_dir() {
        if let Some(path) = connectors_cfg_path() {
            assert!(path.ends_with(".snowgrant/connectors.yaml"));
        }
    }
}
