use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

/// `name@version` dependency token, e.g. `uuid@8.3.2` or `@types/node@20.1.0`.
const DEP_TOKEN_PATTERN: &str = r"^(@?[A-Za-z0-9][A-Za-z0-9._-]*(?:/[A-Za-z0-9][A-Za-z0-9._-]*)?)@[\^~]?[A-Za-z0-9][A-Za-z0-9.+-]*$";

/// A utility bundle the tool can add to a project.
///
/// An empty `source_url` marks the utility as "not yet available": selecting
/// it fails before any filesystem or network I/O happens.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityDescriptor {
    pub id: String,
    pub name: String,
    pub branch_ref: String,
    pub source_url: String,
    pub dest_folder: String,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl UtilityDescriptor {
    pub fn is_available(&self) -> bool {
        !self.source_url.is_empty()
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty() || !self.dev_dependencies.is_empty()
    }
}

/// Immutable, validated list of available utilities.
///
/// Built once at startup and passed into the workflow; never read from
/// global state so tests can run against synthetic catalogs.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<UtilityDescriptor>,
}

impl Catalog {
    pub fn new(entries: Vec<UtilityDescriptor>) -> Result<Self> {
        let token_re = Regex::new(DEP_TOKEN_PATTERN)
            .map_err(|e| Error::internal_unexpected(format!("bad token pattern: {}", e)))?;

        let mut seen: HashSet<&str> = HashSet::new();
        for entry in &entries {
            if entry.id.is_empty() {
                return Err(Error::catalog_invalid_entry(
                    entry.name.clone(),
                    "id must not be empty",
                ));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(Error::catalog_invalid_entry(
                    entry.id.clone(),
                    "duplicate utility id",
                ));
            }
            if entry.dest_folder.is_empty() {
                return Err(Error::catalog_invalid_entry(
                    entry.id.clone(),
                    "destFolder must not be empty",
                ));
            }
            for token in entry.dependencies.iter().chain(&entry.dev_dependencies) {
                if !token_re.is_match(token) {
                    return Err(Error::catalog_invalid_entry(
                        entry.id.clone(),
                        format!("malformed dependency token '{}'", token),
                    ));
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[UtilityDescriptor] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &str) -> Result<&UtilityDescriptor> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::utility_not_found(id))
    }
}

/// The utilities shipped with this build.
pub fn builtin() -> Result<Catalog> {
    Catalog::new(vec![
        UtilityDescriptor {
            id: "feature/sf-socketio".to_string(),
            name: "Socket Utility (sf-socket-2024)".to_string(),
            branch_ref: "feature/sf-socketio".to_string(),
            source_url: "git@git.seaflux.dev:boilerplates/utility-library-nodets.git".to_string(),
            dest_folder: "sf-socketio".to_string(),
            dependencies: vec![
                "jm-ez-l10n@1.0.0".to_string(),
                "moment@2.30.1".to_string(),
                "morgan@1.9.1".to_string(),
                "socket.io@4.7.5".to_string(),
                "uuid@8.3.2".to_string(),
                "winston@3.14.2".to_string(),
                "redis@4.7.0".to_string(),
            ],
            dev_dependencies: vec![
                "@types/moment@2.13.0".to_string(),
                "@types/node-uuid@0.0.28".to_string(),
            ],
        },
        UtilityDescriptor {
            id: "sf-strip-2024".to_string(),
            name: "Strip Utility (sf-strip-2024)".to_string(),
            branch_ref: "sf-strip-2024".to_string(),
            source_url: String::new(),
            dest_folder: "sf-stripe".to_string(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
        },
    ])
}
