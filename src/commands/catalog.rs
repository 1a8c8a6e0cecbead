use clap::Args;
use serde::Serialize;

use kitbag::catalog::{self, UtilityDescriptor};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct CatalogArgs {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub branch_ref: String,
    pub dest_folder: String,
    pub available: bool,
    pub dependencies: usize,
    pub dev_dependencies: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListOutput {
    pub utilities: Vec<CatalogItem>,
}

impl From<&UtilityDescriptor> for CatalogItem {
    fn from(entry: &UtilityDescriptor) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            branch_ref: entry.branch_ref.clone(),
            dest_folder: entry.dest_folder.clone(),
            available: entry.is_available(),
            dependencies: entry.dependencies.len(),
            dev_dependencies: entry.dev_dependencies.len(),
        }
    }
}

pub fn run(_args: CatalogArgs, _global: &GlobalArgs) -> CmdResult<CatalogListOutput> {
    let catalog = catalog::builtin()?;
    let utilities = catalog.entries().iter().map(CatalogItem::from).collect();

    Ok((CatalogListOutput { utilities }, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_builtin_utilities_with_availability() {
        let (output, exit_code) = run(CatalogArgs {}, &GlobalArgs {}).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(output.utilities.len(), 2);

        let socket = output
            .utilities
            .iter()
            .find(|u| u.dest_folder == "sf-socketio")
            .unwrap();
        assert!(socket.available);
        assert_eq!(socket.dependencies, 7);
        assert_eq!(socket.dev_dependencies, 2);

        let strip = output
            .utilities
            .iter()
            .find(|u| u.dest_folder == "sf-stripe")
            .unwrap();
        assert!(!strip.available);
    }
}
