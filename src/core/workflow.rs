use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::{Catalog, UtilityDescriptor};
use crate::command::RunCommand;
use crate::error::{Error, Result};
use crate::git;
use crate::install::{self, InstallReport, PackageManager};
use crate::log_status;
use crate::place;
use crate::prompt::{Prompter, SelectOption, SelectPrompt, YesNoPrompt};
use crate::sanitize::{self, CleanupWarning};

/// Seam for retrieving a utility's tree into a local directory.
pub trait Fetch {
    fn fetch(&self, utility: &UtilityDescriptor, target_dir: &Path) -> Result<()>;
}

/// Production fetcher: single-branch git clone.
pub struct GitFetcher;

impl Fetch for GitFetcher {
    fn fetch(&self, utility: &UtilityDescriptor, target_dir: &Path) -> Result<()> {
        git::clone_branch(&utility.source_url, &utility.branch_ref, target_dir)
    }
}

/// Payload for a completed run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReport {
    pub utility_id: String,
    pub utility_name: String,
    pub destination: String,
    pub replaced_existing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CleanupWarning>,
}

/// Terminal state of one run. Failures travel as `Error` instead.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AddOutcome {
    Done(AddReport),
    #[serde(rename_all = "camelCase")]
    Aborted {
        utility_id: String,
        destination: String,
    },
}

/// The linear add workflow: select, fetch, place, sanitize, install.
///
/// Strictly forward, one utility per invocation. Every collaborator comes in
/// through a seam so the whole flow runs against fakes in tests.
pub struct AddWorkflow<'a> {
    catalog: &'a Catalog,
    project_root: PathBuf,
    prompter: &'a dyn Prompter,
    fetcher: &'a dyn Fetch,
    runner: &'a dyn RunCommand,
}

impl<'a> AddWorkflow<'a> {
    pub fn new(
        catalog: &'a Catalog,
        project_root: PathBuf,
        prompter: &'a dyn Prompter,
        fetcher: &'a dyn Fetch,
        runner: &'a dyn RunCommand,
    ) -> Self {
        Self {
            catalog,
            project_root,
            prompter,
            fetcher,
            runner,
        }
    }

    pub fn run(&self) -> Result<AddOutcome> {
        let utility = self.select_utility()?;

        if !utility.is_available() {
            return Err(Error::catalog_missing_source(&utility.id, &utility.name));
        }

        // The overwrite decision comes before any fetch so a declined run
        // provably leaves no temp directory behind.
        let destination = place::destination(&self.project_root, &utility.dest_folder);
        let mut replaced_existing = false;
        if destination.exists() {
            let confirmed = self.prompter.yes_no(&YesNoPrompt {
                question: format!(
                    "The utility \"{}\" already exists. Delete the old version and add the new one?",
                    utility.name
                ),
                default: false,
            });

            if !confirmed {
                log_status!("add", "Operation canceled. No changes made.");
                return Ok(AddOutcome::Aborted {
                    utility_id: utility.id.clone(),
                    destination: destination.display().to_string(),
                });
            }

            place::remove_existing(&destination)?;
            replaced_existing = true;
            log_status!("add", "Old version of {} removed.", utility.name);
        }

        let temp_dir = self.temp_clone_dir();
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir).map_err(|e| {
                Error::internal_io(e.to_string(), Some("clear stale temp dir".to_string()))
            })?;
        }

        log_status!("fetch", "Cloning {} from {}", utility.name, utility.source_url);
        self.fetcher.fetch(utility, &temp_dir)?;
        log_status!("fetch", "{} cloned successfully.", utility.name);

        place::copy_tree(&temp_dir, &destination)?;
        log_status!(
            "add",
            "{} has been added to your utilities folder.",
            utility.name
        );

        let mut warnings = sanitize::strip_artifacts(&destination);
        if let Some(warning) = sanitize::remove_temp_dir(&temp_dir) {
            warnings.push(warning);
        }
        for warning in &warnings {
            log_status!("cleanup", "Warning: {}: {}", warning.path, warning.problem);
        }

        let install = self.install_dependencies(utility)?;

        Ok(AddOutcome::Done(AddReport {
            utility_id: utility.id.clone(),
            utility_name: utility.name.clone(),
            destination: destination.display().to_string(),
            replaced_existing,
            install,
            warnings,
        }))
    }

    fn select_utility(&self) -> Result<&'a UtilityDescriptor> {
        let options = self
            .catalog
            .entries()
            .iter()
            .map(|e| SelectOption {
                value: e.id.clone(),
                label: e.name.clone(),
            })
            .collect();

        let chosen = self
            .prompter
            .select(&SelectPrompt {
                question: "Which utility would you like to add?".to_string(),
                options,
                default_index: None,
            })
            .ok_or_else(|| Error::prompt_interrupted("utility selection"))?;

        self.catalog.find(&chosen)
    }

    fn install_dependencies(&self, utility: &UtilityDescriptor) -> Result<Option<InstallReport>> {
        if !utility.has_dependencies() {
            return Ok(None);
        }

        let options = [PackageManager::Yarn, PackageManager::Npm]
            .iter()
            .map(|m| SelectOption {
                value: m.id().to_string(),
                label: m.label().to_string(),
            })
            .collect();

        let chosen = self
            .prompter
            .select(&SelectPrompt {
                question: "Would you like to install additional dependencies?".to_string(),
                options,
                default_index: None,
            })
            .ok_or_else(|| Error::prompt_interrupted("package manager selection"))?;

        let manager = PackageManager::from_id(&chosen)
            .ok_or_else(|| Error::prompt_interrupted("package manager selection"))?;

        let report = install::run(manager, utility, &self.project_root, self.runner);
        if report.success {
            log_status!("install", "Dependencies installed successfully.");
        } else {
            log_status!("install", "Error installing dependencies.");
        }

        Ok(Some(report))
    }

    fn temp_clone_dir(&self) -> PathBuf {
        self.project_root
            .join(format!(".kitbag-clone-{}", Uuid::new_v4()))
    }
}
