use std::path::Path;

use serde::Serialize;

use crate::catalog::UtilityDescriptor;
use crate::command::{render_command, RunCommand};
use crate::log_status;

/// The two supported dependency installation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    pub fn label(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "Install with Yarn",
            PackageManager::Npm => "Install with NPM",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "yarn" => Some(PackageManager::Yarn),
            "npm" => Some(PackageManager::Npm),
            _ => None,
        }
    }
}

/// A single package-manager invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    pub fn render(&self) -> String {
        render_command(&self.program, &self.args)
    }
}

/// Outcome of the installation step, reported in the run payload. Failure
/// here never rolls back the copied utility - installation is best-effort
/// and independently retryable outside this tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallReport {
    pub manager: PackageManager,
    pub commands: Vec<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build the install invocations for a utility: runtime dependencies first,
/// dev dependencies as a separate invocation. Empty lists produce nothing.
pub fn plan(manager: PackageManager, utility: &UtilityDescriptor) -> Vec<InstallCommand> {
    let mut commands = Vec::new();

    let (add, dev_add): (&[&str], &[&str]) = match manager {
        PackageManager::Yarn => (&["add"], &["add", "--dev"]),
        PackageManager::Npm => (&["install"], &["install", "--save-dev"]),
    };

    if !utility.dependencies.is_empty() {
        let mut args: Vec<String> = add.iter().map(|s| s.to_string()).collect();
        args.extend(utility.dependencies.iter().cloned());
        commands.push(InstallCommand {
            program: manager.id().to_string(),
            args,
        });
    }

    if !utility.dev_dependencies.is_empty() {
        let mut args: Vec<String> = dev_add.iter().map(|s| s.to_string()).collect();
        args.extend(utility.dev_dependencies.iter().cloned());
        commands.push(InstallCommand {
            program: manager.id().to_string(),
            args,
        });
    }

    commands
}

/// Run the planned install commands sequentially in the project root,
/// stopping at the first failure.
pub fn run(
    manager: PackageManager,
    utility: &UtilityDescriptor,
    project_root: &Path,
    runner: &dyn RunCommand,
) -> InstallReport {
    let planned = plan(manager, utility);
    let rendered: Vec<String> = planned.iter().map(|c| c.render()).collect();

    for command in &planned {
        log_status!("install", "Running {}", command.render());
        let output = runner.run(&command.program, &command.args, Some(project_root));

        if !output.success {
            let detail = if output.stderr.trim().is_empty() {
                output.stdout.trim().to_string()
            } else {
                output.stderr.trim().to_string()
            };

            return InstallReport {
                manager,
                commands: rendered,
                success: false,
                error: Some(format!(
                    "{} exited with code {}: {}",
                    command.render(),
                    output.exit_code,
                    detail
                )),
            };
        }
    }

    InstallReport {
        manager,
        commands: rendered,
        success: true,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandOutput;
    use std::cell::RefCell;
    use std::path::PathBuf;

    fn utility(deps: &[&str], dev_deps: &[&str]) -> UtilityDescriptor {
        UtilityDescriptor {
            id: "feature/sf-socketio".to_string(),
            name: "Socket Utility".to_string(),
            branch_ref: "feature/sf-socketio".to_string(),
            source_url: "git@example.com:utils.git".to_string(),
            dest_folder: "sf-socketio".to_string(),
            dependencies: deps.iter().map(|s| s.to_string()).collect(),
            dev_dependencies: dev_deps.iter().map(|s| s.to_string()).collect(),
        }
    }

    struct RecordingRunner {
        calls: RefCell<Vec<String>>,
        fail_on: Option<usize>,
    }

    impl RecordingRunner {
        fn new(fail_on: Option<usize>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl RunCommand for RecordingRunner {
        fn run(&self, program: &str, args: &[String], _dir: Option<&Path>) -> CommandOutput {
            let mut calls = self.calls.borrow_mut();
            calls.push(render_command(program, args));
            let fail = self.fail_on == Some(calls.len() - 1);

            CommandOutput {
                stdout: String::new(),
                stderr: if fail { "registry down".to_string() } else { String::new() },
                success: !fail,
                exit_code: if fail { 1 } else { 0 },
            }
        }
    }

    #[test]
    fn yarn_plan_splits_dev_dependencies() {
        let commands = plan(
            PackageManager::Yarn,
            &utility(&["uuid@8.3.2"], &["@types/moment@2.13.0"]),
        );

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].render(), "yarn add uuid@8.3.2");
        assert_eq!(commands[1].render(), "yarn add --dev @types/moment@2.13.0");
    }

    #[test]
    fn npm_plan_uses_save_dev() {
        let commands = plan(
            PackageManager::Npm,
            &utility(&["uuid@8.3.2", "redis@4.7.0"], &["@types/node-uuid@0.0.28"]),
        );

        assert_eq!(commands[0].render(), "npm install uuid@8.3.2 redis@4.7.0");
        assert_eq!(
            commands[1].render(),
            "npm install --save-dev @types/node-uuid@0.0.28"
        );
    }

    #[test]
    fn empty_dependency_lists_plan_nothing() {
        assert!(plan(PackageManager::Yarn, &utility(&[], &[])).is_empty());
    }

    #[test]
    fn dev_only_utility_gets_single_invocation() {
        let commands = plan(PackageManager::Npm, &utility(&[], &["@types/moment@2.13.0"]));
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0].render(),
            "npm install --save-dev @types/moment@2.13.0"
        );
    }

    #[test]
    fn run_executes_each_invocation_once() {
        let runner = RecordingRunner::new(None);
        let report = run(
            PackageManager::Npm,
            &utility(&["uuid@8.3.2"], &["@types/moment@2.13.0"]),
            &PathBuf::from("."),
            &runner,
        );

        assert!(report.success);
        assert_eq!(
            runner.calls.borrow().as_slice(),
            [
                "npm install uuid@8.3.2",
                "npm install --save-dev @types/moment@2.13.0"
            ]
        );
    }

    #[test]
    fn run_stops_at_first_failure() {
        let runner = RecordingRunner::new(Some(0));
        let report = run(
            PackageManager::Yarn,
            &utility(&["uuid@8.3.2"], &["@types/moment@2.13.0"]),
            &PathBuf::from("."),
            &runner,
        );

        assert!(!report.success);
        assert_eq!(runner.calls.borrow().len(), 1);
        let error = report.error.unwrap();
        assert!(error.contains("yarn add uuid@8.3.2"));
        assert!(error.contains("registry down"));
    }
}
