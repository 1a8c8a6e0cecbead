use std::path::Path;
use std::process::Command;

use serde::Serialize;

/// Captured result of an external command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
}

/// Seam for external process execution - the installer runs package managers
/// through this so tests can substitute a recording fake.
pub trait RunCommand {
    fn run(&self, program: &str, args: &[String], current_dir: Option<&Path>) -> CommandOutput;
}

/// Runs commands directly (no shell), capturing output.
pub struct SystemRunner;

impl RunCommand for SystemRunner {
    fn run(&self, program: &str, args: &[String], current_dir: Option<&Path>) -> CommandOutput {
        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(dir) = current_dir {
            cmd.current_dir(dir);
        }

        match cmd.output() {
            Ok(out) => CommandOutput {
                stdout: String::from_utf8_lossy(&out.stdout).to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).to_string(),
                success: out.status.success(),
                exit_code: out.status.code().unwrap_or(-1),
            },
            Err(e) => CommandOutput {
                stdout: String::new(),
                stderr: format!("Command error: {}", e),
                success: false,
                exit_code: -1,
            },
        }
    }
}

/// Render a program + args as a single display line.
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut line = String::from(program);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_joins_program_and_args() {
        let args = vec!["install".to_string(), "uuid@8.3.2".to_string()];
        assert_eq!(render_command("npm", &args), "npm install uuid@8.3.2");
    }

    #[test]
    fn missing_program_reports_failure() {
        let out = SystemRunner.run("kitbag-no-such-binary", &[], None);
        assert!(!out.success);
        assert_eq!(out.exit_code, -1);
        assert!(out.stderr.contains("Command error"));
    }
}
