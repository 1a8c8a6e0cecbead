use clap::Args;

use kitbag::catalog;
use kitbag::command::SystemRunner;
use kitbag::prompt::PromptEngine;
use kitbag::{AddOutcome, AddWorkflow, Error, GitFetcher};

use super::{CmdResult, GlobalArgs};

#[derive(Args, Default)]
pub struct AddArgs {}

/// Exit code for a run the user canceled at the overwrite prompt; distinct
/// from both success and the failure families so wrapping scripts can tell
/// the three apart.
const EXIT_ABORTED: i32 = 3;

pub fn run(_args: AddArgs, _global: &GlobalArgs) -> CmdResult<AddOutcome> {
    if !kitbag::tty::require_tty_for_interactive() {
        return Err(Error::validation_invalid_argument(
            "tty",
            "kitbag add is interactive and needs a terminal on stdin and stdout",
            None,
        ));
    }

    let catalog = catalog::builtin()?;
    let project_root = std::env::current_dir()
        .map_err(|e| Error::internal_io(e.to_string(), Some("get current dir".to_string())))?;

    let prompter = PromptEngine::new();
    let workflow = AddWorkflow::new(
        &catalog,
        project_root,
        &prompter,
        &GitFetcher,
        &SystemRunner,
    );

    let outcome = workflow.run()?;
    let exit_code = match &outcome {
        AddOutcome::Done(_) => 0,
        AddOutcome::Aborted { .. } => EXIT_ABORTED,
    };

    Ok((outcome, exit_code))
}
