pub type CmdResult<T> = kitbag::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod add;
pub mod catalog;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (kitbag::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Add(args) => dispatch!(args, global, add),
        crate::Commands::Catalog(args) => dispatch!(args, global, catalog),
    }
}
