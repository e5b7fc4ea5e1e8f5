/*!
Subcommand modules.

Layout:
  src/cmd/
    mod.rs      (this file: module declarations + re-exports)
    run.rs      (RunArgs  + execute_run: one action, one JSON record)
    list.rs     (ListArgs + execute_list: registered actions)
    options.rs  (options bundle from --params / --params-file)

Conventions:
  - Each subcommand module exposes exactly one public `execute_*` function.
  - Argument structs derive `clap::Args` and are kept minimal.
*/

pub mod list;
pub mod options;
pub mod run;

pub use list::{ListArgs, execute_list};
pub use run::{RunArgs, execute_run};
