//! Command handlers, one module per subcommand.

pub mod calc;
pub mod compare;
pub mod completion;
pub mod config_cmd;
pub mod estimate;
pub mod init;
pub mod rates;
pub mod version;

mod inputs;
