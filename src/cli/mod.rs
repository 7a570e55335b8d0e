pub mod commands;
pub mod handler;
pub mod output;

pub use commands::{CliArgs, OutputFormatArg};
pub use handler::handle_migrate;
pub use output::{MigrationReport, OutputFormat, OutputFormatter, ReportStatus};
