use crate::prelude::*;
use clap::Parser;

mod error;
mod input;
mod prelude;
mod split;
mod toc;
mod validate;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Split extracted documents into sections using their own table of contents"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "TOCSPLIT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Split a page sequence into sections
    Split(crate::split::SplitOptions),

    /// Print the table of contents recovered from a page sequence
    Toc(crate::toc::TocOptions),

    /// Validate a previously serialized section list
    Validate(crate::validate::ValidateOptions),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Split(options) => crate::split::run(options, app.global),
        SubCommands::Toc(options) => crate::toc::run(options, app.global),
        SubCommands::Validate(options) => crate::validate::run(options, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
