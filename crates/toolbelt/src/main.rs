use crate::prelude::*;
use clap::Parser;

mod converters;
mod crypto;
mod encoders;
mod error;
mod generators;
mod mcp;
mod output;
mod prelude;
mod text;
mod tools;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Everyday developer utilities: codecs, generators, converters, text and crypto tools"
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
    #[clap(long, env = "TOOLBELT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Base64, URL and HTML entity codecs and JWT decoding
    Encoders(crate::encoders::App),

    /// UUID, password and Lorem Ipsum generators
    Generators(crate::generators::App),

    /// JSON to YAML, case and number base converters
    Converters(crate::converters::App),

    /// Text statistics and regex testing
    Text(crate::text::App),

    /// Hash digests and HMAC
    Crypto(crate::crypto::App),

    /// List every available tool
    Tools(crate::tools::ToolsOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Encoders(sub_app) => crate::encoders::run(sub_app, app.global).await,
        SubCommands::Generators(sub_app) => crate::generators::run(sub_app, app.global).await,
        SubCommands::Converters(sub_app) => crate::converters::run(sub_app, app.global).await,
        SubCommands::Text(sub_app) => crate::text::run(sub_app, app.global).await,
        SubCommands::Crypto(sub_app) => crate::crypto::run(sub_app, app.global).await,
        SubCommands::Tools(options) => crate::tools::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_parses_group_and_tool() {
        let app = App::parse_from(["toolbelt", "--verbose", "crypto", "hash", "abc"]);
        assert!(app.global.verbose);
        assert!(matches!(app.command, SubCommands::Crypto(_)));
    }

    #[test]
    fn test_app_parses_mcp_subcommand() {
        let app = App::parse_from(["toolbelt", "mcp", "stdio"]);
        assert!(matches!(app.command, SubCommands::MCP(_)));
    }

    #[test]
    fn test_app_verify_cli() {
        use clap::CommandFactory;
        App::command().debug_assert();
    }
}
