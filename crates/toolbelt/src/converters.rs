use crate::output::{print_json, print_json_result, print_slots, read_input, ToolRunner};
use crate::prelude::{eprintln, *};
use serde::Serialize;
use toolbelt_core::converters::{case_convert, json_to_yaml, number_base_convert};
use toolbelt_core::{Action, ToolKey};

#[derive(Debug, clap::Parser)]
#[command(name = "converters")]
#[command(about = "JSON to YAML, case and number base converters")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Convert a JSON document to YAML
    #[clap(name = "json-yaml")]
    JsonYaml(InputOptions),

    /// Show text in lower, upper, title, camel, Pascal, snake, kebab and constant case
    #[clap(name = "case")]
    Case(InputOptions),

    /// Show a decimal integer in binary, octal, decimal and hexadecimal
    #[clap(name = "number")]
    Number(InputOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct InputOptions {
    /// Input text. Read from stdin when omitted.
    pub input: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct YamlOutput {
    yaml: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let (tool, options) = match app.command {
        Commands::JsonYaml(options) => (ToolKey::JsonYaml, options),
        Commands::Case(options) => (ToolKey::Case, options),
        Commands::Number(options) => (ToolKey::Number, options),
    };

    let input = read_input(options.input)?;

    if global.verbose {
        eprintln!("{}: {} input bytes", tool.title(), input.len());
    }

    if options.json {
        return match tool {
            ToolKey::JsonYaml => print_json_result(json_to_yaml(&input).map(|yaml| YamlOutput { yaml })),
            ToolKey::Case => print_json(&case_convert(&input)),
            _ => print_json_result(number_base_convert(&input)),
        };
    }

    let outputs = ToolRunner::new(tool).run(vec![Action::Input(input)])?;
    print_slots(tool, &outputs);
    Ok(())
}
