use crate::output::{print_json, print_json_result, print_slots, read_input, ToolRunner};
use crate::prelude::{eprintln, *};
use toolbelt_core::text::{regex_test, stats_analyze, RegexReport, REGEX_PROMPT};
use toolbelt_core::{Action, ToolKey};

#[derive(Debug, clap::Parser)]
#[command(name = "text")]
#[command(about = "Text statistics and regex testing")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Count characters, words, lines and sentences
    #[clap(name = "stats")]
    Stats(StatsOptions),

    /// Test a regular expression against text
    #[clap(name = "regex")]
    Regex(RegexOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct StatsOptions {
    /// Text to analyze. Read from stdin when omitted.
    pub input: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct RegexOptions {
    /// Regular expression
    #[arg(short, long)]
    pub pattern: String,

    /// Text to search. Read from stdin when omitted.
    pub input: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Stats(options) => run_stats(options, &global),
        Commands::Regex(options) => run_regex(options, &global),
    }
}

fn run_stats(options: StatsOptions, global: &crate::Global) -> Result<()> {
    let input = read_input(options.input)?;

    if global.verbose {
        eprintln!("Analyzing {} input bytes", input.len());
    }

    if options.json {
        return print_json(&stats_analyze(&input));
    }

    let outputs = ToolRunner::new(ToolKey::Stats).run(vec![Action::Input(input)])?;
    print_slots(ToolKey::Stats, &outputs);
    Ok(())
}

/// `--json` rendition of the regex tool. Both fields are required, as in the
/// text output.
fn regex_json(pattern: &str, text: &str) -> std::result::Result<RegexReport, String> {
    if pattern.is_empty() || text.is_empty() {
        return Err(REGEX_PROMPT.to_string());
    }
    regex_test(pattern, text).map_err(|e| e.to_string())
}

fn run_regex(options: RegexOptions, global: &crate::Global) -> Result<()> {
    let input = read_input(options.input)?;

    if global.verbose {
        eprintln!("Pattern: {}", options.pattern);
    }

    if options.json {
        return print_json_result(regex_json(&options.pattern, &input));
    }

    let outputs = ToolRunner::new(ToolKey::Regex).run(vec![
        Action::SetPattern(options.pattern),
        Action::SetText(input),
    ])?;
    print_slots(ToolKey::Regex, &outputs);
    Ok(())
}
