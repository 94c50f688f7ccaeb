use crate::output::{print_json, print_json_result, print_slots, read_input, ToolRunner};
use crate::prelude::{eprintln, *};
use serde::Serialize;
use toolbelt_core::crypto::{hash_generate, hmac_sha256, HMAC_PROMPT};
use toolbelt_core::{Action, ToolKey};

#[derive(Debug, clap::Parser)]
#[command(name = "crypto")]
#[command(about = "Hash digests and HMAC-SHA256")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// MD5, SHA-1, SHA-256 and SHA-512 digests of the input
    #[clap(name = "hash")]
    Hash(HashOptions),

    /// HMAC-SHA256 of a message under a key
    #[clap(name = "hmac")]
    Hmac(HmacOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct HashOptions {
    /// Text to hash. Read from stdin when omitted.
    pub input: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct HmacOptions {
    /// Secret key
    #[arg(short, long)]
    pub key: String,

    /// Message to authenticate. Read from stdin when omitted.
    pub message: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct HmacOutput {
    algorithm: &'static str,
    hmac: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Hash(options) => run_hash(options, &global),
        Commands::Hmac(options) => run_hmac(options, &global),
    }
}

fn run_hash(options: HashOptions, global: &crate::Global) -> Result<()> {
    let input = read_input(options.input)?;

    if global.verbose {
        eprintln!("Hashing {} input bytes", input.len());
    }

    if options.json {
        return print_json(&hash_generate(&input));
    }

    let outputs = ToolRunner::new(ToolKey::Hash).run(vec![Action::Input(input)])?;
    print_slots(ToolKey::Hash, &outputs);
    Ok(())
}

/// `--json` rendition of the HMAC tool. Both fields are required, as in the
/// text output.
fn hmac_json(message: &str, key: &str) -> std::result::Result<HmacOutput, String> {
    if message.is_empty() || key.is_empty() {
        return Err(HMAC_PROMPT.to_string());
    }
    hmac_sha256(message, key)
        .map(|hmac| HmacOutput {
            algorithm: "HMAC-SHA256",
            hmac,
        })
        .map_err(|e| e.to_string())
}

fn run_hmac(options: HmacOptions, global: &crate::Global) -> Result<()> {
    let message = read_input(options.message)?;

    if global.verbose {
        eprintln!("Message: {} bytes, key: {} bytes", message.len(), options.key.len());
    }

    if options.json {
        return print_json_result(hmac_json(&message, &options.key));
    }

    let outputs = ToolRunner::new(ToolKey::Hmac).run(vec![
        Action::SetMessage(message),
        Action::SetKey(options.key),
    ])?;
    print_slots(ToolKey::Hmac, &outputs);
    Ok(())
}
