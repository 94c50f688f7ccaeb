use crate::output::{print_json, print_slots, ToolRunner};
use crate::prelude::{eprintln, *};
use serde::Serialize;
use toolbelt_core::{Action, ToolKey};

#[derive(Debug, clap::Parser)]
#[command(name = "generators")]
#[command(about = "UUID, password and Lorem Ipsum generators")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Generate random (version 4) UUIDs
    #[clap(name = "uuid")]
    Uuid(UuidOptions),

    /// Generate a random password
    #[clap(name = "password")]
    Password(PasswordOptions),

    /// Generate Lorem Ipsum placeholder text
    #[clap(name = "lorem")]
    Lorem(LoremOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct UuidOptions {
    /// Number of UUIDs to generate
    #[arg(short, long, default_value = "1")]
    pub count: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct PasswordOptions {
    /// Password length, clamped to 8..=64
    #[arg(short, long, env = "TOOLBELT_PASSWORD_LENGTH", default_value = "16")]
    pub length: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct LoremOptions {
    /// Number of paragraphs, clamped to 1..=5
    #[arg(short, long, env = "TOOLBELT_LOREM_PARAGRAPHS", default_value = "3")]
    pub paragraphs: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct UuidOutput {
    uuids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PasswordOutput {
    length: usize,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoremOutput {
    paragraphs: usize,
    text: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Uuid(options) => run_uuid(options, &global),
        Commands::Password(options) => run_password(options, &global),
        Commands::Lorem(options) => run_lorem(options, &global),
    }
}

fn run_uuid(options: UuidOptions, global: &crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Generating {} UUID(s)", options.count);
    }

    let mut runner = ToolRunner::new(ToolKey::Uuid);
    let mut uuids = Vec::with_capacity(options.count);
    for _ in 0..options.count {
        let outputs = runner.send(Action::Generate)?;
        uuids.extend(outputs.into_iter().map(|(_, uuid)| uuid));
    }

    if options.json {
        return print_json(&UuidOutput { uuids });
    }

    let outputs: Vec<(&'static str, String)> =
        uuids.into_iter().map(|uuid| ("uuid_result", uuid)).collect();
    print_slots(ToolKey::Uuid, &outputs);
    Ok(())
}

fn run_password(options: PasswordOptions, global: &crate::Global) -> Result<()> {
    let mut runner = ToolRunner::new(ToolKey::Password);
    runner.send(Action::SetLength(options.length))?;
    let outputs = runner.send(Action::Generate)?;

    if global.verbose {
        eprintln!(
            "Requested length {}, generated {}",
            options.length,
            outputs.first().map(|(_, p)| p.len()).unwrap_or_default()
        );
    }

    if options.json {
        let password = outputs.into_iter().map(|(_, text)| text).collect::<String>();
        return print_json(&PasswordOutput {
            length: password.len(),
            password,
        });
    }

    print_slots(ToolKey::Password, &outputs);
    Ok(())
}

fn run_lorem(options: LoremOptions, global: &crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Requested {} paragraph(s)", options.paragraphs);
    }

    let outputs = ToolRunner::new(ToolKey::Lorem).run(vec![
        Action::SetParagraphs(options.paragraphs),
        Action::Generate,
    ])?;

    if options.json {
        let text = outputs.into_iter().map(|(_, text)| text).collect::<String>();
        return print_json(&LoremOutput {
            paragraphs: text.split("\n\n").count(),
            text,
        });
    }

    print_slots(ToolKey::Lorem, &outputs);
    Ok(())
}
