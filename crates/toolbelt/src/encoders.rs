use crate::output::{print_json_result, print_slots, read_input, ToolRunner};
use crate::prelude::{eprintln, *};
use serde::Serialize;
use toolbelt_core::encoders::{jwt_decode, Codec, Mode};
use toolbelt_core::{Action, ToolKey};

#[derive(Debug, clap::Parser)]
#[command(name = "encoders")]
#[command(about = "Base64, URL and HTML entity codecs and JWT decoding")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Encode or decode Base64 (standard alphabet, padded)
    #[clap(name = "base64")]
    Base64(CodecOptions),

    /// Percent-encode or decode text
    #[clap(name = "url")]
    Url(CodecOptions),

    /// Escape or unescape HTML entities
    #[clap(name = "html")]
    Html(CodecOptions),

    /// Decode a JWT header and payload (the signature is not verified)
    #[clap(name = "jwt")]
    Jwt(JwtOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct CodecOptions {
    /// Text to transform. Read from stdin when omitted.
    pub input: Option<String>,

    /// Decode instead of encode
    #[arg(short, long)]
    pub decode: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct JwtOptions {
    /// Token to decode. Read from stdin when omitted.
    pub token: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CodecOutput {
    mode: Mode,
    output: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Base64(options) => run_codec(ToolKey::Base64, Codec::Base64, options, &global),
        Commands::Url(options) => run_codec(ToolKey::Url, Codec::Url, options, &global),
        Commands::Html(options) => run_codec(ToolKey::Html, Codec::Html, options, &global),
        Commands::Jwt(options) => run_jwt(options, &global),
    }
}

fn run_codec(
    tool: ToolKey,
    codec: Codec,
    options: CodecOptions,
    global: &crate::Global,
) -> Result<()> {
    let mode = if options.decode {
        Mode::Decode
    } else {
        Mode::Encode
    };
    let input = read_input(options.input)?;

    if global.verbose {
        eprintln!("{} ({mode:?}), {} input bytes", tool.title(), input.len());
    }

    if options.json {
        return print_json_result(
            codec
                .apply(mode, &input)
                .map(|output| CodecOutput { mode, output }),
        );
    }

    let outputs = ToolRunner::new(tool).run(vec![Action::SetMode(mode), Action::Input(input)])?;
    print_slots(tool, &outputs);
    Ok(())
}

fn run_jwt(options: JwtOptions, global: &crate::Global) -> Result<()> {
    let token = read_input(options.token)?;

    if global.verbose {
        eprintln!("Decoding JWT with {} segments", token.trim().split('.').count());
    }

    if options.json {
        return print_json_result(jwt_decode(&token));
    }

    let outputs = ToolRunner::new(ToolKey::Jwt).run(vec![Action::Input(token)])?;
    print_slots(ToolKey::Jwt, &outputs);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_codec_options_parse_decode_flag() {
        let app = App::parse_from(["encoders", "base64", "--decode", "aGk="]);
        match app.command {
            Commands::Base64(options) => {
                assert!(options.decode);
                assert!(!options.json);
                assert_eq!(options.input.as_deref(), Some("aGk="));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_jwt_options_token_is_optional() {
        let app = App::parse_from(["encoders", "jwt", "--json"]);
        match app.command {
            Commands::Jwt(options) => {
                assert!(options.token.is_none());
                assert!(options.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
