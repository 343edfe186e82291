use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use spoofy::{
    Album, Artist, FromJson, FullAlbum, FullArtist, FullTrack, Image, ParseOptions, PlaylistTrack,
    Resource, Track, UnknownKeys,
};
use std::fmt::Display;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spoofy-cli")]
#[command(about = "Inspect Spotify Web API responses through spoofy's models", long_about = None)]
struct Cli {
    /// What to do with keys a model does not recognise
    #[arg(long, env = "SPOOFY_UNKNOWN_KEYS", value_enum, default_value_t = Policy::Log)]
    unknown_keys: Policy,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Policy {
    Ignore,
    Log,
    Reject,
}

impl From<Policy> for UnknownKeys {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Ignore => UnknownKeys::Ignore,
            Policy::Log => UnknownKeys::Log,
            Policy::Reject => UnknownKeys::Reject,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a JSON response and print the resulting model
    Inspect {
        /// Kind of object the response holds
        #[arg(value_enum)]
        kind: Kind,

        /// JSON file to read; stdin when omitted
        file: Option<PathBuf>,

        /// Print the parsed model as JSON instead of its display and debug forms
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Kind {
    Album,
    FullAlbum,
    Track,
    FullTrack,
    PlaylistTrack,
    Artist,
    FullArtist,
    Image,
}

fn read_input(file: Option<&Path>) -> spoofy::Result<Value> {
    let text = match file {
        Some(path) => {
            debug!("Reading {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

fn render<T: Serialize + Display>(model: &T, repr: String, as_json: bool) -> spoofy::Result<String> {
    if as_json {
        Ok(serde_json::to_string_pretty(model)?)
    } else {
        Ok(format!("{}\n{}", model, repr))
    }
}

fn inspect(kind: Kind, json: &Value, options: &ParseOptions, as_json: bool) -> spoofy::Result<String> {
    match kind {
        Kind::Album => {
            let m = Album::from_json_with(json, options)?;
            render(&m, m.repr(), as_json)
        }
        Kind::FullAlbum => {
            let m = FullAlbum::from_json_with(json, options)?;
            render(&m, m.repr(), as_json)
        }
        Kind::Track => {
            let m = Track::from_json_with(json, options)?;
            render(&m, m.repr(), as_json)
        }
        Kind::FullTrack => {
            let m = FullTrack::from_json_with(json, options)?;
            render(&m, m.repr(), as_json)
        }
        Kind::PlaylistTrack => {
            let m = PlaylistTrack::from_json_with(json, options)?;
            render(&m, m.repr(), as_json)
        }
        Kind::Artist => {
            let m = Artist::from_json_with(json, options)?;
            render(&m, m.repr(), as_json)
        }
        Kind::FullArtist => {
            let m = FullArtist::from_json_with(json, options)?;
            render(&m, m.repr(), as_json)
        }
        Kind::Image => {
            let m = Image::from_json_with(json, options)?;
            render(&m, m.repr(), as_json)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = ParseOptions::default().with_unknown_keys(cli.unknown_keys.into());

    match &cli.command {
        Commands::Inspect { kind, file, json } => {
            let input = read_input(file.as_deref())?;
            println!("{}", inspect(*kind, &input, &options, *json)?);
        }
    }

    Ok(())
}
