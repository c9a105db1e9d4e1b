use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};
use thiserror::Error;

use crate::core::batch::parse_script;
use crate::core::error::FfxError;
use crate::core::formatter::format_probe;
use crate::core::metadata::{probe_size, MediaInspector};
use crate::core::operations::Transcoder;
use crate::core::runner;
use crate::facefusion::{FaceFusionClient, FaceFusionConfig, FusionError};

#[derive(Debug, Parser)]
#[command(name = "ffcmd", version, about = "ffmpeg command builder, prober and transcode presets")]
pub struct Cli {
    /// ffmpeg executable to invoke
    #[arg(long, global = true, env = "FFCMD_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: String,
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Re-encode at a target bitrate
    Compress(CompressArgs),
    /// Copy the audio stream out of a video
    ExtractAudio(ExtractAudioArgs),
    /// Render a subtitle file into the video frames
    BurnSubtitle(BurnSubtitleArgs),
    /// Print duration, bitrate, format and size
    Probe(ProbeArgs),
    /// Run ffmpeg with raw arguments
    Exec(ExecArgs),
    /// Run every command in a script file
    Batch(BatchArgs),
    /// Send a face image through the face-fusion service
    Fuse(FuseArgs),
    /// Interactive prompt
    Repl,
}

#[derive(Debug, Parser)]
pub struct CompressArgs {
    #[arg(short = 'i', long = "input")]
    pub input: String,
    #[arg(short = 'o', long = "output")]
    pub output: String,
    /// Target bitrate in kb/s
    #[arg(short = 'b', long = "bitrate")]
    pub bitrate: u32,
}

#[derive(Debug, Parser)]
pub struct ExtractAudioArgs {
    #[arg(short = 'i', long = "input")]
    pub input: String,
    #[arg(short = 'o', long = "output")]
    pub output: String,
}

#[derive(Debug, Parser)]
pub struct BurnSubtitleArgs {
    #[arg(short = 'i', long = "input")]
    pub input: String,
    #[arg(short = 's', long = "subtitle")]
    pub subtitle: String,
    #[arg(short = 'o', long = "output")]
    pub output: String,
}

#[derive(Debug, Parser)]
pub struct ProbeArgs {
    #[arg(short = 'i', long = "input")]
    pub input: String,
}

#[derive(Debug, Parser)]
pub struct ExecArgs {
    #[arg(last = true, required = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Parser)]
pub struct BatchArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Parser)]
pub struct FuseArgs {
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// JSON credentials file; falls back to environment variables
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Media(#[from] FfxError),
    #[error(transparent)]
    Fusion(#[from] FusionError),
    #[error("{0} did not complete successfully")]
    Unsuccessful(String),
    #[error("line {line_no}: {source}")]
    Script {
        line_no: usize,
        #[source]
        source: Box<CliError>,
    },
    #[error("{0}")]
    Parse(String),
}

pub fn parse_line(line: &str) -> Result<Commands, CliError> {
    let mut argv = vec!["ffcmd".to_string()];
    argv.extend(shell_words::split(line).map_err(|err| CliError::Parse(err.to_string()))?);

    let parsed = Cli::try_parse_from(argv).map_err(|err| CliError::Parse(err.to_string()))?;
    Ok(parsed.command)
}

fn ensure(success: bool, what: &str) -> Result<(), CliError> {
    if success {
        Ok(())
    } else {
        Err(CliError::Unsuccessful(what.to_string()))
    }
}

pub fn execute(ffmpeg: &str, command: Commands) -> Result<(), CliError> {
    let transcoder = Transcoder::new(ffmpeg);
    match command {
        Commands::Compress(args) => ensure(
            transcoder.compress(&args.input, &args.output, args.bitrate)?,
            "compress",
        ),
        Commands::ExtractAudio(args) => ensure(
            transcoder.extract_audio(&args.input, &args.output)?,
            "extract-audio",
        ),
        Commands::BurnSubtitle(args) => ensure(
            transcoder.burn_in_subtitle(&args.input, &args.subtitle, &args.output)?,
            "burn-subtitle",
        ),
        Commands::Probe(args) => {
            let probe = MediaInspector::new(ffmpeg).probe(&args.input)?;
            println!("{}", format_probe(&args.input, &probe, probe_size(&args.input)));
            Ok(())
        }
        Commands::Exec(args) => {
            let mut argv = vec![ffmpeg.to_string()];
            argv.extend(args.args);
            ensure(runner::run(&argv)?, "exec")
        }
        Commands::Batch(args) => run_batch(ffmpeg, &args),
        Commands::Fuse(args) => {
            let config = match &args.config {
                Some(path) => FaceFusionConfig::from_json_file(path)?,
                None => FaceFusionConfig::from_env()?,
            };
            FaceFusionClient::new(config)?.fuse(&args.input, &args.output)?;
            Ok(())
        }
        Commands::Repl => crate::repl::run(ffmpeg),
    }
}

fn run_batch(ffmpeg: &str, args: &BatchArgs) -> Result<(), CliError> {
    let lines = parse_script(&args.file)?;
    info!("{}: {} command(s)", args.file.display(), lines.len());

    for line in lines {
        let outcome = parse_line(&line.text).and_then(|command| match command {
            Commands::Batch(_) | Commands::Repl => Err(CliError::Parse(
                "nested batch or repl is not allowed in a script".to_string(),
            )),
            other => execute(ffmpeg, other),
        });
        if let Err(err) = outcome {
            error!("{}:{}: {err}", args.file.display(), line.line_no);
            return Err(CliError::Script {
                line_no: line.line_no,
                source: Box::new(err),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_script_style_lines() {
        match parse_line("compress -i 'my clip.mp4' -o out.mp4 --bitrate 800").unwrap() {
            Commands::Compress(args) => {
                assert_eq!(args.input, "my clip.mp4");
                assert_eq!(args.output, "out.mp4");
                assert_eq!(args.bitrate, 800);
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse_line("exec -- -i a.mp4 -f null -").unwrap() {
            Commands::Exec(args) => assert_eq!(args.args, ["-i", "a.mp4", "-f", "null", "-"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(matches!(parse_line("compress -i"), Err(CliError::Parse(_))));
        assert!(matches!(parse_line("probe -i 'unterminated"), Err(CliError::Parse(_))));
        assert!(matches!(parse_line("nonsense"), Err(CliError::Parse(_))));
    }

    #[cfg(unix)]
    #[test]
    fn batch_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("jobs.ffc");
        std::fs::write(
            &script,
            "compress -i a -o b --bitrate 10\n# next one fails\nexec -- fail\ncompress -i c -o d --bitrate 10\n",
        )
        .unwrap();

        let args = BatchArgs { file: script };
        assert!(run_batch("true", &args).is_ok());
        match run_batch("false", &args) {
            Err(CliError::Script { line_no, .. }) => assert_eq!(line_no, 1),
            other => panic!("unexpected {other:?}"),
        }
    }
}
