//! Command-line interface definition.
//!
//! Lives in the library so `xtask` can render the man page from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::cues::CueFormat;
use crate::seek::LineRange;

/// audiomark - bookmarks and timestamp seeking for inline audio players
#[derive(Debug, Parser)]
#[command(name = "audiomark")]
#[command(version)]
#[command(about = "Parse lyric/subtitle files into bookmarks and manage timestamp seek requests")]
#[command(
    long_about = "audiomark turns LRC lyrics and SRT/VTT subtitles into the bookmark lists \
shown by inline audio players, converts between seconds and MM:SS.mmm timestamps, \
and inspects the single-slot seek request used to jump to a player on another page.

Logging goes to stderr and is filtered by AUDIOMARK_LOG (default: warn)."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a lyric or subtitle file into bookmark items
    #[command(long_about = "Parse a lyric (.lrc) or subtitle (.srt/.vtt) file and print \
one bookmark item per entry, in document order.

With --format auto (the default) the file extension decides; for other extensions \
the content is sniffed, LRC first.

EXAMPLES:
    audiomark parse song.lrc
    audiomark parse talk.vtt --json
    audiomark parse notes.txt --format srt")]
    Parse {
        /// Path to the cue file
        file: PathBuf,

        /// Document dialect
        #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
        format: FormatArg,

        /// Print parsed entries as JSON instead of bookmark items
        #[arg(long)]
        json: bool,
    },

    /// Convert between seconds and MM:SS.mmm timestamps
    #[command(subcommand)]
    Time(TimeCommands),

    /// Inspect or change the cross-page seek slot
    Seek(SeekArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Dialect selection for `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// By extension, else by content
    Auto,
    Lrc,
    /// SRT and VTT
    Srt,
}

impl FormatArg {
    /// Forced dialect, if any.
    pub fn forced(self) -> Option<CueFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Lrc => Some(CueFormat::Lrc),
            FormatArg::Srt => Some(CueFormat::Srt),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum TimeCommands {
    /// Format seconds as MM:SS.mmm
    Format {
        /// Seconds, fractions allowed
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },
    /// Parse a timestamp (MM:SS.mmm, MM:SS, HH:MM:SS,mmm) into seconds
    Parse {
        /// Timestamp text
        text: String,
    },
}

#[derive(Debug, Args)]
pub struct SeekArgs {
    /// Slot file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub slot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: SeekCommands,
}

#[derive(Debug, Subcommand)]
pub enum SeekCommands {
    /// Store a seek request, replacing any previous one
    Write {
        /// Target time, as a timestamp or decimal seconds
        time: String,

        /// Line range of the target bookmark block (START:END); omit for a
        /// request any player may pick up
        #[arg(long, value_name = "START:END", value_parser = parse_line_range)]
        lines: Option<LineRange>,
    },
    /// Print the stored request, if any
    Read,
    /// Remove the stored request
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

fn parse_line_range(text: &str) -> Result<LineRange, String> {
    let (start, end) = text
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got {:?}", text))?;
    let start = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start line {:?}", start))?;
    let end = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid end line {:?}", end))?;
    Ok(LineRange::new(start, end))
}
