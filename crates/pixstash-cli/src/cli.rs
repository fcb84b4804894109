use clap::{Parser, Subcommand, ValueEnum};
use pixstash_core::{CodecOptions, Framing, MissingDelimiter, DEFAULT_MAX_FILE_SIZE};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Payload layout, hide and extract must use the same
    #[arg(long, value_enum, default_value_t = FramingArg::LengthPrefixed, global = true)]
    pub framing: FramingArg,

    /// Largest secret file in bytes
    #[arg(long, value_name = "bytes", default_value_t = DEFAULT_MAX_FILE_SIZE, global = true)]
    pub max_file_size: usize,

    /// Delimited framing only: keep all remaining data if no end of file marker is found
    #[arg(long, global = true)]
    pub take_remaining: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramingArg {
    /// Data and extension lengths up front
    LengthPrefixed,
    /// Extension length up front, END_OF_FILE marker after the data
    Delimited,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Extract(extract::ExtractArgs),
    Capacity(capacity::CapacityArgs),
}

impl CliArgs {
    pub fn codec_options(&self) -> CodecOptions {
        let framing = match self.framing {
            FramingArg::LengthPrefixed => Framing::LengthPrefixed,
            FramingArg::Delimited => Framing::delimited(),
        };
        let missing_delimiter = if self.take_remaining {
            MissingDelimiter::TakeRemaining
        } else {
            MissingDelimiter::Fail
        };

        CodecOptions::default()
            .with_framing(framing)
            .with_max_file_size(self.max_file_size)
            .with_missing_delimiter(missing_delimiter)
    }
}
