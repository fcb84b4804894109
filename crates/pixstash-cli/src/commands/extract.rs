use std::path::PathBuf;

use clap::Args;
use log::info;
use pixstash_core::CodecOptions;

use crate::progress::LogProgress;
use crate::CliResult;

/// Extracts a hidden file from an image
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Image that contains the hidden file
    #[arg(short, long, value_name = "stego image", required = true)]
    pub image: PathBuf,

    /// Unveiled file will be stored in that folder
    #[arg(
        short,
        long = "output-folder",
        alias = "output_folder",
        value_name = "output folder",
        required = true
    )]
    pub output_folder: PathBuf,
}

impl ExtractArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let written = pixstash_core::commands::extract(
            &self.image,
            &self.output_folder,
            options,
            &mut LogProgress::new("Extracting hidden data"),
        )?;
        info!("Extracted file saved as {}", written.display());

        Ok(())
    }
}
