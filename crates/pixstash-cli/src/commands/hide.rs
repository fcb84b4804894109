use std::path::PathBuf;

use clap::Args;
use pixstash_core::CodecOptions;

use crate::progress::LogProgress;
use crate::CliResult;

/// Hides a file in a PNG or BMP image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// The file to hide
    #[arg(short, long, value_name = "secret file", required = true)]
    pub file: PathBuf,

    /// Cover image to embed the file into, used readonly
    #[arg(short, long, value_name = "cover image", required = true)]
    pub image: PathBuf,

    /// Final image will be stored as file, must be PNG or BMP
    #[arg(short, long, value_name = "output image file", required = true)]
    pub output: PathBuf,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        pixstash_core::commands::hide(
            &self.file,
            &self.image,
            &self.output,
            options,
            &mut LogProgress::new("Embedding data in image"),
        )
    }
}
