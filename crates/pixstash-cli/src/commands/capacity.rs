use std::path::PathBuf;

use clap::Args;
use pixstash_core::CodecOptions;

use crate::CliResult;

/// Shows how many bytes an image can hide
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Cover image to inspect
    #[arg(short, long, value_name = "cover image", required = true)]
    pub image: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let capacity = pixstash_core::commands::capacity(&self.image, &options)?;

        println!("pixels:         {}", capacity.pixel_count);
        println!("channels:       {}", capacity.channel_count);
        println!("embeddable:     {} bits", capacity.total_bits);
        println!("payload:        {} bytes", capacity.max_bytes);
        println!("file+extension: {} bytes", capacity.usable_bytes.max(0));

        Ok(())
    }
}
