//! File level operations behind the command line interface.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info, warn};

use crate::capacity::Capacity;
use crate::codec::LsbCodec;
use crate::error::{Result, StashError};
use crate::media::{ensure_lossless, ChannelImage};
use crate::options::CodecOptions;
use crate::progress::ProgressObserver;

/// Base name of unveiled files, the hidden extension is appended.
pub const EXTRACTED_FILE_STEM: &str = "extracted_file";

/// Hides `secret` in the cover image `media` and writes the result to `output`.
pub fn hide(
    secret: &Path,
    media: &Path,
    output: &Path,
    options: CodecOptions,
    observer: &mut dyn ProgressObserver,
) -> Result<()> {
    let size = fs::metadata(secret)?.len();
    if size > options.max_file_size as u64 {
        return Err(StashError::FileTooLarge {
            size: usize::try_from(size).unwrap_or(usize::MAX),
            max: options.max_file_size,
        });
    }

    ensure_lossless(output)?;
    let extension = extension_of(secret)?;
    let data = fs::read(secret)?;
    let codec = LsbCodec::new(options);
    let payload = codec.build_payload(&data, &extension)?;

    let mut image = ChannelImage::open(media)?;
    let capacity = image.capacity(&codec)?;
    debug!(
        "payload of {} bytes, carrier holds {} bytes ({} usable for file data)",
        payload.len(),
        capacity.max_bytes,
        capacity.usable_bytes
    );

    codec.embed_with_progress(image.channels_mut(), &payload, observer)?;
    remove_on_error(output, image.save(output))?;

    info!(
        "hid {} ({} bytes) in {}",
        secret.display(),
        data.len(),
        output.display()
    );
    Ok(())
}

/// Unveils the file hidden in `media` into `output_folder`.
///
/// # Returns
/// The path of the written file, `extracted_file.<ext>` or the first free
/// `extracted_file_<n>.<ext>`.
pub fn extract(
    media: &Path,
    output_folder: &Path,
    options: CodecOptions,
    observer: &mut dyn ProgressObserver,
) -> Result<PathBuf> {
    if let Ok(ImageFormat::Jpeg) = ImageFormat::from_path(media) {
        warn!(
            "{} is a JPEG image, hidden bits rarely survive lossy compression",
            media.display()
        );
    }

    let image = ChannelImage::open(media)?;
    let codec = LsbCodec::new(options);
    let hidden = codec.extract_with_progress(image.channels(), observer)?;
    ensure_safe_extension(&hidden.extension)?;

    fs::create_dir_all(output_folder)?;
    let (path, mut file) = create_unique_file(output_folder, &hidden.extension)?;
    remove_on_error(&path, file.write_all(&hidden.data).map_err(StashError::from))?;

    info!(
        "unveiled {} bytes into {}",
        hidden.data.len(),
        path.display()
    );
    Ok(path)
}

/// Capacity of the image at `media` under `options`.
pub fn capacity(media: &Path, options: &CodecOptions) -> Result<Capacity> {
    let image = ChannelImage::open(media)?;
    let codec = LsbCodec::new(options.clone());

    image.capacity(&codec)
}

/// Extension of `path` without the leading dot, empty if there is none.
fn extension_of(path: &Path) -> Result<String> {
    match path.extension() {
        None => Ok(String::new()),
        Some(ext) => std::str::from_utf8(ext.as_encoded_bytes())
            .map(str::to_owned)
            .map_err(StashError::InvalidExtension),
    }
}

fn ensure_safe_extension(extension: &str) -> Result<()> {
    // Separators and characters Windows refuses in file names.
    let unsafe_char = |c: char| {
        matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
    };
    if extension.contains(unsafe_char) || extension == "." || extension == ".." {
        return Err(StashError::UnsafeExtension(extension.to_owned()));
    }
    Ok(())
}

fn file_name(extension: &str, n: usize) -> String {
    let stem = match n {
        0 => EXTRACTED_FILE_STEM.to_owned(),
        n => format!("{EXTRACTED_FILE_STEM}_{n}"),
    };
    if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    }
}

/// Deletes the partially written `path` if `result` is an error.
fn remove_on_error<T>(path: &Path, result: Result<T>) -> Result<T> {
    if result.is_err() {
        match fs::remove_file(path) {
            Ok(()) => debug!("removed partial output {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove partial output {}: {e}", path.display()),
        }
    }
    result
}

/// Creates the first file name in `folder` that does not exist yet.
fn create_unique_file(folder: &Path, extension: &str) -> Result<(PathBuf, File)> {
    let mut n = 0;
    loop {
        let path = folder.join(file_name(extension, n));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
