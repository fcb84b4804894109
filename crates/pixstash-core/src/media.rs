//! Image files as channel buffers.

use std::path::Path;

use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use log::debug;

use crate::capacity::Capacity;
use crate::codec::LsbCodec;
use crate::error::{Result, StashError};

/// A decoded image flattened into one byte per color channel.
///
/// Images with an alpha channel keep it (`R, G, B, A`), everything else is
/// converted to 8 bit `R, G, B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelImage {
    width: u32,
    height: u32,
    channel_count: u8,
    channels: Vec<u8>,
}

impl ChannelImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        debug!(
            "decoded {} ({}x{}, {:?})",
            path.display(),
            img.width(),
            img.height(),
            img.color()
        );

        Ok(Self::from(img))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [u8] {
        &mut self.channels
    }

    pub fn capacity(&self, codec: &LsbCodec) -> Result<Capacity> {
        codec.analyze(self.channel_count, self.pixel_count())
    }

    /// Encodes the image in the format given by the file extension of `path`.
    ///
    /// Lossy formats are refused, they would destroy the hidden bits.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        ensure_lossless(path)?;

        let color = match self.channel_count {
            4 => ColorType::Rgba8,
            _ => ColorType::Rgb8,
        };
        image::save_buffer(path, &self.channels, self.width, self.height, color)?;
        debug!("encoded {}", path.display());

        Ok(())
    }
}

/// Fails with [`StashError::LossyOutputFormat`] if `path` names a lossy format.
pub(crate) fn ensure_lossless(path: &Path) -> Result<()> {
    if matches!(
        ImageFormat::from_path(path),
        Ok(ImageFormat::Jpeg | ImageFormat::WebP | ImageFormat::Avif)
    ) {
        return Err(StashError::LossyOutputFormat(path.to_path_buf()));
    }
    Ok(())
}

impl From<DynamicImage> for ChannelImage {
    fn from(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (channel_count, channels) = if img.color().has_alpha() {
            (4, img.into_rgba8().into_raw())
        } else {
            (3, img.into_rgb8().into_raw())
        };

        ChannelImage {
            width,
            height,
            channel_count,
            channels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn should_flatten_rgb_images() {
        let img = RgbImage::from_pixel(4, 2, Rgb([1, 2, 3]));
        let media = ChannelImage::from(DynamicImage::ImageRgb8(img));

        assert_eq!(media.channel_count(), 3);
        assert_eq!(media.pixel_count(), 8);
        assert_eq!(media.channels().len(), 24);
        assert_eq!(&media.channels()[..6], &[1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn should_keep_the_alpha_channel() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([9, 8, 7, 6]));
        let media = ChannelImage::from(DynamicImage::ImageRgba8(img));

        assert_eq!(media.channel_count(), 4);
        assert_eq!(media.channels().len(), 36);
        assert_eq!(&media.channels()[..4], &[9, 8, 7, 6]);
    }

    #[test]
    fn should_expand_grayscale_to_rgb() {
        let img = GrayImage::from_pixel(2, 2, image::Luma([200]));
        let media = ChannelImage::from(DynamicImage::ImageLuma8(img));

        assert_eq!(media.channel_count(), 3);
        assert_eq!(media.channels(), &[200; 12][..]);
    }

    #[test]
    fn should_refuse_jpeg_output() {
        let media = ChannelImage::from(DynamicImage::ImageRgb8(RgbImage::new(2, 2)));

        assert!(matches!(
            media.save("/tmp/pixstash-never-written.jpg"),
            Err(StashError::LossyOutputFormat(_))
        ));
    }

    #[test]
    fn should_write_and_read_back_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.png");
        let img = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8, y as u8, 0xaa, 0x55]));
        let media = ChannelImage::from(DynamicImage::ImageRgba8(img));

        media.save(&path).unwrap();
        let reopened = ChannelImage::open(&path).unwrap();

        assert_eq!(reopened, media);
    }
}
