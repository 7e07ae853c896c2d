use std::path::Path;

use anyhow::Context as _;

use crate::error::{BounceError, BounceResult};

/// The logo image, decoded to premultiplied RGBA8.
///
/// The simulator only ever needs the fixed width/height; the pixel data is
/// consumed by the compositor. `mirrored` tracks orientation parity so callers
/// can reason about how many flips have been applied.
#[derive(Clone, Debug)]
pub struct Sprite {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
    mirrored: bool,
}

impl Sprite {
    /// Decode a sprite from an image file on disk.
    pub fn load(path: &Path) -> BounceResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| BounceError::io(format!("read logo '{}': {e}", path.display())))?;
        let dyn_img = image::load_from_memory(&bytes)
            .with_context(|| format!("decode logo '{}'", path.display()))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_straight_rgba8(width, height, rgba.into_raw())
    }

    /// Build a sprite from straight-alpha RGBA8 pixels (premultiplies them).
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> BounceResult<Self> {
        if rgba8.len() != (width as usize) * (height as usize) * 4 {
            return Err(BounceError::config(
                "sprite pixel buffer length must be width*height*4",
            ));
        }
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: rgba8,
            mirrored: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixel data, row-major.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// `true` after an odd number of flips.
    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    /// Mirror the sprite horizontally in place.
    ///
    /// Invoked once per flip event; two flips restore the base orientation.
    pub fn flip_horizontal(&mut self) {
        let row_px = self.width as usize;
        for row in self.rgba8_premul.chunks_exact_mut(row_px * 4) {
            let mut lo = 0usize;
            let mut hi = row_px.saturating_sub(1);
            while lo < hi {
                for c in 0..4 {
                    row.swap(lo * 4 + c, hi * 4 + c);
                }
                lo += 1;
                hi -= 1;
            }
        }
        self.mirrored = !self.mirrored;
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_straight_rgba8_premultiplies() {
        let sprite = Sprite::from_straight_rgba8(1, 1, vec![100, 50, 200, 128]).unwrap();
        assert_eq!(
            sprite.data(),
            &[
                ((100u16 * 128 + 127) / 255) as u8,
                ((50u16 * 128 + 127) / 255) as u8,
                ((200u16 * 128 + 127) / 255) as u8,
                128u8
            ]
        );
    }

    #[test]
    fn from_straight_rgba8_rejects_wrong_length() {
        assert!(Sprite::from_straight_rgba8(2, 2, vec![0u8; 4]).is_err());
    }

    #[test]
    fn transparent_pixels_zero_their_color() {
        let sprite = Sprite::from_straight_rgba8(1, 1, vec![9, 9, 9, 0]).unwrap();
        assert_eq!(sprite.data(), &[0, 0, 0, 0]);
    }

    #[test]
    fn flip_reverses_each_row_and_tracks_parity() {
        // 3x2 sprite with distinct opaque pixels.
        #[rustfmt::skip]
        let px = vec![
            1, 0, 0, 255,  2, 0, 0, 255,  3, 0, 0, 255,
            4, 0, 0, 255,  5, 0, 0, 255,  6, 0, 0, 255,
        ];
        let mut sprite = Sprite::from_straight_rgba8(3, 2, px.clone()).unwrap();

        sprite.flip_horizontal();
        assert!(sprite.mirrored());
        #[rustfmt::skip]
        let flipped = vec![
            3, 0, 0, 255,  2, 0, 0, 255,  1, 0, 0, 255,
            6, 0, 0, 255,  5, 0, 0, 255,  4, 0, 0, 255,
        ];
        assert_eq!(sprite.data(), flipped.as_slice());

        sprite.flip_horizontal();
        assert!(!sprite.mirrored());
        assert_eq!(sprite.data(), px.as_slice());
    }

    #[test]
    fn load_decodes_png_dimensions() {
        use std::io::Cursor;

        let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let dir = std::path::PathBuf::from("target").join("sprite_load_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("logo.png");
        std::fs::write(&path, &buf).unwrap();

        let sprite = Sprite::load(&path).unwrap();
        assert_eq!(sprite.width(), 2);
        assert_eq!(sprite.height(), 1);
        assert!(!sprite.mirrored());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Sprite::load(Path::new("target/definitely-missing.png")).unwrap_err();
        assert!(err.to_string().contains("i/o error:"));
    }
}
