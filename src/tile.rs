use std::convert::TryInto;

use image::RgbaImage;
use itertools::iproduct;

use crate::error::{Error, Result};
use crate::palette::Palette;

pub const TILE_SIZE: usize = 16;
pub const TILE_PIXELS: u32 = 8;

/// 8x8 のピクセル値 (各 0..4)。`[y][x]` の順。
pub type TilePixels = [[u8; 8]; 8];

/// 2bpp のプレーン形式タイル。0..8 バイト目が下位プレーン、8..16 バイト目が上位プレーン。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tile([u8; TILE_SIZE]);

impl Tile {
    pub fn new(pattern: [u8; TILE_SIZE]) -> Self {
        Self(pattern)
    }

    pub fn from_bytes(buf: impl AsRef<[u8]>) -> Result<Self> {
        let buf = buf.as_ref();
        let pattern = buf.try_into().map_err(|_| Error::SizeMismatch {
            expected: TILE_SIZE,
            actual: buf.len(),
        })?;

        Ok(Self::new(pattern))
    }

    pub fn as_bytes(&self) -> &[u8; TILE_SIZE] {
        &self.0
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        let lo = (self.0[y] >> (7 - x)) & 1;
        let hi = (self.0[y + 8] >> (7 - x)) & 1;
        lo | (hi << 1)
    }

    pub fn pixels(&self) -> TilePixels {
        let mut res = [[0; 8]; 8];
        for (y, x) in iproduct!(0..8, 0..8) {
            res[y][x] = self.pixel(x, y);
        }

        res
    }

    /// ピクセル値をパックする。各値の下位 2 ビットのみを使う。
    pub fn from_pixels(pixels: &TilePixels) -> Self {
        let mut pattern = [0; TILE_SIZE];
        for (y, row) in itertools::enumerate(pixels) {
            let (lo, hi) = pack_row(row);
            pattern[y] = lo;
            pattern[y + 8] = hi;
        }

        Self(pattern)
    }

    pub fn to_image(&self, plt: &Palette) -> RgbaImage {
        let mut img = RgbaImage::new(TILE_PIXELS, TILE_PIXELS);
        self.draw(&mut img, 0, 0, plt);

        img
    }

    /// 左上が (`x0`, `y0`) となるように描画する。範囲は呼び出し側が保証する。
    pub(crate) fn draw(&self, img: &mut RgbaImage, x0: u32, y0: u32, plt: &Palette) {
        for (y, x) in iproduct!(0..8u32, 0..8u32) {
            let value = self.pixel(x as usize, y as usize);
            img.put_pixel(x0 + x, y0 + y, plt.color(value));
        }
    }

    pub fn from_image(img: &RgbaImage, plt: &Palette) -> Result<Self> {
        if img.dimensions() != (TILE_PIXELS, TILE_PIXELS) {
            return Err(Error::InvalidImageSize {
                width: img.width(),
                height: img.height(),
            });
        }

        Self::from_image_at(img, 0, 0, plt)
    }

    /// 左上が (`x0`, `y0`) の 8x8 ブロックをエンコードする。
    /// ブロックが `img` からはみ出す場合は `IndexOutOfRange` を返す。
    pub fn from_image_at(img: &RgbaImage, x0: u32, y0: u32, plt: &Palette) -> Result<Self> {
        check_origin(x0, img.width())?;
        check_origin(y0, img.height())?;

        let mut pixels = [[0; 8]; 8];
        for (y, x) in iproduct!(0..8u32, 0..8u32) {
            let (px, py) = (x0 + x, y0 + y);
            let color = *img.get_pixel(px, py);
            pixels[y as usize][x as usize] = plt.index_of(color).ok_or(
                Error::ColorNotInPalette {
                    color,
                    x: px,
                    y: py,
                },
            )?;
        }

        Ok(Self::from_pixels(&pixels))
    }
}

/// 長さ `len` の軸上で、`origin` から 8 ピクセルが収まるか。
fn check_origin(origin: u32, len: u32) -> Result<()> {
    let fits = origin
        .checked_add(TILE_PIXELS)
        .map_or(false, |end| end <= len);
    if !fits {
        return Err(Error::IndexOutOfRange {
            index: origin as usize,
            len: len.saturating_sub(TILE_PIXELS - 1) as usize,
        });
    }

    Ok(())
}

fn pack_row(row: &[u8; 8]) -> (u8, u8) {
    let mut lo = 0;
    let mut hi = 0;
    for (x, &value) in itertools::enumerate(row) {
        lo |= (value & 1) << (7 - x);
        hi |= ((value >> 1) & 1) << (7 - x);
    }

    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::Rgba;

    // "2" の字を描いたタイル
    const PATTERN: [u8; TILE_SIZE] = [
        0x3C, 0x66, 0x06, 0x0C, 0x18, 0x30, 0x7E, 0x00, //
        0x00, 0x3C, 0x3C, 0x00, 0xFF, 0x00, 0x7E, 0x81,
    ];

    #[test]
    fn pixel_values() {
        let tile = Tile::new(PATTERN);

        // row 0: lo = 0x3C, hi = 0x00
        assert_eq!(tile.pixels()[0], [0, 0, 1, 1, 1, 1, 0, 0]);
        // row 1: lo = 0x66, hi = 0x3C
        assert_eq!(tile.pixels()[1], [0, 1, 3, 2, 2, 3, 1, 0]);
        // row 7: lo = 0x00, hi = 0x81
        assert_eq!(tile.pixels()[7], [2, 0, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn pack_pixels() {
        let tile = Tile::new(PATTERN);
        assert_eq!(Tile::from_pixels(&tile.pixels()), tile);
    }

    #[test]
    fn image_roundtrip() {
        let plt = Palette::default();
        let tile = Tile::new(PATTERN);

        let img = tile.to_image(&plt);
        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(*img.get_pixel(2, 1), plt.color(3));

        let decoded = Tile::from_image(&img, &plt).unwrap();
        assert_eq!(decoded, tile);
        assert_eq!(decoded.to_image(&plt), img);
    }

    #[test]
    fn reencode_with_degenerate_palette() {
        let black = Rgba([0, 0, 0, 0xFF]);
        let white = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);
        let plt = Palette::new([black, white, white, white]);
        let tile = Tile::new(PATTERN);

        let img = tile.to_image(&plt);
        let reencoded = Tile::from_image(&img, &plt).unwrap();
        assert_ne!(reencoded, tile);
        assert_eq!(reencoded.to_image(&plt), img);
    }

    #[test]
    fn color_not_in_palette() {
        let plt = Palette::default();
        let mut img = Tile::new(PATTERN).to_image(&plt);
        let color = Rgba([1, 2, 3, 0xFF]);
        img.put_pixel(5, 6, color);

        assert!(matches!(
            Tile::from_image(&img, &plt),
            Err(Error::ColorNotInPalette { color: c, x: 5, y: 6 }) if c == color
        ));
    }

    #[test]
    fn block_outside_image() {
        let plt = Palette::default();
        let img = RgbaImage::from_pixel(16, 8, plt.color(0));

        assert!(Tile::from_image_at(&img, 8, 0, &plt).is_ok());
        assert!(matches!(
            Tile::from_image_at(&img, 9, 0, &plt),
            Err(Error::IndexOutOfRange { index: 9, len: 9 })
        ));
        assert!(matches!(
            Tile::from_image_at(&img, 4, 4, &plt),
            Err(Error::IndexOutOfRange { index: 4, len: 1 })
        ));
        assert!(matches!(
            Tile::from_image_at(&img, 0, u32::MAX, &plt),
            Err(Error::IndexOutOfRange { .. })
        ));

        let small = RgbaImage::from_pixel(4, 4, plt.color(0));
        assert!(matches!(
            Tile::from_image_at(&small, 0, 0, &plt),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn from_bytes_size() {
        assert!(Tile::from_bytes(&PATTERN).is_ok());
        assert!(matches!(
            Tile::from_bytes(&PATTERN[..15]),
            Err(Error::SizeMismatch {
                expected: 16,
                actual: 15
            })
        ));
    }
}
