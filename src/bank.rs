use std::convert::TryInto;
use std::path::Path;

use image::RgbaImage;

use crate::error::{read_file, Error, Result};
use crate::graphic::GraphicRom;
use crate::palette::Palette;
use crate::tile::*;

pub const BANK_SIZE: usize = 0x1000;
pub const BANK_TILES: usize = BANK_SIZE / TILE_SIZE;
pub const BANK_IMAGE_WIDTH: u32 = 128;
pub const BANK_IMAGE_HEIGHT: u32 = 128;

const TILES_PER_ROW: usize = (BANK_IMAGE_WIDTH / TILE_PIXELS) as usize;

/// 4KiB の CHR バンク。16x16 タイル (128x128 ピクセル) を行優先で並べたもの。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bank(Box<[u8; BANK_SIZE]>);

impl Bank {
    pub fn new(chunk: [u8; BANK_SIZE]) -> Self {
        Self(Box::new(chunk))
    }

    pub fn from_bytes(buf: impl AsRef<[u8]>) -> Result<Self> {
        let buf = buf.as_ref();
        let chunk = buf.try_into().map_err(|_| Error::SizeMismatch {
            expected: BANK_SIZE,
            actual: buf.len(),
        })?;

        Ok(Self::new(chunk))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_bytes(read_file(path)?)
    }

    pub fn as_bytes(&self) -> &[u8; BANK_SIZE] {
        &self.0
    }

    pub fn tile(&self, i: usize) -> Result<Tile> {
        if i >= BANK_TILES {
            return Err(Error::IndexOutOfRange {
                index: i,
                len: BANK_TILES,
            });
        }

        Tile::from_bytes(&self.0[TILE_SIZE * i..][..TILE_SIZE])
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.0.chunks_exact(TILE_SIZE).map(|buf| {
            let mut pattern = [0; TILE_SIZE];
            pattern.copy_from_slice(buf);
            Tile::new(pattern)
        })
    }

    pub fn to_image(&self, plt: &Palette) -> RgbaImage {
        let mut img = RgbaImage::new(BANK_IMAGE_WIDTH, BANK_IMAGE_HEIGHT);
        self.draw(&mut img, 0, plt);

        img
    }

    /// `img` の y = `y0` から始まる 128 ラインに描画する。
    pub(crate) fn draw(&self, img: &mut RgbaImage, y0: u32, plt: &Palette) {
        for (i, tile) in self.tiles().enumerate() {
            let (x, y) = tile_origin(i);
            tile.draw(img, x, y0 + y, plt);
        }
    }

    pub fn from_image(img: &RgbaImage, plt: &Palette) -> Result<Self> {
        if img.dimensions() != (BANK_IMAGE_WIDTH, BANK_IMAGE_HEIGHT) {
            return Err(Error::InvalidImageSize {
                width: img.width(),
                height: img.height(),
            });
        }

        Self::from_image_strip(img, 0, plt)
    }

    /// `img` の y = `y0` から始まる 128x128 の領域をエンコードする。
    /// 領域が `img` に収まることは呼び出し側が保証する。
    pub(crate) fn from_image_strip(img: &RgbaImage, y0: u32, plt: &Palette) -> Result<Self> {
        let mut chunk = [0; BANK_SIZE];
        for (i, buf) in chunk.chunks_exact_mut(TILE_SIZE).enumerate() {
            let (x, y) = tile_origin(i);
            let tile = Tile::from_image_at(img, x, y0 + y, plt)?;
            buf.copy_from_slice(tile.as_bytes());
        }

        Ok(Self::new(chunk))
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new([0; BANK_SIZE])
    }
}

impl GraphicRom for Bank {
    fn chunk(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn image_size(&self) -> (u32, u32) {
        (BANK_IMAGE_WIDTH, BANK_IMAGE_HEIGHT)
    }

    fn to_image(&self, plt: &Palette) -> RgbaImage {
        Bank::to_image(self, plt)
    }

    fn set_from_image(&mut self, img: &RgbaImage, plt: &Palette) -> Result<()> {
        *self = Self::from_image(img, plt)?;
        Ok(())
    }
}

/// バンク画像における `i` 番目のタイルの左上座標。
fn tile_origin(i: usize) -> (u32, u32) {
    let col = (i % TILES_PER_ROW) as u32;
    let row = (i / TILES_PER_ROW) as u32;
    (col * TILE_PIXELS, row * TILE_PIXELS)
}
