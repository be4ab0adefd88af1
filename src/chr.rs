use std::path::Path;

use image::RgbaImage;

use crate::bank::*;
use crate::error::{read_file, Error, Result};
use crate::graphic::GraphicRom;
use crate::palette::Palette;

/// CHR データ全体。バンクの並びは ROM 上の物理順と一致する。
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Chr {
    banks: Vec<Bank>,
}

impl Chr {
    pub fn new() -> Self {
        Self::default()
    }

    /// `buf` をバンクに分割する。末尾の半端なバイトは捨てる。
    pub fn from_bytes(buf: impl AsRef<[u8]>) -> Self {
        let banks = buf
            .as_ref()
            .chunks_exact(BANK_SIZE)
            .map(|buf| {
                let mut chunk = [0; BANK_SIZE];
                chunk.copy_from_slice(buf);
                Bank::new(chunk)
            })
            .collect();

        Self { banks }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_bytes(read_file(path)?))
    }

    pub fn bank_count(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    pub fn bank(&self, i: usize) -> Result<&Bank> {
        self.banks.get(i).ok_or(Error::IndexOutOfRange {
            index: i,
            len: self.banks.len(),
        })
    }

    pub fn set_bank(&mut self, i: usize, bank: Bank) -> Result<()> {
        let len = self.banks.len();
        let dst = self
            .banks
            .get_mut(i)
            .ok_or(Error::IndexOutOfRange { index: i, len })?;
        *dst = bank;

        Ok(())
    }

    pub fn add_bank(&mut self, bank: Bank) {
        self.banks.push(bank);
    }

    pub fn to_image(&self, plt: &Palette) -> RgbaImage {
        let (w, h) = self.image_size();
        let mut img = RgbaImage::new(w, h);
        for (i, bank) in itertools::enumerate(&self.banks) {
            bank.draw(&mut img, BANK_IMAGE_HEIGHT * i as u32, plt);
        }

        img
    }

    /// 画像の内容でバンクを置き換える。
    ///
    /// 空のコンテナに対しては画像の高さに応じてバンクを作る。
    /// 空でなければ画像サイズは `image_size()` と一致しなければならない。
    /// エラー時は何も変更しない。
    pub fn set_from_image(&mut self, img: &RgbaImage, plt: &Palette) -> Result<()> {
        let (w, h) = img.dimensions();
        if w != BANK_IMAGE_WIDTH || h == 0 || h % BANK_IMAGE_HEIGHT != 0 {
            return Err(Error::InvalidImageSize {
                width: w,
                height: h,
            });
        }

        let n_bank = (h / BANK_IMAGE_HEIGHT) as usize;
        if !self.is_empty() && n_bank != self.bank_count() {
            return Err(Error::SizeMismatch {
                expected: self.image_size().1 as usize,
                actual: h as usize,
            });
        }

        let banks = (0..n_bank)
            .map(|i| Bank::from_image_strip(img, BANK_IMAGE_HEIGHT * i as u32, plt))
            .collect::<Result<Vec<_>>>()?;

        self.banks = banks;

        Ok(())
    }
}

impl GraphicRom for Chr {
    fn chunk(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(BANK_SIZE * self.banks.len());
        for bank in &self.banks {
            buf.extend_from_slice(bank.as_bytes());
        }

        buf
    }

    fn image_size(&self) -> (u32, u32) {
        if self.is_empty() {
            return (0, 0);
        }

        (
            BANK_IMAGE_WIDTH,
            BANK_IMAGE_HEIGHT * self.banks.len() as u32,
        )
    }

    fn to_image(&self, plt: &Palette) -> RgbaImage {
        Chr::to_image(self, plt)
    }

    fn set_from_image(&mut self, img: &RgbaImage, plt: &Palette) -> Result<()> {
        Chr::set_from_image(self, img, plt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::Rgba;

    fn sample_chunk(n_bank: usize) -> Vec<u8> {
        (0..n_bank * BANK_SIZE)
            .map(|i| (i as u8) ^ (i >> 4) as u8 ^ (i >> 12) as u8)
            .collect()
    }

    #[test]
    fn split_into_banks() {
        let chunk = sample_chunk(2);
        let chr = Chr::from_bytes(&chunk);

        assert_eq!(chr.bank_count(), 2);
        assert_eq!(&chr.bank(1).unwrap().as_bytes()[..], &chunk[BANK_SIZE..]);
        assert_eq!(chr.chunk(), chunk);
    }

    #[test]
    fn trailing_bytes_dropped() {
        let mut chunk = sample_chunk(1);
        chunk.extend_from_slice(&[0xAA; 100]);
        let chr = Chr::from_bytes(&chunk);

        assert_eq!(chr.bank_count(), 1);
        assert_eq!(chr.chunk().len(), BANK_SIZE);

        assert!(Chr::from_bytes(&chunk[..BANK_SIZE - 1]).is_empty());
    }

    #[test]
    fn empty() {
        let chr = Chr::new();

        assert!(chr.is_empty());
        assert!(chr.chunk().is_empty());
        assert_eq!(chr.image_size(), (0, 0));
        assert!(matches!(
            chr.bank(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn set_and_add_bank() {
        let mut chr = Chr::from_bytes(sample_chunk(2));
        let other = Chr::from_bytes(sample_chunk(3)).bank(2).unwrap().clone();

        chr.set_bank(1, other.clone()).unwrap();
        assert_eq!(chr.bank(1).unwrap(), &other);
        let plt = Palette::default();
        assert_eq!(chr.bank(1).unwrap().to_image(&plt), other.to_image(&plt));

        assert!(matches!(
            chr.set_bank(2, other.clone()),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));

        chr.add_bank(other.clone());
        assert_eq!(chr.bank_count(), 3);
        assert_eq!(chr.chunk().len(), 3 * BANK_SIZE);
        assert_eq!(chr.bank(2).unwrap(), &other);
    }

    #[test]
    fn image_stacks_banks() {
        let plt = Palette::default();
        let chr = Chr::from_bytes(sample_chunk(2));
        let img = chr.to_image(&plt);

        assert_eq!(img.dimensions(), (128, 256));
        let bank1 = chr.bank(1).unwrap().to_image(&plt);
        for (x, y) in [(0, 0), (17, 33), (127, 127)].iter().copied() {
            assert_eq!(img.get_pixel(x, y + 128), bank1.get_pixel(x, y));
        }
    }

    #[test]
    fn image_roundtrip_two_banks() {
        let plt = Palette::default();
        let chunk = sample_chunk(2);
        let img = Chr::from_bytes(&chunk).to_image(&plt);

        let mut chr = Chr::new();
        chr.set_from_image(&img, &plt).unwrap();

        assert_eq!(chr.bank_count(), 2);
        assert_eq!(chr.chunk(), chunk);
    }

    #[test]
    fn invalid_image_size() {
        let plt = Palette::default();
        let mut chr = Chr::new();

        for &(w, h) in &[(128, 0), (127, 128), (128, 100), (256, 256)] {
            let img = RgbaImage::from_pixel(w, h, plt.color(0));
            assert!(matches!(
                chr.set_from_image(&img, &plt),
                Err(Error::InvalidImageSize { .. })
            ));
        }
        assert!(chr.is_empty());
    }

    #[test]
    fn fixed_geometry_when_not_empty() {
        let plt = Palette::default();
        let mut chr = Chr::from_bytes(sample_chunk(2));
        let img = RgbaImage::from_pixel(128, 384, plt.color(1));

        assert!(matches!(
            chr.set_from_image(&img, &plt),
            Err(Error::SizeMismatch {
                expected: 256,
                actual: 384
            })
        ));
        assert_eq!(chr.bank_count(), 2);
    }

    #[test]
    fn failed_encode_commits_nothing() {
        let plt = Palette::default();
        let chunk = sample_chunk(2);
        let mut chr = Chr::from_bytes(&chunk);

        let mut img = RgbaImage::from_pixel(128, 256, plt.color(3));
        img.put_pixel(64, 200, Rgba([0x12, 0x34, 0x56, 0xFF]));

        assert!(matches!(
            chr.set_from_image(&img, &plt),
            Err(Error::ColorNotInPalette { x: 64, y: 200, .. })
        ));
        assert_eq!(chr.chunk(), chunk);
    }
}
