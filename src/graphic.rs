use std::path::Path;

use image::RgbaImage;
use tracing::debug;

use crate::error::{write_file, Result};
use crate::palette::Palette;

/// 生データとしても画像としても扱える CHR データ。
pub trait GraphicRom {
    fn chunk(&self) -> Vec<u8>;

    /// `to_image` の (幅, 高さ)。単位はピクセル。
    fn image_size(&self) -> (u32, u32);

    fn to_image(&self, plt: &Palette) -> RgbaImage;

    fn set_from_image(&mut self, img: &RgbaImage, plt: &Palette) -> Result<()>;
}

/// 生データをそのまま書き出す (ヘッダなし)。
pub fn save_chunk<G: GraphicRom + ?Sized>(g: &G, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let chunk = g.chunk();
    debug!("writing {} bytes to {}", chunk.len(), path.display());

    write_file(path, chunk)
}

/// 画像ファイルとして保存する。形式は拡張子で決まる。
pub fn save_image<G: GraphicRom + ?Sized>(
    g: &G,
    plt: &Palette,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let img = g.to_image(plt);
    debug!("writing {}x{} image to {}", img.width(), img.height(), path.display());

    img.save(path)?;

    Ok(())
}

pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

pub fn set_from_image_file<G: GraphicRom + ?Sized>(
    g: &mut G,
    plt: &Palette,
    path: impl AsRef<Path>,
) -> Result<()> {
    let img = load_image(path)?;
    g.set_from_image(&img, plt)
}
