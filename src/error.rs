use std::path::Path;

use image::Rgba;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("iNES header needs 16 bytes, got {len}")]
    MalformedHeader { len: usize },

    #[error("ROM has no CHR data")]
    NoChrData,

    #[error("ROM is truncated: CHR block needs {required} bytes, ROM has {actual}")]
    TruncatedRom { required: usize, actual: usize },

    #[error("index {index} is out of range (len: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid image size: {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("color {color:?} at ({x}, {y}) is not in the palette")]
    ColorNotInPalette { color: Rgba<u8>, x: u32, y: u32 },

    #[error("palette scheme {index} does not exist (schemes: 0..{count})")]
    InvalidPaletteIndex { index: usize, count: usize },

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl Error {
    pub fn io(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub(crate) fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|e| Error::io(e, format!("cannot read {}", path.display())))
}

pub(crate) fn write_file(path: impl AsRef<Path>, buf: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, buf)
        .map_err(|e| Error::io(e, format!("cannot write {}", path.display())))
}
