use std::path::Path;

use tracing::{debug, warn};

use crate::block::Block;
use crate::chr::Chr;
use crate::error::{read_file, write_file, Error, Result};
use crate::graphic::GraphicRom;
use crate::header::Header;

/// iNES ROM image. CHR 以外のバイトは一切変更しない。
#[derive(Clone, Debug)]
pub struct Rom {
    buf: Vec<u8>,
    header: Header,
    chr_block: Block,
}

impl Rom {
    pub fn from_ines_bytes(buf: impl Into<Vec<u8>>) -> Result<Self> {
        let buf = buf.into();

        let header = Header::from_bytes(&buf)?;
        if !header.is_valid() {
            warn!("iNES magic not found: {:02X?}", header.magic());
        }

        let chr_block = Block::locate_chr(&header, buf.len())?;
        debug!(
            "PRG: {} bytes, CHR: {} bytes at 0x{:X}, trainer: {}",
            header.prg_rom_size(),
            chr_block.size(),
            chr_block.position(),
            header.has_trainer()
        );

        Ok(Self {
            buf,
            header,
            chr_block,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading ROM {}", path.display());

        Self::from_ines_bytes(read_file(path)?)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn chr_block(&self) -> Block {
        self.chr_block
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn chr_bytes(&self) -> &[u8] {
        &self.buf[self.chr_block.range()]
    }

    pub fn chr(&self) -> Chr {
        Chr::from_bytes(self.chr_bytes())
    }

    /// CHR 領域を上書きする。サイズが異なる場合は何もせずエラーを返す。
    pub fn update_chr(&mut self, chr: &Chr) -> Result<()> {
        let chunk = chr.chunk();
        if chunk.len() != self.chr_block.size() {
            return Err(Error::SizeMismatch {
                expected: self.chr_block.size(),
                actual: chunk.len(),
            });
        }

        self.buf[self.chr_block.range()].copy_from_slice(&chunk);
        debug!(
            "updated {} CHR bytes at 0x{:X}",
            chunk.len(),
            self.chr_block.position()
        );

        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_file(path, &self.buf)
    }
}
