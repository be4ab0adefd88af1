use std::ops::Range;

use crate::error::{Error, Result};
use crate::header::*;

/// ROM 内のバイト範囲。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Block {
    position: usize,
    size: usize,
}

impl Block {
    pub fn new(position: usize, size: usize) -> Self {
        Self { position, size }
    }

    /// 長さ `rom_len` の ROM イメージから CHR ROM の位置を求める。
    pub fn locate_chr(header: &Header, rom_len: usize) -> Result<Self> {
        let chr_size = header.chr_rom_size();
        if chr_size == 0 {
            return Err(Error::NoChrData);
        }

        let mut position = HEADER_SIZE;
        if header.has_trainer() {
            position += TRAINER_SIZE;
        }
        position += header.prg_rom_size();

        let block = Self::new(position, chr_size);
        if rom_len < block.end() {
            return Err(Error::TruncatedRom {
                required: block.end(),
                actual: rom_len,
            });
        }

        Ok(block)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn end(&self) -> usize {
        self.position + self.size
    }

    pub fn range(&self) -> Range<usize> {
        self.position..self.end()
    }
}
