use std::io::{self, Read};

use byteorder::ReadBytesExt;

use crate::error::{Error, Result};

pub const INES_MAGIC: [u8; 4] = *b"NES\x1A";

pub const HEADER_SIZE: usize = 16;
pub const TRAINER_SIZE: usize = 512;
pub const PRG_ROM_UNIT_SIZE: usize = 0x4000;
pub const CHR_ROM_UNIT_SIZE: usize = 0x2000;

const FLAG6_TRAINER: u8 = 1 << 2;

/// iNES ヘッダ (ROM イメージの先頭 16 バイト)。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    magic: [u8; 4],
    prg_rom_units: u8,
    chr_rom_units: u8,
    flags6: u8,
    flags7: u8,
    prg_ram_size: u8,
    flags9: u8,
    flags10: u8,
}

impl Header {
    /// 先頭 16 バイトを解釈する。マジックナンバーは検査しない (`is_valid` を参照)。
    pub fn from_bytes(buf: impl AsRef<[u8]>) -> Result<Self> {
        let buf = buf.as_ref();
        if buf.len() < HEADER_SIZE {
            return Err(Error::MalformedHeader { len: buf.len() });
        }

        Self::read(&buf[..HEADER_SIZE])
            .map_err(|_| Error::MalformedHeader { len: buf.len() })
    }

    fn read<R: Read>(mut rdr: R) -> io::Result<Self> {
        let mut magic = [0; 4];
        rdr.read_exact(&mut magic)?;

        let prg_rom_units = rdr.read_u8()?;
        let chr_rom_units = rdr.read_u8()?;
        let flags6 = rdr.read_u8()?;
        let flags7 = rdr.read_u8()?;
        let prg_ram_size = rdr.read_u8()?;
        let flags9 = rdr.read_u8()?;
        let flags10 = rdr.read_u8()?;

        // 予約領域
        let mut padding = [0; 5];
        rdr.read_exact(&mut padding)?;

        Ok(Self {
            magic,
            prg_rom_units,
            chr_rom_units,
            flags6,
            flags7,
            prg_ram_size,
            flags9,
            flags10,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.magic == INES_MAGIC
    }

    pub fn magic(&self) -> [u8; 4] {
        self.magic
    }

    pub fn prg_rom_units(&self) -> u8 {
        self.prg_rom_units
    }

    pub fn chr_rom_units(&self) -> u8 {
        self.chr_rom_units
    }

    pub fn prg_rom_size(&self) -> usize {
        usize::from(self.prg_rom_units) * PRG_ROM_UNIT_SIZE
    }

    pub fn chr_rom_size(&self) -> usize {
        usize::from(self.chr_rom_units) * CHR_ROM_UNIT_SIZE
    }

    pub fn has_trainer(&self) -> bool {
        (self.flags6 & FLAG6_TRAINER) != 0
    }

    pub fn flags6(&self) -> u8 {
        self.flags6
    }

    pub fn flags7(&self) -> u8 {
        self.flags7
    }

    pub fn prg_ram_size(&self) -> u8 {
        self.prg_ram_size
    }

    pub fn flags9(&self) -> u8 {
        self.flags9
    }

    pub fn flags10(&self) -> u8 {
        self.flags10
    }
}
