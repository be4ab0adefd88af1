mod bank;
mod block;
mod chr;
mod error;
mod graphic;
mod header;
mod palette;
mod rom;
mod tile;

pub use bank::*;
pub use block::*;
pub use chr::*;
pub use error::{Error, Result};
pub use graphic::*;
pub use header::*;
pub use palette::*;
pub use rom::*;
pub use tile::*;
