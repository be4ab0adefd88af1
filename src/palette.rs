use image::Rgba;
use once_cell::sync::Lazy;

use crate::error::{Error, Result};

const SCHEME_DEFAULT: [[u8; 3]; 4] = [
    [0, 0, 0],
    [126, 126, 126],
    [189, 189, 189],
    [255, 255, 255],
];
const SCHEME_FOREST: [[u8; 3]; 4] = [
    [34, 139, 34],
    [139, 69, 19],
    [210, 180, 140],
    [160, 82, 45],
];
const SCHEME_OCEAN: [[u8; 3]; 4] = [
    [0, 105, 148],
    [135, 206, 235],
    [70, 130, 180],
    [240, 248, 255],
];
const SCHEME_FIRE: [[u8; 3]; 4] = [
    [255, 69, 0],
    [255, 140, 0],
    [255, 215, 0],
    [139, 0, 0],
];
const SCHEME_SILVER: [[u8; 3]; 4] = [
    [169, 169, 169],
    [192, 192, 192],
    [105, 105, 105],
    [220, 220, 220],
];

static SCHEMES: Lazy<[Palette; 5]> = Lazy::new(|| {
    [
        Palette::from_rgb(SCHEME_DEFAULT),
        Palette::from_rgb(SCHEME_FOREST),
        Palette::from_rgb(SCHEME_OCEAN),
        Palette::from_rgb(SCHEME_FIRE),
        Palette::from_rgb(SCHEME_SILVER),
    ]
});

/// 2bpp のピクセル値 (0..4) と色の対応表。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette([Rgba<u8>; 4]);

impl Palette {
    pub fn new(colors: [Rgba<u8>; 4]) -> Self {
        Self(colors)
    }

    /// RGB 4 色から不透明なパレットを作る。
    pub fn from_rgb(rgbs: [[u8; 3]; 4]) -> Self {
        let mut colors = [Rgba([0, 0, 0, 0xFF]); 4];
        for (e, rgb) in itertools::zip(&mut colors, &rgbs) {
            *e = Rgba([rgb[0], rgb[1], rgb[2], 0xFF]);
        }

        Self(colors)
    }

    /// 組み込みの配色。0 はグレースケール。
    pub fn from_scheme(index: usize) -> Result<Self> {
        SCHEMES
            .get(index)
            .copied()
            .ok_or(Error::InvalidPaletteIndex {
                index,
                count: SCHEMES.len(),
            })
    }

    pub fn schemes() -> &'static [Palette] {
        &*SCHEMES
    }

    pub fn scheme_count() -> usize {
        SCHEMES.len()
    }

    pub fn colors(&self) -> &[Rgba<u8>; 4] {
        &self.0
    }

    /// `value` の下位 2 ビットのみを見る。
    pub fn color(&self, value: u8) -> Rgba<u8> {
        self.0[usize::from(value & 3)]
    }

    /// RGBA 4 チャンネルすべてが一致する最初のエントリ。
    pub fn index_of(&self, color: Rgba<u8>) -> Option<u8> {
        self.0.iter().position(|&c| c == color).map(|i| i as u8)
    }
}

impl Default for Palette {
    fn default() -> Self {
        SCHEMES[0]
    }
}
