//! Palette RAM and the platform colour table.

use crate::bus::Rgb;

/// 32 bytes of palette RAM at $3F00–$3F1F.
///
/// Entries $10/$14/$18/$1C alias $00/$04/$08/$0C: sprite palette slot 0
/// is the shared backdrop colour, so writes land in the background half.
#[derive(Debug, Clone)]
pub struct PaletteRam {
    bytes: [u8; 32],
}

impl PaletteRam {
    #[must_use]
    pub fn new() -> Self {
        Self { bytes: [0; 32] }
    }

    fn index(addr: u16) -> usize {
        let i = (addr & 0x1F) as usize;
        if i >= 0x10 && i % 4 == 0 { i - 0x10 } else { i }
    }

    /// Read a palette entry; `addr` may be a full $3Fxx address or a
    /// 5-bit index.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[Self::index(addr)]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[Self::index(addr)] = value;
    }
}

impl Default for PaletteRam {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed 64-entry platform colour table mapping 6-bit palette values
/// to RGB.
#[derive(Debug, Clone)]
pub struct ColorTable {
    colors: [Rgb; 64],
}

impl ColorTable {
    /// Parse a 192-byte `.pal` file (64 RGB triples).
    #[must_use]
    pub fn from_pal(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 192 {
            return None;
        }
        let mut colors = [[0u8; 3]; 64];
        for (i, c) in colors.iter_mut().enumerate() {
            c.copy_from_slice(&bytes[i * 3..i * 3 + 3]);
        }
        Some(Self { colors })
    }

    /// Look up a colour; the index is masked to 6 bits.
    #[must_use]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[(index & 0x3F) as usize]
    }
}

impl Default for ColorTable {
    /// The 2C02 NTSC colours.
    fn default() -> Self {
        #[rustfmt::skip]
        let colors: [Rgb; 64] = [
            [0x52, 0x52, 0x52], [0x00, 0x00, 0x80], [0x08, 0x00, 0x80], [0x2E, 0x00, 0x7E],
            [0x4A, 0x00, 0x4E], [0x50, 0x00, 0x06], [0x44, 0x00, 0x00], [0x26, 0x08, 0x00],
            [0x0A, 0x20, 0x00], [0x00, 0x2E, 0x00], [0x00, 0x32, 0x00], [0x00, 0x26, 0x0A],
            [0x00, 0x1C, 0x48], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00],
            [0xA4, 0xA4, 0xA4], [0x00, 0x38, 0xCE], [0x34, 0x16, 0xEC], [0x5E, 0x04, 0xDC],
            [0x8C, 0x00, 0xB0], [0x9A, 0x00, 0x4C], [0x90, 0x18, 0x00], [0x70, 0x36, 0x00],
            [0x4C, 0x54, 0x00], [0x0E, 0x6C, 0x00], [0x00, 0x74, 0x00], [0x00, 0x6C, 0x2C],
            [0x00, 0x5E, 0x84], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00],
            [0xFF, 0xFF, 0xFF], [0x4C, 0x9C, 0xFF], [0x7C, 0x78, 0xFF], [0xA6, 0x64, 0xFF],
            [0xDA, 0x5A, 0xFF], [0xF0, 0x54, 0xC0], [0xF0, 0x6A, 0x56], [0xD6, 0x86, 0x10],
            [0xBA, 0xA4, 0x00], [0x76, 0xC0, 0x00], [0x46, 0xCC, 0x1A], [0x2E, 0xC8, 0x66],
            [0x34, 0xC2, 0xBE], [0x3A, 0x3A, 0x3A], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00],
            [0xFF, 0xFF, 0xFF], [0xB6, 0xDA, 0xFF], [0xC8, 0xCA, 0xFF], [0xDA, 0xC2, 0xFF],
            [0xF0, 0xBE, 0xFF], [0xFC, 0xBC, 0xEE], [0xFA, 0xC2, 0xC0], [0xF2, 0xCC, 0xA2],
            [0xE6, 0xDA, 0x92], [0xCC, 0xE6, 0x8E], [0xB8, 0xEE, 0xA2], [0xAE, 0xEA, 0xBE],
            [0xAE, 0xE8, 0xE2], [0xB0, 0xB0, 0xB0], [0x00, 0x00, 0x00], [0x00, 0x00, 0x00],
        ];
        Self { colors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_backdrop_slots_alias_background() {
        let mut pal = PaletteRam::new();
        pal.write(0x3F10, 0x2A);
        assert_eq!(pal.read(0x3F00), 0x2A);
        pal.write(0x3F04, 0x15);
        assert_eq!(pal.read(0x3F14), 0x15);
        assert_eq!(pal.read(0x3F18), 0x00);
        // Non-multiple-of-4 sprite entries do not alias.
        pal.write(0x3F11, 0x07);
        assert_eq!(pal.read(0x3F01), 0x00);
    }

    #[test]
    fn pal_file_roundtrip() {
        let mut bytes = vec![0u8; 192];
        bytes[3] = 0x11;
        bytes[4] = 0x22;
        bytes[5] = 0x33;
        let table = ColorTable::from_pal(&bytes).unwrap();
        assert_eq!(table.color(1), [0x11, 0x22, 0x33]);
        assert!(ColorTable::from_pal(&bytes[..100]).is_none());
    }

    #[test]
    fn color_index_masks_to_six_bits() {
        let table = ColorTable::default();
        assert_eq!(table.color(0x70), table.color(0x30));
    }
}
