//! Packed display-list colors
//!
//! Recorded directives carry colors as packed 32-bit ARGB, the wire shape of
//! the upstream recording format. Unpacking to float RGBA happens once, at
//! the dispatch boundary.

use lumen_core::Color;

/// 32-bit ARGB color as recorded in a display list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DlColor(pub u32);

impl DlColor {
    pub const TRANSPARENT: DlColor = DlColor(0x0000_0000);
    pub const BLACK: DlColor = DlColor(0xFF00_0000);
    pub const WHITE: DlColor = DlColor(0xFFFF_FFFF);
    pub const RED: DlColor = DlColor(0xFFFF_0000);
    pub const GREEN: DlColor = DlColor(0xFF00_FF00);
    pub const BLUE: DlColor = DlColor(0xFF00_00FF);

    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(&self) -> u8 {
        self.0 as u8
    }

    pub fn alpha_f(&self) -> f32 {
        self.alpha() as f32 / 255.0
    }

    pub fn red_f(&self) -> f32 {
        self.red() as f32 / 255.0
    }

    pub fn green_f(&self) -> f32 {
        self.green() as f32 / 255.0
    }

    pub fn blue_f(&self) -> f32 {
        self.blue() as f32 / 255.0
    }

    /// Unpack to float RGBA.
    pub fn to_color(&self) -> Color {
        Color::rgba(self.red_f(), self.green_f(), self.blue_f(), self.alpha_f())
    }
}

impl From<DlColor> for Color {
    fn from(color: DlColor) -> Self {
        color.to_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_unpacking() {
        let c = DlColor::from_argb(0x80FF_4000);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0xFF);
        assert_eq!(c.green(), 0x40);
        assert_eq!(c.blue(), 0x00);
    }

    #[test]
    fn test_to_color() {
        assert_eq!(DlColor::RED.to_color(), Color::RED);
        assert_eq!(DlColor::TRANSPARENT.to_color().a, 0.0);
        let c = DlColor::from_argb(0xFF00_8000).to_color();
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
    }
}
