use std::fmt;

use serde::{Deserialize, Serialize};

pub const COLOUR_BLACK: u8 = 0;
pub const COLOUR_GREY: u8 = 1;
pub const COLOUR_BRIGHT_PURPLE: u8 = 5;
pub const COLOUR_LIGHT_BLUE: u8 = 7;
pub const COLOUR_SATURATED_GREEN: u8 = 11;
pub const COLOUR_DARK_GREEN: u8 = 12;
pub const COLOUR_BRIGHT_GREEN: u8 = 14;
pub const COLOUR_OLIVE_GREEN: u8 = 15;
pub const COLOUR_YELLOW: u8 = 18;
pub const COLOUR_BRIGHT_RED: u8 = 28;

/// Palette used to draw terrain as a see-through ghost in underground views.
pub const PALETTE_UNDERGROUND_GHOST: u8 = 49;
/// Palette blended into the water plane mask.
pub const PALETTE_WATER: u8 = 32;
/// Remap palettes used by map selection highlights.
pub const PALETTE_SELECTION_BASE: u8 = 0x21;
pub const PALETTE_SELECTION_QUARTER_BASE: u8 = 0x27;
pub const PALETTE_SELECTION_WATER: u8 = 0x26;

/// Packed sprite reference.
///
/// Bits 0..=18 hold the sprite index, 19..=23 the primary colour, 24..=28 the
/// secondary colour. Bit 29 enables primary remapping, bit 30 marks the image
/// translucent and bit 31 enables secondary remapping. Translucent images and
/// extended remap palettes reuse bits 19..=26 as one 8-bit palette index.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(u32);

impl ImageId {
    const INDEX_MASK: u32 = 0x0007_FFFF;
    const PRIMARY_SHIFT: u32 = 19;
    const SECONDARY_SHIFT: u32 = 24;
    const COLOUR_MASK: u32 = 0x1F;
    const PALETTE_MASK: u32 = 0xFF;
    const COLOUR_BITS: u32 = 0x1FF8_0000;

    pub const FLAG_PRIMARY_REMAP: u32 = 1 << 29;
    pub const FLAG_TRANSLUCENT: u32 = 1 << 30;
    pub const FLAG_SECONDARY_REMAP: u32 = 1 << 31;

    /// Primary remap with colour 0; ride painters treat it as "use the ride colours".
    pub const NEUTRAL: Self = Self(Self::FLAG_PRIMARY_REMAP);

    pub const fn new(index: u32) -> Self {
        Self(index & Self::INDEX_MASK)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> u32 {
        self.0 & Self::INDEX_MASK
    }

    pub const fn primary_colour(self) -> u8 {
        ((self.0 >> Self::PRIMARY_SHIFT) & Self::COLOUR_MASK) as u8
    }

    pub const fn secondary_colour(self) -> u8 {
        ((self.0 >> Self::SECONDARY_SHIFT) & Self::COLOUR_MASK) as u8
    }

    pub const fn has_flags(self, flags: u32) -> bool {
        self.0 & flags == flags
    }

    pub const fn is_translucent(self) -> bool {
        self.has_flags(Self::FLAG_TRANSLUCENT)
    }

    /// Adds `delta` to the sprite index, keeping colours and flags.
    pub const fn offset(self, delta: u32) -> Self {
        let index = (self.0 & Self::INDEX_MASK).wrapping_add(delta) & Self::INDEX_MASK;
        Self((self.0 & !Self::INDEX_MASK) | index)
    }

    pub const fn offset_signed(self, delta: i32) -> Self {
        self.offset(delta as u32)
    }

    /// Combines the colour/flag bits of `template` with this sprite index.
    pub const fn with_template(self, template: ImageId) -> Self {
        Self(self.0 | (template.0 & !Self::INDEX_MASK))
    }

    pub const fn with_primary(self, colour: u8) -> Self {
        let cleared = self.0 & !(Self::COLOUR_MASK << Self::PRIMARY_SHIFT);
        Self(
            cleared
                | ((colour as u32 & Self::COLOUR_MASK) << Self::PRIMARY_SHIFT)
                | Self::FLAG_PRIMARY_REMAP,
        )
    }

    /// Sets both colour fields but only the primary remap flag.
    pub const fn with_colours(self, primary: u8, secondary: u8) -> Self {
        let cleared = self.0 & !(Self::COLOUR_MASK << Self::SECONDARY_SHIFT);
        Self(cleared | ((secondary as u32 & Self::COLOUR_MASK) << Self::SECONDARY_SHIFT))
            .with_primary(primary)
    }

    /// Sets both colour fields and both remap flags.
    pub const fn with_remap(self, primary: u8, secondary: u8) -> Self {
        Self(self.with_colours(primary, secondary).0 | Self::FLAG_SECONDARY_REMAP)
    }

    pub const fn with_remap_palette(self, palette: u8) -> Self {
        let cleared = self.0 & !Self::COLOUR_BITS;
        Self(
            cleared
                | ((palette as u32 & Self::PALETTE_MASK) << Self::PRIMARY_SHIFT)
                | Self::FLAG_PRIMARY_REMAP,
        )
    }

    /// Drops colour remapping and draws the sprite through a translucency palette.
    pub const fn with_translucent_palette(self, palette: u8) -> Self {
        let cleared = self.0
            & !(Self::COLOUR_BITS | Self::FLAG_PRIMARY_REMAP | Self::FLAG_SECONDARY_REMAP);
        Self(
            cleared
                | ((palette as u32 & Self::PALETTE_MASK) << Self::PRIMARY_SHIFT)
                | Self::FLAG_TRANSLUCENT,
        )
    }

    /// Clears the secondary colour together with its remap flag.
    pub const fn without_secondary_remap(self) -> Self {
        Self(self.0 & !(Self::FLAG_SECONDARY_REMAP | (Self::COLOUR_MASK << Self::SECONDARY_SHIFT)))
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({}, flags=0x{:08x})", self.index(), self.0 & !Self::INDEX_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_colour_bits() {
        let image = ImageId::new(100).with_primary(COLOUR_YELLOW).offset(5);
        assert_eq!(image.index(), 105);
        assert_eq!(image.primary_colour(), COLOUR_YELLOW);
        assert!(image.has_flags(ImageId::FLAG_PRIMARY_REMAP));
    }

    #[test]
    fn template_adds_flags_to_index() {
        let template = ImageId::NEUTRAL.with_remap(COLOUR_BRIGHT_RED, COLOUR_GREY);
        let image = ImageId::new(22137).with_template(template);
        assert_eq!(image.index(), 22137);
        assert_eq!(image.primary_colour(), COLOUR_BRIGHT_RED);
        assert_eq!(image.secondary_colour(), COLOUR_GREY);
        assert!(image.has_flags(ImageId::FLAG_PRIMARY_REMAP | ImageId::FLAG_SECONDARY_REMAP));
    }

    #[test]
    fn translucent_palette_clears_remap() {
        let image = ImageId::new(2000)
            .with_remap(COLOUR_YELLOW, COLOUR_GREY)
            .with_translucent_palette(PALETTE_UNDERGROUND_GHOST);
        assert!(image.is_translucent());
        assert!(!image.has_flags(ImageId::FLAG_PRIMARY_REMAP));
        assert!(!image.has_flags(ImageId::FLAG_SECONDARY_REMAP));
        assert_eq!(image.raw() & 0x0007_FFFF, 2000);
        assert_eq!((image.raw() >> 19) & 0xFF, u32::from(PALETTE_UNDERGROUND_GHOST));
    }

    #[test]
    fn dropping_secondary_remap_clears_its_colour() {
        let image = ImageId::NEUTRAL
            .with_remap(COLOUR_YELLOW, COLOUR_GREY)
            .without_secondary_remap();
        assert_eq!(image.raw(), ImageId::NEUTRAL.with_remap(COLOUR_YELLOW, COLOUR_GREY).raw() & 0x60FF_FFFF);
        assert_eq!(image.primary_colour(), COLOUR_YELLOW);
        assert_eq!(image.secondary_colour(), 0);
    }

    #[test]
    fn negative_offset_wraps_inside_index_bits() {
        let image = ImageId::new(10).with_primary(COLOUR_GREY).offset_signed(-3);
        assert_eq!(image.index(), 7);
        assert_eq!(image.primary_colour(), COLOUR_GREY);
    }
}
