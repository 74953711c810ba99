//! Text decoration flags for chat components.

use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Decoration flags a chat component can switch on.
    ///
    /// ```
    /// use mcdummy_rtext::StyleFlags;
    ///
    /// let flags = StyleFlags::BOLD | StyleFlags::UNDERLINED;
    /// assert!(flags.contains(StyleFlags::BOLD));
    /// assert!(!flags.contains(StyleFlags::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD          = 0b0000_0001;
        const ITALIC        = 0b0000_0010;
        const UNDERLINED    = 0b0000_0100;
        const STRIKETHROUGH = 0b0000_1000;
        const OBFUSCATED    = 0b0001_0000;
    }
}

impl StyleFlags {
    /// JSON field name paired with each flag, in serialization order.
    pub const FIELDS: [(&'static str, StyleFlags); 5] = [
        ("bold", StyleFlags::BOLD),
        ("italic", StyleFlags::ITALIC),
        ("underlined", StyleFlags::UNDERLINED),
        ("strikethrough", StyleFlags::STRIKETHROUGH),
        ("obfuscated", StyleFlags::OBFUSCATED),
    ];

    /// Returns the ANSI SGR codes for these flags.
    ///
    /// Obfuscated text has no console equivalent; it is shown blinking.
    pub fn to_ansi_codes(&self) -> SmallVec<[u8; 5]> {
        let mut codes = SmallVec::new();

        if self.contains(Self::BOLD) {
            codes.push(1);
        }
        if self.contains(Self::ITALIC) {
            codes.push(3);
        }
        if self.contains(Self::UNDERLINED) {
            codes.push(4);
        }
        if self.contains(Self::OBFUSCATED) {
            codes.push(5);
        }
        if self.contains(Self::STRIKETHROUGH) {
            codes.push(9);
        }

        codes
    }
}
