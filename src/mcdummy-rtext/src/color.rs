//! The fixed chat color palette.
//!
//! Chat components may only name one of these colors. Each color maps to the
//! ANSI SGR foreground code used when a component is rendered for a console.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// A named chat color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    /// Resets to the console's default foreground.
    Reset,
}

impl NamedColor {
    /// Every palette entry, in chat-code order.
    pub const ALL: [NamedColor; 17] = [
        NamedColor::Black,
        NamedColor::DarkBlue,
        NamedColor::DarkGreen,
        NamedColor::DarkAqua,
        NamedColor::DarkRed,
        NamedColor::DarkPurple,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::DarkGray,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Red,
        NamedColor::LightPurple,
        NamedColor::Yellow,
        NamedColor::White,
        NamedColor::Reset,
    ];

    /// The name used in chat-component JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::DarkBlue => "dark_blue",
            NamedColor::DarkGreen => "dark_green",
            NamedColor::DarkAqua => "dark_aqua",
            NamedColor::DarkRed => "dark_red",
            NamedColor::DarkPurple => "dark_purple",
            NamedColor::Gold => "gold",
            NamedColor::Gray => "gray",
            NamedColor::DarkGray => "dark_gray",
            NamedColor::Blue => "blue",
            NamedColor::Green => "green",
            NamedColor::Aqua => "aqua",
            NamedColor::Red => "red",
            NamedColor::LightPurple => "light_purple",
            NamedColor::Yellow => "yellow",
            NamedColor::White => "white",
            NamedColor::Reset => "reset",
        }
    }

    /// ANSI SGR foreground code for console rendering.
    ///
    /// Dark variants use the standard 30-37 range, light variants the bright
    /// 90-97 range.
    pub fn ansi_code(&self) -> u8 {
        match self {
            NamedColor::Black => 30,
            NamedColor::DarkBlue => 34,
            NamedColor::DarkGreen => 32,
            NamedColor::DarkAqua => 36,
            NamedColor::DarkRed => 31,
            NamedColor::DarkPurple => 35,
            NamedColor::Gold => 33,
            NamedColor::Gray => 37,
            NamedColor::DarkGray => 90,
            NamedColor::Blue => 94,
            NamedColor::Green => 92,
            NamedColor::Aqua => 96,
            NamedColor::Red => 91,
            NamedColor::LightPurple => 95,
            NamedColor::Yellow => 93,
            NamedColor::White => 97,
            NamedColor::Reset => 39,
        }
    }
}

impl FromStr for NamedColor {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedColor::ALL
            .iter()
            .copied()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownColor(s.to_string()))
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_color_round_trips_by_name() {
        for color in NamedColor::ALL {
            assert_eq!(color.as_str().parse::<NamedColor>(), Ok(color));
        }
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        assert_eq!(
            "crimson".parse::<NamedColor>(),
            Err(DecodeError::UnknownColor("crimson".to_string()))
        );
        // Names are case sensitive in chat JSON.
        assert!("Red".parse::<NamedColor>().is_err());
    }

    #[test]
    fn test_ansi_codes() {
        assert_eq!(NamedColor::Red.ansi_code(), 91);
        assert_eq!(NamedColor::DarkRed.ansi_code(), 31);
        assert_eq!(NamedColor::Reset.ansi_code(), 39);
    }
}
