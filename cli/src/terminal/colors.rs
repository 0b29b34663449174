use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 95, g: 175, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 175, b: 95 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 208, g: 208, b: 208 };

pub const IPV4_ADDR: Color = Color::TrueColor { r: 135, g: 215, b: 135 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 215, g: 135, b: 255 };
pub const MISSING: Color = Color::BrightBlack;

pub const STATUS_NEW: Color = Color::TrueColor { r: 255, g: 215, b: 95 };
pub const STATUS_CONVERTED: Color = Color::TrueColor { r: 135, g: 215, b: 135 };

pub const CONFIDENCE_HIGH: Color = Color::Green;
pub const CONFIDENCE_MID: Color = Color::Yellow;
pub const CONFIDENCE_LOW: Color = Color::Red;
