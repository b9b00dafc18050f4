use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0xda, 0x77, 0x56);
pub const BODY_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const MUTED: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const IMAGE_LINK: Color = Color::Rgb(0x38, 0xbd, 0xf8);
pub const STAGED: Color = Color::Rgb(0xea, 0xb3, 0x08);
pub const ACTION: Color = Color::Rgb(0x22, 0xc5, 0x5e);
