//! Color palette: slate surfaces with an indigo accent.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Rgb(15, 23, 42);
pub const CARD_BG: Color = Color::Rgb(30, 41, 59);
pub const POPUP_BG: Color = Color::Rgb(51, 65, 85);

// --- Borders ---
pub const BORDER_DIM: Color = Color::Rgb(71, 85, 105);
pub const BORDER_ACTIVE: Color = Color::Rgb(129, 140, 248);

// --- Accent ---
pub const ACCENT: Color = Color::Rgb(129, 140, 248);
pub const CONTRAST_FG: Color = Color::Black;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);
pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);
pub const TEXT_BRIGHT: Color = Color::White;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Rgb(16, 185, 129);
pub const STATUS_RED: Color = Color::Rgb(244, 63, 94);
pub const STATUS_YELLOW: Color = Color::Rgb(234, 179, 8);

// --- Effects ---
pub const SHADOW: Color = Color::Rgb(5, 6, 8);
