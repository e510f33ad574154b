//! Color theme and glyphs for Valentine TUI.
//!
//! Uses a GitHub-dark palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use valentine_types::UiOptions;

/// GitHub dark color palette constants.
mod colors {
    use super::Color;

    // === Surfaces ===
    pub const BG_DARK: Color = Color::Rgb(13, 17, 23); // canvas #0d1117
    pub const BG_PANEL: Color = Color::Rgb(22, 27, 34); // overlay #161b22
    pub const BG_BORDER: Color = Color::Rgb(48, 54, 61); // border #30363d

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(201, 209, 217); // #c9d1d9
    pub const TEXT_MUTED: Color = Color::Rgb(139, 148, 158); // #8b949e
    pub const TEXT_ON_BUTTON: Color = Color::Rgb(255, 255, 255);

    // === Accents ===
    pub const LINK: Color = Color::Rgb(88, 166, 255); // #58a6ff
    pub const CODE: Color = Color::Rgb(121, 192, 255); // #79c0ff
    pub const CONTINUE: Color = Color::Rgb(31, 111, 235); // #1f6feb
    pub const WARNING: Color = Color::Rgb(210, 153, 34); // #d29922
    pub const PLEA: Color = Color::Rgb(255, 123, 114); // #ff7b72
    pub const CRITICAL: Color = Color::Rgb(248, 81, 73); // #f85149

    // === Buttons ===
    pub const ACCEPT: Color = Color::Rgb(35, 134, 54); // #238636
    pub const ACCEPT_HOVER: Color = Color::Rgb(46, 160, 67); // #2ea043
    pub const DECLINE: Color = Color::Rgb(218, 54, 51); // #da3633
    pub const DECLINE_HOVER: Color = Color::Rgb(248, 81, 73); // #f85149

    // === Envelope ===
    pub const PAPER: Color = Color::Rgb(230, 224, 198); // #e6e0c6
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub text_on_button: Color,
    pub link: Color,
    pub code: Color,
    pub continue_button: Color,
    pub warning: Color,
    pub plea: Color,
    pub critical: Color,
    pub accept: Color,
    pub accept_hover: Color,
    pub decline: Color,
    pub decline_hover: Color,
    pub paper: Color,
    pub confetti: [Color; 5],
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            text_on_button: colors::TEXT_ON_BUTTON,
            link: colors::LINK,
            code: colors::CODE,
            continue_button: colors::CONTINUE,
            warning: colors::WARNING,
            plea: colors::PLEA,
            critical: colors::CRITICAL,
            accept: colors::ACCEPT,
            accept_hover: colors::ACCEPT_HOVER,
            decline: colors::DECLINE,
            decline_hover: colors::DECLINE_HOVER,
            paper: colors::PAPER,
            confetti: [
                colors::CRITICAL,
                colors::LINK,
                colors::ACCEPT_HOVER,
                colors::WARNING,
                colors::PLEA,
            ],
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_muted: Color::Gray,
            text_on_button: Color::White,
            link: Color::Cyan,
            code: Color::Cyan,
            continue_button: Color::Blue,
            warning: Color::Yellow,
            plea: Color::LightRed,
            critical: Color::Red,
            accept: Color::Green,
            accept_hover: Color::LightGreen,
            decline: Color::Red,
            decline_hover: Color::LightRed,
            paper: Color::White,
            confetti: [
                Color::Red,
                Color::Cyan,
                Color::Green,
                Color::Yellow,
                Color::Magenta,
            ],
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for icons and spinners.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub heart: &'static str,
    pub back: &'static str,
    pub separator: &'static str,
    pub spinner_frames: &'static [&'static str],
    pub confetti: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];
const CONFETTI: &[&str] = &["▪", "●", "◆", "▴", "✦"];
const CONFETTI_ASCII: &[&str] = &["*", "+", "o", "x", "~"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            heart: "<3",
            back: "<-",
            separator: "|",
            spinner_frames: SPINNER_FRAMES_ASCII,
            confetti: CONFETTI_ASCII,
        }
    } else {
        Glyphs {
            heart: "❤",
            back: "←",
            separator: "·",
            spinner_frames: SPINNER_FRAMES,
            confetti: CONFETTI,
        }
    }
}

/// When `reduced_motion` is enabled, returns a static glyph instead of cycling.
#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[tick % frames.len()]
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Color, Modifier, Palette, Style};

    #[must_use]
    pub fn heading(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn code(palette: &Palette) -> Style {
        Style::default().fg(palette.code)
    }

    #[must_use]
    pub fn button(palette: &Palette, fill: Color, focused: bool) -> Style {
        let style = Style::default()
            .fg(palette.text_on_button)
            .bg(fill)
            .add_modifier(Modifier::BOLD);
        if focused {
            style.add_modifier(Modifier::UNDERLINED)
        } else {
            style
        }
    }

    #[must_use]
    pub fn ghost_button(palette: &Palette) -> Style {
        Style::default().fg(palette.link).bg(palette.bg_dark)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.link)
            .add_modifier(Modifier::BOLD)
    }
}
