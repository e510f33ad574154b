//! Bundled ASCII-art images, addressed by [`AssetId`].

use unicode_width::UnicodeWidthStr;

use valentine_types::AssetId;

const INTRO: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/intro.txt"));
const ACCEPTED: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/accepted.txt"));
const NOTE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/note.txt"));

#[must_use]
pub fn art(id: AssetId) -> &'static str {
    let raw = match id {
        AssetId::Intro => INTRO,
        AssetId::Accepted => ACCEPTED,
        AssetId::Note => NOTE,
    };
    raw.trim_end_matches('\n')
}

/// Width and height of an asset in terminal cells.
#[must_use]
pub fn dimensions(id: AssetId) -> (u16, u16) {
    let text = art(id);
    let width = text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    let height = text.lines().count();
    (width as u16, height as u16)
}
