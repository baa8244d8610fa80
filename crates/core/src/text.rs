//! Chat text helpers
//!
//! Replies and welcome messages use the host's section-sign color codes.
//! Administrators write messages with `&` codes in the config; those are
//! translated with [`translate_color_codes`] right before sending.

use crate::location::SpawnLocation;

/// Section sign prefix understood by the host's chat renderer
pub const COLOR_CHAR: char = '\u{00A7}';

/// Characters that may follow a color prefix
const COLOR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Color constants used in command replies
pub mod color {
    pub const GOLD: &str = "\u{00A7}6";
    pub const GRAY: &str = "\u{00A7}7";
    pub const GREEN: &str = "\u{00A7}a";
    pub const RED: &str = "\u{00A7}c";
    pub const YELLOW: &str = "\u{00A7}e";
    pub const WHITE: &str = "\u{00A7}f";
    pub const RESET: &str = "\u{00A7}r";
}

/// Replace `alt` + code pairs with the section-sign form.
///
/// Only recognised codes are translated; anything else (including a trailing
/// `alt`) is left as written. Codes are lower-cased.
pub fn translate_color_codes(alt: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == alt {
            if let Some(&code) = chars.peek() {
                if COLOR_CODES.contains(code) {
                    out.push(COLOR_CHAR);
                    out.push(code.to_ascii_lowercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }

    out
}

/// Remove section-sign codes, for log output
pub fn strip_color(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == COLOR_CHAR {
            chars.next();
        } else {
            out.push(c);
        }
    }

    out
}

/// Colored `world: x, y, z`, or a red "Not set"
pub fn format_location(location: Option<&SpawnLocation>) -> String {
    match location {
        Some(loc) => format!(
            "{}{}: {}{:.1}, {:.1}, {:.1}",
            color::GREEN,
            loc.world,
            color::YELLOW,
            loc.x,
            loc.y,
            loc.z
        ),
        None => format!("{}Not set", color::RED),
    }
}

/// Uncolored `world: x, y, z`, or "Not set"
pub fn format_location_raw(location: Option<&SpawnLocation>) -> String {
    match location {
        Some(loc) => format!("{}: {:.1}, {:.1}, {:.1}", loc.world, loc.x, loc.y, loc.z),
        None => "Not set".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_color_codes() {
        assert_eq!(
            translate_color_codes('&', "&aWelcome &Lto &6the server"),
            "\u{00A7}aWelcome \u{00A7}lto \u{00A7}6the server"
        );
    }

    #[test]
    fn test_translate_leaves_unknown_codes() {
        assert_eq!(translate_color_codes('&', "Tom & Jerry"), "Tom & Jerry");
        assert_eq!(translate_color_codes('&', "&zoo"), "&zoo");
        assert_eq!(translate_color_codes('&', "end&"), "end&");
    }

    #[test]
    fn test_strip_color() {
        let colored = translate_color_codes('&', "&aHello &eworld");
        assert_eq!(strip_color(&colored), "Hello world");
    }

    #[test]
    fn test_format_location() {
        let loc = SpawnLocation::new("lobby", 10.26, 64.0, -3.0, None);

        assert_eq!(format_location_raw(Some(&loc)), "lobby: 10.3, 64.0, -3.0");
        assert_eq!(format_location_raw(None), "Not set");
        assert_eq!(strip_color(&format_location(Some(&loc))), "lobby: 10.3, 64.0, -3.0");
        assert_eq!(strip_color(&format_location(None)), "Not set");
    }
}
