//! Fixed 5x7 bitmap font.
//!
//! Covers digits, uppercase A-Z, space and `- _ . : ( ) %`. Each glyph is
//! seven rows; in each row bit 4 is the leftmost column. Characters
//! outside the table draw as a blank cell, so text never fails to render.

/// Glyph cell width in font units.
pub const GLYPH_WIDTH: i32 = 5;

/// Glyph cell height in font units.
pub const GLYPH_HEIGHT: i32 = 7;

/// Seven rows of five bits.
pub type Glyph = [u8; 7];

/// The empty glyph, used for space and for anything unsupported.
pub const BLANK: Glyph = [0; 7];

/// Look up a character's glyph.
pub const fn lookup(ch: char) -> Option<Glyph> {
    let rows = match ch {
        ' ' => BLANK,
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00110],
        ':' => [0b00000, 0b00110, 0b00110, 0b00000, 0b00110, 0b00110, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '%' => [0b11001, 0b11010, 0b00100, 0b01000, 0b10110, 0b00110, 0b00000],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b11100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00001, 0b00001, 0b00001, 0b00001, 0b10001, 0b10001, 0b01110],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        _ => return None,
    };
    Some(rows)
}

/// Glyph for a character, falling back to blank.
pub fn glyph(ch: char) -> Glyph {
    lookup(ch).unwrap_or(BLANK)
}

/// Whether the character has an entry in the table.
pub fn has_glyph(ch: char) -> bool {
    lookup(ch).is_some()
}

/// Whether the glyph has its pixel at column `gx`, row `gy` set.
#[inline]
pub fn glyph_bit(glyph: &Glyph, gx: i32, gy: i32) -> bool {
    (glyph[gy as usize] >> (GLYPH_WIDTH - 1 - gx)) & 1 == 1
}

/// Horizontal distance from one character origin to the next.
#[inline]
pub fn advance(scale: i32) -> i32 {
    GLYPH_WIDTH * scale + scale
}

/// Rendered width of `text` in pixels; the trailing gap is not counted.
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        return 0;
    }
    n * advance(scale) - scale
}

/// Uppercase `text` and blank out anything the font cannot draw
/// (`|` and `/` included).
pub fn safe_label_text(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .map(|ch| if has_glyph(ch) { ch } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_coverage() {
        for ch in ('0'..='9').chain('A'..='Z') {
            assert!(has_glyph(ch), "missing glyph for {ch:?}");
        }
        for ch in [' ', '-', '_', '.', ':', '(', ')', '%'] {
            assert!(has_glyph(ch), "missing glyph for {ch:?}");
        }
        for ch in ['a', '|', '/', '#', '=', 'é'] {
            assert!(!has_glyph(ch));
            assert_eq!(glyph(ch), BLANK);
        }
    }

    #[test]
    fn test_glyph_bits() {
        // "1": 00100 on the first row
        let one = glyph('1');
        assert!(!glyph_bit(&one, 0, 0));
        assert!(glyph_bit(&one, 2, 0));
        // "L": left column set on every row, full bottom row
        let l = glyph('L');
        assert!((0..GLYPH_HEIGHT).all(|gy| glyph_bit(&l, 0, gy)));
        assert!((0..GLYPH_WIDTH).all(|gx| glyph_bit(&l, gx, 6)));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("2020", 1), 23);
        assert_eq!(text_width("AB", 2), 22);
    }

    #[test]
    fn test_safe_label_text() {
        assert_eq!(
            safe_label_text("Mine A | mean ndvi | 500 m buffer"),
            "MINE A   MEAN NDVI   500 M BUFFER"
        );
        assert_eq!(safe_label_text("a/b=c"), "A B C");
        assert_eq!(safe_label_text("-0.25"), "-0.25");
        assert!(safe_label_text("Año #7").chars().all(has_glyph));
    }
}
