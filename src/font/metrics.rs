//! Advance widths for the standard PDF fonts we draw with.
//!
//! Values are the Adobe AFM widths (1/1000 em) for the printable ASCII
//! range 0x20..=0x7E. Anything outside that range measures as the font's
//! default width, which is close enough for Latin-1 accents.

/// Width table plus fallback for one standard font.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    widths: &'static [u16; 95],
    default_width: u16,
}

impl StandardFontMetrics {
    /// Advance width of one character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let cp = ch as u32;
        let w = if (0x20..=0x7E).contains(&cp) {
            self.widths[(cp - 0x20) as usize]
        } else {
            self.default_width
        };
        w as f64 / 1000.0 * font_size
    }

    /// Width of a whole string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}

pub(crate) const HELVETICA: StandardFontMetrics = StandardFontMetrics {
    widths: &HELVETICA_WIDTHS,
    default_width: 556,
};

pub(crate) const HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    widths: &HELVETICA_BOLD_WIDTHS,
    default_width: 611,
};

pub(crate) const COURIER: StandardFontMetrics = StandardFontMetrics {
    widths: &[600; 95],
    default_width: 600,
};

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_width() {
        assert!((HELVETICA.char_width(' ', 12.0) - 3.336).abs() < 0.001);
    }

    #[test]
    fn table_alignment_spot_checks() {
        assert!((HELVETICA.char_width('A', 1000.0) - 667.0).abs() < 1e-9);
        assert!((HELVETICA.char_width('a', 1000.0) - 556.0).abs() < 1e-9);
        assert!((HELVETICA.char_width('~', 1000.0) - 584.0).abs() < 1e-9);
        assert!((HELVETICA_BOLD.char_width('m', 1000.0) - 889.0).abs() < 1e-9);
        assert!((HELVETICA_BOLD.char_width('z', 1000.0) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn courier_is_monospaced() {
        let a = COURIER.measure_string("iiii", 10.0);
        let b = COURIER.measure_string("MMMM", 10.0);
        assert!((a - b).abs() < 1e-9);
        assert!((a - 24.0).abs() < 1e-9);
    }

    #[test]
    fn non_ascii_uses_default() {
        assert!((HELVETICA.char_width('é', 1000.0) - 556.0).abs() < 1e-9);
    }
}
