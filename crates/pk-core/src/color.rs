/// A color a terminal can display.
///
/// `Rgb` needs a true-color terminal, `Indexed` addresses the xterm 256-color
/// palette (0–15 being the classic ANSI colors).
///
/// # Example
/// ```
/// use pk_core::color::{xterm_rgb, TermColor};
/// let red = TermColor::Indexed(196);
/// assert_eq!(red, TermColor::Indexed(16 + 36 * 5));
/// assert_eq!(xterm_rgb(196), (255, 0, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TermColor {
    /// 24-bit color.
    Rgb(u8, u8, u8),
    /// Palette index (xterm 256-color).
    Indexed(u8),
}

/// xterm default values for the 16 ANSI colors.
pub const ANSI_16: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Channel levels of the 6×6×6 color cube (indices 16–231).
pub const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// First index of the 24-step grayscale ramp.
pub const GRAY_BASE: u8 = 232;

/// RGB value of an xterm palette entry.
///
/// # Example
/// ```
/// use pk_core::color::xterm_rgb;
/// assert_eq!(xterm_rgb(16), (0, 0, 0));
/// assert_eq!(xterm_rgb(231), (255, 255, 255));
/// assert_eq!(xterm_rgb(232), (8, 8, 8));
/// ```
#[must_use]
pub fn xterm_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => ANSI_16[index as usize],
        16..=231 => {
            let i = (index - 16) as usize;
            (CUBE_LEVELS[i / 36], CUBE_LEVELS[(i / 6) % 6], CUBE_LEVELS[i % 6])
        }
        _ => {
            let v = 8 + 10 * (index - GRAY_BASE);
            (v, v, v)
        }
    }
}

/// Squared euclidean distance between two RGB colors.
#[inline]
#[must_use]
pub fn distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let dr = i32::from(a.0) - i32::from(b.0);
    let dg = i32::from(a.1) - i32::from(b.1);
    let db = i32::from(a.2) - i32::from(b.2);
    (dr * dr + dg * dg + db * db) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_corners() {
        assert_eq!(xterm_rgb(16 + 36 * 5), (255, 0, 0));
        assert_eq!(xterm_rgb(16 + 6 * 5), (0, 255, 0));
        assert_eq!(xterm_rgb(16 + 5), (0, 0, 255));
    }

    #[test]
    fn gray_ramp_is_monotonic() {
        let mut prev = 0u8;
        for i in GRAY_BASE..=255 {
            let (r, g, b) = xterm_rgb(i);
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert!(r > prev || i == GRAY_BASE);
            prev = r;
        }
        assert_eq!(xterm_rgb(255), (238, 238, 238));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = (10, 200, 30);
        let b = (250, 0, 90);
        assert_eq!(distance_sq(a, b), distance_sq(b, a));
        assert_eq!(distance_sq(a, a), 0);
    }
}
