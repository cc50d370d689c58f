use pk_core::color::{ANSI_16, CUBE_LEVELS, GRAY_BASE, TermColor, distance_sq, xterm_rgb};
use pk_core::config::ColorDepth;
use pk_core::error::QuantizeError;
use pk_core::traits::ColorQuantizer;

/// 24-bit passthrough. Fails only on fully transparent pixels.
///
/// # Example
/// ```
/// use pk_core::traits::ColorQuantizer;
/// use pk_core::color::TermColor;
/// use pk_glyph::quantize::TrueColor;
/// assert_eq!(TrueColor.quantize(200, 50, 50, 255).unwrap(), TermColor::Rgb(200, 50, 50));
/// assert!(TrueColor.quantize(200, 50, 50, 0).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TrueColor;

/// Nearest entry of the xterm 6×6×6 cube or grayscale ramp (indices 16–255).
#[derive(Clone, Copy, Debug, Default)]
pub struct Ansi256;

/// Nearest of the 16 classic ANSI colors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ansi16;

#[inline]
fn opaque(a: u8) -> Result<(), QuantizeError> {
    if a == 0 {
        Err(QuantizeError::Transparent)
    } else {
        Ok(())
    }
}

impl ColorQuantizer for TrueColor {
    fn quantize(&self, r: u8, g: u8, b: u8, a: u8) -> Result<TermColor, QuantizeError> {
        opaque(a)?;
        Ok(TermColor::Rgb(r, g, b))
    }

    fn name(&self) -> &'static str {
        "truecolor"
    }
}

/// Index (0–5) of the nearest cube level for one channel.
#[inline]
fn cube_step(c: u8) -> u8 {
    match c {
        0..=47 => 0,
        48..=114 => 1,
        _ => (c - 35) / 40,
    }
}

/// Nearest xterm 256-color index, restricted to the cube and gray ramp.
///
/// # Example
/// ```
/// use pk_glyph::quantize::nearest_256;
/// assert_eq!(nearest_256(255, 0, 0), 196);
/// assert_eq!(nearest_256(255, 255, 255), 231);
/// assert_eq!(nearest_256(128, 128, 128), 244);
/// ```
#[must_use]
pub fn nearest_256(r: u8, g: u8, b: u8) -> u8 {
    let (ri, gi, bi) = (cube_step(r), cube_step(g), cube_step(b));
    let cube = 16 + 36 * ri + 6 * gi + bi;
    let cube_rgb = (
        CUBE_LEVELS[ri as usize],
        CUBE_LEVELS[gi as usize],
        CUBE_LEVELS[bi as usize],
    );

    let avg = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
    let gray = GRAY_BASE + ((avg.saturating_sub(8) + 5) / 10).min(23);

    let target = (r, g, b);
    if distance_sq(xterm_rgb(gray), target) < distance_sq(cube_rgb, target) {
        gray
    } else {
        cube
    }
}

impl ColorQuantizer for Ansi256 {
    fn quantize(&self, r: u8, g: u8, b: u8, a: u8) -> Result<TermColor, QuantizeError> {
        opaque(a)?;
        Ok(TermColor::Indexed(nearest_256(r, g, b)))
    }

    fn name(&self) -> &'static str {
        "ansi256"
    }
}

impl ColorQuantizer for Ansi16 {
    fn quantize(&self, r: u8, g: u8, b: u8, a: u8) -> Result<TermColor, QuantizeError> {
        opaque(a)?;
        let target = (r, g, b);
        let mut best = 0u8;
        let mut best_dist = u32::MAX;
        for (idx, &rgb) in ANSI_16.iter().enumerate() {
            let dist = distance_sq(rgb, target);
            if dist < best_dist {
                best_dist = dist;
                best = idx as u8;
            }
        }
        Ok(TermColor::Indexed(best))
    }

    fn name(&self) -> &'static str {
        "ansi16"
    }
}

/// Quantizer backend for a configured color depth.
///
/// # Example
/// ```
/// use pk_core::config::ColorDepth;
/// use pk_glyph::quantize::quantizer_for;
/// assert_eq!(quantizer_for(ColorDepth::Ansi256).name(), "ansi256");
/// ```
#[must_use]
pub fn quantizer_for(depth: ColorDepth) -> Box<dyn ColorQuantizer> {
    match depth {
        ColorDepth::TrueColor => Box::new(TrueColor),
        ColorDepth::Ansi256 => Box::new(Ansi256),
        ColorDepth::Ansi16 => Box::new(Ansi16),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_pixels_fail_everywhere() {
        for depth in [ColorDepth::TrueColor, ColorDepth::Ansi256, ColorDepth::Ansi16] {
            let q = quantizer_for(depth);
            assert_eq!(q.quantize(10, 20, 30, 0), Err(QuantizeError::Transparent));
            assert!(q.quantize(10, 20, 30, 1).is_ok());
        }
    }

    #[test]
    fn ansi256_hits_exact_palette_entries() {
        for idx in 16..=255u8 {
            let (r, g, b) = xterm_rgb(idx);
            let got = nearest_256(r, g, b);
            assert_eq!(xterm_rgb(got), (r, g, b), "index {idx} mapped to {got}");
        }
    }

    #[test]
    fn ansi256_is_never_worse_than_cube_guess() {
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(51) {
                for b in (0..=255u8).step_by(85) {
                    let got = nearest_256(r, g, b);
                    assert!(got >= 16);
                    let cube = 16 + 36 * cube_step(r) + 6 * cube_step(g) + cube_step(b);
                    assert!(
                        distance_sq(xterm_rgb(got), (r, g, b))
                            <= distance_sq(xterm_rgb(cube), (r, g, b))
                    );
                }
            }
        }
    }

    #[test]
    fn ansi16_primaries() {
        assert_eq!(Ansi16.quantize(255, 0, 0, 255), Ok(TermColor::Indexed(9)));
        assert_eq!(Ansi16.quantize(0, 0, 0, 255), Ok(TermColor::Indexed(0)));
        assert_eq!(Ansi16.quantize(250, 250, 250, 255), Ok(TermColor::Indexed(15)));
    }

    #[test]
    fn cube_step_boundaries() {
        assert_eq!(cube_step(0), 0);
        assert_eq!(cube_step(47), 0);
        assert_eq!(cube_step(48), 1);
        assert_eq!(cube_step(114), 1);
        assert_eq!(cube_step(115), 2);
        assert_eq!(cube_step(255), 5);
    }
}
