/// 10 caractères — du plus clair au plus dense.
pub const CHARSET_COMPACT: &str = " .:-=+*#%@";

/// Number of glyphs in [`CHARSET_COMPACT`].
pub const RAMP_LEN: usize = 10;

/// Lookup table mapping luminance [0..255] → character.
///
/// Pre-computed once for O(1) per-cell cost. The ramp is fixed at build time.
///
/// # Example
/// ```
/// use af_core::charset::LuminanceLut;
/// let lut = LuminanceLut::new();
/// assert_eq!(lut.map(0), ' ');
/// assert_eq!(lut.map(255), '@');
/// ```
#[derive(Clone, Debug)]
pub struct LuminanceLut {
    lut: [char; 256],
}

impl Default for LuminanceLut {
    fn default() -> Self {
        Self::new()
    }
}

impl LuminanceLut {
    /// Build the LUT over [`CHARSET_COMPACT`].
    ///
    /// Slot `i` holds `ramp[i * (len - 1) / 255]`.
    #[must_use]
    pub fn new() -> Self {
        let mut ramp = [' '; RAMP_LEN];
        for (slot, ch) in ramp.iter_mut().zip(CHARSET_COMPACT.chars()) {
            *slot = ch;
        }
        let mut lut = [' '; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            let idx = (i * (RAMP_LEN - 1) / 255).min(RAMP_LEN - 1);
            *slot = ramp[idx];
        }
        Self { lut }
    }

    /// Map a luminance value [0..255] to a character.
    ///
    /// # Example
    /// ```
    /// use af_core::charset::LuminanceLut;
    /// let lut = LuminanceLut::new();
    /// assert_eq!(lut.map(142), '+');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }

    /// Map an unclamped brightness, saturating to [0..255] first.
    ///
    /// # Example
    /// ```
    /// use af_core::charset::LuminanceLut;
    /// let lut = LuminanceLut::new();
    /// assert_eq!(lut.map_clamped(-5), lut.map(0));
    /// assert_eq!(lut.map_clamped(300), lut.map(255));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn map_clamped(&self, brightness: i32) -> char {
        self.map(brightness.clamp(0, 255) as u8)
    }
}
