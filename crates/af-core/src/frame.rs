use crate::error::CoreError;

/// Image décodée, immuable après chargement.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use af_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use af_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Buffer rempli d'une couleur unie (alpha opaque).
    ///
    /// # Example
    /// ```
    /// use af_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, (10, 20, 30));
    /// assert_eq!(fb.pixel(1, 1), (10, 20, 30, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        let mut fb = Self::new(width, height);
        for px in fb.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[rgb.0, rgb.1, rgb.2, 255]);
        }
        fb
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// Out-of-bounds coordinates read as transparent black.
    ///
    /// # Example
    /// ```
    /// use af_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// let (r, g, b, a) = fb.pixel(0, 0);
    /// assert_eq!((r, g, b, a), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0, 0);
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        match self.data.get(idx..idx + 4) {
            Some(px) => (px[0], px[1], px[2], px[3]),
            None => (0, 0, 0, 0),
        }
    }

    /// Écrit le pixel (x, y). No-op hors limites.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if let Some(px) = self.data.get_mut(idx..idx + 4) {
            px.copy_from_slice(&[rgba.0, rgba.1, rgba.2, rgba.3]);
        }
    }

    /// Luminance perceptuelle BT.709, tronquée, sur les canaux prémultipliés par alpha.
    ///
    /// Integer form of `floor(0.2126 R + 0.7152 G + 0.0722 B)`. A fully
    /// transparent pixel is black whatever its color.
    ///
    /// # Example
    /// ```
    /// use af_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(1, 1);
    /// fb.data[0] = 255; fb.data[1] = 255; fb.data[2] = 255; fb.data[3] = 255;
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let (r, g, b, a) = self.pixel(x, y);
        let (r, g, b) = (premultiply(r, a), premultiply(g, a), premultiply(b, a));
        ((r * 2126 + g * 7152 + b * 722) / 10000) as u8
    }
}

/// Prémultiplie un canal 8 bits par alpha, en passant par 16 bits.
///
/// Channels are widened to 16 bits (`c * 0x101`), multiplied by the widened
/// alpha over `0xffff`, then narrowed back with `>> 8`. Opaque pixels are
/// unchanged.
#[inline(always)]
fn premultiply(channel: u8, alpha: u8) -> u32 {
    let c16 = u32::from(channel) * 0x101;
    let a16 = u32::from(alpha) * 0x101;
    (c16 * a16 / 0xffff) >> 8
}

/// Taille en pixels de la région représentée par un caractère.
///
/// Both factors are at least 1.
///
/// # Example
/// ```
/// use af_core::frame::CellScale;
/// let scale = CellScale::new(2, 4).unwrap();
/// assert_eq!((scale.x(), scale.y()), (2, 4));
/// assert!(CellScale::new(0, 1).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellScale {
    x: u32,
    y: u32,
}

impl CellScale {
    /// One character per pixel.
    pub const UNIT: Self = Self { x: 1, y: 1 };

    /// # Errors
    /// Returns [`CoreError::InvalidScale`] if either factor is zero.
    pub fn new(x: u32, y: u32) -> Result<Self, CoreError> {
        if x == 0 || y == 0 {
            return Err(CoreError::InvalidScale { x, y });
        }
        Ok(Self { x, y })
    }

    /// Horizontal step in pixels.
    #[must_use]
    pub fn x(self) -> u32 {
        self.x
    }

    /// Vertical step in pixels.
    #[must_use]
    pub fn y(self) -> u32 {
        self.y
    }
}

impl Default for CellScale {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Frame ASCII rendue : une ligne par rangée de cellules, chacune terminée par `\n`.
///
/// # Example
/// ```
/// use af_core::frame::AsciiFrame;
/// let frame = AsciiFrame::from_rows(vec!["ab".into(), "cd".into()], 2);
/// assert_eq!(frame.as_str(), "ab\ncd\n");
/// assert_eq!(frame.rows(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiFrame {
    text: String,
    rows: usize,
    cols: usize,
}

impl AsciiFrame {
    /// Assemble rows into one newline-terminated block.
    ///
    /// The buffer is sized once from the sum of the row lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<String>, cols: usize) -> Self {
        let capacity = rows.iter().map(|r| r.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for row in &rows {
            text.push_str(row);
            text.push('\n');
        }
        Self {
            text,
            rows: rows.len(),
            cols,
        }
    }

    /// Texte complet de la frame.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of lines.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Characters per line.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }
}
