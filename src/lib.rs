//! Temperature blankets: one row of yarn per day, colored by that
//! day's temperature.
//!
//! - [`map_temperature`] and [`ColorMapper`] turn a temperature into a
//!   [`Swatch`] of a [`Palette`], given a [`ClampRange`].
//! - [`ProgressLedger`] records which days have been knitted.
//! - [`Project`] ties a year of [`TemperatureSample`]s, a palette, a
//!   clamp range and a ledger together and produces [`DayRecord`]s and
//!   [`Progress`] figures for display code.
//!
//! Several yarn palettes are provided through the [`RGBColor`] trait:
//! [`RGBColor::autumn`], [`RGBColor::ocean`], [`RGBColor::forest`],
//! [`RGBColor::sunset`], [`RGBColor::nordic`], [`RGBColor::meadow`] and
//! [`RGBColor::blue_red`].
//!
//! Fetching the temperatures themselves is left to the caller: samples
//! are expected to be already validated daily readings in °C.

use std::marker::PhantomData;
use rgb::{RGBA, RGB8, RGB16, RGBA8, RGBA16};

mod error;
mod ledger;
mod mapper;
mod palettes;
mod project;

use palettes::ty::PaletteData;
pub use error::{Error, ErrorKind, Result};
pub use ledger::{LedgerRecord, ProgressLedger, SharedLedger};
pub use mapper::{bucket_index, map_temperature, ClampRange, ColorMapper,
                 Legend};
pub use project::{page, page_count, DayRecord, Progress, Project,
                  TemperatureKind, TemperatureSample, TemperatureSummary,
                  DEFAULT_ROWS_PER_PAGE};

/// Parse `#rrggbb` or `#rgb` (case insensitive) into components in
/// \[0, 255\].
pub(crate) fn parse_hex(s: &str) -> Option<RGBA<f64>> {
    let hex = s.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) { return None }
    let digit = |i: usize, w: usize| {
        u8::from_str_radix(&hex[i .. i + w], 16).ok()
    };
    let (r, g, b) = match hex.len() {
        6 => (digit(0, 2)?, digit(2, 2)?, digit(4, 2)?),
        3 => (digit(0, 1)? * 17, digit(1, 1)? * 17, digit(2, 1)? * 17),
        _ => return None,
    };
    Some(RGBA { r: r as f64, g: g as f64, b: b as f64, a: 255. })
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized + Copy {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Parse a CSS-style hex color, `#rrggbb` or `#rgb`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use temperature_blanket::RGBColor;
    /// let c = RGB8::from_hex("#C0392B").unwrap();
    /// assert_eq!(c, RGB8::new(0xc0, 0x39, 0x2b));
    /// ```
    fn from_hex(s: &str) -> Result<Self> {
        parse_hex(s).map(Self::from_rgba)
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }

    /// Format the color as `#rrggbb` (alpha is dropped).
    fn to_hex(&self) -> String {
        let RGBA { r, g, b, .. } = self.to_rgba();
        let byte = |x: f64| x.round().clamp(0., 255.) as u8;
        format!("#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))
    }

    /// Iterate over all built-in yarn palettes.
    fn palettes() -> PaletteIter<Self> {
        PaletteIter::new(&palettes::ALL_PALETTES[..])
    }

    /// Look up a built-in palette by name, ignoring case.
    ///
    /// ```
    /// use rgb::RGB8;
    /// use temperature_blanket::RGBColor;
    /// let p = RGB8::palette_named("deep ocean").unwrap();
    /// assert_eq!(p.name(), "Deep Ocean");
    /// ```
    fn palette_named(name: &str) -> Option<Palette<Self>> {
        Self::palettes().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Autumn tones, navy blue through burgundy.
    #[inline]
    fn autumn() -> Palette<Self> { Palette::builtin(&palettes::AUTUMN) }

    /// Ocean blues, midnight blue through off white.
    #[inline]
    fn ocean() -> Palette<Self> { Palette::builtin(&palettes::OCEAN) }

    /// Forest greens, dark to pastel.
    #[inline]
    fn forest() -> Palette<Self> { Palette::builtin(&palettes::FOREST) }

    /// Sunset, deep violet through lemon yellow.
    #[inline]
    fn sunset() -> Palette<Self> { Palette::builtin(&palettes::SUNSET) }

    /// Winter greys, charcoal through snow white.
    #[inline]
    fn nordic() -> Palette<Self> { Palette::builtin(&palettes::NORDIC) }

    /// Spring pinks, dark to pale.
    #[inline]
    fn meadow() -> Palette<Self> { Palette::builtin(&palettes::MEADOW) }

    /// Diverging scheme: dark blue for cold days, dark red for hot ones.
    #[inline]
    fn blue_red() -> Palette<Self> { Palette::builtin(&palettes::BLUE_RED) }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: c.r as u8,  g: c.g as u8,  b: c.b as u8 }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB16 { r: c.r as u16,  g: c.g as u16,  b: c.b as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: c.r as u8,  g: c.g as u8,  b: c.b as u8, a: c.a as u8 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA16 { r: c.r as u16,  g: c.g as u16,  b: c.b as u16, a: c.a as u16 }
    }
}


/// One temperature bucket of a [`Palette`]: a display color and the
/// name of the yarn to use.
#[derive(Clone, Debug, PartialEq)]
pub struct Swatch<Color> {
    color: Color,
    name: String,
}

impl<Color: RGBColor> Swatch<Color> {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Swatch { color, name: name.into() }
    }

    /// The display color.
    #[inline]
    pub fn color(&self) -> Color { self.color }

    /// The yarn name.
    #[inline]
    pub fn name(&self) -> &str { &self.name }
}


/// An ordered set of swatches, coldest first.
///
/// A palette is immutable once built and always holds at least 2
/// swatches.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette<Color> {
    name: String,
    description: String,
    swatches: Vec<Swatch<Color>>, // Invariant: length ≥ 2
}

impl<Color: RGBColor> Palette<Color> {
    fn builtin(data: &'static PaletteData) -> Self {
        let swatches = data.rgb.iter().zip(&data.yarn)
            .map(|(&c, &n)| Swatch::new(Color::from_rgba(c), n))
            .collect();
        Palette { name: data.name.to_string(),
                  description: data.description.to_string(),
                  swatches }
    }

    /// Create a palette from its swatches, coldest first.
    ///
    /// Fails with [`Error::PaletteTooShort`] if fewer than 2 swatches
    /// are given.
    pub fn new(name: impl Into<String>, swatches: Vec<Swatch<Color>>)
               -> Result<Self> {
        if swatches.len() < 2 {
            return Err(Error::PaletteTooShort(swatches.len()))
        }
        Ok(Palette { name: name.into(), description: String::new(),
                     swatches })
    }

    /// Create a palette from `(hex color, yarn name)` pairs.
    ///
    /// ```
    /// use rgb::RGB8;
    /// use temperature_blanket::Palette;
    /// let p = Palette::<RGB8>::from_hex(
    ///     "Two tone", &[("#0000ff", "Blue"), ("#ff0000", "Red")]).unwrap();
    /// assert_eq!(p.len(), 2);
    /// assert_eq!(p.swatch(1).unwrap().name(), "Red");
    /// ```
    pub fn from_hex(name: impl Into<String>, colors: &[(&str, &str)])
                    -> Result<Self> {
        let swatches = colors.iter()
            .map(|&(hex, yarn)| Ok(Swatch::new(Color::from_hex(hex)?, yarn)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(name, swatches)
    }

    /// Attach a short description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the number of swatches in the palette (at least 2).
    pub fn len(&self) -> usize { self.swatches.len() }

    pub fn name(&self) -> &str { &self.name }

    pub fn description(&self) -> &str { &self.description }

    /// Returns the swatch at `index` (0 is the coldest bucket).
    pub fn swatch(&self, index: usize) -> Option<&Swatch<Color>> {
        self.swatches.get(index)
    }

    pub fn swatches(&self) -> &[Swatch<Color>] { &self.swatches }

    /// Returns the colors of the palette.
    pub fn colors(&self) -> Vec<Color> {
        self.swatches.iter().map(|s| s.color).collect()
    }

    /// Returns the yarn names of the palette.
    pub fn names(&self) -> Vec<&str> {
        self.swatches.iter().map(|s| s.name.as_str()).collect()
    }
}


/// An exact size iterator over the built-in [`Palette`]s.
#[derive(Clone, Copy)]
pub struct PaletteIter<Color> {
    palettes: &'static [&'static PaletteData],
    i: usize, // first position to be consumed (i < j)
    j: usize, // position after the last one to be consumed
    color: PhantomData<Color>,
}

impl<Color: RGBColor> PaletteIter<Color> {
    fn new(palettes: &'static [&'static PaletteData]) -> Self {
        Self { palettes, i: 0, j: palettes.len(),
               color: PhantomData }
    }
}

impl<Color> Iterator for PaletteIter<Color>
where Color: RGBColor {
    type Item = Palette<Color>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.j { return None }
        let x = Palette::builtin(self.palettes[self.i]);
        self.i += 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.j - self.i;
        (len, Some(len))
    }
}

impl<Color: RGBColor> ExactSizeIterator for PaletteIter<Color> {}

impl<Color: RGBColor> DoubleEndedIterator for PaletteIter<Color>{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i >= self.j { return None }
        self.j -= 1;
        Some(Palette::builtin(self.palettes[self.j]))
    }
}
