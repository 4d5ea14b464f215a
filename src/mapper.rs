//! Temperature to swatch quantization.

use crate::{Error, Palette, Result, RGBColor, Swatch};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The temperature bounds (°C) over which a palette is spread linearly.
///
/// Temperatures below `min` get the first swatch, temperatures above
/// `max` the last one.  The range is global rather than derived from a
/// year of data so that a given temperature always gets the same color,
/// whatever the city or year.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde",
           derive(Serialize, Deserialize),
           serde(try_from = "Bounds", into = "Bounds"))]
pub struct ClampRange {
    min: f64,
    max: f64, // Invariant: min < max, both finite, max - min finite
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct Bounds { min: f64, max: f64 }

#[cfg(feature = "serde")]
impl TryFrom<Bounds> for ClampRange {
    type Error = Error;
    fn try_from(b: Bounds) -> Result<Self> { ClampRange::new(b.min, b.max) }
}

#[cfg(feature = "serde")]
impl From<ClampRange> for Bounds {
    fn from(r: ClampRange) -> Self { Bounds { min: r.min, max: r.max } }
}

impl ClampRange {
    /// −20 °C to 40 °C, suited to most climates.
    pub const WIDE: ClampRange = ClampRange { min: -20., max: 40. };

    /// −5 °C to 35 °C, for temperate climates.
    pub const NARROW: ClampRange = ClampRange { min: -5., max: 35. };

    /// Fails with [`Error::InvalidRange`] unless `min < max` and both
    /// bounds are finite.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_finite() && max.is_finite() && min < max
            && (max - min).is_finite() {
            Ok(ClampRange { min, max })
        } else {
            Err(Error::InvalidRange { min, max })
        }
    }

    #[inline]
    pub fn min(&self) -> f64 { self.min }

    #[inline]
    pub fn max(&self) -> f64 { self.max }

    /// Map `temp` to \[0, 1\], clamping it to the range first.
    #[inline]
    fn normalize(&self, temp: f64) -> f64 {
        let t = temp.clamp(self.min, self.max);
        (t - self.min) / (self.max - self.min)
    }

    /// Bucket of the finite `temp` among `last + 1` buckets.
    #[inline]
    fn bucket(&self, temp: f64, last: usize) -> usize {
        let i = (self.normalize(temp) * last as f64).floor() as usize;
        i.min(last)
    }
}

impl Default for ClampRange {
    fn default() -> Self { ClampRange::WIDE }
}

/// Return the index, in a palette of `len` swatches, of the bucket
/// `temp` falls in.
///
/// ```
/// use temperature_blanket::{bucket_index, ClampRange};
/// let r = ClampRange::WIDE;
/// assert_eq!(bucket_index(10., 8, r).unwrap(), 3);
/// assert_eq!(bucket_index(40., 8, r).unwrap(), 7);
/// assert_eq!(bucket_index(100., 8, r).unwrap(), 7);
/// ```
pub fn bucket_index(temp: f64, len: usize, range: ClampRange)
                    -> Result<usize> {
    if !temp.is_finite() { return Err(Error::NonFiniteTemperature(temp)) }
    if len < 2 { return Err(Error::PaletteTooShort(len)) }
    Ok(range.bucket(temp, len - 1))
}

/// Return the color and yarn name of the swatch of `palette` for
/// `temp`, spreading the palette linearly over \[`min_temp`,
/// `max_temp`\].
///
/// Temperatures outside the range are clamped to it.  Non-finite
/// temperatures and empty or reversed ranges are rejected with an
/// [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput) error.
///
/// ```
/// use rgb::RGB8;
/// use temperature_blanket::{map_temperature, RGBColor};
/// let p = RGB8::autumn();
/// let (color, name) = map_temperature(-35., &p, -20., 40.).unwrap();
/// assert_eq!(name, "Navy Blue");
/// assert_eq!(color.to_hex(), "#2c3e50");
/// ```
pub fn map_temperature<Color: RGBColor>(
    temp: f64, palette: &Palette<Color>, min_temp: f64, max_temp: f64)
    -> Result<(Color, &str)> {
    let range = ClampRange::new(min_temp, max_temp)?;
    let i = bucket_index(temp, palette.len(), range)?;
    let s = &palette.swatches()[i];
    Ok((s.color(), s.name()))
}


/// A palette spread over a clamp range.
#[derive(Clone, Debug)]
pub struct ColorMapper<Color> {
    palette: Palette<Color>,
    range: ClampRange,
}

impl<Color: RGBColor> ColorMapper<Color> {
    pub fn new(palette: Palette<Color>, range: ClampRange) -> Self {
        ColorMapper { palette, range }
    }

    pub fn palette(&self) -> &Palette<Color> { &self.palette }

    pub fn range(&self) -> ClampRange { self.range }

    /// Index of the swatch for `temp`.
    pub fn index(&self, temp: f64) -> Result<usize> {
        bucket_index(temp, self.palette.len(), self.range)
    }

    /// Swatch for `temp`.
    pub fn map(&self, temp: f64) -> Result<&Swatch<Color>> {
        let i = self.index(temp)?;
        Ok(&self.palette.swatches()[i])
    }

    /// Return an iterator yielding, for each swatch, the lowest
    /// temperature that maps to it together with the swatch.
    ///
    /// The first threshold is the range minimum, the last one is the
    /// range maximum (only temperatures at or above it get the last
    /// swatch).
    ///
    /// ```
    /// use rgb::RGB8;
    /// use temperature_blanket::{ClampRange, ColorMapper, RGBColor};
    /// let m = ColorMapper::new(RGB8::sunset(), ClampRange::NARROW);
    /// let (t, s) = m.legend().nth(2).unwrap();
    /// assert!((t - (-5. + 2. * 40. / 7.)).abs() < 1e-12);
    /// assert_eq!(s.name(), "Magenta");
    /// ```
    pub fn legend(&self) -> Legend<'_, Color> {
        let n = self.palette.len();
        Legend { swatches: self.palette.swatches(), range: self.range,
                 a: self.range.min, b: self.range.max,
                 flast: (n - 1) as f64, last: n - 1,
                 i: 0, j: n - 1 }
    }
}

/// Iterator over the thresholds of a [`ColorMapper`].
///
/// Created by [`ColorMapper::legend`].
pub struct Legend<'a, Color> {
    swatches: &'a [Swatch<Color>],
    range: ClampRange,
    a: f64, // range minimum
    b: f64, // range maximum
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j + 1)
    j: usize, // last position to be consumed
}

impl<'a, Color> Legend<'a, Color> {
    /// Return the threshold and swatch of the position `k` (assuming
    /// it is in the range `0 ..= self.last`).
    fn item(&self, k: usize) -> (f64, &'a Swatch<Color>) {
        if k == 0 { return (self.a, &self.swatches[0]) }
        let mut x = if k == self.last {
            self.b
        } else {
            let t = k as f64 / self.flast;
            (1. - t) * self.a + t * self.b
        };
        // The interpolation may be off by a few ulps; move `x` to the
        // exact lowest value of bucket `k`.
        while self.range.bucket(x, self.last) < k { x = next_up(x) }
        while x > self.a && self.range.bucket(next_down(x), self.last) >= k {
            x = next_down(x)
        }
        (x, &self.swatches[k])
    }

    fn remaining(&self) -> usize {
        if self.i > self.j || self.i > self.last { 0 }
        else { self.j - self.i + 1 }
    }
}

/// Smallest float greater than the finite `x`.
fn next_up(x: f64) -> f64 {
    if x == 0. { f64::from_bits(1) }
    else if x > 0. { f64::from_bits(x.to_bits() + 1) }
    else { f64::from_bits(x.to_bits() - 1) }
}

/// Largest float smaller than the finite `x`.
fn next_down(x: f64) -> f64 { -next_up(-x) }

impl<'a, Color> Iterator for Legend<'a, Color> {
    type Item = (f64, &'a Swatch<Color>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 { return None }
        let item = self.item(self.i);
        self.i += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }
}

impl<Color> ExactSizeIterator for Legend<'_, Color> {}

impl<Color> DoubleEndedIterator for Legend<'_, Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 { return None }
        let item = self.item(self.j);
        if self.j == 0 {
            self.i = 1
        } else {
            self.j -= 1;
        }
        Some(item)
    }
}
