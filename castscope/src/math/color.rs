//! Color data types. This module is private but reexported by its parent.

use core::fmt;

/// A floating-point RGBA color value, as stored in material base colors and
/// mesh vertex colors.
///
/// * Each component must have a non-NaN value.
/// * Components are in the same space the renderer uses; this type does not convert them.
/// * The alpha is not premultiplied.
#[derive(Clone, Copy, PartialEq)]
pub struct Rgba {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Rgba {
    /// Transparent black (all components zero).
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    /// Black.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    /// Nominal white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Pure green; the color hit objects are painted while highlighted.
    pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);

    /// Constructs a color from components.
    ///
    /// Panics if any component is NaN.
    #[inline]
    #[track_caller]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        if r.is_nan() || g.is_nan() || b.is_nan() || a.is_nan() {
            panic!("color component is NaN");
        }
        Self { r, g, b, a }
    }

    /// Returns the red color component.
    #[inline]
    pub const fn red(self) -> f32 {
        self.r
    }
    /// Returns the green color component.
    #[inline]
    pub const fn green(self) -> f32 {
        self.g
    }
    /// Returns the blue color component.
    #[inline]
    pub const fn blue(self) -> f32 {
        self.b
    }
    /// Returns the alpha component.
    #[inline]
    pub const fn alpha(self) -> f32 {
        self.a
    }

    /// Returns this color with its alpha replaced.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "Rgba({:?}, {:?}, {:?}, {:?})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl From<[f32; 4]> for Rgba {
    #[track_caller]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(color: Rgba) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}
