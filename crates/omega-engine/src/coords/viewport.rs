use std::fmt;

use crate::error::FrameError;

/// Drawable surface size in device-independent (logical) pixels.
///
/// Both dimensions are strictly positive; the constructor rejects zero sizes,
/// which hosts commonly report while a window is minimized.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ViewportSize {
    width: u32,
    height: u32,
}

impl ViewportSize {
    /// Validates a host-reported size.
    pub fn new(width: u32, height: u32) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidViewportSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Builds a size, raising zero dimensions to one.
    #[inline]
    pub const fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    #[inline]
    pub const fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Width divided by height.
    #[inline]
    pub fn aspect(self) -> f32 {
        (self.width as f64 / self.height as f64) as f32
    }

    /// Size in physical pixels for the given device pixel ratio.
    ///
    /// Each dimension is rounded and never drops below one pixel.
    pub fn to_physical(self, pixel_ratio: f64) -> (u32, u32) {
        let scale = |v: u32| ((v as f64 * pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
