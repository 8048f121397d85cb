use crate::coords::ViewportSize;
use crate::error::FrameError;

/// Detects drift between the backend output size and the host display size.
///
/// The monitor keeps only the last valid host size, so a frame reporting a
/// zero dimension (minimized window, mid-layout host) can fall back to it.
#[derive(Debug, Clone, Default)]
pub struct ViewportMonitor {
    last_valid: Option<ViewportSize>,
    invalid_streak: u32,
}

impl ViewportMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a host-reported size, remembering it when valid.
    ///
    /// An invalid size leaves the remembered one untouched.
    pub fn observe(&mut self, width: u32, height: u32) -> Result<ViewportSize, FrameError> {
        match ViewportSize::new(width, height) {
            Ok(size) => {
                self.last_valid = Some(size);
                self.invalid_streak = 0;
                Ok(size)
            }
            Err(err) => {
                self.invalid_streak = self.invalid_streak.saturating_add(1);
                Err(err)
            }
        }
    }

    /// Consecutive invalid observations, `1` on the first one after a valid
    /// size.
    pub fn invalid_streak(&self) -> u32 {
        self.invalid_streak
    }

    /// Last valid host size seen by [`observe`](Self::observe).
    pub fn last_valid(&self) -> Option<ViewportSize> {
        self.last_valid
    }

    /// Returns the size to apply, or `None` when the backend already matches.
    ///
    /// `current` is `None` until the backend has been sized once, which always
    /// reports a resize.
    #[inline]
    pub fn check_resize(
        current: Option<ViewportSize>,
        desired: ViewportSize,
    ) -> Option<ViewportSize> {
        (current != Some(desired)).then_some(desired)
    }
}
