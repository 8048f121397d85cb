use crate::time::FrameTime;

/// Host side of a render loop: display size source + per-frame scheduling.
pub trait FrameHost {
    /// Current drawable size in logical pixels. Read once per tick.
    fn display_size(&self) -> (u32, u32);

    /// Current device pixel ratio.
    fn pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Asks for one more frame callback.
    ///
    /// The host answers by calling
    /// [`RenderScheduler::tick`](super::RenderScheduler::tick) with a raw
    /// timestamp in milliseconds.
    fn request_frame(&mut self);
}

/// Per-frame scene mutation supplied by the loop owner.
///
/// Implemented for any `FnMut(&mut S, FrameTime) -> anyhow::Result<()>`.
pub trait FrameUpdate<S> {
    fn update(&mut self, scene: &mut S, frame: FrameTime) -> anyhow::Result<()>;
}

impl<S, F> FrameUpdate<S> for F
where
    F: FnMut(&mut S, FrameTime) -> anyhow::Result<()>,
{
    fn update(&mut self, scene: &mut S, frame: FrameTime) -> anyhow::Result<()> {
        self(scene, frame)
    }
}
