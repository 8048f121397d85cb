use std::sync::atomic::{AtomicU64, Ordering};

use crate::camera::CameraSynchronizer;
use crate::coords::ViewportSize;
use crate::error::FrameError;
use crate::time::{FrameClock, FrameTime};

use super::{FrameHost, FrameUpdate, LoopConfig, LoopHandle, RenderBackend, RenderContext, ViewportMonitor};

static NEXT_LOOP_ID: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of a [`RenderScheduler`]. `Cancelled` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Idle,
    Running,
    Cancelled,
}

/// What one tick did.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickReport {
    pub frame: FrameTime,
    /// Size applied to the backend during this tick, if it changed.
    pub resized: Option<ViewportSize>,
    /// Whether the camera projection was rebuilt.
    pub projection_updated: bool,
    /// Pixel ratio applied to the backend during this tick, if any.
    pub pixel_ratio: Option<f64>,
}

/// Result of handing a frame callback to the scheduler.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TickOutcome {
    /// The frame was rendered and the next one requested.
    Rendered(TickReport),
    /// Cancellation was observed. Carries the report when the frame had
    /// already run before the cancellation was noticed.
    Cancelled(Option<TickReport>),
    /// No tick was pending (idle, finished, or a callback nobody asked for).
    Skipped,
}

/// Drives one [`RenderContext`] frame by frame.
///
/// The scheduler never blocks or sleeps: the host owns the frame cadence and
/// calls [`tick`](Self::tick) once per requested frame. Exactly one frame
/// request is outstanding while the loop runs, so ticks of one scheduler never
/// overlap and a stray host callback cannot start a second one.
///
/// Pausing is modeled as cancel + [`into_parts`](Self::into_parts) + a fresh
/// scheduler over the same context.
pub struct RenderScheduler<B: RenderBackend, U> {
    id: u64,
    state: LoopState,
    armed: bool,
    handle: LoopHandle,

    clock: FrameClock,
    monitor: ViewportMonitor,
    camera_sync: CameraSynchronizer,
    config: LoopConfig,

    context: RenderContext<B>,
    update: U,
}

impl<B, U> RenderScheduler<B, U>
where
    B: RenderBackend,
    U: FrameUpdate<B::Scene>,
{
    /// Creates an idle loop over `context`.
    ///
    /// The camera's current aspect ratio becomes the baseline for projection
    /// reconciliation.
    pub fn new(context: RenderContext<B>, update: U, config: LoopConfig) -> Self {
        let camera_sync =
            CameraSynchronizer::for_camera(&context.camera).with_epsilon(config.aspect_epsilon);

        Self {
            id: NEXT_LOOP_ID.fetch_add(1, Ordering::Relaxed),
            state: LoopState::Idle,
            armed: false,
            handle: LoopHandle::new(),
            clock: FrameClock::with_max_dt(config.max_dt),
            monitor: ViewportMonitor::new(),
            camera_sync,
            config,
            context,
            update,
        }
    }

    /// Process-unique loop id, used in log output.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether a frame request is outstanding.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn context(&self) -> &RenderContext<B> {
        &self.context
    }

    pub fn update_mut(&mut self) -> &mut U {
        &mut self.update
    }

    /// Moves the loop to `Running` and requests the first frame.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> Result<LoopHandle, FrameError> {
        if self.state != LoopState::Idle {
            return Err(FrameError::NotIdle(self.state));
        }

        self.state = LoopState::Running;
        self.armed = true;
        host.request_frame();

        log::debug!("render loop #{} started", self.id);
        Ok(self.handle.clone())
    }

    /// Cancels the loop immediately.
    ///
    /// No-op unless the loop is running. Equivalent to cancelling the handle,
    /// except the state change is visible without waiting for the next tick.
    pub fn cancel(&mut self) {
        if self.state == LoopState::Running {
            self.handle.cancel();
            self.finish();
        }
    }

    /// Runs one tick for a host frame callback carrying `raw_ms`.
    ///
    /// On error the loop is already `Cancelled` when this returns.
    pub fn tick<H: FrameHost + ?Sized>(
        &mut self,
        host: &mut H,
        raw_ms: f64,
    ) -> Result<TickOutcome, FrameError> {
        if self.state != LoopState::Running || !self.armed {
            return Ok(TickOutcome::Skipped);
        }
        self.armed = false;

        if self.handle.is_cancelled() {
            self.finish();
            return Ok(TickOutcome::Cancelled(None));
        }

        let report = match self.run_frame(host, raw_ms) {
            Ok(report) => report,
            Err(err) => {
                log::error!("render loop #{} stopped: {err}", self.id);
                self.finish();
                return Err(err);
            }
        };

        if self.handle.is_cancelled() {
            self.finish();
            return Ok(TickOutcome::Cancelled(Some(report)));
        }

        self.armed = true;
        host.request_frame();
        Ok(TickOutcome::Rendered(report))
    }

    /// Consumes the scheduler, handing back the context and update callback.
    pub fn into_parts(self) -> (RenderContext<B>, U) {
        (self.context, self.update)
    }

    fn run_frame<H: FrameHost + ?Sized>(
        &mut self,
        host: &mut H,
        raw_ms: f64,
    ) -> Result<TickReport, FrameError> {
        let frame = self.clock.tick(raw_ms);

        let mut resized = None;
        let mut projection_updated = false;
        let mut pixel_ratio = None;

        // Host size is read once; changes after this point show up next tick.
        let (width, height) = host.display_size();
        match self.monitor.observe(width, height) {
            Ok(desired) => {
                let ratio = self.config.clamp_pixel_ratio(host.pixel_ratio());
                let current = self.context.backend.output_size();
                if let Some(size) = ViewportMonitor::check_resize(current, desired) {
                    self.context.backend.set_pixel_ratio(ratio)?;
                    self.context.backend.set_output_size(size)?;
                    log::debug!("render loop #{} resized to {size} @{ratio}x", self.id);

                    projection_updated = self.camera_sync.sync(&mut self.context.camera, size);
                    resized = Some(size);
                    pixel_ratio = Some(ratio);
                } else if ratio != self.context.backend.pixel_ratio() {
                    // Logical size and aspect are unchanged; only the physical size moves.
                    self.context.backend.set_pixel_ratio(ratio)?;
                    log::debug!("render loop #{} rescaled {desired} to @{ratio}x", self.id);
                    pixel_ratio = Some(ratio);
                }
            }
            Err(err) => {
                let keeping = self
                    .monitor
                    .last_valid()
                    .map_or_else(|| "backend size".to_string(), |s| s.to_string());
                if self.monitor.invalid_streak() == 1 {
                    log::warn!("{err}; keeping {keeping}");
                } else {
                    log::trace!("{err}; still keeping {keeping}");
                }
            }
        }

        self.update
            .update(&mut self.context.scene, frame)
            .map_err(FrameError::Update)?;

        self.context
            .backend
            .render(&self.context.scene, &self.context.camera)?;

        log::trace!(
            "render loop #{} frame {} at {:.3}s",
            self.id,
            frame.frame_index,
            frame.elapsed
        );

        Ok(TickReport {
            frame,
            resized,
            projection_updated,
            pixel_ratio,
        })
    }

    fn finish(&mut self) {
        self.armed = false;
        if self.state != LoopState::Cancelled {
            self.state = LoopState::Cancelled;
            log::debug!("render loop #{} cancelled", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::camera::Camera;
    use crate::error::BackendError;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        SetRatio(f64),
        SetSize(ViewportSize),
        Project(f32),
        Update(f64),
        Render,
        Arm,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    fn drain(log: &Log) -> Vec<Event> {
        std::mem::take(&mut *log.borrow_mut())
    }

    fn size(w: u32, h: u32) -> ViewportSize {
        ViewportSize::new(w, h).unwrap()
    }

    // ── mocks ─────────────────────────────────────────────────────────────

    struct MockCamera {
        aspect: f32,
        log: Log,
    }

    impl Camera for MockCamera {
        fn aspect(&self) -> f32 {
            self.aspect
        }

        fn set_aspect(&mut self, aspect: f32) {
            self.aspect = aspect;
        }

        fn update_projection_matrix(&mut self) {
            self.log.borrow_mut().push(Event::Project(self.aspect));
        }
    }

    struct MockBackend {
        size: Option<ViewportSize>,
        ratio: f64,
        fail_size: bool,
        fail_render: bool,
        log: Log,
    }

    impl RenderBackend for MockBackend {
        type Scene = Vec<f64>;
        type Camera = MockCamera;

        fn output_size(&self) -> Option<ViewportSize> {
            self.size
        }

        fn set_output_size(&mut self, size: ViewportSize) -> Result<(), BackendError> {
            if self.fail_size {
                return Err(BackendError::Device("surface gone".into()));
            }
            self.size = Some(size);
            self.log.borrow_mut().push(Event::SetSize(size));
            Ok(())
        }

        fn pixel_ratio(&self) -> f64 {
            self.ratio
        }

        fn set_pixel_ratio(&mut self, ratio: f64) -> Result<(), BackendError> {
            self.ratio = ratio;
            self.log.borrow_mut().push(Event::SetRatio(ratio));
            Ok(())
        }

        fn render(&mut self, _: &Vec<f64>, _: &MockCamera) -> Result<(), BackendError> {
            self.log.borrow_mut().push(Event::Render);
            if self.fail_render {
                return Err(BackendError::Device("adapter lost".into()));
            }
            Ok(())
        }
    }

    struct MockHost {
        size: (u32, u32),
        ratio: f64,
        log: Log,
    }

    impl FrameHost for MockHost {
        fn display_size(&self) -> (u32, u32) {
            self.size
        }

        fn pixel_ratio(&self) -> f64 {
            self.ratio
        }

        fn request_frame(&mut self) {
            self.log.borrow_mut().push(Event::Arm);
        }
    }

    fn host(log: &Log, w: u32, h: u32) -> MockHost {
        MockHost { size: (w, h), ratio: 1.0, log: log.clone() }
    }

    fn backend(log: &Log) -> MockBackend {
        MockBackend {
            size: None,
            ratio: 1.0,
            fail_size: false,
            fail_render: false,
            log: log.clone(),
        }
    }

    fn recording_update(log: &Log) -> impl FnMut(&mut Vec<f64>, FrameTime) -> anyhow::Result<()> {
        let log = log.clone();
        move |scene: &mut Vec<f64>, frame: FrameTime| {
            scene.push(frame.elapsed);
            log.borrow_mut().push(Event::Update(frame.elapsed));
            Ok(())
        }
    }

    fn scheduler<U>(log: &Log, backend: MockBackend, update: U) -> RenderScheduler<MockBackend, U>
    where
        U: FrameUpdate<Vec<f64>>,
    {
        let camera = MockCamera { aspect: 1.0, log: log.clone() };
        let context = RenderContext::new(backend, camera, Vec::new());
        RenderScheduler::new(context, update, LoopConfig::default())
    }

    fn rendered(outcome: TickOutcome) -> TickReport {
        match outcome {
            TickOutcome::Rendered(report) => report,
            other => panic!("expected a rendered tick, got {other:?}"),
        }
    }

    // ── end to end ────────────────────────────────────────────────────────

    #[test]
    fn first_two_ticks_reconcile_once() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));

        sched.start(&mut host).unwrap();
        assert_eq!(drain(&log), vec![Event::Arm]);

        let first = rendered(sched.tick(&mut host, 1_000.0).unwrap());
        assert_eq!(first.frame.elapsed, 0.0);
        assert_eq!(first.resized, Some(size(640, 480)));
        assert!(first.projection_updated);
        assert_eq!(
            drain(&log),
            vec![
                Event::SetRatio(1.0),
                Event::SetSize(size(640, 480)),
                Event::Project(size(640, 480).aspect()),
                Event::Update(0.0),
                Event::Render,
                Event::Arm,
            ]
        );

        let second = rendered(sched.tick(&mut host, 1_016.0).unwrap());
        assert!((second.frame.elapsed - 0.016).abs() < 1e-9);
        assert_eq!(second.resized, None);
        assert!(!second.projection_updated);

        let events = drain(&log);
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::Update(t) if (t - 0.016).abs() < 1e-9));
        assert_eq!(events[1..], [Event::Render, Event::Arm]);

        assert_eq!(sched.context().scene.len(), 2);
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn each_tick_renders_before_rearming() {
        let log = Log::default();
        let mut host = host(&log, 320, 240);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        sched.tick(&mut host, 0.0).unwrap();
        drain(&log);

        for i in 1..=5 {
            rendered(sched.tick(&mut host, i as f64 * 16.0).unwrap());
            let events = drain(&log);
            assert!(matches!(events[0], Event::Update(_)));
            assert_eq!(events[1..], [Event::Render, Event::Arm]);
            assert!(sched.is_armed());
        }
    }

    #[test]
    fn callbacks_without_a_pending_frame_are_skipped() {
        let log = Log::default();
        let mut host = host(&log, 320, 240);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));

        assert_eq!(sched.tick(&mut host, 0.0).unwrap(), TickOutcome::Skipped);
        assert!(drain(&log).is_empty());
        assert_eq!(sched.state(), LoopState::Idle);
    }

    #[test]
    fn starting_twice_is_rejected() {
        let log = Log::default();
        let mut host = host(&log, 320, 240);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();

        let err = sched.start(&mut host).unwrap_err();
        assert!(matches!(err, FrameError::NotIdle(LoopState::Running)));
        assert_eq!(drain(&log), vec![Event::Arm]);
    }

    // ── reconciliation ────────────────────────────────────────────────────

    #[test]
    fn host_resize_is_applied_on_the_next_tick_only() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        sched.tick(&mut host, 0.0).unwrap();
        drain(&log);

        host.size = (1600, 900);
        let report = rendered(sched.tick(&mut host, 16.0).unwrap());
        assert_eq!(report.resized, Some(size(1600, 900)));
        assert!(report.projection_updated);

        // Same ratio, different size: backend resized, projection untouched.
        host.size = (800, 450);
        let report = rendered(sched.tick(&mut host, 32.0).unwrap());
        assert_eq!(report.resized, Some(size(800, 450)));
        assert!(!report.projection_updated);

        let report = rendered(sched.tick(&mut host, 48.0).unwrap());
        assert_eq!(report.resized, None);

        let projections = drain(&log)
            .into_iter()
            .filter(|e| matches!(e, Event::Project(_)))
            .count();
        assert_eq!(projections, 1);
    }

    #[test]
    fn invalid_host_size_skips_reconciliation_but_still_renders() {
        let log = Log::default();
        let mut host = host(&log, 640, 0);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        drain(&log);

        let report = rendered(sched.tick(&mut host, 0.0).unwrap());
        assert_eq!(report.resized, None);
        assert_eq!(drain(&log), vec![Event::Update(0.0), Event::Render, Event::Arm]);

        host.size = (640, 480);
        let report = rendered(sched.tick(&mut host, 16.0).unwrap());
        assert_eq!(report.resized, Some(size(640, 480)));
        assert_eq!(sched.state(), LoopState::Running);
    }

    #[test]
    fn collapsed_host_mid_run_keeps_the_applied_size() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        rendered(sched.tick(&mut host, 0.0).unwrap());
        drain(&log);

        host.size = (0, 480);
        let collapsed = rendered(sched.tick(&mut host, 16.0).unwrap());
        assert_eq!(collapsed.resized, None);
        assert!(!collapsed.projection_updated);
        assert_eq!(sched.context().backend.output_size(), Some(size(640, 480)));

        host.size = (640, 480);
        let restored = rendered(sched.tick(&mut host, 32.0).unwrap());
        assert_eq!(restored.resized, None);
        assert!(!restored.projection_updated);

        let events = drain(&log);
        assert!(!events.iter().any(|e| matches!(e, Event::SetSize(_) | Event::Project(_))));
        assert_eq!(events.iter().filter(|e| **e == Event::Render).count(), 2);
        assert_eq!(sched.context().backend.output_size(), Some(size(640, 480)));
        assert_eq!(sched.state(), LoopState::Running);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        host.ratio = 3.0;
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        sched.tick(&mut host, 0.0).unwrap();

        assert!(drain(&log).contains(&Event::SetRatio(2.0)));
    }

    #[test]
    fn scale_factor_change_alone_reapplies_the_ratio() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        let first = rendered(sched.tick(&mut host, 0.0).unwrap());
        assert_eq!(first.pixel_ratio, Some(1.0));
        drain(&log);

        // Window dragged onto a denser display at the same logical size.
        host.ratio = 2.0;
        let report = rendered(sched.tick(&mut host, 16.0).unwrap());
        assert_eq!(report.resized, None);
        assert!(!report.projection_updated);
        assert_eq!(report.pixel_ratio, Some(2.0));

        let events = drain(&log);
        assert_eq!(events[0], Event::SetRatio(2.0));
        assert!(!events.iter().any(|e| matches!(e, Event::SetSize(_) | Event::Project(_))));

        let steady = rendered(sched.tick(&mut host, 32.0).unwrap());
        assert_eq!(steady.pixel_ratio, None);
        assert!(!drain(&log).iter().any(|e| matches!(e, Event::SetRatio(_))));
    }

    #[test]
    fn ratio_above_the_cap_does_not_churn() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        host.ratio = 3.0;
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        sched.tick(&mut host, 0.0).unwrap();
        drain(&log);

        host.ratio = 2.5;
        let report = rendered(sched.tick(&mut host, 16.0).unwrap());
        assert_eq!(report.pixel_ratio, None);
        assert!(!drain(&log).iter().any(|e| matches!(e, Event::SetRatio(_))));
    }

    #[test]
    fn clock_regression_is_absorbed() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        sched.tick(&mut host, 500.0).unwrap();
        sched.tick(&mut host, 600.0).unwrap();

        let report = rendered(sched.tick(&mut host, 550.0).unwrap());
        assert!((report.frame.elapsed - 0.1).abs() < 1e-9);
        assert_eq!(sched.state(), LoopState::Running);
    }

    // ── cancellation ──────────────────────────────────────────────────────

    #[test]
    fn handle_cancel_takes_effect_at_the_next_tick() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        let handle = sched.start(&mut host).unwrap();
        sched.tick(&mut host, 0.0).unwrap();
        drain(&log);

        handle.cancel();
        assert_eq!(sched.state(), LoopState::Running);

        assert_eq!(sched.tick(&mut host, 16.0).unwrap(), TickOutcome::Cancelled(None));
        assert_eq!(sched.state(), LoopState::Cancelled);
        assert!(drain(&log).is_empty());

        // Terminal: further callbacks and cancels change nothing.
        handle.cancel();
        sched.cancel();
        assert_eq!(sched.tick(&mut host, 32.0).unwrap(), TickOutcome::Skipped);
        assert!(drain(&log).is_empty());
        assert_eq!(sched.state(), LoopState::Cancelled);
    }

    #[test]
    fn cancel_during_update_finishes_the_frame_without_rearming() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let slot: Rc<RefCell<Option<LoopHandle>>> = Rc::default();

        let update = {
            let slot = slot.clone();
            let log = log.clone();
            move |_: &mut Vec<f64>, frame: FrameTime| -> anyhow::Result<()> {
                log.borrow_mut().push(Event::Update(frame.elapsed));
                if let Some(handle) = slot.borrow().as_ref() {
                    handle.cancel();
                }
                Ok(())
            }
        };

        let mut sched = scheduler(&log, backend(&log), update);
        *slot.borrow_mut() = Some(sched.start(&mut host).unwrap());
        drain(&log);

        match sched.tick(&mut host, 0.0).unwrap() {
            TickOutcome::Cancelled(Some(report)) => assert_eq!(report.frame.elapsed, 0.0),
            other => panic!("unexpected outcome {other:?}"),
        }
        let events = drain(&log);
        assert_eq!(events.last(), Some(&Event::Render));
        assert!(!events.contains(&Event::Arm));
        assert_eq!(sched.state(), LoopState::Cancelled);
    }

    #[test]
    fn cancelling_an_idle_loop_is_a_no_op() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));

        sched.cancel();
        LoopHandle::default().cancel();
        assert_eq!(sched.state(), LoopState::Idle);

        sched.start(&mut host).unwrap();
        assert_eq!(sched.state(), LoopState::Running);
    }

    #[test]
    fn direct_cancel_is_immediate() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        let handle = sched.start(&mut host).unwrap();

        sched.cancel();
        assert_eq!(sched.state(), LoopState::Cancelled);
        assert!(handle.is_cancelled());
        assert!(!sched.is_armed());
        assert_eq!(sched.tick(&mut host, 0.0).unwrap(), TickOutcome::Skipped);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn backend_failure_cancels_the_loop() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut failing = backend(&log);
        failing.fail_render = true;
        let mut sched = scheduler(&log, failing, recording_update(&log));
        sched.start(&mut host).unwrap();
        drain(&log);

        let err = sched.tick(&mut host, 0.0).unwrap_err();
        assert!(matches!(err, FrameError::BackendUnavailable(BackendError::Device(_))));
        assert!(!err.is_transient());
        assert_eq!(sched.state(), LoopState::Cancelled);
        assert!(!drain(&log).contains(&Event::Arm));
        assert_eq!(sched.tick(&mut host, 16.0).unwrap(), TickOutcome::Skipped);
    }

    #[test]
    fn rejected_resize_cancels_before_update() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut failing = backend(&log);
        failing.fail_size = true;
        let mut sched = scheduler(&log, failing, recording_update(&log));
        sched.start(&mut host).unwrap();
        drain(&log);

        let err = sched.tick(&mut host, 0.0).unwrap_err();
        assert!(matches!(err, FrameError::BackendUnavailable(BackendError::Device(_))));
        assert_eq!(sched.state(), LoopState::Cancelled);
        assert!(!sched.is_armed());

        // Ratio went through; size, update, render and re-arm never happened.
        assert_eq!(drain(&log), vec![Event::SetRatio(1.0)]);
        assert!(sched.context().scene.is_empty());

        assert_eq!(sched.tick(&mut host, 16.0).unwrap(), TickOutcome::Skipped);
        assert!(drain(&log).is_empty());
    }

    #[test]
    fn update_failure_propagates_and_skips_render() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let update = |_: &mut Vec<f64>, _: FrameTime| -> anyhow::Result<()> {
            anyhow::bail!("scene exploded")
        };
        let mut sched = scheduler(&log, backend(&log), update);
        sched.start(&mut host).unwrap();
        drain(&log);

        let err = sched.tick(&mut host, 0.0).unwrap_err();
        assert!(matches!(err, FrameError::Update(_)));
        assert!(err.to_string().contains("scene exploded"));

        let events = drain(&log);
        assert!(!events.contains(&Event::Render));
        assert!(!events.contains(&Event::Arm));
        assert_eq!(sched.state(), LoopState::Cancelled);
    }

    // ── restart ───────────────────────────────────────────────────────────

    #[test]
    fn fresh_loop_over_the_same_context_restarts_the_clock() {
        let log = Log::default();
        let mut host = host(&log, 640, 480);
        let mut sched = scheduler(&log, backend(&log), recording_update(&log));
        sched.start(&mut host).unwrap();
        sched.tick(&mut host, 0.0).unwrap();
        sched.tick(&mut host, 5_000.0).unwrap();
        sched.cancel();
        let first_id = sched.id();

        let (context, update) = sched.into_parts();
        let mut resumed = RenderScheduler::new(context, update, LoopConfig::default());
        assert_ne!(resumed.id(), first_id);
        resumed.start(&mut host).unwrap();
        drain(&log);

        let report = rendered(resumed.tick(&mut host, 9_000.0).unwrap());
        assert_eq!(report.frame.elapsed, 0.0);
        // Backend and camera already match the host.
        assert_eq!(report.resized, None);
        assert!(!report.projection_updated);
        assert_eq!(resumed.context().scene.len(), 3);
    }
}
