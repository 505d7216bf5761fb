//! Resize-aware render loop
//!
//! The loop is driven by the host's frame primitive: each executed frame asks
//! the [`FrameScheduler`] for exactly one more. Before every draw the surface's
//! backing buffer is matched to its displayed size and the camera's aspect
//! ratio follows, so the draw never sees a stale projection.

use spot_core::SceneGraph;

use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::error::RenderError;
use crate::traits::{FrameScheduler, RenderEngine, RenderSurface};

/// Whether a frame callback is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// No frame scheduled
    #[default]
    Idle,
    /// One frame callback pending
    Scheduled,
}

/// Result of [`RenderLoop::run_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No frame was scheduled; nothing happened
    Skipped,
    /// A frame was drawn and the next one scheduled
    Rendered {
        /// Whether the backing buffer was resized before the draw
        resized: bool,
    },
}

/// Per-frame state borrowed from the session
pub struct FrameInputs<'a> {
    /// Scene to draw
    pub scene: &'a SceneGraph,
    /// Camera to draw from
    pub camera: &'a mut PerspectiveCamera,
    /// Orbit controls driving the camera
    pub controls: &'a mut OrbitControls,
    /// Host frame primitive
    pub scheduler: &'a dyn FrameScheduler,
}

/// Self-rescheduling render loop
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    update_controls_each_frame: bool,
    frames: u64,
}

impl RenderLoop {
    /// Create an idle loop
    pub fn new(update_controls_each_frame: bool) -> Self {
        Self {
            state: LoopState::Idle,
            update_controls_each_frame,
            frames: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Schedule the first frame; does nothing if one is already pending
    pub fn start(&mut self, scheduler: &dyn FrameScheduler) {
        if self.state == LoopState::Scheduled {
            return;
        }
        self.state = LoopState::Scheduled;
        scheduler.request_frame();
        tracing::debug!("Render loop started");
    }

    /// Run the pending frame, if any
    ///
    /// On an engine error the error is returned and no further frame is
    /// scheduled; the loop stays idle until [`RenderLoop::start`] is called.
    pub fn run_frame<S, E>(
        &mut self,
        surface: &mut S,
        engine: &mut E,
        frame: FrameInputs<'_>,
    ) -> Result<FrameOutcome, RenderError>
    where
        S: RenderSurface,
        E: RenderEngine<S>,
    {
        if self.state != LoopState::Scheduled {
            return Ok(FrameOutcome::Skipped);
        }
        self.state = LoopState::Idle;

        if self.update_controls_each_frame {
            frame.controls.update(frame.camera);
        }

        let resized = resize_to_display(surface, frame.camera);

        if let Err(e) = engine.render(surface, frame.scene, frame.camera) {
            tracing::error!("Render loop halted: {}", e);
            return Err(e);
        }
        self.frames += 1;

        self.state = LoopState::Scheduled;
        frame.scheduler.request_frame();

        Ok(FrameOutcome::Rendered { resized })
    }
}

/// Match the backing buffer to the displayed size; returns whether it changed
///
/// On a change the camera aspect becomes display width / display height and
/// the projection is recomputed. A zero-height display keeps the old aspect.
pub fn resize_to_display<S: RenderSurface>(
    surface: &mut S,
    camera: &mut PerspectiveCamera,
) -> bool {
    let (width, height) = surface.display_size();
    if surface.backing_size() == (width, height) {
        return false;
    }

    surface.resize_backing(width, height);
    if height > 0 {
        camera.aspect = width as f32 / height as f32;
    }
    camera.update_projection_matrix();
    tracing::debug!("Resized backing buffer to {}x{}", width, height);
    true
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use spot_core::{SceneConfig, build_scene};

    use super::*;

    #[derive(Default)]
    struct MockSurface {
        backing: (u32, u32),
        display: (u32, u32),
        resizes: Vec<(u32, u32)>,
    }

    impl RenderSurface for MockSurface {
        fn backing_size(&self) -> (u32, u32) {
            self.backing
        }

        fn display_size(&self) -> (u32, u32) {
            self.display
        }

        fn resize_backing(&mut self, width: u32, height: u32) {
            self.backing = (width, height);
            self.resizes.push((width, height));
        }
    }

    /// Records the state seen at each draw call
    #[derive(Default)]
    struct MockEngine {
        draws: Vec<Draw>,
        fail: bool,
    }

    struct Draw {
        backing: (u32, u32),
        aspect: f32,
        projection_updates: u64,
    }

    impl RenderEngine<MockSurface> for MockEngine {
        fn render(
            &mut self,
            surface: &mut MockSurface,
            scene: &SceneGraph,
            camera: &PerspectiveCamera,
        ) -> Result<(), RenderError> {
            if self.fail {
                return Err(RenderError::SceneChanged {
                    expected: 0,
                    actual: scene.objects().len(),
                });
            }
            self.draws.push(Draw {
                backing: surface.backing,
                aspect: camera.aspect,
                projection_updates: camera.projection_updates(),
            });
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockScheduler {
        requests: Cell<u32>,
    }

    impl FrameScheduler for MockScheduler {
        fn request_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    struct Harness {
        scene: SceneGraph,
        camera: PerspectiveCamera,
        controls: OrbitControls,
        scheduler: MockScheduler,
        surface: MockSurface,
        engine: MockEngine,
        render_loop: RenderLoop,
    }

    impl Harness {
        fn new(display: (u32, u32)) -> Self {
            let mut camera = PerspectiveCamera::default();
            let mut controls = OrbitControls::default();
            controls.update(&mut camera);
            Self {
                scene: build_scene(&SceneConfig::default()),
                camera,
                controls,
                scheduler: MockScheduler::default(),
                surface: MockSurface {
                    backing: (300, 150),
                    display,
                    resizes: Vec::new(),
                },
                engine: MockEngine::default(),
                render_loop: RenderLoop::new(true),
            }
        }

        fn frame(&mut self) -> Result<FrameOutcome, RenderError> {
            self.render_loop.run_frame(
                &mut self.surface,
                &mut self.engine,
                FrameInputs {
                    scene: &self.scene,
                    camera: &mut self.camera,
                    controls: &mut self.controls,
                    scheduler: &self.scheduler,
                },
            )
        }
    }

    #[test]
    fn test_frame_without_schedule_is_skipped() {
        let mut h = Harness::new((800, 600));
        assert_eq!(h.frame().unwrap(), FrameOutcome::Skipped);
        assert!(h.engine.draws.is_empty());
        assert!(h.surface.resizes.is_empty());
    }

    #[test]
    fn test_start_schedules_once() {
        let mut h = Harness::new((800, 600));
        h.render_loop.start(&h.scheduler);
        h.render_loop.start(&h.scheduler);
        assert_eq!(h.render_loop.state(), LoopState::Scheduled);
        assert_eq!(h.scheduler.requests.get(), 1);
    }

    #[test]
    fn test_resize_happens_before_draw() {
        let mut h = Harness::new((800, 400));
        h.render_loop.start(&h.scheduler);

        let outcome = h.frame().unwrap();
        assert_eq!(outcome, FrameOutcome::Rendered { resized: true });
        assert_eq!(h.surface.resizes, [(800, 400)]);

        let draw = &h.engine.draws[0];
        assert_eq!(draw.backing, (800, 400));
        assert_eq!(draw.aspect, 2.0);
        assert_eq!(h.camera.aspect, 800.0 / 400.0);
    }

    #[test]
    fn test_matching_sizes_skip_resize_and_projection() {
        let mut h = Harness::new((300, 150));
        h.render_loop.start(&h.scheduler);
        let before = h.camera.projection_updates();

        assert_eq!(h.frame().unwrap(), FrameOutcome::Rendered { resized: false });
        assert!(h.surface.resizes.is_empty());
        assert_eq!(h.engine.draws[0].projection_updates, before);
    }

    #[test]
    fn test_display_change_updates_aspect_for_next_frame() {
        let mut h = Harness::new((800, 600));
        h.render_loop.start(&h.scheduler);
        h.frame().unwrap();

        h.surface.display = (500, 1000);
        h.frame().unwrap();

        assert_eq!(h.engine.draws[1].backing, (500, 1000));
        assert_eq!(h.engine.draws[1].aspect, 0.5);
    }

    #[test]
    fn test_steady_frames_leave_state_unchanged() {
        let mut h = Harness::new((640, 480));
        h.render_loop.start(&h.scheduler);
        h.frame().unwrap();

        let position = h.camera.position;
        let aspect = h.camera.aspect;
        let transforms: Vec<_> = h.scene.objects().iter().map(|o| o.transform).collect();

        for _ in 0..10 {
            assert_eq!(h.frame().unwrap(), FrameOutcome::Rendered { resized: false });
        }

        assert_eq!(h.scene.objects().len(), 3);
        assert_eq!(h.camera.aspect, aspect);
        assert!(h.camera.position.distance(position) < 1e-4);
        let after: Vec<_> = h.scene.objects().iter().map(|o| o.transform).collect();
        assert_eq!(after, transforms);
        assert_eq!(h.render_loop.frames(), 11);
        assert_eq!(h.scheduler.requests.get(), 12);
        assert_eq!(h.render_loop.state(), LoopState::Scheduled);
    }

    #[test]
    fn test_engine_error_halts_loop() {
        let mut h = Harness::new((640, 480));
        h.engine.fail = true;
        h.render_loop.start(&h.scheduler);

        assert!(h.frame().is_err());
        assert_eq!(h.render_loop.state(), LoopState::Idle);
        assert_eq!(h.scheduler.requests.get(), 1);
        assert_eq!(h.frame().unwrap(), FrameOutcome::Skipped);
    }

    #[test]
    fn test_zero_height_keeps_aspect() {
        let mut h = Harness::new((640, 0));
        h.render_loop.start(&h.scheduler);
        let aspect = h.camera.aspect;
        h.frame().unwrap();
        assert_eq!(h.surface.backing, (640, 0));
        assert_eq!(h.camera.aspect, aspect);
    }

    #[test]
    fn test_controls_update_is_optional() {
        let mut h = Harness::new((640, 480));
        h.render_loop = RenderLoop::new(false);
        h.render_loop.start(&h.scheduler);
        h.controls.rotate(100.0, 0.0, 480.0);
        let position = h.camera.position;

        h.frame().unwrap();
        assert_eq!(h.camera.position, position);

        assert!(h.controls.update(&mut h.camera));
    }
}
