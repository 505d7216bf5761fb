//! Session context
//!
//! Owns everything one running demo needs: the scene, camera, orbit controls,
//! the light's control panel and the render loop. The GPU side (surface and
//! engine) is passed in per frame so the session itself stays headless.

use spot_core::{
    BindingPanel, LightBindings, LightController, SceneGraph, StatusReporter, build_scene,
    notify_loaded, notify_running,
};
use spot_renderer::{
    FrameInputs, FrameOutcome, FrameScheduler, LoopState, OrbitControls, PerspectiveCamera,
    RenderEngine, RenderError, RenderLoop, RenderSurface,
};

use crate::config::AppConfig;

/// Source name reported when the session has loaded
pub const SESSION_SOURCE: &str = "main";

/// Running demo state
pub struct Session {
    pub scene: SceneGraph,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub panel: BindingPanel,
    pub light: LightController,
    pub bindings: LightBindings,
    render_loop: RenderLoop,
    controls_each_frame: bool,
    reporter: Box<dyn StatusReporter>,
    last_error: Option<RenderError>,
}

impl Session {
    /// Build the scene and register the light's controls
    pub fn new(config: &AppConfig, reporter: Box<dyn StatusReporter>) -> Self {
        let scene = build_scene(&config.scene);

        let mut camera = PerspectiveCamera::from_config(&config.renderer.camera);
        let mut controls = OrbitControls::from_config(&config.renderer.controls);
        camera.look_at = controls.target;
        controls.update(&mut camera);

        let light = LightController::from_scene(&scene);
        let mut panel = BindingPanel::new("Spot Light");
        let bindings = light.register(&mut panel);

        let controls_each_frame = config.renderer.controls.update_controls_each_frame;
        let render_loop = RenderLoop::new(controls_each_frame);

        notify_loaded(reporter.as_ref(), SESSION_SOURCE);

        Self {
            scene,
            camera,
            controls,
            panel,
            light,
            bindings,
            render_loop,
            controls_each_frame,
            reporter,
            last_error: None,
        }
    }

    /// Start (or restart) the render loop
    pub fn start(&mut self, scheduler: &dyn FrameScheduler) {
        self.last_error = None;
        self.render_loop.start(scheduler);
        notify_running(self.reporter.as_ref(), true);
    }

    /// Run the pending frame on `surface` with `engine`
    ///
    /// A failed frame stops the loop and is kept in [`Session::last_error`]
    /// until the next [`Session::start`].
    pub fn frame<S, E>(
        &mut self,
        surface: &mut S,
        engine: &mut E,
        scheduler: &dyn FrameScheduler,
    ) -> Result<FrameOutcome, RenderError>
    where
        S: RenderSurface,
        E: RenderEngine<S>,
    {
        let result = self.render_loop.run_frame(
            surface,
            engine,
            FrameInputs {
                scene: &self.scene,
                camera: &mut self.camera,
                controls: &mut self.controls,
                scheduler,
            },
        );

        if let Err(e) = &result {
            self.last_error = Some(e.clone());
            notify_running(self.reporter.as_ref(), false);
        }
        result
    }

    /// Apply pointer input to the camera right away when the loop does not
    /// update the controls itself
    pub fn sync_controls(&mut self) {
        if !self.controls_each_frame {
            self.controls.update(&mut self.camera);
        }
    }

    /// Error that stopped the loop, if any
    pub fn last_error(&self) -> Option<&RenderError> {
        self.last_error.as_ref()
    }

    /// Whether a frame is pending
    pub fn is_running(&self) -> bool {
        self.render_loop.state() == LoopState::Scheduled
    }

    /// Frames drawn since startup
    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Mat4;
    use spot_core::{GeometryKind, StatusError};

    use super::*;

    #[derive(Default, Clone)]
    struct Events(Rc<RefCell<Vec<String>>>);

    impl StatusReporter for Events {
        fn send_error(&self, tag: &str, source: &str) -> Result<(), StatusError> {
            self.0.borrow_mut().push(format!("{tag}:{source}"));
            Ok(())
        }

        fn send_status(&self, running: bool) -> Result<(), StatusError> {
            self.0.borrow_mut().push(format!("running:{running}"));
            Ok(())
        }
    }

    struct Surface {
        backing: (u32, u32),
        display: (u32, u32),
    }

    impl RenderSurface for Surface {
        fn backing_size(&self) -> (u32, u32) {
            self.backing
        }

        fn display_size(&self) -> (u32, u32) {
            self.display
        }

        fn resize_backing(&mut self, width: u32, height: u32) {
            self.backing = (width, height);
        }
    }

    #[derive(Default)]
    struct Engine {
        draws: usize,
        fail: bool,
    }

    impl RenderEngine<Surface> for Engine {
        fn render(
            &mut self,
            _surface: &mut Surface,
            scene: &SceneGraph,
            _camera: &PerspectiveCamera,
        ) -> Result<(), RenderError> {
            if self.fail {
                return Err(RenderError::SceneChanged {
                    expected: 0,
                    actual: scene.objects().len(),
                });
            }
            self.draws += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Scheduler {
        requests: Cell<usize>,
    }

    impl FrameScheduler for Scheduler {
        fn request_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    fn session() -> (Session, Events) {
        let events = Events::default();
        let session = Session::new(&AppConfig::default(), Box::new(events.clone()));
        (session, events)
    }

    #[test]
    fn test_fresh_session_scene() {
        let (session, events) = session();

        let kinds: Vec<_> = session
            .scene
            .objects()
            .iter()
            .map(|o| o.geometry.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![GeometryKind::Plane, GeometryKind::Box, GeometryKind::Sphere]
        );
        assert!(!session.panel.is_empty());
        assert!(!session.is_running());
        assert_eq!(*events.0.borrow(), vec!["loaded:main".to_string()]);
    }

    #[test]
    fn test_frames_without_resize_leave_state_unchanged() {
        let (mut session, events) = session();
        let scheduler = Scheduler::default();
        let mut surface = Surface {
            backing: (800, 400),
            display: (800, 400),
        };
        let mut engine = Engine::default();

        session.start(&scheduler);
        assert!(session.is_running());

        let aspect = session.camera.aspect;
        let transforms: Vec<Mat4> = session
            .scene
            .objects()
            .iter()
            .map(|o| o.transform.matrix())
            .collect();

        for _ in 0..5 {
            let outcome = session.frame(&mut surface, &mut engine, &scheduler).unwrap();
            assert_eq!(outcome, FrameOutcome::Rendered { resized: false });
        }

        assert_eq!(engine.draws, 5);
        assert_eq!(session.frames(), 5);
        assert_eq!(scheduler.requests.get(), 6);
        assert_eq!(session.camera.aspect, aspect);
        let after: Vec<Mat4> = session
            .scene
            .objects()
            .iter()
            .map(|o| o.transform.matrix())
            .collect();
        assert_eq!(after, transforms);
        assert_eq!(events.0.borrow().last().unwrap(), "running:true");
    }

    #[test]
    fn test_binding_write_reaches_next_frame() {
        let (mut session, _) = session();
        let scheduler = Scheduler::default();
        let mut surface = Surface {
            backing: (640, 480),
            display: (640, 480),
        };
        let mut engine = Engine::default();
        session.start(&scheduler);

        let intensity = session.panel.number(session.bindings.intensity).unwrap();
        intensity.set_value(0.0).unwrap();
        session.frame(&mut surface, &mut engine, &scheduler).unwrap();

        assert_eq!(session.scene.light().lock().intensity, 0.0);
    }

    #[test]
    fn test_sync_controls_only_when_loop_does_not() {
        let (mut session, _) = session();
        let start = session.camera.position;
        session.controls.zoom(10.0);
        session.sync_controls();
        assert_eq!(session.camera.position, start);

        let mut config = AppConfig::default();
        config.renderer.controls.update_controls_each_frame = false;
        let mut session = Session::new(&config, Box::new(Events::default()));
        let start = session.camera.position;
        session.controls.zoom(10.0);
        session.sync_controls();
        let target = session.controls.target;
        assert!(session.camera.position.distance(target) < start.distance(target));
    }

    #[test]
    fn test_failed_frame_stops_loop() {
        let (mut session, events) = session();
        let scheduler = Scheduler::default();
        let mut surface = Surface {
            backing: (640, 480),
            display: (640, 480),
        };
        let mut engine = Engine {
            fail: true,
            ..Default::default()
        };

        session.start(&scheduler);
        assert!(session.frame(&mut surface, &mut engine, &scheduler).is_err());
        assert!(!session.is_running());
        assert!(session.last_error().is_some());
        assert_eq!(events.0.borrow().last().unwrap(), "running:false");

        engine.fail = false;
        session.start(&scheduler);
        assert!(session.last_error().is_none());
        session.frame(&mut surface, &mut engine, &scheduler).unwrap();
        assert_eq!(engine.draws, 1);
    }
}
