use log::{debug, info};
use quartz::Mat4;

use crate::graphics::error::GraphicsResult;
use crate::scene::graph::SceneGraph;
use crate::version::Version;

use super::camera::Camera;
use super::input::{Input, InputEvent};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EngineInfo {
    pub app_name: &'static str,
    pub app_version: Version,
}

/// Owns the pieces of one running app, the scene graph, the camera and the
/// input state, and drives them through the frame cycle.
pub struct Engine {
    pub info: EngineInfo,
    pub camera: Camera,
    pub scene: SceneGraph,
    pub input: Input,
}

impl Engine {
    pub fn new(info: EngineInfo, camera: Camera) -> Self {
        info!("Starting `{}` {}", info.app_name, info.app_version);
        Self {
            info,
            camera,
            scene: SceneGraph::new("Root".to_owned()),
            input: Input::new(),
        }
    }

    /// Initialises every renderer in the scene. Call once before the first
    /// frame.
    pub fn initialise(&mut self) -> GraphicsResult<()> {
        debug!("Initialising scene renderers");
        self.scene.initialise()
    }

    /// Feeds one device event into the current frame's input state.
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input.update(event);
    }

    /// Advances one frame: the camera folds in the frame's input, the scene
    /// recomputes its world transforms, then the input rolls over.
    pub fn update(&mut self) {
        self.camera.update(&self.input);
        self.scene.update(Mat4::IDENTITY);
        self.input.rollover_state();
    }

    /// Draws the scene with the camera's current view and projection.
    pub fn render(&mut self) {
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix();
        self.scene
            .render(&view, &projection, self.camera.eye_position());
    }

    pub fn shutdown(&mut self) {
        debug!("Shutting down scene renderers");
        self.scene.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use quartz::Vec3;

    use crate::core::input::KeyCode;
    use crate::graphics::renderer::{DrawParams, Renderer};
    use crate::scene::graph::SceneNode;

    use super::*;

    struct CountingRenderer {
        frames: Rc<Cell<u32>>,
    }

    impl Renderer for CountingRenderer {
        fn initialise(&mut self) -> GraphicsResult<()> {
            Ok(())
        }

        fn render(&mut self, _params: &DrawParams) {
            self.frames.set(self.frames.get() + 1);
        }

        fn shutdown(&mut self) {}
    }

    fn test_engine() -> Engine {
        let info = EngineInfo {
            app_name: "engine test",
            app_version: Version(0, 1, 0),
        };
        Engine::new(info, Camera::builder().build())
    }

    #[test]
    fn update_folds_input_then_rolls_it_over() {
        let mut engine = test_engine();

        engine.handle_event(&InputEvent::KeyPressed { key: KeyCode::W });
        assert!(engine.input.key_was_pressed(KeyCode::W));

        engine.update();
        assert!(engine.camera.eye_position().z > -10.0);
        assert!(engine.input.key_down(KeyCode::W));
        assert!(!engine.input.key_was_pressed(KeyCode::W));
    }

    #[test]
    fn update_recomputes_scene_worlds_from_the_root() {
        let mut engine = test_engine();
        let frames = Rc::new(Cell::new(0));
        let node = engine.scene.add(
            engine.scene.root(),
            SceneNode::leaf(
                "counter".to_owned(),
                Box::new(CountingRenderer {
                    frames: Rc::clone(&frames),
                }),
            ),
        );
        engine
            .scene
            .set_local_transform(node, Mat4::from_translation(Vec3::new(4.0, 0.0, 0.0)));

        assert!(engine.initialise().is_ok());
        engine.update();
        assert_eq!(
            engine
                .scene
                .world_transform(node)
                .transform_point(Vec3::ZERO),
            Vec3::new(4.0, 0.0, 0.0)
        );

        engine.render();
        engine.render();
        assert_eq!(frames.get(), 2);
    }
}
