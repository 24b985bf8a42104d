use std::process::exit;

use log::{debug, error, info};
use prism::{
    core::{
        camera::Camera,
        engine::{Engine, EngineInfo},
        input::{InputEvent, KeyCode, MouseButton},
    },
    graphics::{
        error::GraphicsResult,
        renderer::{DrawParams, Renderer},
    },
    scene::{
        graph::{SceneGraph, SceneNode},
        material::Material,
    },
    utils::color::Color,
    version::Version,
};
use quartz::prelude::*;

const FRAMES: usize = 240;

fn main() {
    // setting up logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    // initialize engine
    let engine_info = EngineInfo {
        app_name: "Rotating Shapes",
        app_version: Version(0, 1, 0),
    };

    // setup camera
    let camera = Camera::builder()
        .eye_position(Vec3::new(0.0, 20.0, -90.0))
        .focal_point(Vec3::new(0.0, 20.0, 0.0))
        .sensitivity(0.05)
        .move_speed(0.2)
        .move_speed_boost(0.4)
        .scroll_speed(1.0)
        .scroll_speed_boost(2.0)
        .fov(45.0.deg())
        .aspect(800.0 / 600.0)
        .render_distance(300.0)
        .build();

    let mut engine = Engine::new(engine_info, camera);
    setup(&mut engine);

    match engine.initialise() {
        Ok(()) => run(&mut engine),
        Err(err) => {
            error!("{}", err);
            exit(1);
        }
    }

    engine.shutdown();
}

fn setup(engine: &mut Engine) {
    let scene = &mut engine.scene;
    let root = scene.root();

    scene.add(
        root,
        SceneNode::leaf_with_material(
            "Cube".to_owned(),
            Box::new(LoggingRenderer::new("Cube")),
            Material {
                directional_light_color: Color::BLUE,
                point_light_color: Color::GREEN,
                point_light_position: Vec3::new(2.0, 0.0, -3.0),
                ..Material::default()
            },
        ),
    );
    scene.add(
        root,
        SceneNode::leaf_with_material(
            "Teapot".to_owned(),
            Box::new(LoggingRenderer::new("Teapot")),
            Material {
                directional_light_color: Color::GREEN,
                point_light_color: Color::RED,
                point_light_position: Vec3::new(0.0, 0.0, -3.0),
                ..Material::default()
            },
        ),
    );
    scene.add(
        root,
        SceneNode::leaf_with_material(
            "Textured Cube".to_owned(),
            Box::new(LoggingRenderer::new("Textured Cube")),
            Material {
                directional_light_color: Color::RED,
                point_light_color: Color::BLUE,
                point_light_position: Vec3::new(-2.0, 0.0, -3.0),
                ..Material::default()
            },
        ),
    );
}

fn run(engine: &mut Engine) {
    let mut angle = 0u32;
    let mut rendered = 0;
    for frame in 0..FRAMES {
        for event in scripted_events(frame) {
            engine.handle_event(&event);
        }
        if engine.input.key_was_pressed(KeyCode::Escape) {
            info!("Escape pressed, leaving the render loop");
            break;
        }
        spin_shapes(&mut engine.scene, angle);
        angle = (angle + 1) % 360;

        engine.update();
        engine.render();
        rendered += 1;
    }
    info!(
        "Rendered {} frames, the eye ended up at {:?}",
        rendered,
        engine.camera.eye_position()
    );
}

/// Replaces each shape's local transform with this frame's spin, the same
/// composition the source scene animates.
fn spin_shapes(scene: &mut SceneGraph, angle: u32) {
    let spin = (angle as f32).deg().to_rad();

    if let Some(cube) = scene.find("Cube") {
        scene.set_local_transform(
            cube,
            Mat4::from_translation(Vec3::new(4.0, 0.0, 0.0))
                * Mat4::from_rotation_x(spin)
                * Mat4::from_rotation_y(spin),
        );
    }
    if let Some(teapot) = scene.find("Teapot") {
        scene.set_local_transform(
            teapot,
            Mat4::from_rotation_z(-spin) * Mat4::from_rotation_y(-spin),
        );
    }
    if let Some(textured_cube) = scene.find("Textured Cube") {
        scene.set_local_transform(
            textured_cube,
            Mat4::from_translation(Vec3::new(-4.0, 0.0, 0.0))
                * Mat4::from_rotation_z(spin)
                * Mat4::from_rotation_x(spin),
        );
    }
}

/// A canned flight through the scene: walk in, sprint, look around, zoom,
/// rise, then quit with Escape. One frame's worth of device events at a time.
fn scripted_events(frame: usize) -> Vec<InputEvent> {
    match frame {
        10 => vec![InputEvent::KeyPressed { key: KeyCode::W }],
        40 => vec![InputEvent::KeyReleased { key: KeyCode::W }],
        50 => vec![
            InputEvent::KeyPressed {
                key: KeyCode::LShift,
            },
            InputEvent::KeyPressed { key: KeyCode::W },
        ],
        80 => vec![
            InputEvent::KeyReleased { key: KeyCode::W },
            InputEvent::KeyReleased {
                key: KeyCode::LShift,
            },
        ],
        100 => vec![InputEvent::MouseButtonPressed {
            button: MouseButton::Left,
        }],
        101..=130 => vec![InputEvent::MouseMoved {
            delta_x: 2.0,
            delta_y: 0.5,
        }],
        131 => vec![InputEvent::MouseButtonReleased {
            button: MouseButton::Left,
        }],
        150..=155 => vec![InputEvent::MouseWheelScrolled {
            delta_x: 0.0,
            delta_y: 1.0,
        }],
        200 => vec![InputEvent::KeyPressed {
            key: KeyCode::Space,
        }],
        220 => vec![InputEvent::KeyReleased {
            key: KeyCode::Space,
        }],
        235 => vec![InputEvent::KeyPressed {
            key: KeyCode::Escape,
        }],
        _ => Vec::new(),
    }
}

struct LoggingRenderer {
    name: &'static str,
}

impl LoggingRenderer {
    fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Renderer for LoggingRenderer {
    fn initialise(&mut self) -> GraphicsResult<()> {
        debug!("{}: acquiring draw resources", self.name);
        Ok(())
    }

    fn render(&mut self, params: &DrawParams) {
        let position = params.world.transform_point(Vec3::ZERO);
        debug!(
            "{} drawn at ({:.2}, {:.2}, {:.2})",
            self.name, position.x, position.y, position.z
        );
    }

    fn shutdown(&mut self) {
        debug!("{}: releasing draw resources", self.name);
    }
}
