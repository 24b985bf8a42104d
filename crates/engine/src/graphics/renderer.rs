use quartz::{Mat4, Vec3};

use crate::scene::material::Material;

use super::error::GraphicsResult;

/// Per-node draw inputs for one frame.
pub struct DrawParams<'a> {
    pub world: &'a Mat4,
    pub view: &'a Mat4,
    pub projection: &'a Mat4,
    pub eye_position: Vec3,
    pub material: &'a Material,
}

/// Drawing backend attached to a leaf node. The graph drives the lifecycle:
/// `initialise` once before the first frame, `render` every frame the node is
/// part of the graph, `shutdown` once when rendering stops.
pub trait Renderer {
    fn initialise(&mut self) -> GraphicsResult<()>;

    fn render(&mut self, params: &DrawParams);

    fn shutdown(&mut self);
}
