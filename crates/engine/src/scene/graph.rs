use std::fmt::Debug;

use log::warn;
use quartz::{Mat4, Vec3};

use crate::graphics::error::GraphicsResult;
use crate::graphics::renderer::{DrawParams, Renderer};

use super::material::Material;

/// Handle to a node owned by a [`SceneGraph`]. Handles stay valid for the
/// life of the graph, including after the node was removed from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

enum NodeKind {
    Leaf {
        renderer: Box<dyn Renderer>,
        material: Material,
    },
    Composite {
        children: Vec<NodeId>,
    },
}

/// A named node with a local transform. Leaves carry a renderer and a
/// material, composites carry an ordered child list.
pub struct SceneNode {
    name: String,
    local_transform: Mat4,
    world_transform: Mat4,
    kind: NodeKind,
}

impl SceneNode {
    pub fn leaf(name: String, renderer: Box<dyn Renderer>) -> Self {
        Self::leaf_with_material(name, renderer, Material::default())
    }

    pub fn leaf_with_material(
        name: String,
        renderer: Box<dyn Renderer>,
        material: Material,
    ) -> Self {
        Self {
            name,
            local_transform: Mat4::IDENTITY,
            world_transform: Mat4::IDENTITY,
            kind: NodeKind::Leaf { renderer, material },
        }
    }

    pub fn composite(name: String) -> Self {
        Self {
            name,
            local_transform: Mat4::IDENTITY,
            world_transform: Mat4::IDENTITY,
            kind: NodeKind::Composite {
                children: Vec::new(),
            },
        }
    }
}

/// Tree of [`SceneNode`]s rooted in a composite, stored in an arena and
/// addressed through [`NodeId`]s. Children keep their insertion order and
/// every traversal walks them in that order.
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root: NodeId,
}

impl SceneGraph {
    pub fn new(root_name: String) -> Self {
        Self {
            nodes: vec![SceneNode::composite(root_name)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Stores `node` in the arena and appends it to `parent`'s children.
    /// Leaves take no children: the node still gets a valid handle but stays
    /// detached from the tree.
    pub fn add(&mut self, parent: NodeId, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        match &mut self.nodes[parent.index()].kind {
            NodeKind::Composite { children } => children.push(id),
            NodeKind::Leaf { .. } => warn!(
                "`{}` is a leaf and takes no children, `{}` is left detached",
                self.node(parent).name,
                self.node(id).name
            ),
        }
        id
    }

    /// Detaches `target` from its parent, wherever it sits below the root.
    /// Returns whether a node was removed. The subtree keeps its arena slots
    /// and can still be inspected through existing handles. The root itself
    /// cannot be removed.
    pub fn remove(&mut self, target: NodeId) -> bool {
        self.remove_below(self.root, target)
    }

    fn remove_below(&mut self, current: NodeId, target: NodeId) -> bool {
        let children = match &self.node(current).kind {
            NodeKind::Composite { children } => children.clone(),
            NodeKind::Leaf { .. } => return false,
        };
        for child in children {
            if self.remove_below(child, target) {
                return true;
            }
            if child == target {
                if let NodeKind::Composite { children } = &mut self.nodes[current.index()].kind {
                    children.retain(|&c| c != target);
                }
                return true;
            }
        }
        false
    }

    /// Pre-order search by name starting at the root. The first match wins,
    /// so with duplicate names an earlier subtree shadows later siblings.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.find_below(self.root, name)
    }

    fn find_below(&self, current: NodeId, name: &str) -> Option<NodeId> {
        let node = self.node(current);
        if node.name == name {
            return Some(current);
        }
        if let NodeKind::Composite { children } = &node.kind {
            for &child in children {
                if let Some(found) = self.find_below(child, name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Initialises every renderer in traversal order, stopping at the first
    /// failure.
    pub fn initialise(&mut self) -> GraphicsResult<()> {
        self.initialise_below(self.root)
    }

    fn initialise_below(&mut self, current: NodeId) -> GraphicsResult<()> {
        let children = match &mut self.nodes[current.index()].kind {
            NodeKind::Leaf { renderer, .. } => return renderer.initialise(),
            NodeKind::Composite { children } => children.clone(),
        };
        for child in children {
            self.initialise_below(child)?;
        }
        Ok(())
    }

    /// Recomputes every cumulative world transform: a node's is `world`
    /// composed with all local transforms down from the root, its own last.
    pub fn update(&mut self, world: Mat4) {
        self.update_below(self.root, world);
    }

    fn update_below(&mut self, current: NodeId, world: Mat4) {
        let node = &mut self.nodes[current.index()];
        node.world_transform = world * node.local_transform;
        let cumulative = node.world_transform;
        let children = match &node.kind {
            NodeKind::Leaf { .. } => return,
            NodeKind::Composite { children } => children.clone(),
        };
        for child in children {
            self.update_below(child, cumulative);
        }
    }

    /// Draws every leaf with its cumulative world transform and material.
    pub fn render(&mut self, view: &Mat4, projection: &Mat4, eye_position: Vec3) {
        self.render_below(self.root, view, projection, eye_position);
    }

    fn render_below(
        &mut self,
        current: NodeId,
        view: &Mat4,
        projection: &Mat4,
        eye_position: Vec3,
    ) {
        let node = &mut self.nodes[current.index()];
        let children = match &mut node.kind {
            NodeKind::Leaf { renderer, material } => {
                renderer.render(&DrawParams {
                    world: &node.world_transform,
                    view,
                    projection,
                    eye_position,
                    material,
                });
                return;
            }
            NodeKind::Composite { children } => children.clone(),
        };
        for child in children {
            self.render_below(child, view, projection, eye_position);
        }
    }

    /// Shuts down every renderer. Visits all leaves unconditionally.
    pub fn shutdown(&mut self) {
        self.shutdown_below(self.root);
    }

    fn shutdown_below(&mut self, current: NodeId) {
        let children = match &mut self.nodes[current.index()].kind {
            NodeKind::Leaf { renderer, .. } => return renderer.shutdown(),
            NodeKind::Composite { children } => children.clone(),
        };
        for child in children {
            self.shutdown_below(child);
        }
    }

    pub fn set_local_transform(&mut self, id: NodeId, transform: Mat4) {
        self.nodes[id.index()].local_transform = transform;
    }

    pub fn local_transform(&self, id: NodeId) -> Mat4 {
        self.node(id).local_transform
    }

    /// Cumulative transform as of the last [`update`](Self::update), identity
    /// before the first one.
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        self.node(id).world_transform
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).kind {
            NodeKind::Composite { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.index()]
    }
}

impl Debug for SceneGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SceneGraph({} nodes)", self.nodes.len())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use quartz::Vec3;

    use super::*;
    use crate::graphics::error::GraphicsError;

    type Log = Rc<RefCell<Vec<String>>>;

    struct RecordingRenderer {
        name: &'static str,
        log: Log,
        fail_initialise: bool,
    }

    impl Renderer for RecordingRenderer {
        fn initialise(&mut self) -> GraphicsResult<()> {
            self.log.borrow_mut().push(format!("init {}", self.name));
            if self.fail_initialise {
                Err(GraphicsError::ResourceCreation(format!(
                    "{} has no mesh",
                    self.name
                )))
            } else {
                Ok(())
            }
        }

        fn render(&mut self, _params: &DrawParams) {
            self.log.borrow_mut().push(format!("render {}", self.name));
        }

        fn shutdown(&mut self) {
            self.log.borrow_mut().push(format!("shutdown {}", self.name));
        }
    }

    fn recorder(name: &'static str, log: &Log) -> Box<RecordingRenderer> {
        Box::new(RecordingRenderer {
            name,
            log: Rc::clone(log),
            fail_initialise: false,
        })
    }

    fn failing_recorder(name: &'static str, log: &Log) -> Box<RecordingRenderer> {
        Box::new(RecordingRenderer {
            name,
            log: Rc::clone(log),
            fail_initialise: true,
        })
    }

    fn leaf(name: &'static str, log: &Log) -> SceneNode {
        SceneNode::leaf(name.to_owned(), recorder(name, log))
    }

    fn render_order(graph: &mut SceneGraph, log: &Log) -> Vec<String> {
        log.borrow_mut().clear();
        graph.render(&Mat4::IDENTITY, &Mat4::IDENTITY, Vec3::ZERO);
        log.borrow().clone()
    }

    #[test]
    fn traversal_follows_insertion_order() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        graph.add(graph.root(), leaf("a", &log));
        graph.add(graph.root(), leaf("b", &log));
        graph.add(graph.root(), leaf("c", &log));

        assert_eq!(render_order(&mut graph, &log), ["render a", "render b", "render c"]);
    }

    #[test]
    fn find_descends_before_moving_to_siblings() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let group = graph.add(graph.root(), SceneNode::composite("group".to_owned()));
        let inner = graph.add(group, SceneNode::composite("inner".to_owned()));
        let deep = graph.add(inner, leaf("twin", &log));
        let shallow = graph.add(graph.root(), leaf("twin", &log));

        assert_eq!(graph.find("root"), Some(graph.root()));
        assert_eq!(graph.find("inner"), Some(inner));
        assert_eq!(graph.find("twin"), Some(deep));
        assert_ne!(graph.find("twin"), Some(shallow));
        assert_eq!(graph.find("missing"), None);
    }

    #[test]
    fn find_returns_the_matching_node_itself() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let group = graph.add(graph.root(), SceneNode::composite("group".to_owned()));
        let child = graph.add(group, leaf("child", &log));

        let found = graph.find("child").unwrap();
        assert_eq!(found, child);
        assert_eq!(graph.name(found), "child");
    }

    #[test]
    fn update_composes_parent_world_with_local() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let group = graph.add(graph.root(), SceneNode::composite("group".to_owned()));
        let child = graph.add(group, leaf("child", &log));

        graph.set_local_transform(group, Mat4::from_translation(Vec3::new(4.0, 0.0, 0.0)));
        graph.set_local_transform(child, Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));
        graph.update(Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0)));

        let origin = graph.world_transform(child).transform_point(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(4.0, 2.0, 1.0));
        // the group only picks up its own composition
        let group_origin = graph.world_transform(group).transform_point(Vec3::ZERO);
        assert_eq!(group_origin, Vec3::new(4.0, 0.0, 1.0));
    }

    #[test]
    fn world_transform_is_identity_before_first_update() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let child = graph.add(graph.root(), leaf("child", &log));
        graph.set_local_transform(child, Mat4::from_translation(Vec3::ONE));

        assert_eq!(graph.world_transform(child), Mat4::IDENTITY);
    }

    #[test]
    fn remove_keeps_sibling_order() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        graph.add(graph.root(), leaf("a", &log));
        let b = graph.add(graph.root(), leaf("b", &log));
        graph.add(graph.root(), leaf("c", &log));

        assert!(graph.remove(b));
        assert_eq!(render_order(&mut graph, &log), ["render a", "render c"]);
        assert!(!graph.remove(b));
    }

    #[test]
    fn remove_reaches_into_nested_subtrees() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let group = graph.add(graph.root(), SceneNode::composite("group".to_owned()));
        let inner = graph.add(group, SceneNode::composite("inner".to_owned()));
        graph.add(inner, leaf("deep", &log));
        graph.add(graph.root(), leaf("after", &log));

        assert!(graph.remove(inner));
        assert_eq!(render_order(&mut graph, &log), ["render after"]);
        assert_eq!(graph.find("deep"), None);
    }

    #[test]
    fn remove_refuses_the_root() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        graph.add(graph.root(), leaf("a", &log));

        assert!(!graph.remove(graph.root()));
        assert_eq!(render_order(&mut graph, &log), ["render a"]);
    }

    #[test]
    fn removed_handles_stay_inspectable() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let group = graph.add(graph.root(), SceneNode::composite("group".to_owned()));
        let child = graph.add(group, leaf("child", &log));
        graph.update(Mat4::from_translation(Vec3::X));

        assert!(graph.remove(group));
        assert_eq!(graph.name(child), "child");
        assert_eq!(
            graph.world_transform(child).transform_point(Vec3::ZERO),
            Vec3::X
        );
        assert_eq!(graph.find("child"), None);
    }

    #[test]
    fn initialise_stops_at_the_first_failure() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        graph.add(graph.root(), leaf("a", &log));
        graph.add(
            graph.root(),
            SceneNode::leaf("b".to_owned(), failing_recorder("b", &log)),
        );
        graph.add(graph.root(), leaf("c", &log));

        assert!(graph.initialise().is_err());
        assert_eq!(*log.borrow(), ["init a", "init b"]);
    }

    #[test]
    fn shutdown_visits_every_leaf_after_a_failed_initialise() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        graph.add(graph.root(), leaf("a", &log));
        graph.add(
            graph.root(),
            SceneNode::leaf("b".to_owned(), failing_recorder("b", &log)),
        );
        graph.add(graph.root(), leaf("c", &log));

        assert!(graph.initialise().is_err());
        graph.shutdown();
        assert_eq!(
            *log.borrow(),
            ["init a", "init b", "shutdown a", "shutdown b", "shutdown c"]
        );
    }

    #[test]
    fn initialise_visits_every_leaf_on_success() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let group = graph.add(graph.root(), SceneNode::composite("group".to_owned()));
        graph.add(group, leaf("a", &log));
        graph.add(graph.root(), leaf("b", &log));

        assert!(graph.initialise().is_ok());
        assert_eq!(*log.borrow(), ["init a", "init b"]);
    }

    #[test]
    fn shutdown_visits_every_leaf() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let group = graph.add(graph.root(), SceneNode::composite("group".to_owned()));
        graph.add(group, leaf("a", &log));
        graph.add(graph.root(), leaf("b", &log));

        graph.shutdown();
        assert_eq!(*log.borrow(), ["shutdown a", "shutdown b"]);
    }

    #[test]
    fn leaves_take_no_children() {
        let log = Log::default();
        let mut graph = SceneGraph::new("root".to_owned());
        let l = graph.add(graph.root(), leaf("leaf", &log));
        let orphan = graph.add(l, leaf("orphan", &log));

        assert!(graph.children(l).is_empty());
        assert_eq!(graph.name(orphan), "orphan");
        assert_eq!(graph.find("orphan"), None);
        assert_eq!(render_order(&mut graph, &log), ["render leaf"]);
    }

    #[test]
    fn render_hands_each_leaf_its_world_and_the_eye() {
        struct Probe {
            seen: Rc<RefCell<Vec<(Vec3, Vec3)>>>,
        }

        impl Renderer for Probe {
            fn initialise(&mut self) -> GraphicsResult<()> {
                Ok(())
            }

            fn render(&mut self, params: &DrawParams) {
                self.seen.borrow_mut().push((
                    params.world.transform_point(Vec3::ZERO),
                    params.eye_position,
                ));
            }

            fn shutdown(&mut self) {}
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut graph = SceneGraph::new("root".to_owned());
        let probe = graph.add(
            graph.root(),
            SceneNode::leaf(
                "probe".to_owned(),
                Box::new(Probe {
                    seen: Rc::clone(&seen),
                }),
            ),
        );
        graph.set_local_transform(probe, Mat4::from_translation(Vec3::new(4.0, 0.0, 0.0)));
        graph.update(Mat4::IDENTITY);

        let eye = Vec3::new(0.0, 20.0, -90.0);
        graph.render(&Mat4::IDENTITY, &Mat4::IDENTITY, eye);
        assert_eq!(*seen.borrow(), [(Vec3::new(4.0, 0.0, 0.0), eye)]);
    }
}
