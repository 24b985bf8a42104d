pub mod graph;
pub mod material;
