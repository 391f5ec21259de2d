mod run;
mod sampler;
mod tree;

pub use run::Run;
pub use sampler::Sampler;
pub use tree::{Cluster, Lane, Section, Surface, Swath, Tile, TileRef};
