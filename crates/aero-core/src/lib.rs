pub mod camera;
pub mod config;
pub mod constants;
pub mod easing;
pub mod edges;
pub mod error;
pub mod fallback;
pub mod flicker;
pub mod intro;
pub mod lines;
pub mod mesh;
pub mod motion;
pub mod particles;
pub mod scene;
pub mod scroll;

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use edges::EdgeMesh;
pub use error::{ConfigError, MeshError};
pub use flicker::*;
pub use intro::*;
pub use lines::*;
pub use mesh::load_obj_edges;
pub use motion::*;
pub use particles::*;
pub use scene::*;
pub use scroll::*;

// Shaders bundled as string constants
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");
