pub mod batch;
pub mod webgl;
pub mod shaders;
pub mod pipeline;

pub use batch::{InstanceBatch, InstanceSink};
pub use webgl::WebGLContext;
pub use pipeline::{Material, RenderPipeline};
