pub mod stage0_fuse;
pub mod stage1_normalize;
pub mod stage2_analyze;
pub mod stage3_render;

pub use stage0_fuse::*;
pub use stage1_normalize::*;
pub use stage2_analyze::*;
pub use stage3_render::*;
