pub mod interval;
pub mod report;
pub mod segment;
pub mod source;

pub use interval::*;
pub use report::*;
pub use segment::*;
pub use source::*;
