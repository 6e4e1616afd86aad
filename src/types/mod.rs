mod bearing;
mod bounding_box;
mod path;
mod position;
mod region;

pub use bearing::*;
pub use bounding_box::*;
pub use path::*;
pub use position::*;
pub use region::*;
