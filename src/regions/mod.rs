pub mod config;
pub mod error;
pub mod key;
pub mod node;
pub mod operations;
pub mod region;
pub mod shapes;
pub mod tree;


pub use config::MaskConfig;
pub use error::RegionError;
pub use key::{AxisKey, Mask, PositionMap};
pub use node::RegionNode;
pub use region::Region;
pub use shapes::{Circle, Rectangle};
