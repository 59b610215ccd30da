mod raster;
pub use raster::*;
mod scene;
pub use scene::*;
mod vary;
pub use vary::*;
