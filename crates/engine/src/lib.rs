pub mod core;
pub mod graphics;
pub mod scene;
pub mod utils;
pub mod version;

pub mod prelude {
    pub use crate::core;
    pub use crate::graphics;
    pub use crate::scene;
    pub use crate::utils;
    pub use crate::version::Version;
    pub use quartz::prelude::*;
}
