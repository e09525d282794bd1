// Path Planning algorithms module

pub mod a_star;
pub mod prm;
pub mod roadmap;
pub mod shortcut;
pub mod spatial_index;

pub use a_star::*;
pub use prm::*;
pub use roadmap::*;
pub use shortcut::*;
pub use spatial_index::*;
