//! The render boundary: everything a rasterizer would need, nothing it
//! would do. Bodies are bound to interned model handles and each frame the
//! scene's composed transforms are extracted into a sortable draw list.

pub mod draw_list;
pub mod models;

pub use draw_list::{DrawList, ModelBindings, ModelGroup, ModelGroupIter, RenderInstance};
pub use models::{ModelId, ModelLibrary};
