//! 场景模块
//!
//! 渲染项定义与城堡场景的搭建逻辑。

pub mod castle;
pub mod render_item;

pub use castle::{build_castle_geometry, build_castle_scene};
pub use render_item::RenderItem;
