//! 图形后端模块

pub mod context;

pub use context::WgpuContext;
