//! 错误处理模块
//!
//! 定义了整个示例使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 任何图形 API 失败都是致命的：入口处记录错误后退出进程，
//!   不做重试、不做降级（与原始教学示例一致）

use std::fmt;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, CastleRenderError>;

/// CastleRender 的错误类型
///
/// 包含了示例运行过程中可能遇到的各种错误情况。
#[derive(Debug)]
pub enum CastleRenderError {
    /// 配置错误
    Config(ConfigError),

    /// 图形 API 错误
    Graphics(GraphicsError),

    /// 几何构建错误
    Geometry(GeometryError),

    /// IO 错误
    Io(std::io::Error),

    /// 初始化错误
    Initialization(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 图形 API 相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 设备创建失败
    DeviceCreation(String),

    /// 交换链错误
    SwapchainError(String),

    /// 资源创建失败
    ResourceCreation(String),
}

/// 几何构建相关的错误
#[derive(Debug)]
pub enum GeometryError {
    /// 子网格不存在
    UnknownSubmesh(String),

    /// 顶点数量超出 16 位索引缓冲的容量
    IndexOverflow { vertex_count: usize },

    /// 数据验证失败（偏移记账出错等）
    ValidationError(String),
}

impl fmt::Display for CastleRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleRenderError::Config(e) => write!(f, "Configuration error: {}", e),
            CastleRenderError::Graphics(e) => write!(f, "Graphics error: {}", e),
            CastleRenderError::Geometry(e) => write!(f, "Geometry error: {}", e),
            CastleRenderError::Io(e) => write!(f, "IO error: {}", e),
            CastleRenderError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::DeviceCreation(msg) => write!(f, "Device creation failed: {}", msg),
            GraphicsError::SwapchainError(msg) => write!(f, "Swapchain error: {}", msg),
            GraphicsError::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
        }
    }
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::UnknownSubmesh(name) => write!(f, "Unknown submesh: '{}'", name),
            GeometryError::IndexOverflow { vertex_count } => write!(
                f,
                "Vertex count {} exceeds 16-bit index capacity",
                vertex_count
            ),
            GeometryError::ValidationError(msg) => write!(f, "Geometry validation failed: {}", msg),
        }
    }
}

impl std::error::Error for CastleRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CastleRenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for GraphicsError {}
impl std::error::Error for GeometryError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for CastleRenderError {
    fn from(err: std::io::Error) -> Self {
        CastleRenderError::Io(err)
    }
}

impl From<ConfigError> for CastleRenderError {
    fn from(err: ConfigError) -> Self {
        CastleRenderError::Config(err)
    }
}

impl From<GraphicsError> for CastleRenderError {
    fn from(err: GraphicsError) -> Self {
        CastleRenderError::Graphics(err)
    }
}

impl From<GeometryError> for CastleRenderError {
    fn from(err: GeometryError) -> Self {
        CastleRenderError::Geometry(err)
    }
}
