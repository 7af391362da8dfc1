//! 核心模块 - 配置、状态和错误定义
//!
//! # 模块结构
//!
//! - [`Config`] - 服务配置
//! - [`ServiceState`] - 服务状态
//! - [`ServiceError`] - 服务层错误

pub mod config;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::ServiceState;
