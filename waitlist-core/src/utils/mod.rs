//! 工具模块 - 通用工具函数
//!
//! # 内容
//!
//! - [`logger`] - tracing 日志初始化
//! - [`validation`] - 输入校验 (手机号、星级、坐标、文本长度)
//! - [`time`] - 营业时区与营业时间
//! - [`geo`] - 距离计算
//! - [`ids`] - 内存存储的无冲突 ID 分配

pub mod geo;
pub mod ids;
pub mod logger;
pub mod time;
pub mod validation;
