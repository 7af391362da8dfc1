//! 评价模块

mod service;

pub use service::ReviewService;
