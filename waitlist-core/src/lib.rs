//! Waitlist Core - 餐厅候位与评分核心
//!
//! # 架构概述
//!
//! 本 crate 提供候位系统的核心逻辑，不包含 HTTP 路由：
//!
//! - **候位** (`waitlist`): 每个餐厅一个 FIFO 队列，支持加入、查询位置、离开和叫号
//! - **评分** (`rating`): 平均星级的增量聚合
//! - **评价** (`reviews`): 评价存储，驱动评分聚合
//! - **协作方** (`services`): 餐厅目录、用户目录、权限接口及其内存实现
//!
//! # 模块结构
//!
//! ```text
//! waitlist-core/src/
//! ├── core/          # 配置、状态、错误
//! ├── waitlist/      # 队列、目录、候位服务
//! ├── rating/        # 评分聚合
//! ├── reviews/       # 评价服务
//! ├── services/      # 协作方接口与实现
//! └── utils/         # 日志、校验、时间、距离
//! ```

pub mod core;
pub mod rating;
pub mod reviews;
pub mod services;
pub mod utils;
pub mod waitlist;

// Re-export 公共类型
pub use crate::core::{Config, ServiceError, ServiceResult, ServiceState};
pub use rating::{RatingAggregate, RatingLedger, RatingSnapshot};
pub use reviews::ReviewService;
pub use waitlist::{
    CallNextOutcome, Party, PartyKey, QueueError, ReservationService, Requester,
    WaitlistDirectory, WaitlistQueue,
};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file, setup_environment};
