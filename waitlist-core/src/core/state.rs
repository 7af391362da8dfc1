use std::sync::Arc;

use crate::core::Config;
use crate::rating::RatingLedger;
use crate::reviews::ReviewService;
use crate::services::{ManagerRegistry, RestaurantCatalog, UserRegistry};
use crate::waitlist::{ReservationService, WaitlistDirectory};

/// 服务状态 - 持有所有服务的引用
///
/// ServiceState 是候位核心的状态容器，包含：
/// - 配置信息
/// - 协作方 (餐厅目录、用户、管理员)
/// - 候位目录与评分账本
/// - 候位服务与评价服务
///
/// # 克隆语义
///
/// 所有字段都是 `Arc` 或廉价的配置值，克隆只增加引用计数，
/// 所有克隆共享同一份队列与聚合。
///
/// # 使用示例
///
/// ```ignore
/// let state = ServiceState::initialize(&config);
/// let position = state.reservations.join_waitlist(restaurant_id, requester).await?;
/// ```
#[derive(Clone)]
pub struct ServiceState {
    /// 服务配置
    pub config: Config,
    /// 餐厅目录 (RestaurantDirectory)
    pub catalog: Arc<RestaurantCatalog>,
    /// 用户注册表 (UserDirectory)
    pub users: Arc<UserRegistry>,
    /// 管理员注册表 (Authorizer)
    pub managers: Arc<ManagerRegistry>,
    /// restaurant_id → 候位队列
    pub directory: Arc<WaitlistDirectory>,
    /// 平均星级聚合
    pub ledger: Arc<RatingLedger>,
    /// 候位服务
    pub reservations: Arc<ReservationService>,
    /// 评价服务
    pub reviews: Arc<ReviewService>,
}

impl ServiceState {
    /// 初始化服务状态
    ///
    /// 按依赖顺序创建：协作方 → 目录/账本 → 业务服务
    pub fn initialize(config: &Config) -> Self {
        let catalog = Arc::new(RestaurantCatalog::new(config));
        let users = Arc::new(UserRegistry::new());
        let managers = Arc::new(ManagerRegistry::new());

        let directory = Arc::new(WaitlistDirectory::new());
        let ledger = Arc::new(RatingLedger::new(config.rating_decimal_places));

        let reservations = Arc::new(ReservationService::new(
            directory.clone(),
            catalog.clone(),
            users.clone(),
            managers.clone(),
            config.phone_digits,
        ));
        let reviews = Arc::new(ReviewService::new(ledger.clone(), catalog.clone()));

        tracing::info!(
            environment = %config.environment,
            timezone = %config.timezone,
            phone_digits = config.phone_digits,
            "Service state initialized"
        );

        Self {
            config: config.clone(),
            catalog,
            users,
            managers,
            directory,
            ledger,
            reservations,
            reviews,
        }
    }
}
