//! Services Module - 协作方接口及其内存实现
//!
//! - [`RestaurantDirectory`] / [`RestaurantCatalog`] - 餐厅目录与搜索
//! - [`UserDirectory`] / [`UserRegistry`] - 用户资料与候位反向引用
//! - [`Authorizer`] / [`ManagerRegistry`] - 管理权限

pub mod manager_registry;
pub mod restaurant_catalog;
pub mod traits;
pub mod user_registry;

pub use manager_registry::ManagerRegistry;
pub use restaurant_catalog::RestaurantCatalog;
pub use traits::{Authorizer, RestaurantDirectory, UserDirectory};
pub use user_registry::UserRegistry;
