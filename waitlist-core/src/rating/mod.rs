//! 评分模块 - 餐厅平均星级的增量聚合

mod aggregate;
mod ledger;

pub use aggregate::RatingAggregate;
pub use ledger::{RatingLedger, RatingSnapshot};
