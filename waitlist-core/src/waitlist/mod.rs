//! 候位模块 - 每个餐厅一个 FIFO 队列
//!
//! # 结构
//!
//! ```text
//! ReservationService        编排：餐厅校验、身份、反向引用
//!   └── WaitlistDirectory   restaurant_id → WaitlistQueue (懒创建)
//!         └── WaitlistQueue Mutex<VecDeque<Party>> + 单调序号
//! ```
//!
//! # 状态机
//!
//! ```text
//! NONE ──join──▶ WAITING ──call_next──▶ SEATED
//!                   └──────leave──────▶ CANCELLED
//! ```
//!
//! 终态不可回到 WAITING；再次加入会创建新的 Party。

mod directory;
mod error;
mod party;
mod queue;
mod service;

pub use directory::WaitlistDirectory;
pub use error::{QueueError, QueueResult};
pub use party::{ANONYMOUS_DISPLAY_NAME, Party, PartyKey};
pub use queue::WaitlistQueue;
pub use service::{CallNextOutcome, ReservationService, Requester};

#[cfg(test)]
mod tests;
