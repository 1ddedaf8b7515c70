//! Krill Order Server - chat-driven order intake and approval desk
//!
//! # Module structure
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、轮询调度循环
//! ├── utils/         # 日志、错误类型
//! ├── db/            # SQLite 存储层
//! ├── channel/       # 消息通道适配 (Bot API)
//! ├── orders/        # 分类、拆单、签名暂存、进件、审批
//! ├── ticket/        # 订单票据渲染
//! ├── auth/          # 员工角色、限流
//! ├── notify/        # 定向/广播投递
//! ├── blob/          # 附件外链上传 (尽力而为)
//! └── handlers/      # 入站事件处理器
//! ```

pub mod auth;
pub mod blob;
pub mod channel;
pub mod core;
pub mod db;
pub mod handlers;
pub mod i18n;
pub mod notify;
pub mod orders;
pub mod ticket;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{AppState, Config, Server};
pub use auth::{RateLimiter, StaffDirectory};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __ __      _ ____
   / //_/_____(_) / /
  / ,<  / ___/ / / /
 / /| |/ /  / / / /
/_/ |_/_/  /_/_/_/
  ____          __
 / __ \_______/ /__  _____
/ / / / ___/ __  / _ \/ ___/
\ \_/ / /  / /_/ /  __/ /
 \____/_/   \__,_/\___/_/
    "#
    );
}
