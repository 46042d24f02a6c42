//! Coupon Server - 商户优惠券生命周期与发票折扣计算
//!
//! # 模块结构
//!
//! ```text
//! coupon-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # SQLite 连接池与仓储
//! ├── coupons/       # 优惠券生命周期 (创建、激活、停用、修改)
//! ├── pricing/       # 发票折扣计算
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod core;
pub mod coupons;
pub mod db;
pub mod pricing;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 初始化日志
pub fn setup_environment(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}
