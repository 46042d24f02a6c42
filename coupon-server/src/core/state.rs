//! Server State
//!
//! Shared handles cloned into every request handler.

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 持有配置和数据库连接池
///
/// 克隆成本低 (内部都是引用计数)
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        Self { config, db }
    }

    /// 打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db))
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
