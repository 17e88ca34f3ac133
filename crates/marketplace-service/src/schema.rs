//! 数据库结构迁移
//!
//! SQLite 与 Postgres 各有一套迁移脚本，按连接类型选择

use sqlx::migrate::Migrator;
use tracing::info;

use greentech_shared::database::{Database, DatabaseKind};
use greentech_shared::error::Result;

static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");
static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");

pub fn migrator(kind: DatabaseKind) -> &'static Migrator {
    match kind {
        DatabaseKind::Sqlite => &SQLITE_MIGRATOR,
        DatabaseKind::Postgres => &POSTGRES_MIGRATOR,
    }
}

/// 执行尚未应用的迁移
pub async fn migrate(db: &Database) -> Result<()> {
    migrator(db.kind()).run(db.pool()).await?;
    info!(kind = db.kind().as_str(), "Database migrations applied");
    Ok(())
}
