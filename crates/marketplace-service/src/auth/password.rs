//! 密码处理
//!
//! 提供密码哈希和验证功能

use bcrypt::{hash, verify};

use crate::error::MarketplaceError;

/// 对密码进行哈希处理
///
/// `cost` 由配置决定，测试环境使用最低成本
pub fn hash_password(password: &str, cost: u32) -> Result<String, MarketplaceError> {
    hash(password, cost).map_err(|e| MarketplaceError::Internal(format!("密码哈希失败: {}", e)))
}

/// 验证密码
///
/// 比较明文密码与存储的哈希值
pub fn verify_password(password: &str, hash: &str) -> Result<bool, MarketplaceError> {
    verify(password, hash).map_err(|e| MarketplaceError::Internal(format!("密码验证失败: {}", e)))
}
