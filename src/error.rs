use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// insert 时父节点不存在
    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    /// 会员ID在树中已存在
    #[error("Duplicate member id: {0}")]
    DuplicateId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 佣金比例表非法（负数或超过100%）
    #[error("Invalid rate table: {0}")]
    InvalidRateTable(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}
