//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 错误响应结构 (from shared::error)
//! - [`money`] - 金额计算 (Decimal)
//! - [`validation`] - 请求字段校验
//! - [`logger`] - 日志初始化

pub mod logger;
pub mod money;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
