//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] / [`AppResult`] - 请求级错误 (from shared::error)
//! - [`logger`] - 日志初始化
//! - [`validation`] - 表单与查询参数校验

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCode};
