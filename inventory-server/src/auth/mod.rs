//! 访问控制模块
//!
//! 仅有一个占位式的管理员门禁 (非真正的认证):
//! - [`admin_gate`] - 修改类路由要求 `x-admin-auth: true`

pub mod gate;

pub use gate::{ADMIN_HEADER, AdminGate, admin_gate};
