//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Versus Runner:
//! command construction and spawning, capture destination naming,
//! test discovery and the shared status stream.
//!
//! 此模块为 Versus Runner 提供基础设施服务：
//! 命令构建与派生、捕获文件命名、测试发现以及共享状态输出流。

pub mod command;
pub mod discovery;
pub mod fs;
pub mod status;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
