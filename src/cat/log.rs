use std::fmt::Display;

use tracing::{error, info};

use crate::util;

/// 枚举和输出共用的日志上下文，启动时创建一次后显式传递
///
/// quiet 只屏蔽 info，不屏蔽 error。
#[derive(Debug, Clone, Copy, Default)]
pub struct CatLog {
    quiet: bool,
}

impl CatLog {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// 命令行直接给出的 key
    pub fn object(&self, key: &str) {
        if !self.quiet {
            info!("object {}", key);
        }
    }

    /// 前缀展开得到的 key
    pub fn listed_object(&self, key: &str, size: u64) {
        if !self.quiet {
            info!("object {} {}", key, util::format_bytes(size));
        }
    }

    pub fn prefix(&self, prefix: &str) {
        if !self.quiet {
            info!("prefix {}", prefix);
        }
    }

    pub fn error<E: Display + ?Sized>(&self, err: &E) {
        error!("{}", err);
    }
}
