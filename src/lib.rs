//! # oss-cat
//!
//! 把阿里云 OSS 上一个或多个对象的内容依次输出到标准输出，类似 `cat`。
//!
//! 参数可以是对象 key，也可以是前缀(`-prefix`)，前缀会先分页列举出全部匹配的 key。
//! key 的枚举和对象的下载分别在两个任务里进行，中间是容量为 1 的队列，
//! 输出顺序始终和 key 的顺序一致。
//!
//! # 功能列表：
//!
//! 1. 命令行
//! ```text
//! oss-cat -bucket my-bucket a.txt b.txt > ab.txt
//! oss-cat -bucket my-bucket -prefix logs/2024/ | gzip -dc
//! oss-cat -bucket my-bucket -prefix -dry-run logs/
//! ```
//! 凭证和 endpoint 从环境变量 `OSS_KEY_ID`、`OSS_KEY_SECRET`、`OSS_ENDPOINT` 读取，
//! 支持 `.env` 文件，STS 临时凭证用 `OSS_SECURITY_TOKEN`。
//!
//! 2. 作为库使用
//! ```rust,no_run
//! use std::sync::Arc;
//! use oss_cat::cat::{self, CatLog, CatOptions};
//! use oss_cat::oss::OSS;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let oss = OSS::from_env("my-bucket")?;
//! let options = CatOptions {
//!     prefix: true,
//!     ..Default::default()
//! };
//! let mut out = Vec::new();
//! let stats = cat::run(
//!     Arc::new(oss),
//!     &options,
//!     vec!["logs/".to_string()],
//!     CatLog::new(false),
//!     &mut out,
//! )
//! .await?;
//! println!("{} object(s), {} byte(s)", stats.objects, stats.bytes);
//! # Ok(())
//! # }
//! ```
pub mod async_impl;
pub mod auth;
pub mod cat;
pub mod cli;
pub mod entity;
pub mod error;
pub mod oss;
pub mod request;
pub mod store;
pub mod util;
