//! 命令行参数
//!
//! 兼容 Go 风格的单横线长参数(`-bucket name`、`-bucket=name`)。
use std::ffi::{OsStr, OsString};
use std::path::Path;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::Level;

use crate::cat::CatOptions;
use crate::error::CatError;

const LONG_FLAGS: &[&str] = &[
    "bucket",
    "prefix",
    "delimiter",
    "dry-run",
    "quiet",
    "version",
    "help",
];

/// Print the contents of OSS objects to standard output.
///
/// Credentials and endpoint are read from OSS_KEY_ID, OSS_KEY_SECRET,
/// OSS_ENDPOINT and the optional OSS_SECURITY_TOKEN (a .env file is honoured).
#[derive(Parser, Debug)]
#[command(name = "oss-cat", disable_version_flag = true)]
#[command(override_usage = "oss-cat [options] key [key...]")]
pub struct Cli {
    /// bucket name (*required*)
    #[arg(long, default_value = "")]
    pub bucket: String,

    /// treat args as a prefix (get all objects matching it)
    #[arg(long)]
    pub prefix: bool,

    /// delimiter to group keys when listing a prefix
    #[arg(long, default_value = "/")]
    pub delimiter: String,

    /// don't get objects, only list keys
    #[arg(long)]
    pub dry_run: bool,

    /// suppress info messages
    #[arg(long)]
    pub quiet: bool,

    /// print version and exit
    #[arg(long)]
    pub version: bool,

    /// object keys (or prefixes with -prefix)
    pub keys: Vec<String>,
}

impl Cli {
    pub fn validate(&self) -> Result<(), CatError> {
        if self.bucket.is_empty() {
            return Err(CatError::Config("bucket name required".to_string()));
        }
        Ok(())
    }

    pub fn options(&self) -> CatOptions {
        CatOptions {
            delimiter: self.delimiter.clone(),
            prefix: self.prefix,
            dry_run: self.dry_run,
        }
    }
}

/// 把 `-bucket` 这类单横线长参数改写成 `--bucket`，`--` 之后的参数不动
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut terminated = false;
    for (i, arg) in args.into_iter().map(Into::into).enumerate() {
        if i == 0 || terminated {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            terminated = true;
            normalized.push(arg);
            continue;
        }
        match arg.to_str() {
            Some(s) if is_single_dash_long(s) => normalized.push(OsString::from(format!("-{}", s))),
            _ => normalized.push(arg),
        }
    }
    normalized
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

/// 程序名，取 argv[0] 的文件名
pub fn command_name<S: AsRef<OsStr>>(argv0: Option<S>) -> String {
    argv0
        .as_ref()
        .and_then(|arg| Path::new(arg).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

pub fn version_line(command: &str) -> String {
    format!("{} {}", command, env!("CARGO_PKG_VERSION"))
}

/// 日志写到 stderr，stdout 只留给对象内容
pub fn init_logging(quiet: bool) -> Result<()> {
    let level = if quiet { Level::ERROR } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {}", e))
}
