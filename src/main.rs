//! oss-cat
//!
//! 把 OSS 对象内容依次输出到标准输出。
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use oss_cat::cat::{self, CatLog, CatStats};
use oss_cat::cli::{self, Cli};
use oss_cat::error::CatError;
use oss_cat::oss::OSS;

#[tokio::main]
async fn main() -> ExitCode {
    let raw_args = std::env::args_os().collect::<Vec<_>>();
    let command = cli::command_name(raw_args.first());
    let args = Cli::parse_from(cli::normalize_args(raw_args));

    if args.version {
        println!("{}", cli::version_line(&command));
        return ExitCode::SUCCESS;
    }

    if let Err(e) = cli::init_logging(args.quiet) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }
    let log = CatLog::new(args.quiet);

    match execute(args, log).await {
        Ok(stats) => {
            debug!(
                "done: {} key(s), {} object(s), {} byte(s)",
                stats.keys, stats.objects, stats.bytes
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log.error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: Cli, log: CatLog) -> Result<CatStats, CatError> {
    args.validate()?;
    let oss = OSS::from_env(args.bucket.as_str()).map_err(|e| CatError::Config(e.to_string()))?;
    let options = args.options();
    let mut stdout = tokio::io::stdout();
    cat::run(Arc::new(oss), &options, args.keys, log, &mut stdout).await
}
