use std::sync::Arc;

use oss_cat::cat::{self, CatLog, CatOptions};
use oss_cat::oss::OSS;

/// 列出 `OSS_BUCKET` 下 `logs/` 前缀的全部对象，但不下载
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    //set log info
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let bucket = dotenvy::var("OSS_BUCKET").unwrap_or_else(|_| "my-bucket".to_string());
    let oss = OSS::from_env(bucket).unwrap();
    let options = CatOptions {
        prefix: true,
        dry_run: true,
        ..Default::default()
    };
    let mut stdout = tokio::io::stdout();
    let stats = cat::run(
        Arc::new(oss),
        &options,
        vec!["logs/".to_string()],
        CatLog::new(false),
        &mut stdout,
    )
    .await
    .unwrap();
    println!("keys: {}", stats.keys);
}
