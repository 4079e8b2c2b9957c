//! 枚举 key 并把对象内容依次写到输出
//!
//! 枚举任务是生产者，主循环是消费者，两者之间是容量为 1 的队列，
//! 前缀列举(分页的网络请求)可以和第一个对象的下载同时进行。
use std::sync::Arc;

use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::CatError;
use crate::store::ObjectStore;

mod enumerator;
mod log;
mod streamer;

pub use enumerator::enumerate;
pub use log::CatLog;
pub use streamer::stream;

/// 队列里的一项：一个 key，或者让整个流程失败的列举错误
pub type KeyItem = Result<String, CatError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatOptions {
    /// 前缀列举时的分组符，空串表示不分组
    pub delimiter: String,
    /// 参数当作前缀展开
    pub prefix: bool,
    /// 只消费 key，不下载
    pub dry_run: bool,
}

impl Default for CatOptions {
    fn default() -> Self {
        Self {
            delimiter: "/".to_string(),
            prefix: false,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatStats {
    /// 从队列中消费的 key
    pub keys: u64,
    /// 实际下载的对象
    pub objects: u64,
    /// 写到输出的字节数
    pub bytes: u64,
}

/// 运行整个流水线
///
/// 任何列举、下载或写出错误都会立即返回，剩下的 key 不再处理；
/// 返回时丢弃接收端，枚举任务在下一次发送时退出。
pub async fn run<S, W>(
    store: Arc<S>,
    options: &CatOptions,
    args: Vec<String>,
    log: CatLog,
    out: &mut W,
) -> Result<CatStats, CatError>
where
    S: ObjectStore + ?Sized + 'static,
    W: AsyncWrite + Unpin + ?Sized,
{
    let (tx, mut rx) = mpsc::channel::<KeyItem>(1);

    let producer = {
        let store = Arc::clone(&store);
        let delimiter = options.delimiter.clone();
        let prefix = options.prefix;
        tokio::spawn(async move {
            enumerate(store.as_ref(), &delimiter, &args, prefix, log, tx).await;
        })
    };

    let mut stats = CatStats::default();
    while let Some(item) = rx.recv().await {
        let key = item?;
        stats.keys += 1;
        if options.dry_run {
            debug!("dry run, skip {}", key);
            continue;
        }
        stats.bytes += stream(store.as_ref(), &key, out).await?;
        stats.objects += 1;
    }

    producer
        .await
        .map_err(|e| CatError::Enumerator(e.to_string()))?;
    Ok(stats)
}


#[cfg(test)]
mod tests {
    use super::testing::{capture_logs_async, page, BrokenPipe, Call, MemoryStore};
    use super::*;

    fn args(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[tokio::test]
    async fn test_literal_keys_concatenated_in_order() {
        let store = Arc::new(
            MemoryStore::default()
                .with_object("a.txt", b"first\n")
                .with_object("b.txt", b"second"),
        );
        let mut out = Vec::new();
        let stats = run(
            store.clone(),
            &CatOptions::default(),
            args(&["a.txt", "b.txt"]),
            CatLog::new(true),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(out, b"first\nsecond");
        assert_eq!(store.calls(), vec![Call::get("a.txt"), Call::get("b.txt")]);
        assert_eq!(
            stats,
            CatStats {
                keys: 2,
                objects: 2,
                bytes: 12
            }
        );
    }

    #[tokio::test]
    async fn test_prefix_two_pages_fetched_in_order() {
        let store = Arc::new(
            MemoryStore::default()
                .with_pages(
                    "logs/",
                    vec![
                        page(&["logs/1.log"], &[], Some("X")),
                        page(&["logs/2.log"], &[], None),
                    ],
                )
                .with_object("logs/1.log", b"one ")
                .with_object("logs/2.log", b"two"),
        );
        let options = CatOptions {
            prefix: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        run(
            store.clone(),
            &options,
            args(&["logs/"]),
            CatLog::new(true),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(out, b"one two");
        let gets = store
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Get(_)))
            .collect::<Vec<_>>();
        assert_eq!(gets, vec![Call::get("logs/1.log"), Call::get("logs/2.log")]);
    }

    #[tokio::test]
    async fn test_common_prefixes_not_fetched() {
        let store = Arc::new(
            MemoryStore::default()
                .with_pages("", vec![page(&["top.txt"], &["logs/"], None)])
                .with_object("top.txt", b"top"),
        );
        let options = CatOptions {
            prefix: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        run(store.clone(), &options, args(&[""]), CatLog::new(false), &mut out)
            .await
            .unwrap();
        assert_eq!(out, b"top");
        assert!(!store.calls().contains(&Call::get("logs/")));
    }

    #[tokio::test]
    async fn test_dry_run_never_retrieves_but_logs_keys() {
        let store = Arc::new(MemoryStore::default().with_pages(
            "logs/",
            vec![
                page(&["logs/1.log"], &["logs/2023/"], Some("X")),
                page(&["logs/2.log"], &[], None),
            ],
        ));
        let options = CatOptions {
            prefix: true,
            dry_run: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        let (stats, logs) = capture_logs_async(run(
            store.clone(),
            &options,
            args(&["logs/"]),
            CatLog::new(false),
            &mut out,
        ))
        .await;

        let stats = stats.unwrap();
        assert_eq!(stats.keys, 2);
        assert_eq!(stats.objects, 0);
        assert!(out.is_empty());
        assert_eq!(store.get_calls(), 0);
        assert!(logs.contains("object logs/1.log"));
        assert!(logs.contains("object logs/2.log"));
        assert!(logs.contains("prefix logs/2023/"));
    }

    #[tokio::test]
    async fn test_quiet_suppresses_info() {
        let store = Arc::new(MemoryStore::default().with_object("a.txt", b"a"));
        let mut out = Vec::new();
        let (stats, logs) = capture_logs_async(run(
            store,
            &CatOptions::default(),
            args(&["a.txt"]),
            CatLog::new(true),
            &mut out,
        ))
        .await;
        assert!(stats.is_ok());
        assert_eq!(out, b"a");
        assert!(!logs.contains("INFO"));
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal() {
        let store = Arc::new(
            MemoryStore::default()
                .with_pages("logs/", vec![page(&["logs/1.log"], &[], None)])
                .with_object("logs/1.log", b"one")
                .with_failing_prefix("secret/")
                .with_pages("data/", vec![page(&["data/a"], &[], None)])
                .with_object("data/a", b"a"),
        );
        let options = CatOptions {
            prefix: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        let err = run(
            store.clone(),
            &options,
            args(&["logs/", "secret/", "data/"]),
            CatLog::new(true),
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CatError::Listing { ref prefix, .. } if prefix == "secret/"));
        // 失败前的 key 已经输出，后面的参数不再处理
        assert_eq!(out, b"one");
        assert!(!store.calls().contains(&Call::list("data/", "/", None)));
        assert!(!store.calls().contains(&Call::get("data/a")));
    }

    #[tokio::test]
    async fn test_retrieval_failure_aborts_remaining_keys() {
        let store = Arc::new(
            MemoryStore::default()
                .with_object("a.txt", b"a")
                .with_object("c.txt", b"c"),
        );
        let mut out = Vec::new();
        let err = run(
            store.clone(),
            &CatOptions::default(),
            args(&["a.txt", "missing.txt", "c.txt"]),
            CatLog::new(true),
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CatError::Retrieval { ref key, .. } if key == "missing.txt"));
        assert_eq!(out, b"a");
        assert!(!store.calls().contains(&Call::get("c.txt")));
    }

    #[tokio::test]
    async fn test_output_failure_is_fatal() {
        let store = Arc::new(MemoryStore::default().with_object("a.txt", b"a"));
        let err = run(
            store,
            &CatOptions::default(),
            args(&["a.txt"]),
            CatLog::new(true),
            &mut BrokenPipe,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CatError::Output(_)));
    }

    #[tokio::test]
    async fn test_no_keys() {
        let store = Arc::new(MemoryStore::default());
        let mut out = Vec::new();
        let stats = run(
            store.clone(),
            &CatOptions::default(),
            Vec::new(),
            CatLog::new(true),
            &mut out,
        )
        .await
        .unwrap();
        assert_eq!(stats, CatStats::default());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dyn_store() {
        let store: Arc<dyn ObjectStore> =
            Arc::new(MemoryStore::default().with_object("a.txt", b"dyn"));
        let mut out = Vec::new();
        run(
            store,
            &CatOptions::default(),
            args(&["a.txt"]),
            CatLog::new(true),
            &mut out,
        )
        .await
        .unwrap();
        assert_eq!(out, b"dyn");
    }
}
