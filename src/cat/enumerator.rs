use std::ops::ControlFlow;

use tokio::sync::mpsc::Sender;
use tracing::debug;

use crate::cat::{CatLog, KeyItem};
use crate::error::CatError;
use crate::store::ObjectStore;

/// 把命令行参数展开成 key，按顺序送进 `tx`
///
/// 非前缀模式原样发送参数；前缀模式逐页列举，直到没有 continuation token。
/// 列举失败时把错误送给消费端并停止，后面的参数不再处理。
/// 消费端已经退出时直接返回。
pub async fn enumerate<S>(
    store: &S,
    delimiter: &str,
    args: &[String],
    prefix: bool,
    log: CatLog,
    tx: Sender<KeyItem>,
) where
    S: ObjectStore + ?Sized,
{
    for arg in args {
        if prefix {
            if list_all_objects(store, arg, delimiter, log, &tx).await.is_break() {
                return;
            }
        } else {
            if send_key(&tx, arg.clone()).await.is_break() {
                return;
            }
            log.object(arg);
        }
    }
    debug!("enumerated {} argument(s)", args.len());
}

async fn send_key(tx: &Sender<KeyItem>, key: String) -> ControlFlow<()> {
    match tx.send(Ok(key)).await {
        Ok(()) => ControlFlow::Continue(()),
        Err(_) => {
            debug!("key receiver closed, stop enumerating");
            ControlFlow::Break(())
        }
    }
}

async fn list_all_objects<S>(
    store: &S,
    prefix: &str,
    delimiter: &str,
    log: CatLog,
    tx: &Sender<KeyItem>,
) -> ControlFlow<()>
where
    S: ObjectStore + ?Sized,
{
    let mut token: Option<String> = None;
    loop {
        let page = match store.list_objects(prefix, delimiter, token.as_deref()).await {
            Ok(page) => page,
            Err(source) => {
                let err = CatError::Listing {
                    prefix: prefix.to_string(),
                    source,
                };
                // 接收端可能已经关闭，错误由消费端的失败覆盖
                let _ = tx.send(Err(err)).await;
                return ControlFlow::Break(());
            }
        };

        for object in &page.contents {
            if send_key(tx, object.key.clone()).await.is_break() {
                return ControlFlow::Break(());
            }
            log.listed_object(&object.key, object.size);
        }
        for common_prefix in &page.common_prefixes {
            log.prefix(common_prefix);
        }

        match page.continuation() {
            Some(next) => token = Some(next.to_string()),
            None => return ControlFlow::Continue(()),
        }
    }
}
