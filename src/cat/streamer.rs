use futures::StreamExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::CatError;
use crate::store::ObjectStore;

/// 把一个对象的内容完整写到 `out`，返回写出的字节数
///
/// 获取失败和写入失败都直接返回错误，已经写出的部分无法撤回。
pub async fn stream<S, W>(store: &S, key: &str, out: &mut W) -> Result<u64, CatError>
where
    S: ObjectStore + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let retrieval = |source| CatError::Retrieval {
        key: key.to_string(),
        source,
    };

    let mut body = store.get_object(key).await.map_err(retrieval)?;
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(retrieval)?;
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    out.flush().await?;
    Ok(written)
}
