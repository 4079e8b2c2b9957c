use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::entity::ListObjectsPage;
use crate::error::OssError;

/// 对象内容，按块读取
pub type ObjectBody = BoxStream<'static, Result<Bytes, OssError>>;

/// cat 需要的两个后端操作，作用域是创建时确定的 bucket
///
/// 实现需要能在枚举任务和输出任务之间只读共享。
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 列出一页 `prefix` 下的对象，`delimiter` 为空表示不折叠
    async fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListObjectsPage, OssError>;

    /// 获取整个对象
    async fn get_object(&self, key: &str) -> Result<ObjectBody, OssError>;
}
