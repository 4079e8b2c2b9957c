//! 基于 `reqwest` 异步客户端的 [`ObjectStore`](crate::store::ObjectStore) 实现
mod object;
