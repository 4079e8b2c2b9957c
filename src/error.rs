use reqwest::StatusCode;

/// OSS 服务端调用错误
#[derive(Debug, thiserror::Error)]
pub enum OssError {
    #[error("http error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("config error: {0}")]
    Config(String),
    #[error("not found: {code} {message} (request id: {request_id})")]
    NotFound {
        code: String,
        message: String,
        request_id: String,
    },
    #[error("access denied: {code} {message} (request id: {request_id})")]
    AccessDenied {
        code: String,
        message: String,
        request_id: String,
    },
    #[error("status {status}: {code} {message} (request id: {request_id})")]
    Status {
        status: StatusCode,
        code: String,
        message: String,
        request_id: String,
    },
    #[error("{0}")]
    Err(String),
}

impl OssError {
    /// 根据非 2xx 响应构造错误，`body` 为 OSS 返回的 `<Error>` XML
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = crate::entity::ErrorResponse::parse(body).unwrap_or_default();
        let code = detail.code.unwrap_or_else(|| status.to_string());
        let message = detail.message.unwrap_or_default();
        let request_id = detail.request_id.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => OssError::NotFound {
                code,
                message,
                request_id,
            },
            StatusCode::FORBIDDEN => OssError::AccessDenied {
                code,
                message,
                request_id,
            },
            _ => OssError::Status {
                status,
                code,
                message,
                request_id,
            },
        }
    }
}

/// cat 流水线错误，任意一个都会让进程以非 0 退出
#[derive(Debug, thiserror::Error)]
pub enum CatError {
    #[error("{0}")]
    Config(String),
    #[error("list objects with prefix {prefix:?} failed: {source}")]
    Listing {
        prefix: String,
        #[source]
        source: OssError,
    },
    #[error("get object {key:?} failed: {source}")]
    Retrieval {
        key: String,
        #[source]
        source: OssError,
    },
    #[error("write output failed: {0}")]
    Output(#[from] std::io::Error),
    #[error("key enumerator stopped unexpectedly: {0}")]
    Enumerator(String),
}
