use std::collections::BTreeMap;

use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum RequestType {
    #[strum(serialize = "GET")]
    Get,
}

/// 单次请求的参数，签名和发送共用
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub method: RequestType,
    /// 查询参数，按 key 排序
    pub parameters: BTreeMap<String, String>,
    pub content_type: Option<String>,
    pub content_md5: Option<String>,
    /// `x-oss-` 开头的头，参与签名
    pub oss_headers: BTreeMap<String, String>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        RequestBuilder {
            method: RequestType::Get,
            parameters: BTreeMap::new(),
            content_type: None,
            content_md5: None,
            oss_headers: BTreeMap::new(),
        }
    }
    pub fn with_parameter<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
    pub fn oss_header_put<S: AsRef<str>>(mut self, key: S, value: S) -> Self {
        self.oss_headers
            .insert(key.as_ref().to_lowercase(), value.as_ref().to_string());
        self
    }

    /// 查询字符串，值做 URL 编码；没有参数时为空串
    pub fn query_string(&self) -> String {
        self.parameters
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    urlencoding::encode(k).into_owned()
                } else {
                    format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
