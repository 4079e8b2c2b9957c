use hmac::{Hmac, Mac};
use tracing::debug;

use crate::error::OssError;
use crate::oss::{OSSInfo, API, OSS};
use crate::request::RequestBuilder;
use crate::util;

/// 参与签名的子资源，其余查询参数(prefix、delimiter、list-type...)不签
const SIGNED_SUBRESOURCES: &[&str] = &[
    "acl",
    "continuation-token",
    "objectMeta",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "security-token",
    "versionId",
    "x-oss-process",
    "x-oss-traffic-limit",
];

pub trait AuthAPI {
    /// 计算 V1 签名，`key` 为空表示 bucket 级请求
    fn sign<S: AsRef<str>>(
        &self,
        key: S,
        date: &str,
        build: &RequestBuilder,
    ) -> Result<String, OssError>;

    /// `Authorization` 头的值
    fn oss_sign<S: AsRef<str>>(
        &self,
        key: S,
        date: &str,
        build: &RequestBuilder,
    ) -> Result<String, OssError>;
}

pub(crate) fn string_to_sign(resource: &str, date: &str, build: &RequestBuilder) -> String {
    // BTreeMap 已经按 key 排好序
    let canonicalized_oss_headers = build
        .oss_headers
        .iter()
        .filter(|(k, _)| k.starts_with("x-oss-"))
        .map(|(k, v)| format!("{}:{}\n", k, v.trim()))
        .collect::<String>();

    let subresources = build
        .parameters
        .iter()
        .filter(|(k, _)| SIGNED_SUBRESOURCES.contains(&k.as_str()))
        .map(|(k, v)| {
            if v.is_empty() {
                k.to_string()
            } else {
                format!("{}={}", k, v)
            }
        })
        .collect::<Vec<_>>();
    let canonicalized_resource = if subresources.is_empty() {
        resource.to_string()
    } else {
        format!("{}?{}", resource, subresources.join("&"))
    };

    format!(
        "{}\n{}\n{}\n{}\n{}{}",
        build.method,
        build.content_md5.as_deref().unwrap_or_default(),
        build.content_type.as_deref().unwrap_or_default(),
        date,
        canonicalized_oss_headers,
        canonicalized_resource,
    )
}

impl AuthAPI for OSS {
    fn sign<S: AsRef<str>>(
        &self,
        key: S,
        date: &str,
        build: &RequestBuilder,
    ) -> Result<String, OssError> {
        let resource = self.format_oss_resource_str(self.bucket().as_str(), key.as_ref());
        let sign_str = string_to_sign(&resource, date, build);
        debug!("sign_str: {:?}", sign_str);
        let mut hasher: Hmac<sha1::Sha1> = Hmac::new_from_slice(self.key_secret().as_bytes())
            .map_err(|_| OssError::Err("Hmac new from slice error".to_string()))?;
        hasher.update(sign_str.as_bytes());
        Ok(util::base64_encode(&hasher.finalize().into_bytes()))
    }

    fn oss_sign<S: AsRef<str>>(
        &self,
        key: S,
        date: &str,
        build: &RequestBuilder,
    ) -> Result<String, OssError> {
        let signature = self.sign(key, date, build)?;
        Ok(format!("OSS {}:{}", self.key_id(), signature))
    }
}
