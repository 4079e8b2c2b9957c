use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, DATE};
use tracing::debug;

use crate::auth::AuthAPI;
use crate::entity::ListObjectsPage;
use crate::error::OssError;
use crate::oss::{OSSInfo, API, OSS};
use crate::request::RequestBuilder;
use crate::store::{ObjectBody, ObjectStore};
use crate::util;

fn header_value(value: &str) -> Result<HeaderValue, OssError> {
    HeaderValue::from_str(value)
        .map_err(|e| OssError::Err(format!("invalid header value {:?}: {}", value, e)))
}

impl OSS {
    /// 生成请求地址和带签名的请求头，`key` 为空表示 bucket 级请求
    pub(crate) fn build_request<S: AsRef<str>>(
        &self,
        key: S,
        build: &RequestBuilder,
    ) -> Result<(String, HeaderMap), OssError> {
        let key = key.as_ref();
        let mut build = build.clone();
        if let Some(token) = self.security_token() {
            build = build.oss_header_put("x-oss-security-token", token.as_str());
        }
        let date = util::http_date(chrono::Utc::now());
        let authorization = self.oss_sign(key, &date, &build)?;

        let mut headers = HeaderMap::new();
        headers.insert(DATE, header_value(&date)?);
        headers.insert(AUTHORIZATION, header_value(&authorization)?);
        for (k, v) in &build.oss_headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| OssError::Err(format!("invalid header name {:?}: {}", k, e)))?;
            headers.insert(name, header_value(v)?);
        }

        let path = if key.is_empty() {
            "/".to_string()
        } else {
            self.key_urlencode(self.format_key(key))
        };
        let query = build.query_string();
        let url = if query.is_empty() {
            format!("{}{}", self.bucket_url(), path)
        } else {
            format!("{}{}?{}", self.bucket_url(), path, query)
        };
        Ok((url, headers))
    }

    async fn send(&self, key: &str, build: &RequestBuilder) -> Result<reqwest::Response, OssError> {
        let (url, headers) = self.build_request(key, build)?;
        debug!("oss log: {} {}", build.method, url);
        let response = self.client().get(url).headers(headers).send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let result = response.text().await?;
            debug!("oss log: status: {} error: {}", status, result);
            Err(OssError::from_response(status, &result))
        }
    }
}

#[async_trait]
impl ObjectStore for OSS {
    async fn list_objects(
        &self,
        prefix: &str,
        delimiter: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListObjectsPage, OssError> {
        let mut build = RequestBuilder::new().with_parameter("list-type", "2");
        if !prefix.is_empty() {
            build = build.with_parameter("prefix", prefix);
        }
        if !delimiter.is_empty() {
            build = build.with_parameter("delimiter", delimiter);
        }
        if let Some(token) = continuation_token {
            build = build.with_parameter("continuation-token", token);
        }
        let response = self.send("", &build).await?;
        let body = response.text().await?;
        ListObjectsPage::parse(&body)
    }

    async fn get_object(&self, key: &str) -> Result<ObjectBody, OssError> {
        let response = self.send(key, &RequestBuilder::new()).await?;
        debug!(
            "oss log: get object {} content-length: {:?}",
            key,
            response.content_length()
        );
        Ok(response.bytes_stream().map_err(OssError::from).boxed())
    }
}
