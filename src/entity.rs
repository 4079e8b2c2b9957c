use serde::Deserialize;

use crate::error::OssError;

/// ListObjectsV2 返回的一页结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsPage {
    pub contents: Vec<ObjectSummary>,
    /// 按 delimiter 折叠后的“目录”，只用于日志
    pub common_prefixes: Vec<String>,
    pub is_truncated: bool,
    pub next_continuation_token: Option<String>,
    pub key_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<String>,
    pub etag: Option<String>,
    pub storage_class: Option<String>,
}

impl ListObjectsPage {
    /// 解析 `<ListBucketResult>` 响应
    pub fn parse(body: &str) -> Result<Self, OssError> {
        let parsed: XmlListBucketResult = quick_xml::de::from_str(body)?;
        Ok(Self::from(parsed))
    }

    /// 下一页的 continuation token，没有下一页时为 `None`
    pub fn continuation(&self) -> Option<&str> {
        if self.is_truncated {
            self.next_continuation_token
                .as_deref()
                .filter(|token| !token.is_empty())
        } else {
            None
        }
    }
}

impl From<XmlListBucketResult> for ListObjectsPage {
    fn from(value: XmlListBucketResult) -> Self {
        Self {
            contents: value
                .contents
                .into_iter()
                .map(|o| ObjectSummary {
                    key: o.key,
                    size: o.size,
                    last_modified: o.last_modified,
                    etag: o.etag.map(|etag| etag.trim_matches('"').to_string()),
                    storage_class: o.storage_class,
                })
                .collect(),
            common_prefixes: value
                .common_prefixes
                .into_iter()
                .map(|p| p.prefix)
                .collect(),
            is_truncated: value.is_truncated.unwrap_or(false),
            next_continuation_token: value.next_continuation_token,
            key_count: value.key_count,
        }
    }
}

/// OSS 错误响应体
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "Code")]
    pub code: Option<String>,
    #[serde(rename = "Message")]
    pub message: Option<String>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
    #[serde(rename = "HostId")]
    pub host_id: Option<String>,
}

impl ErrorResponse {
    pub fn parse(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }
        quick_xml::de::from_str(body).ok()
    }
}

#[derive(Debug, Deserialize)]
struct XmlListBucketResult {
    #[serde(rename = "IsTruncated")]
    is_truncated: Option<bool>,
    #[serde(rename = "KeyCount")]
    key_count: Option<u32>,
    #[serde(rename = "NextContinuationToken")]
    next_continuation_token: Option<String>,
    #[serde(rename = "Contents", default)]
    contents: Vec<XmlObject>,
    #[serde(rename = "CommonPrefixes", default)]
    common_prefixes: Vec<XmlCommonPrefix>,
}

#[derive(Debug, Deserialize)]
struct XmlObject {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "LastModified")]
    last_modified: Option<String>,
    #[serde(rename = "ETag")]
    etag: Option<String>,
    #[serde(rename = "Size")]
    size: u64,
    #[serde(rename = "StorageClass")]
    storage_class: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlCommonPrefix {
    #[serde(rename = "Prefix")]
    prefix: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRUNCATED_PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult>
  <Name>examplebucket</Name>
  <Prefix>logs/</Prefix>
  <MaxKeys>2</MaxKeys>
  <Delimiter>/</Delimiter>
  <IsTruncated>true</IsTruncated>
  <NextContinuationToken>CgJiYw--</NextContinuationToken>
  <KeyCount>3</KeyCount>
  <Contents>
    <Key>logs/1.log</Key>
    <LastModified>2024-02-21T06:43:04.000Z</LastModified>
    <ETag>"5B3C1A2E053D763E1B002CC607C5A0FE"</ETag>
    <Type>Normal</Type>
    <Size>344606</Size>
    <StorageClass>Standard</StorageClass>
  </Contents>
  <Contents>
    <Key>logs/2.log</Key>
    <LastModified>2024-02-21T06:44:10.000Z</LastModified>
    <ETag>"1C3D9175B6FC201293AD4890B31ACB7A"</ETag>
    <Type>Normal</Type>
    <Size>12</Size>
    <StorageClass>IA</StorageClass>
  </Contents>
  <CommonPrefixes>
    <Prefix>logs/2024/</Prefix>
  </CommonPrefixes>
</ListBucketResult>"#;

    #[test]
    fn test_parse_truncated_page() {
        let page = ListObjectsPage::parse(TRUNCATED_PAGE).unwrap();
        let keys = page
            .contents
            .iter()
            .map(|o| o.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["logs/1.log", "logs/2.log"]);
        assert_eq!(page.contents[0].size, 344606);
        assert_eq!(
            page.contents[0].etag.as_deref(),
            Some("5B3C1A2E053D763E1B002CC607C5A0FE")
        );
        assert_eq!(page.common_prefixes, vec!["logs/2024/".to_string()]);
        assert_eq!(page.key_count, Some(3));
        assert_eq!(page.continuation(), Some("CgJiYw--"));
    }

    #[test]
    fn test_parse_last_page() {
        let body = r#"<ListBucketResult>
  <Name>examplebucket</Name>
  <Prefix>logs/</Prefix>
  <IsTruncated>false</IsTruncated>
  <KeyCount>1</KeyCount>
  <Contents>
    <Key>logs/3.log</Key>
    <Size>0</Size>
  </Contents>
</ListBucketResult>"#;
        let page = ListObjectsPage::parse(body).unwrap();
        assert_eq!(page.contents.len(), 1);
        assert!(page.common_prefixes.is_empty());
        assert_eq!(page.continuation(), None);
    }

    #[test]
    fn test_parse_empty_listing() {
        let body = r#"<ListBucketResult>
  <Name>examplebucket</Name>
  <Prefix>nothing/</Prefix>
  <IsTruncated>false</IsTruncated>
  <KeyCount>0</KeyCount>
</ListBucketResult>"#;
        let page = ListObjectsPage::parse(body).unwrap();
        assert!(page.contents.is_empty());
        assert_eq!(page.continuation(), None);
    }

    #[test]
    fn test_token_ignored_when_not_truncated() {
        let page = ListObjectsPage {
            is_truncated: false,
            next_continuation_token: Some("stale".to_string()),
            ..Default::default()
        };
        assert_eq!(page.continuation(), None);
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"<Error>
  <Code>AccessDenied</Code>
  <Message>You have no right to access this object.</Message>
  <RequestId>65D59B2B0AD3B3F7</RequestId>
  <HostId>examplebucket.oss-cn-hangzhou.aliyuncs.com</HostId>
</Error>"#;
        let err = ErrorResponse::parse(body).unwrap();
        assert_eq!(err.code.as_deref(), Some("AccessDenied"));
        assert_eq!(err.request_id.as_deref(), Some("65D59B2B0AD3B3F7"));
        assert!(ErrorResponse::parse("  ").is_none());
    }
}
