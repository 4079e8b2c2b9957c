use crate::error::OssError;

/// OSS配置
///
/// 一个进程只访问一个 bucket，bucket 在创建时确定。
#[derive(Debug, Clone)]
pub struct OSS {
    key_id: String,
    key_secret: String,
    endpoint: String,
    bucket: String,
    security_token: Option<String>,
    client: reqwest::Client,
}

pub trait OSSInfo {
    fn endpoint(&self) -> String;
    fn bucket(&self) -> String;
    fn key_id(&self) -> String;
    fn key_secret(&self) -> String;
    fn security_token(&self) -> Option<String>;
}

pub trait API: OSSInfo {
    fn key_urlencode<S: AsRef<str>>(&self, key: S) -> String {
        key.as_ref()
            .split('/')
            .map(|x| urlencoding::encode(x))
            .collect::<Vec<_>>()
            .join("/")
    }

    fn format_key<S: AsRef<str>>(&self, key: S) -> String {
        let key = key.as_ref();
        if key.starts_with('/') {
            key.to_string()
        } else {
            format!("/{}", key)
        }
    }

    /// 签名用的资源串，`key` 为空时表示 bucket 本身
    fn format_oss_resource_str<S: AsRef<str>>(&self, bucket: S, key: S) -> String {
        let key = key.as_ref();
        if key.is_empty() {
            format!("/{}/", bucket.as_ref())
        } else {
            format!("/{}{}", bucket.as_ref(), self.format_key(key))
        }
    }

    /// bucket 的访问地址，endpoint 自带 scheme 时沿用
    fn bucket_url(&self) -> String {
        let endpoint = self.endpoint();
        let (scheme, host) = match endpoint.split_once("://") {
            Some((scheme, host)) => (scheme.to_string(), host.to_string()),
            None => ("https".to_string(), endpoint),
        };
        format!(
            "{}://{}.{}",
            scheme,
            self.bucket(),
            host.trim_end_matches('/')
        )
    }
}

impl OSSInfo for OSS {
    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
    fn bucket(&self) -> String {
        self.bucket.clone()
    }

    fn key_id(&self) -> String {
        self.key_id.clone()
    }

    fn key_secret(&self) -> String {
        self.key_secret.clone()
    }

    fn security_token(&self) -> Option<String> {
        self.security_token.clone()
    }
}

impl API for OSS {}

impl OSS {
    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn new<S: Into<String>>(key_id: S, key_secret: S, endpoint: S, bucket: S) -> Self {
        OSS {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            security_token: None,
            client: reqwest::Client::new(),
        }
    }

    /// STS 临时凭证
    pub fn with_security_token<S: Into<String>>(mut self, token: S) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// 从环境变量(或 `.env`)读取凭证和 endpoint
    ///
    /// 需要 `OSS_KEY_ID`、`OSS_KEY_SECRET`、`OSS_ENDPOINT`，`OSS_SECURITY_TOKEN` 可选。
    pub fn from_env<S: Into<String>>(bucket: S) -> Result<Self, OssError> {
        dotenvy::dotenv().ok();
        let key_id = required_var("OSS_KEY_ID")?;
        let key_secret = required_var("OSS_KEY_SECRET")?;
        let endpoint = required_var("OSS_ENDPOINT")?;
        let oss = OSS::new(key_id, key_secret, endpoint, bucket.into());
        Ok(match dotenvy::var("OSS_SECURITY_TOKEN") {
            Ok(token) if !token.is_empty() => oss.with_security_token(token),
            _ => oss,
        })
    }
}

fn required_var(name: &str) -> Result<String, OssError> {
    match dotenvy::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(OssError::Config(format!("{} not found", name))),
    }
}
