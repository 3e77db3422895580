//! 井戸データの取得元（CLI用）
//!
//! - HttpSource: APIへGET（reqwest）
//! - FileSource: 保存済みのAPIレスポンス（JSONファイル）

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::ACCEPT;
use well_map_common::{Error, HttpReply, Result, WellSource};

pub struct HttpSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl WellSource for HttpSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self) -> Result<HttpReply> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(HttpReply { status, body })
    }
}

pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            label: path.display().to_string(),
        }
    }
}

impl WellSource for FileSource {
    fn endpoint(&self) -> &str {
        &self.label
    }

    async fn fetch(&self) -> Result<HttpReply> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Read {
                path: self.label.clone(),
                message: e.to_string(),
            })?;
        Ok(HttpReply::ok(body))
    }
}
