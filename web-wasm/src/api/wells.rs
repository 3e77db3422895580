//! 井戸データAPI（ブラウザ fetch）

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use well_map_common::{Error, HttpReply, Result, WellSource};

/// `window.fetch` による取得元
#[derive(Debug, Clone)]
pub struct FetchSource {
    endpoint: String,
}

impl FetchSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl WellSource for FetchSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self) -> Result<HttpReply> {
        get_text(&self.endpoint)
            .await
            .map_err(|e| Error::Network(format!("{:?}", e)))
    }
}

/// GETしてステータスと本文を返す
async fn get_text(url: &str) -> std::result::Result<HttpReply, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Accept", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;

    Ok(HttpReply {
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}
