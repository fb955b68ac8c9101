use crate::backend::Backend;
use crate::model::{AnalysisResponse, RequestError, SearchForm};

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base: Url) -> Result<Self, RequestError> {
        let client = Client::builder()
            .user_agent(concat!("pull-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    /// Appends percent-encoded path segments to the backend base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
    let status = response.status();
    if !status.is_success() {
        warn!("Backend answered {} for {}", status, response.url());
        return Err(RequestError::Status(status));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn search(&self, form: &SearchForm) -> Result<Value, RequestError> {
        let url = self.endpoint(&["search"]);
        info!("POST {}", url);
        let response = self.client.post(url).form(&form.as_pairs()).send().await?;
        read_json(response).await
    }

    async fn scrape_location(&self, location: &str) -> Result<Value, RequestError> {
        let url = self.endpoint(&["scrape", location]);
        info!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn price_analysis(&self, title: &str) -> Result<AnalysisResponse, RequestError> {
        let url = self.endpoint(&["scrape_ebay", title]);
        info!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }
}
