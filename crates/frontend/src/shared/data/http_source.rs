use super::record_store::RecordSource;
use async_trait::async_trait;
use contracts::shared::analytics::DataLoadError;
use gloo_net::http::Request;

/// Fetches the dataset as a static file over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    url: String,
}

impl HttpRecordSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self) -> Result<String, DataLoadError> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| DataLoadError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(DataLoadError::Http {
                status: response.status(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| DataLoadError::Network(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
