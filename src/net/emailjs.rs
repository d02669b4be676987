use serde::Serialize;
use url::Url;

use crate::config::ContactConfig;
use crate::contact::delivery::{DeliveryError, DeliveryReceipt, EmailDelivery, FormData};

/// Error while building the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid endpoint {url:?}: {source}")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: serde_json::Map<String, serde_json::Value>,
}

/// EmailJS REST delivery (blocking; call from a worker thread).
pub struct EmailJsClient {
    client: reqwest::blocking::Client,
    endpoint: Url,
    public_key: String,
}

impl EmailJsClient {
    pub fn new(config: &ContactConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|source| ClientError::Endpoint {
            url: config.endpoint.clone(),
            source,
        })?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("portfolio-runtime/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.public_key.is_empty() {
            log::warn!("EmailJS public key is empty; deliveries will be rejected");
        }

        Ok(Self {
            client,
            endpoint,
            public_key: config.public_key.clone(),
        })
    }

    fn request_body<'a>(
        &'a self,
        service_id: &'a str,
        template_id: &'a str,
        form: &FormData,
    ) -> SendRequest<'a> {
        let template_params = form
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        SendRequest {
            service_id,
            template_id,
            user_id: &self.public_key,
            template_params,
        }
    }
}

impl EmailDelivery for EmailJsClient {
    fn send(
        &self,
        service_id: &str,
        template_id: &str,
        form: &FormData,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let body = self.request_body(service_id, template_id, form);

        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&body)
            .send()
            .map_err(|e| DeliveryError::new(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| DeliveryError::new(format!("Failed to read body: {}", e)))?;

        if status.is_success() {
            Ok(DeliveryReceipt {
                status: status.as_u16(),
                text,
            })
        } else if text.trim().is_empty() {
            Err(DeliveryError::new(format!("HTTP {}", status.as_u16())))
        } else {
            Err(DeliveryError::new(text))
        }
    }
}
