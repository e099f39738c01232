// ABOUTME: Builder pattern implementation for QrClient configuration
// ABOUTME: Every setting has a default so the minimal client is QrClient::builder().build()

use crate::QrClient;
use crate::constants::{http, retry};
use crate::error::QrError;
use std::time::Duration;
use typed_builder::TypedBuilder;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<QrClient, QrError>))]
pub struct QrClientConfig {
    #[builder(default = http::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = retry::MAX_RETRIES)]
    pub max_retries: u32,

    #[builder(default = retry::INITIAL_DELAY)]
    pub retry_delay: Duration,

    #[builder(default = http::MAX_IMAGE_SIZE)]
    pub max_image_size: u64,

    #[builder(default = http::USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,
}

impl From<QrClientConfig> for Result<QrClient, QrError> {
    fn from(config: QrClientConfig) -> Self {
        QrClient::from_config(config)
    }
}

impl QrClient {
    pub fn builder() -> QrClientConfigBuilder<((), (), (), (), ())> {
        QrClientConfig::builder()
    }
}
