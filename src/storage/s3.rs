use anyhow::{anyhow, Context};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

/// Whole-object PUT and GET against one bucket. Credentials and region come
/// from the SDK's default provider chain.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// `endpoint` points the client at an S3-compatible store such as MinIO,
    /// which needs path-style addressing.
    pub async fn from_env(bucket: String, endpoint: Option<String>) -> Self {
        let config = aws_config::load_from_env().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&config);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        tracing::info!(%bucket, "using s3 for high scores");
        Self {
            client: Client::from_conf(builder.build()),
            bucket,
        }
    }

    pub async fn put_object(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|error| {
                anyhow!("failed to put s3 object {key}: {}", DisplayErrorContext(&error))
            })?;
        Ok(())
    }

    /// `Ok(None)` when the key does not exist.
    pub async fn get_object(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(error) => {
                if error
                    .as_service_error()
                    .is_some_and(|service_error| service_error.is_no_such_key())
                {
                    return Ok(None);
                }
                return Err(anyhow!(
                    "failed to get s3 object {key}: {}",
                    DisplayErrorContext(&error)
                ));
            }
        };
        let data = output
            .body
            .collect()
            .await
            .with_context(|| format!("failed to read s3 object {key}"))?;
        Ok(Some(data.into_bytes().to_vec()))
    }
}
