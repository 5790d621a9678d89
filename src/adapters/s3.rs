use aws_sdk_s3::{
    config::{http::HttpResponse, Credentials, Region},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    primitives::ByteStream,
};
use tokio::runtime::Runtime;

use crate::{adapters, config::StoreConfig, model::error::ObjectError, util};

pub struct S3Adapter {
    client: aws_sdk_s3::Client,
    runtime: Runtime,
}

impl S3Adapter {
    /// Builds a client from `config`, falling back to the SDK default chain
    /// for anything the config leaves unset.
    pub fn connect(config: &StoreConfig) -> Result<Self, ObjectError> {
        let runtime = util::block::new_runtime()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(creds) = &config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                creds.session_token.clone(),
                None,
                "remote-objects",
            ));
        }

        let sdk_config = util::block::block_until_ready(&runtime, loader.load());
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            runtime,
        })
    }
}

fn sdk_error<E>(err: SdkError<E, HttpResponse>, verb: &str, bucket: &str, key: &str) -> ObjectError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let status = err.raw_response().map(|resp| resp.status().as_u16());
    let failure = adapters::classify_failure(err.code(), status);

    adapters::into_object_error(
        failure,
        bucket,
        key,
        format!(
            "failed to {} at: {}/{}, {}",
            verb,
            bucket,
            key,
            DisplayErrorContext(&err)
        ),
    )
}

impl adapters::ObjectAdapter for S3Adapter {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectError> {
        let req = self.client.get_object().bucket(bucket).key(key);

        let o = util::block::block_until_ready(&self.runtime, req.send())
            .map_err(|err| sdk_error(err, "get_object", bucket, key))?;

        let bytes = util::block::block_until_ready(&self.runtime, o.body.collect()).map_err(
            |err| ObjectError::Transfer(format!("failed to collect body: {}, {}", key, err)),
        )?;

        Ok(bytes.into_bytes().to_vec())
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError> {
        let req = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body));

        util::block::block_until_ready(&self.runtime, req.send())
            .map_err(|err| sdk_error(err, "put_object", bucket, key))?;

        Ok(())
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ObjectError> {
        let req = self.client.delete_object().bucket(bucket).key(key);

        match util::block::block_until_ready(&self.runtime, req.send()) {
            Ok(_) => Ok(()),
            Err(err) => match sdk_error(err, "delete_object", bucket, key) {
                ObjectError::ObjectNotFound { .. } => Ok(()),
                err => Err(err),
            },
        }
    }

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectError> {
        let req = self.client.head_object().bucket(bucket).key(key);

        match util::block::block_until_ready(&self.runtime, req.send()) {
            Ok(_) => Ok(true),
            Err(err) => {
                if let Some(svc_err) = err.as_service_error() {
                    if svc_err.is_not_found() {
                        return Ok(false);
                    }
                }

                match sdk_error(err, "head_object", bucket, key) {
                    ObjectError::ObjectNotFound { .. } => Ok(false),
                    err => Err(err),
                }
            }
        }
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectError> {
        let req = self.client.head_bucket().bucket(bucket);

        match util::block::block_until_ready(&self.runtime, req.send()) {
            Ok(_) => Ok(true),
            Err(err) => {
                if let Some(svc_err) = err.as_service_error() {
                    if svc_err.is_not_found() {
                        return Ok(false);
                    }
                }

                match sdk_error(err, "head_bucket", bucket, "") {
                    ObjectError::ObjectNotFound { .. } | ObjectError::BucketNotFound(_) => {
                        Ok(false)
                    }
                    err => Err(err),
                }
            }
        }
    }
}
