use google_cloud_storage::{
    client::{google_cloud_auth::credentials::CredentialsFile, Client, ClientConfig},
    http::{
        buckets::get::GetBucketRequest,
        objects::{
            delete::DeleteObjectRequest,
            download::Range,
            get::GetObjectRequest,
            upload::{Media, UploadObjectRequest, UploadType},
        },
    },
};
use tokio::runtime::Runtime;

use crate::{adapters, config::StoreConfig, model::error::ObjectError, util};

pub struct GcsAdapter {
    client: Client,
    runtime: Runtime,
}

impl GcsAdapter {
    /// Uses the service-account file from `config` when given, otherwise
    /// the default application credentials.
    pub fn connect(config: &StoreConfig) -> Result<Self, ObjectError> {
        let runtime = util::block::new_runtime()?;

        let mut client_config = match &config.credentials_file {
            Some(path) => {
                let file = util::block::block_until_ready(
                    &runtime,
                    CredentialsFile::new_from_file(path.to_string_lossy().into_owned()),
                )
                .map_err(|err| {
                    ObjectError::Config(format!(
                        "failed to read credentials file: {}, {}",
                        path.display(),
                        err
                    ))
                })?;

                util::block::block_until_ready(
                    &runtime,
                    ClientConfig::default().with_credentials(file),
                )
            }
            None => util::block::block_until_ready(&runtime, ClientConfig::default().with_auth()),
        }
        .map_err(|err| ObjectError::Config(format!("failed to authenticate: {}", err)))?;

        if let Some(endpoint) = &config.endpoint {
            client_config.storage_endpoint = endpoint.clone();
        }

        Ok(Self {
            client: Client::new(client_config),
            runtime,
        })
    }
}

fn gcs_error(
    err: google_cloud_storage::http::Error,
    verb: &str,
    bucket: &str,
    key: &str,
) -> ObjectError {
    let status = match &err {
        google_cloud_storage::http::Error::Response(resp) => Some(resp.code),
        _ => None,
    };

    adapters::into_object_error(
        adapters::classify_failure(None, status),
        bucket,
        key,
        format!("failed to {} at: {}/{}, {}", verb, bucket, key, err),
    )
}

impl adapters::ObjectAdapter for GcsAdapter {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectError> {
        let req = GetObjectRequest {
            bucket: bucket.to_string(),
            object: key.to_string(),
            ..Default::default()
        };

        util::block::block_until_ready(
            &self.runtime,
            self.client.download_object(&req, &Range::default()),
        )
        .map_err(|err| gcs_error(err, "download_object", bucket, key))
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError> {
        let req = UploadObjectRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        };

        util::block::block_until_ready(
            &self.runtime,
            self.client.upload_object(
                &req,
                body,
                &UploadType::Simple(Media::new(key.to_string())),
            ),
        )
        .map_err(|err| gcs_error(err, "upload_object", bucket, key))?;

        Ok(())
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ObjectError> {
        let req = DeleteObjectRequest {
            bucket: bucket.to_string(),
            object: key.to_string(),
            ..Default::default()
        };

        match util::block::block_until_ready(&self.runtime, self.client.delete_object(&req)) {
            Ok(()) => Ok(()),
            Err(err) => match gcs_error(err, "delete_object", bucket, key) {
                ObjectError::ObjectNotFound { .. } => Ok(()),
                err => Err(err),
            },
        }
    }

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectError> {
        let req = GetObjectRequest {
            bucket: bucket.to_string(),
            object: key.to_string(),
            ..Default::default()
        };

        match util::block::block_until_ready(&self.runtime, self.client.get_object(&req)) {
            Ok(_) => Ok(true),
            Err(err) => match gcs_error(err, "get_object", bucket, key) {
                ObjectError::ObjectNotFound { .. } => Ok(false),
                err => Err(err),
            },
        }
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectError> {
        let req = GetBucketRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        };

        match util::block::block_until_ready(&self.runtime, self.client.get_bucket(&req)) {
            Ok(_) => Ok(true),
            Err(err) => match gcs_error(err, "get_bucket", bucket, "") {
                ObjectError::ObjectNotFound { .. } => Ok(false),
                err => Err(err),
            },
        }
    }
}
