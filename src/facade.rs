use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{error, info, span, Level};

use crate::{
    adapters::{gcs::GcsAdapter, s3::S3Adapter, ObjectAdapter},
    config::StoreConfig,
    model::{
        error::ObjectError,
        object::{self, ObjectRef},
    },
    util::object::Provider,
};

/// Blocking download/upload/delete over a remote object store.
///
/// Every call is a single, independent transfer. Nothing is retried and
/// transfers are not atomic: a failed call may leave a partial local file
/// or remote object behind.
pub struct RemoteObjectFacade {
    adapter: Box<dyn ObjectAdapter>,
}

impl RemoteObjectFacade {
    pub fn new(adapter: Box<dyn ObjectAdapter>) -> Self {
        Self { adapter }
    }

    pub fn connect(config: &StoreConfig) -> Result<Self, ObjectError> {
        let span = span!(Level::INFO, "connect", context = "connect");
        let _e = span.enter();
        info!(provider = %config.provider, region = ?config.region, endpoint = ?config.endpoint, "called");

        let adapter: Box<dyn ObjectAdapter> = match config.provider {
            Provider::AWS => Box::new(S3Adapter::connect(config).map_err(logged)?),
            Provider::GCS => Box::new(GcsAdapter::connect(config).map_err(logged)?),
        };

        Ok(Self::new(adapter))
    }

    /// Writes the object at `bucket/key` to `local_path` and returns the
    /// path written. An existing directory receives the file under the
    /// key's basename.
    pub fn download(
        &self,
        bucket: &str,
        key: &str,
        local_path: impl AsRef<Path>,
    ) -> Result<PathBuf, ObjectError> {
        let local_path = local_path.as_ref();

        let span = span!(Level::INFO, "download", context = "download");
        let _e = span.enter();
        info!(bucket = bucket, key = key, path = %local_path.display(), "called");

        let object = ObjectRef::new(bucket, key).map_err(logged)?;
        let dest = if local_path.is_dir() {
            local_path.join(object.basename())
        } else {
            local_path.to_path_buf()
        };

        let body = self
            .adapter
            .get_object(object.bucket(), object.key())
            .map_err(logged)?;

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| logged(err.into()))?;
            }
        }
        fs::write(&dest, &body).map_err(|err| logged(err.into()))?;

        info!(path = %dest.display(), bytes = body.len(), "downloaded");

        Ok(dest)
    }

    pub fn upload(
        &self,
        bucket: &str,
        key: &str,
        local_path: impl AsRef<Path>,
    ) -> Result<(), ObjectError> {
        let local_path = local_path.as_ref();

        let span = span!(Level::INFO, "upload", context = "upload");
        let _e = span.enter();
        info!(bucket = bucket, key = key, path = %local_path.display(), "called");

        let object = ObjectRef::new(bucket, key).map_err(logged)?;
        let body = read_local_file(local_path).map_err(logged)?;
        let bytes = body.len();

        self.adapter
            .put_object(object.bucket(), object.key(), body)
            .map_err(logged)?;

        info!(bytes = bytes, "uploaded");

        Ok(())
    }

    /// Deleting a key that does not exist succeeds.
    pub fn delete(&self, bucket: &str, key: &str) -> Result<(), ObjectError> {
        let span = span!(Level::INFO, "delete", context = "delete");
        let _e = span.enter();
        info!(bucket = bucket, key = key, "called");

        let object = ObjectRef::new(bucket, key).map_err(logged)?;
        self.adapter
            .delete_object(object.bucket(), object.key())
            .map_err(logged)?;

        info!("deleted");

        Ok(())
    }

    pub fn exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectError> {
        let span = span!(Level::INFO, "exists", context = "exists");
        let _e = span.enter();
        info!(bucket = bucket, key = key, "called");

        let object = ObjectRef::new(bucket, key).map_err(logged)?;
        self.adapter
            .object_exists(object.bucket(), object.key())
            .map_err(logged)
    }

    pub fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectError> {
        let span = span!(Level::INFO, "bucket_exists", context = "bucket_exists");
        let _e = span.enter();
        info!(bucket = bucket, "called");

        object::validate_bucket(bucket).map_err(logged)?;
        self.adapter.bucket_exists(bucket).map_err(logged)
    }
}

fn read_local_file(path: &Path) -> Result<Vec<u8>, ObjectError> {
    let not_found = |err: io::Error| {
        if err.kind() == io::ErrorKind::NotFound {
            ObjectError::LocalFileNotFound(path.to_path_buf())
        } else {
            err.into()
        }
    };

    let metadata = fs::metadata(path).map_err(not_found)?;
    if !metadata.is_file() {
        return Err(ObjectError::InvalidArgument(format!(
            "not a regular file: {}",
            path.display()
        )));
    }

    fs::read(path).map_err(not_found)
}

fn logged(err: ObjectError) -> ObjectError {
    error!(error_message = %err, error_group = err.group());
    err
}
