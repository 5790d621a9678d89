use std::sync::Arc;

use crate::model::error::ObjectError;

pub mod gcs;
pub mod mock;
pub mod s3;

/// Byte-level object verbs a backend must provide. Calls block until the
/// remote store answers.
pub trait ObjectAdapter: Send + Sync {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectError>;

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError>;

    /// Removing a key that does not exist is not an error.
    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ObjectError>;

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectError>;

    fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectError>;
}

impl<T: ObjectAdapter + ?Sized> ObjectAdapter for Arc<T> {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectError> {
        (**self).get_object(bucket, key)
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError> {
        (**self).put_object(bucket, key, body)
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ObjectError> {
        (**self).delete_object(bucket, key)
    }

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectError> {
        (**self).object_exists(bucket, key)
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectError> {
        (**self).bucket_exists(bucket)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    ObjectNotFound,
    BucketNotFound,
    AccessDenied,
    Other,
}

/// Maps a service error code and/or HTTP status onto a failure kind. The
/// code wins when both are present.
pub fn classify_failure(code: Option<&str>, status: Option<u16>) -> Failure {
    match code {
        Some("NoSuchKey") | Some("NotFound") => return Failure::ObjectNotFound,
        Some("NoSuchBucket") => return Failure::BucketNotFound,
        Some("AccessDenied") | Some("Forbidden") | Some("AllAccessDisabled") => {
            return Failure::AccessDenied
        }
        _ => {}
    }

    match status {
        Some(404) => Failure::ObjectNotFound,
        Some(401) | Some(403) => Failure::AccessDenied,
        _ => Failure::Other,
    }
}

pub fn into_object_error(
    failure: Failure,
    bucket: &str,
    key: &str,
    message: String,
) -> ObjectError {
    match failure {
        Failure::ObjectNotFound => ObjectError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        Failure::BucketNotFound => ObjectError::BucketNotFound(bucket.to_string()),
        Failure::AccessDenied => ObjectError::AccessDenied {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        Failure::Other => ObjectError::Transfer(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_failure() {
        let cases = vec![
            (Some("NoSuchKey"), Some(404), Failure::ObjectNotFound),
            (None, Some(404), Failure::ObjectNotFound),
            (Some("NoSuchBucket"), Some(404), Failure::BucketNotFound),
            (Some("AccessDenied"), Some(403), Failure::AccessDenied),
            (None, Some(403), Failure::AccessDenied),
            (None, Some(401), Failure::AccessDenied),
            (Some("SlowDown"), Some(503), Failure::Other),
            (Some("InternalError"), None, Failure::Other),
            (None, None, Failure::Other),
        ];

        for (code, status, expected) in cases {
            assert_eq!(
                classify_failure(code, status),
                expected,
                "failed for case: {:?}/{:?}",
                code,
                status
            );
        }
    }

    #[test]
    fn test_into_object_error() {
        let err = into_object_error(Failure::Other, "b", "k", "connection reset".to_string());
        assert!(matches!(err, ObjectError::Transfer(ref m) if m == "connection reset"));

        let err = into_object_error(Failure::AccessDenied, "b", "k", String::new());
        assert!(matches!(err, ObjectError::AccessDenied { ref bucket, ref key } if bucket == "b" && key == "k"));
    }
}
