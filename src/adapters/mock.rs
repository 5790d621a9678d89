use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use crate::{adapters, model::error::ObjectError};

/// In-memory store for tests and dry runs. Buckets must be created before
/// objects can be written to them.
#[derive(Default)]
pub struct MockClient {
    buckets: Mutex<HashMap<String, HashMap<String, Vec<u8>>>>,
    denied: Mutex<HashSet<String>>,
    writes: AtomicUsize,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(self, bucket: &str) -> Self {
        self.buckets
            .lock()
            .expect("failed to acquire `buckets` guard")
            .entry(bucket.to_string())
            .or_default();
        self
    }

    pub fn with_object(self, bucket: &str, key: &str, body: &[u8]) -> Self {
        self.buckets
            .lock()
            .expect("failed to acquire `buckets` guard")
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body.to_vec());
        self
    }

    /// Every call touching `bucket` fails with `AccessDenied` afterwards.
    pub fn deny(&self, bucket: &str) {
        self.denied
            .lock()
            .expect("failed to acquire `denied` guard")
            .insert(bucket.to_string());
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.buckets
            .lock()
            .expect("failed to acquire `buckets` guard")
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    /// Number of writes and deletes that reached the store.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_access(&self, bucket: &str, key: &str) -> Result<(), ObjectError> {
        let denied = self.denied.lock().expect("failed to acquire `denied` guard");
        if denied.contains(bucket) {
            return Err(ObjectError::AccessDenied {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        Ok(())
    }
}

impl adapters::ObjectAdapter for MockClient {
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectError> {
        self.check_access(bucket, key)?;

        let buckets = self.buckets.lock().expect("failed to acquire `buckets` guard");
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| ObjectError::BucketNotFound(bucket.to_string()))?;

        objects
            .get(key)
            .cloned()
            .ok_or_else(|| ObjectError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), ObjectError> {
        self.check_access(bucket, key)?;

        let mut buckets = self.buckets.lock().expect("failed to acquire `buckets` guard");
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| ObjectError::BucketNotFound(bucket.to_string()))?;

        objects.insert(key.to_string(), body);
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ObjectError> {
        self.check_access(bucket, key)?;

        let mut buckets = self.buckets.lock().expect("failed to acquire `buckets` guard");
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| ObjectError::BucketNotFound(bucket.to_string()))?;

        objects.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectError> {
        self.check_access(bucket, key)?;

        Ok(self.object(bucket, key).is_some())
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool, ObjectError> {
        self.check_access(bucket, "")?;

        Ok(self
            .buckets
            .lock()
            .expect("failed to acquire `buckets` guard")
            .contains_key(bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ObjectAdapter;

    #[test]
    fn test_put_and_get() {
        let client = MockClient::new().with_bucket("bucket");

        client.put_object("bucket", "a", b"one".to_vec()).unwrap();
        client.put_object("bucket", "a", b"two".to_vec()).unwrap();

        assert_eq!(client.get_object("bucket", "a").unwrap(), b"two".to_vec());
        assert_eq!(client.write_count(), 2);
    }

    #[test]
    fn test_missing() {
        let client = MockClient::new().with_bucket("bucket");

        assert!(matches!(
            client.get_object("bucket", "a"),
            Err(ObjectError::ObjectNotFound { .. })
        ));
        assert!(matches!(
            client.put_object("other", "a", Vec::new()),
            Err(ObjectError::BucketNotFound(_))
        ));
        assert!(!client.bucket_exists("other").unwrap());
        assert!(client.bucket_exists("bucket").unwrap());
    }

    #[test]
    fn test_deny() {
        let client = MockClient::new().with_object("bucket", "a", b"x");
        client.deny("bucket");

        let results = vec![
            ("get_object", client.get_object("bucket", "a").err()),
            ("put_object", client.put_object("bucket", "a", Vec::new()).err()),
            ("delete_object", client.delete_object("bucket", "a").err()),
            ("object_exists", client.object_exists("bucket", "a").err()),
        ];

        for (verb, err) in results {
            assert!(
                matches!(err, Some(ObjectError::AccessDenied { .. })),
                "failed for case: {}",
                verb
            );
        }
        assert_eq!(client.object("bucket", "a"), Some(b"x".to_vec()));
    }
}
