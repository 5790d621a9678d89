use crate::model::error::ObjectError;

/// Address of a single object in a single bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    bucket: String,
    key: String,
}

impl ObjectRef {
    pub fn new(bucket: &str, key: &str) -> Result<Self, ObjectError> {
        validate_bucket(bucket)?;
        if key.is_empty() {
            return Err(ObjectError::InvalidArgument(format!(
                "key must be specified for bucket: {}",
                bucket
            )));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last path component of the key, ignoring a trailing `/`.
    pub fn basename(&self) -> &str {
        let key = self.key.trim_end_matches('/');
        match key.rfind('/') {
            Some(pos) => &key[pos + 1..],
            None => key,
        }
    }
}

pub fn validate_bucket(bucket: &str) -> Result<(), ObjectError> {
    if bucket.is_empty() {
        return Err(ObjectError::InvalidArgument(
            "bucket name must be specified".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let cases = vec![
            ("aws-test-boto", "pipeline.yml", true),
            ("aws-test-boto", "", false),
            ("", "pipeline.yml", false),
            ("", "", false),
        ];

        for (bucket, key, valid) in cases {
            let result = ObjectRef::new(bucket, key);
            assert_eq!(
                result.is_ok(),
                valid,
                "failed for case: {:?}/{:?}",
                bucket,
                key
            );
            if let Err(err) = result {
                assert!(matches!(err, ObjectError::InvalidArgument(_)));
            }
        }
    }

    #[test]
    fn test_basename() {
        let cases = vec![
            ("pipeline.yml", "pipeline.yml"),
            ("runs/2024/pipeline.yml", "pipeline.yml"),
            ("runs/output/", "output"),
        ];

        for (key, expected) in cases {
            let object = ObjectRef::new("bucket", key).unwrap();
            assert_eq!(object.basename(), expected, "failed for case: {}", key);
        }
    }
}
