use std::{fmt, str::FromStr};

use crate::model::{error::ObjectError, object::ObjectRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    AWS,
    GCS,
}

impl Provider {
    pub fn scheme(&self) -> &'static str {
        match self {
            Provider::AWS => "s3",
            Provider::GCS => "gs",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for Provider {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s3" | "aws" => Ok(Provider::AWS),
            "gs" | "gcs" => Ok(Provider::GCS),
            _ => Err(ObjectError::Config(format!("unknown provider: {}", s))),
        }
    }
}

pub fn parse_provider_from_uri(uri: &str) -> Result<Provider, ObjectError> {
    if uri.starts_with("s3://") {
        Ok(Provider::AWS)
    } else if uri.starts_with("gs://") {
        Ok(Provider::GCS)
    } else {
        Err(ObjectError::InvalidArgument(format!(
            "failed to parse provider of: {}",
            uri
        )))
    }
}

/// Splits `s3://bucket/some/key` into its provider and object address.
pub fn parse_object_uri(uri: &str) -> Result<(Provider, ObjectRef), ObjectError> {
    let provider = parse_provider_from_uri(uri)?;
    let rest = uri.split_once("://").map(|(_, rest)| rest).unwrap_or("");

    let (bucket, key) = rest.split_once('/').ok_or_else(|| {
        ObjectError::InvalidArgument(format!("missing object key in: {}", uri))
    })?;

    Ok((provider, ObjectRef::new(bucket, key)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert!(matches!(parse_provider_from_uri("s3://bucket"), Ok(Provider::AWS)));
        assert!(matches!(parse_provider_from_uri("gs://bucket"), Ok(Provider::GCS)));
        assert!(matches!(parse_provider_from_uri("ftp://bucket"), Err(_)));
        assert!(matches!(parse_provider_from_uri("bucket"), Err(_)));
    }

    #[test]
    fn test_parse_object_uri() {
        let cases = vec![
            ("s3://aws-test-boto/pipeline.yml", Provider::AWS, "aws-test-boto", "pipeline.yml"),
            ("gs://data/runs/1/out.bam", Provider::GCS, "data", "runs/1/out.bam"),
        ];

        for (uri, provider, bucket, key) in cases {
            let (p, object) = parse_object_uri(uri).unwrap();
            assert_eq!(p, provider, "failed on `provider` for case: {}", uri);
            assert_eq!(object.bucket(), bucket, "failed on `bucket` for case: {}", uri);
            assert_eq!(object.key(), key, "failed on `key` for case: {}", uri);
        }
    }

    #[test]
    fn test_parse_object_uri_invalid() {
        let cases = vec!["s3://bucket", "s3://bucket/", "s3:///key", "file:///tmp/x"];

        for uri in cases {
            assert!(
                matches!(parse_object_uri(uri), Err(ObjectError::InvalidArgument(_))),
                "expected invalid argument for case: {}",
                uri
            );
        }
    }

    #[test]
    fn test_provider_from_str() {
        let cases = vec![("s3", Provider::AWS), ("AWS", Provider::AWS), ("gcs", Provider::GCS)];

        for (input, expected) in cases {
            assert_eq!(input.parse::<Provider>().unwrap(), expected, "failed for case: {}", input);
        }
        assert!("azure".parse::<Provider>().is_err());
    }
}
