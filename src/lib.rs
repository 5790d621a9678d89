//! Blocking download/upload/delete of single objects in S3 or Google Cloud
//! Storage, for file-based pipeline steps.
//!
//! ```no_run
//! use remote_objects::{RemoteObjectFacade, StoreConfig, Provider};
//!
//! let config = StoreConfig::new(Provider::AWS).with_region("us-east-1");
//! let store = RemoteObjectFacade::connect(&config)?;
//!
//! let path = store.download("aws-test-boto", "pipeline.yml", "./pipeline.yml")?;
//! store.upload("aws-test-boto", "pipeline2.yml", &path)?;
//! store.delete("aws-test-boto", "pipeline2.yml")?;
//! # Ok::<(), remote_objects::ObjectError>(())
//! ```

pub mod adapters;
pub mod config;
pub mod facade;
pub mod model;
pub mod util;

pub use config::{Credentials, StoreConfig};
pub use facade::RemoteObjectFacade;
pub use model::{error::ObjectError, object::ObjectRef};
pub use util::object::Provider;
