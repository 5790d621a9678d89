use std::{path::PathBuf, process::ExitCode};

use clap::{Arg, ArgAction, ArgMatches, Command};
use remote_objects::{
    util::object::parse_object_uri, Credentials, ObjectError, Provider, RemoteObjectFacade,
    StoreConfig,
};
use tracing::{error, info, span, Level};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .init();

    let span = span!(Level::INFO, "main", context = "main");
    let _e = span.enter();
    info!("called");

    let matches = cli().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error_message = %err, error_group = err.group());
            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    let uri = || Arg::new("URI").required(true).help("object URI, e.g. s3://bucket/key");

    Command::new("remote-objects")
        .version(clap::crate_version!())
        .about("Download, upload and delete single objects in S3 or GCS")
        .subcommand_required(true)
        .arg(
            Arg::new("region")
                .long("region")
                .env("AWS_REGION")
                .global(true),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .env("REMOTE_OBJECTS_ENDPOINT")
                .global(true),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .env("AWS_PROFILE")
                .global(true),
        )
        .arg(
            Arg::new("access-key-id")
                .long("access-key-id")
                .env("AWS_ACCESS_KEY_ID")
                .hide_env_values(true)
                .requires("secret-access-key")
                .global(true),
        )
        .arg(
            Arg::new("secret-access-key")
                .long("secret-access-key")
                .env("AWS_SECRET_ACCESS_KEY")
                .hide_env_values(true)
                .requires("access-key-id")
                .global(true),
        )
        .arg(
            Arg::new("session-token")
                .long("session-token")
                .env("AWS_SESSION_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new("credentials-file")
                .long("credentials-file")
                .env("GOOGLE_APPLICATION_CREDENTIALS")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("path-style")
                .long("path-style")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("download")
                .about("Fetch an object into a local file")
                .arg(uri().index(1))
                .arg(
                    Arg::new("PATH")
                        .required(true)
                        .index(2)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("upload")
                .about("Publish a local file as an object")
                .arg(
                    Arg::new("PATH")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(uri().index(2)),
        )
        .subcommand(
            Command::new("delete")
                .about("Remove an object; missing objects are ignored")
                .arg(uri().index(1)),
        )
        .subcommand(
            Command::new("exists")
                .about("Print whether an object exists")
                .arg(uri().index(1)),
        )
}

fn store_config(provider: Provider, matches: &ArgMatches) -> StoreConfig {
    let mut config = StoreConfig::new(provider);
    config.region = matches.get_one::<String>("region").cloned();
    config.endpoint = matches.get_one::<String>("endpoint").cloned();
    config.profile = matches.get_one::<String>("profile").cloned();
    config.credentials_file = matches.get_one::<PathBuf>("credentials-file").cloned();
    config.force_path_style = matches.get_flag("path-style");

    if let (Some(access_key_id), Some(secret_access_key)) = (
        matches.get_one::<String>("access-key-id"),
        matches.get_one::<String>("secret-access-key"),
    ) {
        config.credentials = Some(Credentials {
            access_key_id: access_key_id.clone(),
            secret_access_key: secret_access_key.clone(),
            session_token: matches.get_one::<String>("session-token").cloned(),
        });
    }

    config
}

fn run(matches: &ArgMatches) -> Result<(), ObjectError> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| ObjectError::InvalidArgument("missing subcommand".to_string()))?;

    let uri = sub
        .get_one::<String>("URI")
        .ok_or_else(|| ObjectError::InvalidArgument("missing object URI".to_string()))?;
    let (provider, object) = parse_object_uri(uri)?;
    info!(command = name, provider = %provider, bucket = object.bucket(), key = object.key(), "args");

    let facade = RemoteObjectFacade::connect(&store_config(provider, sub))?;

    match name {
        "download" => {
            let path = local_path(sub)?;
            let written = facade.download(object.bucket(), object.key(), path)?;
            println!("{}", written.display());
        }
        "upload" => {
            let path = local_path(sub)?;
            facade.upload(object.bucket(), object.key(), path)?;
        }
        "delete" => facade.delete(object.bucket(), object.key())?,
        "exists" => println!("{}", facade.exists(object.bucket(), object.key())?),
        other => {
            return Err(ObjectError::InvalidArgument(format!(
                "unknown subcommand: {}",
                other
            )))
        }
    }

    Ok(())
}

fn local_path(matches: &ArgMatches) -> Result<&PathBuf, ObjectError> {
    matches
        .get_one::<PathBuf>("PATH")
        .ok_or_else(|| ObjectError::InvalidArgument("missing local path".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_store_config_from_args() {
        let matches = cli()
            .try_get_matches_from(vec![
                "remote-objects",
                "--region",
                "eu-west-1",
                "--endpoint",
                "http://localhost:9000",
                "--access-key-id",
                "minio",
                "--secret-access-key",
                "minio123",
                "--path-style",
                "delete",
                "s3://aws-test-boto/pipeline2.yml",
            ])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "delete");

        let config = store_config(Provider::AWS, sub);
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(config.force_path_style);

        let creds = config.credentials.unwrap();
        assert_eq!(creds.access_key_id, "minio");
        assert_eq!(creds.secret_access_key, "minio123");
    }

    #[test]
    fn test_argument_order() {
        let cases = vec![
            (vec!["remote-objects", "download", "s3://b/k", "./k"], "download"),
            (vec!["remote-objects", "upload", "./k", "s3://b/k"], "upload"),
            (vec!["remote-objects", "exists", "gs://b/k"], "exists"),
        ];

        for (args, expected) in cases {
            let matches = cli().try_get_matches_from(args.clone()).unwrap();
            let (name, sub) = matches.subcommand().unwrap();

            assert_eq!(name, expected, "failed for case: {:?}", args);
            assert!(
                parse_object_uri(sub.get_one::<String>("URI").unwrap()).is_ok(),
                "failed on `URI` for case: {:?}",
                args
            );
        }
    }
}
