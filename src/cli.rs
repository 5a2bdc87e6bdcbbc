use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::{JsonSnafu, Result};
use crate::storage::{
    Location, ObjectMetadata, OutputFormat, PredefinedAcl, SignedUrlAction, StorageBackend,
    StorageClass, StorageClient, UploadOptions, format_size,
};
use crate::utils::confirm_deletion;
use snafu::ResultExt;

#[derive(Parser, Debug)]
#[command(name = "gcs-facade", version, about = "Google Cloud Storage from the command line")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a bucket
    Mb {
        name: String,
        #[arg(long, default_value = "US")]
        location: Location,
        #[arg(long, default_value = "COLDLINE")]
        storage_class: StorageClass,
    },
    /// Upload a local file and print its public URL
    Put {
        local_path: PathBuf,
        /// Object name; defaults to the local file name
        #[arg(short, long)]
        destination: Option<String>,
        #[arg(long)]
        content_type: Option<String>,
        /// Predefined ACL, e.g. publicRead
        #[arg(long, value_parser = parse_acl)]
        acl: Option<PredefinedAcl>,
        #[arg(short, long)]
        bucket: Option<String>,
    },
    /// Download an object to a local file
    Get {
        object: String,
        dest_path: PathBuf,
        #[arg(short, long)]
        bucket: Option<String>,
    },
    /// Delete an object
    Rm {
        object: String,
        #[arg(short, long)]
        bucket: Option<String>,
        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Show object metadata
    Stat {
        object: String,
        #[arg(short, long)]
        bucket: Option<String>,
        #[arg(long, conflicts_with = "raw")]
        json: bool,
        #[arg(long)]
        raw: bool,
    },
    /// Print the public URL of an object
    Url {
        object: String,
        #[arg(short, long)]
        bucket: Option<String>,
    },
    /// Print a signed URL for an object
    Sign {
        object: String,
        #[arg(short, long)]
        bucket: Option<String>,
        #[arg(short, long, default_value_t = 15)]
        expires_minutes: u32,
        /// Sign an upload URL instead of a read URL
        #[arg(long)]
        write: bool,
    },
}

fn parse_acl(value: &str) -> std::result::Result<PredefinedAcl, String> {
    value.parse().map_err(|e: crate::error::Error| e.to_string())
}

pub async fn run<B: StorageBackend>(args: Args, client: StorageClient<B>) -> Result<()> {
    match args.command {
        Command::Mb {
            name,
            location,
            storage_class,
        } => {
            let bucket = client
                .create_bucket(&name, Some(location), Some(storage_class))
                .await?;
            println!("Created bucket: {}", bucket.name);
        }
        Command::Put {
            local_path,
            destination,
            content_type,
            acl,
            bucket,
        } => {
            let options = UploadOptions {
                destination,
                content_type,
                predefined_acl: acl,
            };
            let url = client
                .upload_file(&local_path, Some(&options), bucket.as_deref())
                .await?;
            println!("Uploaded: {} → {url}", local_path.display());
        }
        Command::Get {
            object,
            dest_path,
            bucket,
        } => {
            client
                .download_file(&object, &dest_path, bucket.as_deref())
                .await?;
            println!("Downloaded: {object} → {}", dest_path.display());
        }
        Command::Rm {
            object,
            bucket,
            force,
        } => {
            if !confirm_deletion(&object, force)? {
                println!("Aborted");
                return Ok(());
            }
            client.delete_file(&object, bucket.as_deref()).await?;
            println!("Deleted: {object}");
        }
        Command::Stat {
            object,
            bucket,
            json,
            raw,
        } => {
            let format = if json {
                OutputFormat::Json
            } else if raw {
                OutputFormat::Raw
            } else {
                OutputFormat::Human
            };
            let meta = client.metadata(&object, bucket.as_deref()).await?;
            print_metadata(&meta, format)?;
        }
        Command::Url { object, bucket } => {
            println!("{}", client.public_url(&object, bucket.as_deref()));
        }
        Command::Sign {
            object,
            bucket,
            expires_minutes,
            write,
        } => {
            let action = if write {
                SignedUrlAction::Write
            } else {
                SignedUrlAction::Read
            };
            let url = client
                .signed_url_for(&object, bucket.as_deref(), Some(expires_minutes), action)
                .await?;
            println!("{url}");
        }
    }
    Ok(())
}

fn print_metadata(meta: &ObjectMetadata, format: OutputFormat) -> Result<()> {
    let optional = [
        ("kind", &meta.kind),
        ("id", &meta.id),
        ("self_link", &meta.self_link),
        ("media_link", &meta.media_link),
        ("storage_class", &meta.storage_class),
        ("content_type", &meta.content_type),
        ("content_encoding", &meta.content_encoding),
        ("md5_hash", &meta.md5_hash),
        ("etag", &meta.etag),
        ("crc32c", &meta.crc32c),
        ("generation", &meta.generation),
        ("metageneration", &meta.metageneration),
        ("time_created", &meta.time_created),
        ("updated", &meta.updated),
        ("time_storage_class_updated", &meta.time_storage_class_updated),
    ];

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(meta).context(JsonSnafu)?);
        }
        OutputFormat::Raw => {
            println!("name={}", meta.name);
            println!("bucket={}", meta.bucket);
            println!("size={}", meta.size);
            for (key, value) in optional {
                if let Some(value) = value {
                    println!("{key}={value}");
                }
            }
        }
        OutputFormat::Human => {
            println!("gs://{}/{}", meta.bucket, meta.name);
            println!("  size: {} ({} bytes)", format_size(meta.size), meta.size);
            for (key, value) in optional {
                if let Some(value) = value {
                    println!("  {key}: {value}");
                }
            }
        }
    }
    Ok(())
}
