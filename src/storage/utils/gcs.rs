use crate::error::{GcsAuthSnafu, Result};
use google_cloud_storage::client::google_cloud_auth::credentials::CredentialsFile;
use google_cloud_storage::client::{Client, ClientConfig};
use snafu::ResultExt;
use std::path::Path;

/// Cloud Storage JSON API client plus the project named in its credentials.
///
/// Without a key file the client falls back to application default
/// credentials and no project is known.
pub async fn connect(credentials_path: Option<&Path>) -> Result<(Client, Option<String>)> {
    let (config, project) = match credentials_path {
        Some(path) => {
            let credentials = CredentialsFile::new_from_file(path.to_string_lossy().to_string())
                .await
                .context(GcsAuthSnafu)?;
            let project = credentials.project_id.clone();
            let config = ClientConfig::default()
                .with_credentials(credentials)
                .await
                .context(GcsAuthSnafu)?;
            (config, project)
        }
        None => (
            ClientConfig::default().with_auth().await.context(GcsAuthSnafu)?,
            None,
        ),
    };
    Ok((Client::new(config), project))
}
