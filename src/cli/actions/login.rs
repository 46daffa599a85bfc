use crate::api::ApiClient;
use crate::auth::{session, store::CredentialStore, store::FileStore};
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::debug;

/// Handle the login action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Login { email, password } = action else {
        return Err(anyhow!("unexpected action"));
    };

    let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(&globals.session_file));
    let client = ApiClient::new(&globals.api_url, Arc::clone(&store))?;

    let identity = client.login(&email, &password).await?;
    debug!("Signed in, opening session for {}", identity.id);

    // A fresh password login carries no teacher token yet.
    let envelope = session::establish(store.as_ref(), identity, String::new())?;

    println!(
        "Signed in as {} <{}>",
        envelope.identity.name, envelope.identity.email
    );

    Ok(())
}
