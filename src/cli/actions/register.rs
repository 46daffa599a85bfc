use crate::api::ApiClient;
use crate::auth::{session, store::CredentialStore, store::FileStore};
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use std::sync::Arc;

/// Handle the register action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Register {
        name,
        email,
        password,
    } = action
    else {
        return Err(anyhow!("unexpected action"));
    };

    let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(&globals.session_file));
    let client = ApiClient::new(&globals.api_url, Arc::clone(&store))?;

    let identity = client.register(&name, &email, &password).await?;
    let envelope = session::establish(store.as_ref(), identity, String::new())?;

    println!(
        "Registered {} <{}>",
        envelope.identity.name, envelope.identity.email
    );

    Ok(())
}
