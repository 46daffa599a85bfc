use crate::auth::{guards, store::CredentialStore, store::FileStore};
use crate::cli::globals::GlobalArgs;
use anyhow::Result;

/// Handle the whoami action
pub fn handle(globals: &GlobalArgs) -> Result<()> {
    let store = FileStore::new(&globals.session_file);

    if !guards::can_activate(&store).is_allow() {
        println!("Not signed in. Run `quizdesk login` first.");
        return Ok(());
    }

    if let Some(envelope) = store.get() {
        println!("{} <{}> (id: {})", envelope.identity.name, envelope.identity.email, envelope.identity.id);
        if envelope.token.is_empty() {
            println!("No teacher token attached.");
        } else {
            println!("Teacher token attached.");
        }
    } else {
        // The session was cleared between the guard check and the read.
        println!("Not signed in. Run `quizdesk login` first.");
    }

    Ok(())
}
