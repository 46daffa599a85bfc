use crate::auth::{session, store::FileStore};
use crate::cli::globals::GlobalArgs;
use anyhow::Result;

/// Handle the logout action
pub fn handle(globals: &GlobalArgs) -> Result<()> {
    let store = FileStore::new(&globals.session_file);
    session::terminate(&store);

    println!("Signed out.");

    Ok(())
}
