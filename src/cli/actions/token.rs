use crate::api::token::{student_link, TokenClient};
use crate::auth::guards::{can_activate_url_token, Decision, VerifiedToken};
use crate::auth::{session, store::CredentialStore, store::FileStore};
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use serde_json::json;
use std::sync::Arc;
use url::Url;

/// Handle the token actions
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(&globals.session_file));
    let client = TokenClient::new(&globals.api_url, Arc::clone(&store))?;

    match action {
        Action::TokenGenerate {
            teacher_id,
            expiry_secs,
            link,
            save,
        } => {
            let params = json!({ "id": teacher_id });
            let issued = client.generate_token(&params, expiry_secs).await?;

            println!("{}", issued.token);

            if link {
                let web_base = Url::parse(globals.web_url.trim())
                    .map_err(|err| anyhow!("invalid web base URL: {err}"))?;
                println!("{}", student_link(&web_base, &issued.token));
            }

            if save {
                match session::attach_token(store.as_ref(), &issued.token)? {
                    Some(_) => println!("Token attached to the current session."),
                    None => println!("No active session; token not stored."),
                }
            }
        }
        Action::TokenValidate { token } => {
            let token = match token {
                Some(token) => token,
                None => store.token(),
            };

            if token.is_empty() {
                println!("No token to validate.");
                return Ok(());
            }

            let echo = client.validate_teacher_token(&token).await?;
            if VerifiedToken::new(&token, &echo).matches {
                println!("Token is valid.");
            } else {
                println!("Token was rejected.");
            }
        }
        Action::TokenValidateUrl { target } => {
            // Accept either a full link or a bare token.
            let url = match Url::parse(&target) {
                Ok(url) => url,
                Err(_) => {
                    let web_base = Url::parse(globals.web_url.trim())
                        .map_err(|err| anyhow!("invalid web base URL: {err}"))?;
                    student_link(&web_base, &target)
                }
            };

            match can_activate_url_token(&url, &client).await {
                Decision::Allow => println!("Link is valid."),
                Decision::Redirect(path) => println!("Link was rejected; continue at {path}."),
            }
        }
        _ => return Err(anyhow!("unexpected action")),
    }

    Ok(())
}
