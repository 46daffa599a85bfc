use anyhow::Result;
use quizdesk::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    match action {
        Action::Login { .. } => actions::login::handle(action, &globals).await?,
        Action::Register { .. } => actions::register::handle(action, &globals).await?,
        Action::Logout => actions::logout::handle(&globals)?,
        Action::Whoami => actions::whoami::handle(&globals)?,
        Action::TokenGenerate { .. } | Action::TokenValidate { .. } | Action::TokenValidateUrl { .. } => {
            actions::token::handle(action, &globals).await?;
        }
    }

    Ok(())
}
