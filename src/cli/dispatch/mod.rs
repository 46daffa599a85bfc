use crate::cli::actions::Action;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one(name)
        .map(|s: &String| s.to_string())
        .ok_or_else(|| anyhow!("missing required argument: --{name}"))
}

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    // Closure to return subcommand matches
    let sub_m = |subcommand| -> Result<&clap::ArgMatches> {
        matches
            .subcommand_matches(subcommand)
            .context("arguments not found")
    };

    match matches.subcommand_name() {
        Some("login") => {
            let matches = sub_m("login")?;
            Ok(Action::Login {
                email: required(matches, "email")?,
                password: SecretString::from(required(matches, "password")?),
            })
        }
        Some("register") => {
            let matches = sub_m("register")?;
            Ok(Action::Register {
                name: required(matches, "name")?,
                email: required(matches, "email")?,
                password: SecretString::from(required(matches, "password")?),
            })
        }
        Some("logout") => Ok(Action::Logout),
        Some("whoami") => Ok(Action::Whoami),
        Some("token") => token_handler(sub_m("token")?),
        _ => Err(anyhow!("no command provided")),
    }
}

fn token_handler(matches: &clap::ArgMatches) -> Result<Action> {
    let sub_m = |subcommand| -> Result<&clap::ArgMatches> {
        matches
            .subcommand_matches(subcommand)
            .context("arguments not found")
    };

    match matches.subcommand_name() {
        Some("generate") => {
            let matches = sub_m("generate")?;
            Ok(Action::TokenGenerate {
                teacher_id: required(matches, "teacher-id")?,
                expiry_secs: matches.get_one::<u64>("expiry").copied().unwrap_or(3600),
                link: matches.get_flag("link"),
                save: matches.get_flag("save"),
            })
        }
        Some("validate") => {
            let matches = sub_m("validate")?;
            Ok(Action::TokenValidate {
                token: matches.get_one::<String>("token").map(|s| s.to_string()),
            })
        }
        Some("validate-url") => {
            let matches = sub_m("validate-url")?;
            Ok(Action::TokenValidateUrl {
                target: required(matches, "target")?,
            })
        }
        _ => Err(anyhow!("no token command provided")),
    }
}
