use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("quizdesk")
        .about("Quiz authoring and grading client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(concat!(
            env!("CARGO_PKG_VERSION"),
            " (",
            env!("QUIZDESK_GIT_SHA"),
            ")"
        ))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Quiz API base URL")
                .default_value("http://localhost:5000")
                .env("QUIZDESK_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("web-url")
                .long("web-url")
                .help("Web client base URL, used to build student links")
                .default_value("http://localhost:4200")
                .env("QUIZDESK_WEB_URL")
                .global(true),
        )
        .arg(
            Arg::new("session-file")
                .long("session-file")
                .help("Path of the session state file")
                .env("QUIZDESK_SESSION_FILE")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("QUIZDESK_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in with email and password")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Account email address")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Account password")
                        .env("QUIZDESK_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("register")
                .about("Create a teacher account and sign in")
                .arg(Arg::new("name").long("name").help("Full name").required(true))
                .arg(
                    Arg::new("email")
                        .long("email")
                        .help("Account email address")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Account password")
                        .env("QUIZDESK_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Sign out and clear the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in identity"))
        .subcommand(
            Command::new("token")
                .about("Generate and validate tokens")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("generate")
                        .about("Mint a token bound to a teacher")
                        .arg(
                            Arg::new("teacher-id")
                                .long("teacher-id")
                                .help("Teacher the token is bound to")
                                .required(true),
                        )
                        .arg(
                            Arg::new("expiry")
                                .long("expiry")
                                .help("Expiry hint in seconds")
                                .default_value("3600")
                                .value_parser(clap::value_parser!(u64)),
                        )
                        .arg(
                            Arg::new("link")
                                .long("link")
                                .help("Also print the student-facing link")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("save")
                                .long("save")
                                .help("Attach the token to the current session")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("validate")
                        .about("Validate a teacher token (the stored one when omitted)")
                        .arg(Arg::new("token").help("Token to validate")),
                )
                .subcommand(
                    Command::new("validate-url")
                        .about("Validate a single-use link or its token")
                        .arg(
                            Arg::new("target")
                                .help("Full link, or a bare token")
                                .required(true),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "quizdesk");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Quiz authoring and grading client"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_login_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "quizdesk",
            "login",
            "--email",
            "ada@school.test",
            "--password",
            "hunter2",
        ]);

        assert_eq!(
            matches.get_one::<String>("api-url").map(|s| s.to_string()),
            Some("http://localhost:5000".to_string())
        );

        let (name, sub) = matches.subcommand().expect("expected a subcommand");
        assert_eq!(name, "login");
        assert_eq!(
            sub.get_one::<String>("email").map(|s| s.to_string()),
            Some("ada@school.test".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("QUIZDESK_API_URL", Some("http://quiz.school.test:5000")),
                ("QUIZDESK_WEB_URL", Some("http://quiz.school.test")),
                ("QUIZDESK_SESSION_FILE", Some("/tmp/quizdesk/session.json")),
                ("QUIZDESK_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["quizdesk", "whoami"]);

                assert_eq!(
                    matches.get_one::<String>("api-url").map(|s| s.to_string()),
                    Some("http://quiz.school.test:5000".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("web-url").map(|s| s.to_string()),
                    Some("http://quiz.school.test".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("session-file").map(|s| s.to_string()),
                    Some("/tmp/quizdesk/session.json".to_string())
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("QUIZDESK_LOG_LEVEL", Some(level))], || {
                let command = new();
                let matches = command.get_matches_from(vec!["quizdesk", "whoami"]);
                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("QUIZDESK_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["quizdesk".to_string(), "whoami".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();
                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_token_generate_defaults() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "quizdesk",
            "token",
            "generate",
            "--teacher-id",
            "t1",
        ]);

        let (_, token) = matches.subcommand().expect("expected a subcommand");
        let (name, generate) = token.subcommand().expect("expected a subcommand");
        assert_eq!(name, "generate");
        assert_eq!(generate.get_one::<u64>("expiry").copied(), Some(3600));
        assert!(!generate.get_flag("link"));
        assert!(!generate.get_flag("save"));
    }
}
