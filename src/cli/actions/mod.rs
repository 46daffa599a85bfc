pub mod login;
pub mod logout;
pub mod register;
pub mod token;
pub mod whoami;

use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Login {
        email: String,
        password: SecretString,
    },
    Register {
        name: String,
        email: String,
        password: SecretString,
    },
    Logout,
    Whoami,
    TokenGenerate {
        teacher_id: String,
        expiry_secs: u64,
        link: bool,
        save: bool,
    },
    TokenValidate {
        token: Option<String>,
    },
    TokenValidateUrl {
        target: String,
    },
}
