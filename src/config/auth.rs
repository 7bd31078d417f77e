use std::{env, process::Command};

use derive_getters::Getters;
use serde::Deserialize;

const PASSWORD_VAR: &str = "IMAPSWEEP_PASSWORD";

#[derive(Deserialize, Getters)]
pub struct PlainAuthConfig {
    user: String,
    #[getter(skip)]
    password_cmd: Option<String>,
}

impl PlainAuthConfig {
    /// Resolves the secret at call time: `password_cmd` output when
    /// configured, the `IMAPSWEEP_PASSWORD` environment variable otherwise.
    /// The config file itself never holds a password.
    pub fn password(&self) -> String {
        if let Some(password_cmd) = &self.password_cmd {
            return run_password_cmd(password_cmd);
        }
        env::var(PASSWORD_VAR).unwrap_or_else(|_| {
            panic!("either password_cmd or {PASSWORD_VAR} should provide the secret")
        })
    }
}

fn run_password_cmd(password_cmd: &str) -> String {
    let mut cmd_parts = password_cmd.split(' ');
    let mut cmd = Command::new(
        cmd_parts
            .next()
            .expect("password_cmd should specify a program"),
    );
    for part in cmd_parts {
        cmd.arg(part);
    }
    let output = cmd.output().expect("password_cmd should be executable");

    assert!(
        !output.stdout.is_empty(),
        "could not retrieve password from password_cmd"
    );

    String::from_utf8(output.stdout)
        .expect("password_cmd should evaluate to password")
        .trim_end()
        .to_string()
}

#[derive(Deserialize)]
#[serde(tag = "type")]
pub enum AuthConfig {
    Plain(PlainAuthConfig),
}

impl AuthConfig {
    pub fn user(&self) -> &str {
        match self {
            Self::Plain(plain) => plain.user(),
        }
    }

    pub fn password(&self) -> String {
        match self {
            Self::Plain(plain) => plain.password(),
        }
    }
}
