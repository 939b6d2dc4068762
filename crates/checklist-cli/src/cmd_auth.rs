use crate::config::Config;
use anyhow::{Context, Result};
use checklist::Credentials;
use checklist_http::FileSessionStore;
use checklist_sync::{AuthFlow, AuthState};
use clap::Subcommand;
use std::io::{self, Write};

#[derive(Subcommand, Debug)]
pub enum AuthOp {
    /// Create an account on the server and log in
    Signup {
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in with existing credentials
    Login {
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Discard the stored session
    Logout,
    /// Show whether a session is stored and where
    Status,
}

pub fn run(op: AuthOp, config: &Config) -> Result<()> {
    let store = FileSessionStore::new(config.token_path.clone());

    match op {
        AuthOp::Signup { email, password } => {
            let creds = Credentials::new(email.clone(), read_password(password)?);
            let mut flow = AuthFlow::new(crate::backend(config)?, store);
            flow.signup(&creds)?;
            println!("Account created; logged in as {}", email);
            Ok(())
        }
        AuthOp::Login { email, password } => {
            let creds = Credentials::new(email.clone(), read_password(password)?);
            let mut flow = AuthFlow::new(crate::backend(config)?, store);
            flow.login(&creds)?;
            println!("Logged in as {}", email);
            Ok(())
        }
        AuthOp::Logout => {
            let mut flow = AuthFlow::resume(crate::backend(config)?, store);
            flow.logout()?;
            println!("Logged out");
            Ok(())
        }
        AuthOp::Status => {
            let flow = AuthFlow::resume(crate::backend(config)?, store);
            if flow.state() == AuthState::LoggedIn {
                println!("Logged in (token at {})", config.token_path.display());
            } else {
                println!("Logged out");
            }
            println!("Server: {}", config.api_url);
            Ok(())
        }
    }
}

fn read_password(arg: Option<String>) -> Result<String> {
    if let Some(password) = arg {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
