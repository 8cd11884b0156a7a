//! Main entry point for the Nagari auth console.
//!
//! Wires the session manager to the file-backed side-store and the mocked
//! identity provider, then runs one command against it:
//!
//! ```text
//! nagari-backend status
//! nagari-backend login <email> <password>
//! nagari-backend logout
//! nagari-backend routes
//! ```

use nagari_adapters::{FileStore, MockVerifier};
use nagari_backend::auth::{AuthContext, SessionManager};
use nagari_backend::config::Config;
use nagari_backend::obfuscation::mask_email;
use nagari_backend::{Error, Result};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const LOGIN_FAILED: &str = "Login gagal, periksa kembali email dan kata sandi.";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "nagari-backend failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let store = Arc::new(FileStore::new(&config.store_path));
    let verifier = Arc::new(MockVerifier::with_delay(config.login_delay));
    let manager = SessionManager::new(verifier, store).with_storage_key(config.storage_key.clone());

    let context = AuthContext::new();
    context.install(Arc::new(manager))?;
    let session = context.session()?;
    session.initialize();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["status"] => {
            match session.user() {
                Some(user) => println!(
                    "{} <{}> ({})",
                    user.name,
                    mask_email(&user.email),
                    user.role.label()
                ),
                None => println!("Belum masuk."),
            }
            Ok(ExitCode::SUCCESS)
        }
        ["login", email, password] => {
            if session.login(email, password).await {
                println!("Selamat datang, {}.", session.user().map(|u| u.name).unwrap_or_default());
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{LOGIN_FAILED}");
                Ok(ExitCode::FAILURE)
            }
        }
        ["logout"] => {
            session.logout();
            println!("Berhasil keluar.");
            Ok(ExitCode::SUCCESS)
        }
        ["routes"] => {
            for route in session.allowed_routes() {
                println!("{route}\t{}", route.base_path());
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => Err(Error::Usage(
            "nagari-backend [status | login <email> <password> | logout | routes]".to_string(),
        )),
    }
}
