use clap::Subcommand;
use sleepplot_core::wellness::credentials;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the wellness session token in the OS keyring
    Login {
        /// Session token
        #[arg(long)]
        token: String,
    },
    /// Remove the stored session token
    Logout,
    /// Show whether a session token is available
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login { token } => {
            credentials::store_session_token(&token)?;
            println!("token stored");
        }
        AuthAction::Logout => {
            credentials::clear_session_token()?;
            println!("token removed");
        }
        AuthAction::Status => {
            let authenticated = credentials::session_token()?.is_some_and(|t| !t.is_empty());
            let status = serde_json::json!({ "authenticated": authenticated });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
