//! Session commands: login, logout, whoami, profile.

use ridextra_admin::{AdminError, LoginFlow};
use secrecy::SecretString;

use super::Context;
use crate::output;

/// Log in and persist the session.
pub async fn login(ctx: &Context, email: &str, password: Option<String>) -> Result<(), AdminError> {
    let password = password.map(SecretString::from).ok_or_else(|| {
        AdminError::Validation(
            "Password is required (use --password or RIDEXTRA_ADMIN_PASSWORD)".to_string(),
        )
    })?;

    let session = LoginFlow::new(ctx.client.clone())
        .login(email, &password)
        .await?;

    output::line(&format!("Logged in as {} ({})", session.email, session.subject_id));
    Ok(())
}

/// End the session locally and on the backend.
pub async fn logout(ctx: &Context) -> Result<(), AdminError> {
    if ctx.client.session().current().await.is_none() {
        output::line("Not logged in");
        return Ok(());
    }

    LoginFlow::new(ctx.client.clone()).logout().await?;
    output::line("Logged out");
    Ok(())
}

/// Show the stored identity without contacting the backend.
pub async fn whoami(ctx: &Context) -> Result<(), AdminError> {
    match ctx.client.session().current().await {
        Some(session) if ctx.json => output::json(&serde_json::json!({
            "subjectId": session.subject_id,
            "email": session.email,
        }))?,
        Some(session) => {
            output::line(&format!("{} ({})", session.email, session.subject_id));
        }
        None => output::line("Not logged in"),
    }
    Ok(())
}

/// Fetch and print the admin profile.
pub async fn profile(ctx: &Context) -> Result<(), AdminError> {
    let envelope = LoginFlow::new(ctx.client.clone()).profile().await?;
    match &envelope.data {
        Some(data) => output::json(data),
        None => {
            output::done(&envelope, "No profile data");
            Ok(())
        }
    }
}
