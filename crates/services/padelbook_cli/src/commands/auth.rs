//! Landing, register and login screens.

use std::io::{self, Write};

use anyhow::bail;
use padelbook_common::models::Credentials;
use padelbook_session::{Identity, RegistrationForm, Route};

use crate::app_state::AppState;
use crate::render;

pub async fn register(
    state: &AppState,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    then_login: bool,
) -> anyhow::Result<()> {
    let form = RegistrationForm {
        name,
        email: email.clone(),
        password: password.clone(),
        confirm_password,
    };
    state.auth.register(&form).await?;
    writeln!(io::stdout(), "Account created for {email}.")?;

    if then_login {
        login(state, email, password).await
    } else {
        writeln!(io::stdout(), "You can now log in with `padelbook login`.")?;
        Ok(())
    }
}

pub async fn login(state: &AppState, email: String, password: String) -> anyhow::Result<()> {
    let route = state
        .auth
        .login(&Credentials { email, password })
        .await?;
    if route != Route::Dashboard {
        bail!("Login did not start a session.");
    }
    match state.auth.current() {
        Identity::Authenticated(user) => writeln!(io::stdout(), "{}", render::welcome_line(&user))?,
        Identity::Anonymous => writeln!(io::stdout(), "Logged in.")?,
    }
    Ok(())
}

pub fn logout(state: &AppState) -> anyhow::Result<()> {
    state.auth.logout();
    writeln!(io::stdout(), "Logged out.")?;
    Ok(())
}

pub async fn whoami(state: &AppState) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match state.auth.refresh().await {
        Identity::Authenticated(user) => {
            writeln!(out, "{}", user.formatted_name())?;
            if let Some(email) = &user.email {
                writeln!(out, "  email: {email}")?;
            }
            writeln!(
                out,
                "  role:  {}",
                user.role.as_deref().unwrap_or(if user.is_admin() { "Administrador" } else { "-" })
            )?;
        }
        Identity::Anonymous => writeln!(out, "Not logged in.")?,
    }
    writeln!(out, "  backend: {}", state.api.base_url())?;
    Ok(())
}
