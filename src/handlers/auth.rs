use crate::cli::{LoginArgs, RegisterArgs};
use crate::error::AppResult;
use crate::state::AppState;

pub async fn login(state: &mut AppState, args: &LoginArgs) -> AppResult<String> {
    let user = state
        .session
        .login(&state.client, &args.email, &args.password)
        .await?;
    Ok(format!("Logged in as {} <{}>", user.username, user.email))
}

pub async fn register(state: &mut AppState, args: &RegisterArgs) -> AppResult<String> {
    let user = state
        .session
        .register(&state.client, &args.username, &args.email, &args.password)
        .await?;
    Ok(format!("Welcome, {}! Your account is ready.", user.username))
}

pub fn logout(state: &mut AppState) -> AppResult<String> {
    state.session.teardown()?;
    Ok("Logged out".to_string())
}

pub fn whoami(state: &AppState) -> AppResult<String> {
    let user = state.require_user()?;
    Ok(format!("{} <{}> (id {})", user.username, user.email, user.id))
}
