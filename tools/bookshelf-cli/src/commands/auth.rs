//! Login and signup prompts.

use anyhow::Result;
use bookshelf_commerce::auth::{LoginForm, RegistrationForm};
use bookshelf_commerce::session::StorefrontSession;
use dialoguer::{Input, Password};

use super::LoginArgs;
use crate::context::Context;

/// Run the login command.
///
/// The token lives only as long as this process, so this mostly checks
/// that the credentials are accepted.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let form = prompt_login(args.username)?;
    let result = login_with(&mut session, &form, ctx).await;
    session.close();
    result
}

/// Run the signup command.
pub async fn signup(ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let form = prompt_registration()?;
    let result = register_with(&session, &form, ctx).await;
    session.close();
    result
}

/// Ask for credentials.
pub fn prompt_login(username: Option<String>) -> Result<LoginForm> {
    let username = match username {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Username").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;
    Ok(LoginForm::new(username, password))
}

/// Ask for every signup field. Blank answers are allowed here and caught
/// by validation.
pub fn prompt_registration() -> Result<RegistrationForm> {
    let ask = |prompt: &str| -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    };

    let username = ask("Username")?;
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;
    let email = ask("Email")?;
    let first_name = ask("First name")?;
    let last_name = ask("Last name")?;

    Ok(RegistrationForm::new(
        &username,
        &password,
        &email,
        &first_name,
        &last_name,
    ))
}

pub async fn login_with(
    session: &mut StorefrontSession,
    form: &LoginForm,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Logging in...");
    let result = session.login(form).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&serde_json::json!({ "status": "ok", "username": form.username }));
            }
            ctx.output.success("Login successful!");
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e),
    }
}

pub async fn register_with(
    session: &StorefrontSession,
    form: &RegistrationForm,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Creating account...");
    let result = session.register(form).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            if ctx.output.is_json() {
                ctx.output
                    .json(&serde_json::json!({ "status": "ok", "username": form.username }));
            }
            ctx.output.success("Signup successful! You can now log in.");
            Ok(())
        }
        Err(e) => anyhow::bail!("Signup failed: {}", e),
    }
}
