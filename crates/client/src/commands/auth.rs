use clap::Args;

use crate::{
    commands::Context,
    error::Result,
    services::forms::{LoginForm, RegistrationForm},
};

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub login: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub login: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "CUSTOMER")]
    pub role: String,
}

pub async fn login(ctx: &mut Context, args: LoginArgs) -> Result<String> {
    let form = LoginForm {
        login: args.login,
        password: args.password,
    };
    let credentials = form.validate()?;
    let response = ctx.session.sign_in(&ctx.client, &credentials).await?;

    let name = response.profile().display_name().to_string();
    let name = if name.is_empty() { credentials.login } else { name };
    Ok(format!("Вы вошли как {name}"))
}

pub async fn register(ctx: &mut Context, args: RegisterArgs) -> Result<String> {
    let form = RegistrationForm {
        login: args.login,
        password: args.password,
        confirm_password: args.confirm_password,
        full_name: args.full_name,
        email: args.email,
        phone: args.phone,
        role: args.role,
    };
    let registration = form.validate()?;
    let response = ctx.session.sign_up(&ctx.client, &registration).await?;

    let name = response.profile().display_name().to_string();
    let name = if name.is_empty() { registration.login } else { name };
    Ok(format!("Аккаунт создан: {name}"))
}

pub async fn logout(ctx: &mut Context) -> Result<String> {
    ctx.session.sign_out().await?;
    Ok("Вы вышли из аккаунта".to_string())
}

pub fn whoami(ctx: &Context) -> String {
    let session = ctx.session.session();
    if !session.is_authenticated() {
        return "Вы не вошли в систему".to_string();
    }
    match &session.user {
        Some(user) => {
            let mut line = user.display_name().to_string();
            if let Some(role) = user.role.as_deref() {
                line.push_str(&format!(" ({role})"));
            }
            if let Some(email) = user.email.as_deref() {
                line.push_str(&format!(" <{email}>"));
            }
            line
        }
        None => "Вы вошли в систему".to_string(),
    }
}
