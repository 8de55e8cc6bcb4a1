use clap::Args;

use crate::{
    api,
    commands::Context,
    error::{AppError, Result},
    services::{
        forms::OrderForm,
        orders::{OrderBoard, OrderDetails},
    },
    views,
};

#[derive(Debug, Args)]
pub struct CreateOrderArgs {
    #[arg(long)]
    pub project_id: i64,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub timeline: Option<String>,
    /// Defaults to the phone stored with the profile.
    #[arg(long)]
    pub phone: Option<String>,
    /// Defaults to the email stored with the profile.
    #[arg(long)]
    pub email: Option<String>,
}

pub async fn list(ctx: &Context, page: u32) -> Result<String> {
    let mut board = OrderBoard::new(ctx.config.page_size);
    board
        .load(&ctx.client, ctx.session.session(), page.max(1))
        .await?;
    Ok(views::order_board(&board))
}

pub async fn show(ctx: &Context, id: i64, stage: Option<usize>) -> Result<String> {
    let mut details = match OrderDetails::load(&ctx.client, ctx.session.session(), id).await {
        Ok(details) => details,
        Err(AppError::NotFound(message)) => {
            tracing::info!(order_id = id, "{message}");
            return Ok(views::order_not_found());
        }
        Err(e) => return Err(e),
    };

    if let Some(number) = stage {
        if !details.select_stage(number.saturating_sub(1)) {
            tracing::warn!(stage = number, "No such stage, keeping the active one");
        }
    }
    Ok(views::order_details(&details))
}

pub async fn create(ctx: &Context, args: CreateOrderArgs) -> Result<String> {
    let session = ctx.session.session();
    let user = session.user.clone().unwrap_or_default();

    let form = OrderForm {
        project_template_id: args.project_id,
        address: args.address,
        requested_timeline: args.timeline,
        phone: args.phone.or(user.phone).unwrap_or_default(),
        email: args.email.or(user.email).unwrap_or_default(),
        customer_id: user.id,
    };

    let new_order = form.validate()?;
    let created = api::orders::create_order(&ctx.client, session, &new_order).await?;
    Ok(created_notice(created.id))
}

fn created_notice(id: i64) -> String {
    format!("Заявка успешно создана! Номер заявки: {id}")
}

pub fn chat(order_id: i64) -> String {
    tracing::debug!(order_id, "Chat requested");
    "Чат будет реализован позже".to_string()
}
