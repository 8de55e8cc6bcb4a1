use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stroykontrol::{
    commands::{self, auth, catalog, orders, Context},
    config::Config,
};

#[derive(Parser)]
#[command(name = "stroykontrol")]
#[command(about = "Каталог проектов домов и заявки на строительство")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login(auth::LoginArgs),
    /// Create an account and sign in
    Register(auth::RegisterArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Browse the catalog
    Projects(catalog::FilterArgs),
    /// Show one catalog entry
    Project { id: i64 },
    /// List your orders
    Orders {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show an order with its construction stages
    Order {
        id: i64,
        /// 1-based stage to show in the overview
        #[arg(long)]
        stage: Option<usize>,
    },
    /// Submit a construction order for a catalog entry
    OrderCreate(orders::CreateOrderArgs),
    /// Chat with the construction team
    Chat { order_id: i64 },
}

impl Command {
    fn failure_notice(&self) -> &'static str {
        match self {
            Command::Login(_) => "Ошибка входа",
            Command::Register(_) => "Ошибка регистрации",
            Command::Logout | Command::Whoami => "Ошибка сессии",
            Command::Projects(_) | Command::Project { .. } => "Не удалось загрузить проекты",
            Command::Orders { .. } => "Не удалось загрузить заказы",
            Command::Order { .. } => "Ошибка при загрузке данных заказа",
            Command::OrderCreate(_) => "Ошибка при создании заявки",
            Command::Chat { .. } => "Ошибка",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stroykontrol=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env();

    // Restore the persisted session
    let mut ctx = Context::init(config).await?;

    let notice = cli.command.failure_notice();
    let outcome = match cli.command {
        Command::Login(args) => auth::login(&mut ctx, args).await,
        Command::Register(args) => auth::register(&mut ctx, args).await,
        Command::Logout => auth::logout(&mut ctx).await,
        Command::Whoami => Ok(auth::whoami(&ctx)),
        Command::Projects(args) => catalog::list(&ctx, args).await,
        Command::Project { id } => catalog::show(&ctx, id).await,
        Command::Orders { page } => orders::list(&ctx, page).await,
        Command::Order { id, stage } => orders::show(&ctx, id, stage).await,
        Command::OrderCreate(args) => orders::create(&ctx, args).await,
        Command::Chat { order_id } => Ok(orders::chat(order_id)),
    };

    match outcome {
        Ok(output) => {
            println!("{}", output.trim_end());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("{}", commands::report(&err, notice).trim_end());
            Ok(ExitCode::FAILURE)
        }
    }
}
