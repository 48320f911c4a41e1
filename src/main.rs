use clap::{Parser, Subcommand};
use std::path::Path;

use shop_admin::application::stores::AnalyticsSummary;
use shop_admin::domain::entities::{Product, User};
use shop_admin::domain::format::{format_price, is_valid_email, truncate};
use shop_admin::domain::routes::{Navigation, Route};
use shop_admin::{AppError, AppState, Config, GatewayError};

const TITLE_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "shop-admin")]
#[command(about = "Admin dashboard for the Fake Store API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// Overview of products, users and sales
    Dashboard,
    /// List products
    ///
    /// Read-only. Creating, editing and deleting products is done through
    /// the library's `ProductStore`, and those writes are kept in memory only.
    Products {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product
    Product { id: u64 },
    /// List product categories
    Categories,
    /// List users
    ///
    /// Read-only. Creating, editing and deleting users is done through the
    /// library's `UserStore`, and those writes are kept in memory only.
    Users,
    /// Show one user
    User { id: u64 },
    /// Show sales metrics
    Analytics,
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Version => {
            println!("shop-admin v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
        command => run(&cli.config, command).await,
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str) -> Config {
    if Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    }
}

async fn run(config_path: &str, command: Commands) -> Result<(), AppError> {
    let state = AppState::new(load_config(config_path)).await?;

    match command {
        Commands::Login { email, password } => login(&state, &email, &password).await,
        Commands::Logout => {
            state.auth.logout().await;
            println!("Logged out");
            Ok(())
        }
        Commands::Whoami => {
            match state.auth.current().await {
                Some(identity) => println!("{} (id {})", identity, identity.id),
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Commands::Dashboard => dashboard(&state).await,
        Commands::Products { category } => list_products(&state, category.as_deref()).await,
        Commands::Product { id } => {
            require(&state, Route::Products).await?;
            let product = state
                .gateway
                .get_product(id)
                .await
                .map_err(|e| not_found(e, format!("product {}", id)))?;
            print_product_detail(&product);
            Ok(())
        }
        Commands::Categories => {
            require(&state, Route::Products).await?;
            state.products.fetch_categories().await;
            check(state.products.error().await)?;
            for category in state.products.categories().await {
                println!("{}", category);
            }
            Ok(())
        }
        Commands::Users => list_users(&state).await,
        Commands::User { id } => {
            require(&state, Route::Users).await?;
            let user = state
                .gateway
                .get_user(id)
                .await
                .map_err(|e| not_found(e, format!("user {}", id)))?;
            print_user_detail(&user);
            Ok(())
        }
        Commands::Analytics => {
            require(&state, Route::Analytics).await?;
            state.analytics.fetch_carts().await;
            check(state.analytics.error().await)?;
            print_summary(&state.analytics.summary().await);
            println!("Items sold:      {}", state.analytics.total_items().await);
            Ok(())
        }
        Commands::InitConfig | Commands::Version => Ok(()),
    }
}

async fn login(state: &AppState, email: &str, password: &str) -> Result<(), AppError> {
    if let Navigation::Redirect(_) = state.navigate(Route::Login).await {
        if let Some(identity) = state.auth.current().await {
            println!("Already logged in as {}", identity);
        }
        return Ok(());
    }

    if !email.is_empty() && !is_valid_email(email) {
        tracing::warn!("{:?} does not look like an email address", email);
    }

    if !state.auth.login(email, password).await {
        return Err(AppError::Auth("email and password are required".to_string()));
    }
    if let Some(identity) = state.auth.current().await {
        println!("Welcome, {}", identity.name);
    }
    Ok(())
}

async fn dashboard(state: &AppState) -> Result<(), AppError> {
    require(state, Route::Dashboard).await?;

    tokio::join!(
        state.products.fetch_products(),
        state.users.fetch_users(),
        state.analytics.fetch_carts(),
    );

    for error in [
        state.products.error().await,
        state.users.error().await,
        state.analytics.error().await,
    ]
    .into_iter()
    .flatten()
    {
        tracing::warn!("{}", error);
    }

    println!("Products:        {}", state.products.products().await.len());
    println!("Users:           {}", state.users.users().await.len());
    print_summary(&state.analytics.summary().await);
    Ok(())
}

async fn list_products(state: &AppState, category: Option<&str>) -> Result<(), AppError> {
    require(state, Route::Products).await?;

    match category {
        Some(category) => state.products.fetch_products_by_category(category).await,
        None => state.products.fetch_products().await,
    }
    check(state.products.error().await)?;

    for product in state.products.filtered_products().await {
        println!(
            "{:>5}  {:<width$}  {:>10}  {}",
            product.id,
            truncate(&product.title, TITLE_WIDTH),
            format_price(product.price),
            product.category,
            width = TITLE_WIDTH + 3,
        );
    }
    Ok(())
}

async fn list_users(state: &AppState) -> Result<(), AppError> {
    require(state, Route::Users).await?;

    state.users.fetch_users().await;
    check(state.users.error().await)?;

    for user in state.users.users().await {
        println!("{:>5}  {:<20}  {:<30}  {}", user.id, user.username, user.email, user.phone);
    }
    Ok(())
}

/// Fail unless the session may open `route`
async fn require(state: &AppState, route: Route) -> Result<(), AppError> {
    match state.navigate(route).await {
        Navigation::Redirect(Route::Login) => Err(AppError::Auth(format!(
            "{} requires a session, run `shop-admin login` first",
            route
        ))),
        _ => Ok(()),
    }
}

fn check(error: Option<String>) -> Result<(), AppError> {
    match error {
        Some(message) => Err(AppError::Load(message)),
        None => Ok(()),
    }
}

fn not_found(e: GatewayError, what: String) -> AppError {
    match e {
        GatewayError::Status { status: 404, .. } => AppError::NotFound(what),
        e => AppError::Gateway(e),
    }
}

fn print_summary(summary: &AnalyticsSummary) {
    println!("Orders:          {}", summary.total_orders);
    println!("Total sales:     {}€", summary.total_sales);
    println!("Average order:   {}€", summary.average_order_value);
}

fn print_product_detail(product: &Product) {
    println!("{}", product);
    println!("  Price:    {}", format_price(product.price));
    println!("  Category: {}", product.category);
    println!("  Rating:   {} ({} reviews)", product.rating.rate, product.rating.count);
    println!("  {}", truncate(&product.description, 120));
}

fn print_user_detail(user: &User) {
    println!("{}", user);
    println!("  Name:    {}", user.name);
    println!("  Email:   {}", user.email);
    println!("  Phone:   {}", user.phone);
    println!(
        "  Address: {}, {} {}",
        user.address.street, user.address.zipcode, user.address.city
    );
}

fn init_config(config_path: &str) -> Result<(), AppError> {
    if Path::new(config_path).exists() {
        println!("Config already exists at {}", config_path);
        return Ok(());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(config_path, yaml).map_err(shop_admin::application::errors::StorageError::from)?;
    println!("Generated {}", config_path);
    Ok(())
}
