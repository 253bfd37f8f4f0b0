//! Forno storefront CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use rusty_money::iso;
use uuid::Uuid;

use forno::{display, lines::CartLine, order::Pickup};
use forno_app::{
    database::{self, Db},
    domain::{
        cart::{CartStore, SqliteCartStore},
        orders::{OrdersStore, SqliteOrdersStore},
    },
};

#[derive(Debug, Parser)]
#[command(name = "forno-app", about = "Forno storefront CLI", long_about = None)]
struct Cli {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://forno.db")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(CartCommand),
    Orders(OrdersCommand),
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the current cart
    Show,

    /// Delete all cart contents
    Clear,
}

#[derive(Debug, Args)]
struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    List(ListOrdersArgs),
}

#[derive(Debug, Args)]
struct ListOrdersArgs {
    /// User whose orders to list
    #[arg(long)]
    user: Uuid,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let pool = database::connect(&cli.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    let db = Db::new(pool);

    match cli.command {
        Commands::Cart(CartCommand {
            command: CartSubcommand::Show,
        }) => show_cart(db).await,
        Commands::Cart(CartCommand {
            command: CartSubcommand::Clear,
        }) => clear_cart(db).await,
        Commands::Orders(OrdersCommand {
            command: OrdersSubcommand::List(args),
        }) => list_orders(db, args).await,
    }
}

async fn show_cart(db: Db) -> Result<(), String> {
    let store = SqliteCartStore::new(db);
    let rx = store
        .observe()
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;
    let cart = rx.borrow().clone();

    if cart.is_empty() {
        println!("cart is empty");

        return Ok(());
    }

    for line in cart.lines() {
        println!(
            "{} x {}  {}",
            line.quantity(),
            line.name(),
            display::line_total_label(line, iso::EUR)
        );

        if let CartLine::Pizza(pizza) = line {
            if !pizza.toppings.is_empty() {
                println!("    {}", display::topping_summary(&pizza.toppings));
            }
        }
    }

    println!("subtotal: {}", display::subtotal_label(&cart, iso::EUR));

    Ok(())
}

async fn clear_cart(db: Db) -> Result<(), String> {
    SqliteCartStore::new(db)
        .clear()
        .await
        .map_err(|error| format!("failed to clear cart: {error}"))?;

    println!("cart cleared");

    Ok(())
}

async fn list_orders(db: Db, args: ListOrdersArgs) -> Result<(), String> {
    let orders = SqliteOrdersStore::new(db)
        .list_for_user(args.user)
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders for user {}", args.user);

        return Ok(());
    }

    for order in orders {
        let pickup = match &order.pickup {
            Pickup::Asap { estimated_minutes } => format!("ASAP (~{estimated_minutes} min)"),
            Pickup::Scheduled {
                day, slot_label, ..
            } => format!("{day} {slot_label}"),
        };

        println!(
            "{}  {}  {}",
            order.created_at,
            pickup,
            display::money_label(order.total, iso::EUR)
        );
    }

    Ok(())
}
