//! Command-line storefront over a local guest cart

use canteen_cart::{
    remote::MemoryRemote, CartConfig, CartManager, CustomerDetails, MenuItem, MenuManager,
    OrderManager, Session,
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

/// Canteen storefront CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the guest cart (overrides CANTEEN_STORAGE_DIR)
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available menu items
    Menu,
    /// Add one of a menu item to the cart
    Add { item_id: i64 },
    /// Remove a menu item from the cart
    Remove { item_id: i64 },
    /// Set the quantity of a cart line (0 removes it)
    Set { item_id: i64, quantity: i64 },
    /// Show the cart with totals
    Show,
    /// Place an order for the cart
    Checkout {
        #[arg(short, long, default_value = "cash")]
        payment_method: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

fn seed_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(1, "Paneer Butter Masala", Decimal::from(80))
            .with_category("Main Course")
            .with_description("Cottage cheese in a rich tomato gravy"),
        MenuItem::new(2, "Dal Tadka", Decimal::from(60)).with_category("Main Course"),
        MenuItem::new(3, "Veg Biryani", Decimal::from(90)).with_category("Main Course"),
        MenuItem::new(4, "Samosa", Decimal::from(20)).with_category("Snacks"),
        MenuItem::new(5, "Vada Pav", Decimal::from(25)).with_category("Snacks"),
        MenuItem::new(9, "Masala Chai", Decimal::from(15)).with_category("Beverages"),
        MenuItem::new(10, "Cold Coffee", Decimal::from(40))
            .with_category("Beverages")
            .unavailable(),
    ]
}

fn print_cart(cart: &CartManager) {
    if cart.cart().is_empty() {
        println!("Cart is empty");
        return;
    }
    for line in cart.items() {
        println!(
            "{:>4}  {:<24} {:>3} x {:>7} = {:>8}",
            line.id,
            line.name,
            line.quantity,
            line.unit_price,
            line.line_total()
        );
    }
    println!("Items:    {}", cart.total_items());
    println!("Subtotal: {}", cart.total_price());
    println!("Tax:      {}", cart.tax());
    println!("Total:    {}", cart.grand_total());
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let mut config = CartConfig::from_env().context("Failed to read CANTEEN_* settings")?;
    if cli.storage_dir.is_some() {
        config.storage_dir = cli.storage_dir.clone();
    }
    if config.storage_dir.is_none() {
        config.storage_dir = Some(PathBuf::from(".canteen"));
    }
    let local = config.open_local_store()?;

    // Stand-in backend; orders live only for this process
    let remote = Arc::new(MemoryRemote::new().with_menu(seed_menu()));
    let session = Session::guest();

    let mut menu = MenuManager::new(remote.clone()).with_fallback(seed_menu());
    let mut cart = CartManager::new(session.clone(), remote.clone(), local, config);
    let orders = OrderManager::new(remote, session);

    menu.load_menu_items().await;
    cart.load_cart().await;

    match cli.command {
        Commands::Menu => {
            let mut category = "";
            for item in menu.items() {
                if item.category != category {
                    category = item.category.as_str();
                    println!("{}", category);
                }
                println!("{:>4}  {:<24} {:>6}", item.id, item.name, item.price);
            }
        }
        Commands::Add { item_id } => {
            let item = menu
                .find(item_id)
                .ok_or_else(|| anyhow!("No available menu item {}", item_id))?;
            cart.add_item(item);
            println!("{} added to cart", item.name);
        }
        Commands::Remove { item_id } => {
            cart.remove_item(item_id);
            print_cart(&cart);
        }
        Commands::Set { item_id, quantity } => {
            cart.update_quantity(item_id, quantity);
            print_cart(&cart);
        }
        Commands::Show => print_cart(&cart),
        Commands::Checkout {
            payment_method,
            name,
            email,
            phone,
        } => {
            let mut customer = CustomerDetails::new();
            if let Some(name) = name {
                customer = customer.with_name(name);
            }
            if let Some(email) = email {
                customer = customer.with_email(email);
            }
            if let Some(phone) = phone {
                customer = customer.with_phone(phone);
            }

            let result = orders.create_order(&mut cart, &payment_method, customer).await;
            if !result.success {
                return Err(anyhow!(
                    "Checkout failed: {}",
                    result.message.unwrap_or_default()
                ));
            }
            println!(
                "Order {} placed",
                result.order_number.unwrap_or_default()
            );
        }
    }

    cart.flush().await;
    Ok(())
}
