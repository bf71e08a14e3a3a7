use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dish_cart::auth::{self, SignInForm, SignUpForm};
use dish_cart::catalog::{filter_by_category, sort_by_price};
use dish_cart::{CartController, CheckoutForm, Config, Session, SortOrder, StoreApi, StoreError};

#[derive(Parser)]
#[command(name = "dish-cart")]
#[command(about = "Browse the menu, manage your cart and place orders")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Storefront API base url (overrides STORE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file holding the sign-in token (overrides STORE_SESSION_PATH)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List dishes
    Dishes {
        /// Only dishes in this category
        #[arg(long)]
        category: Option<String>,
        /// Sort by price: asc, desc or none
        #[arg(long, default_value = "none")]
        sort: SortOrder,
    },
    /// Show one dish
    Dish { id: String },
    /// List categories
    Categories,
    /// List a category's dishes as the server sorts them
    CategoryDishes {
        id: String,
        #[arg(long, default_value = "none")]
        sort: SortOrder,
    },
    /// List the modifier catalog
    Modifiers,
    /// Cart operations (requires sign-in)
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// List all orders
    Orders,
    /// Register a new account
    SignUp {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign in and remember the session token
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the session token
    SignOut,
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show the cart with line totals
    Show,
    /// Add a dish
    Add {
        dish_id: String,
        /// Modifier id to select; repeatable
        #[arg(long = "modifier")]
        modifiers: Vec<String>,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line item's quantity (values below 1 become 1)
    Quantity { item_id: String, quantity: String },
    /// Select or deselect a modifier on a line item
    Modifier {
        item_id: String,
        modifier_id: String,
        /// Deselect instead of select
        #[arg(long)]
        off: bool,
    },
    /// Remove a line item
    Remove { item_id: String },
    /// Place an order for the whole cart
    Checkout {
        #[arg(long, default_value = "")]
        full_name: String,
        #[arg(long, default_value = "")]
        mobile: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        state: String,
        #[arg(long, default_value = "")]
        pincode: String,
    },
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("error: {}", e);
        if matches!(e.downcast_ref::<StoreError>(), Some(StoreError::AuthRequired)) {
            eprintln!("Sign in first: dish-cart sign-in --email <email> --password <password>");
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(url) = &args.api_url {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = args.session {
        config = config.with_session_path(path);
    }

    let api = match config.request_timeout {
        Some(timeout) => StoreApi::with_timeout(&config.api_url, timeout)?,
        None => StoreApi::new(&config.api_url),
    };
    let mut session = Session::load(&config.session_path)?;

    match args.command {
        Command::Dishes { category, sort } => {
            let mut dishes = api.dishes().await?;
            if let Some(category) = category {
                dishes = filter_by_category(dishes, &category);
            }
            sort_by_price(&mut dishes, sort);
            print_json(&dishes)?;
        }
        Command::Dish { id } => print_json(&api.dish(&id).await?)?,
        Command::Categories => print_json(&api.categories().await?)?,
        Command::CategoryDishes { id, sort } => {
            let dishes = match sort {
                SortOrder::None => api.dishes_by_category(&id).await?,
                sort => api.category_dishes(&id, sort).await?,
            };
            print_json(&dishes)?;
        }
        Command::Modifiers => print_json(&api.modifiers(session.token()).await?)?,
        Command::Orders => print_json(&api.orders(session.token()).await?)?,
        Command::SignUp {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = SignUpForm {
                username,
                email,
                password,
                confirm_password,
            };
            let message = auth::sign_up(&api, &form).await?;
            print_json(&json!({ "message": message }))?;
        }
        Command::SignIn { email, password } => {
            let form = SignInForm { email, password };
            let message = auth::sign_in(&api, &mut session, &form).await?;
            print_json(&json!({ "message": message }))?;
        }
        Command::SignOut => {
            auth::sign_out(&mut session)?;
            print_json(&json!({ "message": "Signed out" }))?;
        }
        Command::Cart { command } => run_cart(CartController::new(api, session), command).await?,
    }

    Ok(())
}

async fn run_cart(mut cart: CartController<StoreApi>, command: CartCommand) -> Result<()> {
    cart.open().await?;

    match command {
        CartCommand::Show => {
            return print_json(&json!({
                "cart": cart.summary(),
                "modifiers": cart.modifiers(),
            }));
        }
        CartCommand::Add {
            dish_id,
            modifiers,
            quantity,
        } => cart.add_item(&dish_id, &modifiers, quantity).await?,
        CartCommand::Quantity { item_id, quantity } => {
            cart.set_quantity(&item_id, &quantity).await?
        }
        CartCommand::Modifier {
            item_id,
            modifier_id,
            off,
        } => cart.toggle_modifier(&item_id, &modifier_id, !off).await?,
        CartCommand::Remove { item_id } => cart.remove_item(&item_id).await?,
        CartCommand::Checkout {
            full_name,
            mobile,
            address,
            city,
            state,
            pincode,
        } => {
            let mut form = CheckoutForm::new();
            form.open();
            form.full_name = full_name;
            form.mobile = mobile;
            form.address = address;
            form.city = city;
            form.state = state;
            form.pincode = pincode;
            let total = cart.checkout(&mut form).await?;
            return print_json(&json!({
                "message": "Order placed successfully!",
                "total": total,
            }));
        }
    }

    print_json(&cart.summary())
}
