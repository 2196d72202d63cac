//! # Hearth CLI
//!
//! Command-line front end for the storefront. Every screen of the mobile app
//! has a subcommand here; state survives between runs through the same
//! snapshots the app writes.
//!
//! ## Usage
//! ```bash
//! hearth catalog list
//! hearth catalog browse --type Chairs --sort rating
//! hearth cart add 2 --quantity 2
//! hearth login user@example.com password
//! hearth checkout --pickup --phone "+7 900 000 00 00"
//! hearth orders list
//! hearth --json admin dashboard
//! hearth prefs language ru
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (`--config` or the platform `hearth.toml`)
//! 3. Open snapshot storage and restore every store
//! 4. Run the subcommand and print its result

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hearth_core::catalog::{CatalogFilter, ProductDraft, SortOption};
use hearth_core::checkout::{CheckoutForm, DeliveryMethod, PaymentMethod};
use hearth_core::i18n::Language;
use hearth_core::{Money, Order, OrderStatus, Product, Role, Theme, User};
use serde::Serialize;

use hearth_storefront::commands::{account, admin, cart, catalog, checkout, preferences};
use hearth_storefront::state::{AppState, ConfigState};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "hearth")]
#[command(author, version, about = "Hearth furniture storefront")]
struct Cli {
    /// Config file (defaults to the platform hearth.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products and promotions
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in with email and password
    Login { email: String, password: String },
    /// Create an account and sign in
    Register {
        name: String,
        email: String,
        password: String,
        /// Defaults to the password
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Edit the signed-in user's profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        notifications: Option<bool>,
    },
    /// Place an order from the cart
    Checkout(CheckoutArgs),
    /// The signed-in user's orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Admin panel
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Theme and language
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// All products
    List,
    /// Products on sale
    Promotions,
    /// Search by name, type or description
    Search { query: String },
    /// Search, filter and sort
    Browse {
        #[arg(default_value = "")]
        query: String,
        /// Product type (repeatable)
        #[arg(long = "type")]
        types: Vec<String>,
        #[arg(long)]
        min_price: Option<i64>,
        #[arg(long)]
        max_price: Option<i64>,
        #[arg(long)]
        min_rating: Option<f64>,
        /// price-asc, price-desc, popularity or rating
        #[arg(long, default_value = "popularity")]
        sort: SortOption,
    },
    /// Product page
    Show { product_id: String },
}

#[derive(Subcommand)]
enum CartAction {
    Show,
    Add {
        product_id: String,
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    Remove { product_id: String },
    Inc { product_id: String },
    Dec { product_id: String },
    Clear,
}

#[derive(clap::Args)]
struct CheckoutArgs {
    /// Pick up from the store instead of courier delivery
    #[arg(long)]
    pickup: bool,
    /// Pay in cash on delivery instead of by card
    #[arg(long)]
    cash: bool,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    postal_code: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Show the price breakdown without ordering
    #[arg(long)]
    summary: bool,
}

#[derive(Subcommand)]
enum OrdersAction {
    List,
    Track { order_id: String },
    Cancel { order_id: String },
}

#[derive(Subcommand)]
enum AdminAction {
    Dashboard,
    Products {
        #[command(subcommand)]
        action: AdminProductAction,
    },
    Users {
        #[command(subcommand)]
        action: AdminUserAction,
    },
    Orders {
        #[command(subcommand)]
        action: AdminOrderAction,
    },
}

#[derive(clap::Args)]
struct ProductArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: i64,
    #[arg(long)]
    old_price: Option<i64>,
    #[arg(long = "type", default_value = "Sofas")]
    product_type: String,
    #[arg(long, default_value_t = 4.5)]
    rating: f64,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    out_of_stock: bool,
}

impl From<ProductArgs> for ProductDraft {
    fn from(args: ProductArgs) -> Self {
        ProductDraft {
            name: args.name,
            price: Money::from_units(args.price),
            old_price: args.old_price.map(Money::from_units),
            product_type: args.product_type,
            rating: args.rating,
            image_url: args.image_url,
            description: args.description,
            in_stock: !args.out_of_stock,
        }
    }
}

#[derive(Subcommand)]
enum AdminProductAction {
    Add(ProductArgs),
    Update {
        product_id: String,
        #[command(flatten)]
        product: ProductArgs,
    },
    Delete { product_id: String },
}

#[derive(Subcommand)]
enum AdminUserAction {
    List,
    Update {
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// admin, moderator or visitor
        #[arg(long)]
        role: Role,
    },
    Delete { user_id: String },
}

#[derive(Subcommand)]
enum AdminOrderAction {
    List,
    Status {
        order_id: String,
        /// Processing, Shipped, Delivered or Cancelled
        status: OrderStatus,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    Show,
    /// Set the theme, or toggle it when omitted
    Theme { theme: Option<Theme> },
    /// en or ru
    Language { language: Language },
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() {
    hearth_storefront::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = ConfigState::load(cli.config)?;
    let state = hearth_storefront::open(config)?;
    let out = Output {
        json: cli.json,
        state: &state,
    };

    match cli.command {
        Commands::Catalog { action } => run_catalog(&out, action).await?,
        Commands::Cart { action } => run_cart(&out, action)?,
        Commands::Login { email, password } => {
            let user = account::sign_in(&state, &email, &password).await?;
            out.user(&user)?;
        }
        Commands::Register {
            name,
            email,
            password,
            confirm,
        } => {
            let confirm = confirm.unwrap_or_else(|| password.clone());
            let user = account::sign_up(&state, &name, &email, &password, &confirm).await?;
            out.user(&user)?;
        }
        Commands::Logout => out.message(&account::sign_out(&state))?,
        Commands::Whoami => {
            let session = account::current_session(&state);
            match &session.user {
                Some(user) => out.user(user)?,
                None => out.value(&session, || println!("{}", state.t("pleaseLogin")))?,
            }
        }
        Commands::Profile {
            name,
            email,
            notifications,
        } => {
            let update = account::ProfileUpdate {
                name,
                email,
                notifications_enabled: notifications,
            };
            let (user, message) = account::update_profile(&state, update).await?;
            out.user(&user)?;
            out.message(&message)?;
        }
        Commands::Checkout(args) => run_checkout(&out, args).await?,
        Commands::Orders { action } => match action {
            OrdersAction::List => out.orders(&account::my_orders(&state)?)?,
            OrdersAction::Track { order_id } => out.order(&account::track_order(&state, &order_id)?)?,
            OrdersAction::Cancel { order_id } => {
                let response = account::cancel_order(&state, &order_id)?;
                out.value(&response, || {
                    if let Some(message) = &response.message {
                        println!("{message}");
                    }
                })?;
            }
        },
        Commands::Admin { action } => run_admin(&out, action)?,
        Commands::Prefs { action } => {
            let prefs = match action {
                PrefsAction::Show => preferences::get_preferences(&state.theme, &state.language),
                PrefsAction::Theme { theme } => {
                    preferences::set_theme(&state.theme, theme);
                    preferences::get_preferences(&state.theme, &state.language)
                }
                PrefsAction::Language { language } => {
                    preferences::set_language(&state.language, language);
                    preferences::get_preferences(&state.theme, &state.language)
                }
            };
            out.value(&prefs, || {
                let theme = match prefs.theme {
                    Theme::Light => "light",
                    Theme::Dark => "dark",
                };
                println!("{}: {}", state.t("theme"), state.t(theme));
                println!("{}: {}", state.t("language"), prefs.language.native_name());
            })?;
        }
    }
    Ok(())
}

async fn run_catalog(out: &Output<'_>, action: CatalogAction) -> CliResult<()> {
    let state = out.state;
    match action {
        CatalogAction::List => out.products(&catalog::list_products(&state.catalog).await),
        CatalogAction::Promotions => out.products(&catalog::list_promotions(&state.catalog).await),
        CatalogAction::Search { query } => {
            out.products(&catalog::search_products(state, &query).await?)
        }
        CatalogAction::Browse {
            query,
            types,
            min_price,
            max_price,
            min_rating,
            sort,
        } => {
            let narrowed = !types.is_empty()
                || min_price.is_some()
                || max_price.is_some()
                || min_rating.is_some();
            let filter = narrowed.then(|| CatalogFilter {
                min_price: min_price.map_or(Money::zero(), Money::from_units),
                max_price: max_price.map(Money::from_units),
                types,
                min_rating: min_rating.unwrap_or(0.0),
            });
            out.products(&catalog::browse_products(state, &query, filter, sort).await?)
        }
        CatalogAction::Show { product_id } => {
            let detail = catalog::get_product(state, &product_id)?;
            out.value(&detail, || {
                out.print_product(&detail.product);
                if let Some(percent) = detail.discount_percent {
                    println!("  -{percent}%");
                }
                println!("  {}", detail.product.description);
                if detail.in_cart > 0 {
                    println!("  {}: {}", state.t("cart"), detail.in_cart);
                }
            })
        }
    }
}

fn run_cart(out: &Output<'_>, action: CartAction) -> CliResult<()> {
    let state = out.state;
    let response = match action {
        CartAction::Show => cart::get_cart(&state.cart),
        CartAction::Add {
            product_id,
            quantity,
        } => cart::add_to_cart(&state.catalog, &state.cart, &product_id, quantity)?,
        CartAction::Remove { product_id } => cart::remove_from_cart(&state.cart, &product_id),
        CartAction::Inc { product_id } => cart::increment_item(&state.cart, &product_id),
        CartAction::Dec { product_id } => cart::decrement_item(&state.cart, &product_id),
        CartAction::Clear => cart::clear_cart(&state.cart),
    };

    out.value(&response, || {
        if response.items.is_empty() {
            println!("{}", state.t("yourCartIsEmpty"));
            return;
        }
        for item in &response.items {
            println!(
                "{:>4}  {:<32} x{:<3} {}",
                item.product.id,
                item.product.name,
                item.quantity,
                state.config.format_money(item.line_total())
            );
        }
        println!(
            "{}: {}",
            state.t("total"),
            state.config.format_money(response.totals.total)
        );
    })
}

async fn run_checkout(out: &Output<'_>, args: CheckoutArgs) -> CliResult<()> {
    let state = out.state;
    let delivery_method = if args.pickup {
        DeliveryMethod::Pickup
    } else {
        DeliveryMethod::Courier
    };

    if args.summary {
        let summary = checkout::checkout_summary(state, delivery_method);
        return out.value(&summary, || {
            println!("{}: {}", state.t("subtotal"), state.config.format_money(summary.subtotal));
            println!("{}: {}", state.t("delivery"), state.config.format_money(summary.delivery));
            println!("{}: {}", state.t("total"), state.config.format_money(summary.total));
        });
    }

    let form = CheckoutForm {
        address: args.address,
        city: args.city,
        postal_code: args.postal_code,
        phone: args.phone,
        payment_method: if args.cash {
            PaymentMethod::Cash
        } else {
            PaymentMethod::Card
        },
        delivery_method,
    };
    let placed = checkout::place_order(state, form).await?;
    out.value(&placed, || {
        println!("{}", placed.message);
        out.print_order(&placed.order);
    })
}

fn run_admin(out: &Output<'_>, action: AdminAction) -> CliResult<()> {
    let state = out.state;
    match action {
        AdminAction::Dashboard => {
            let stats = admin::dashboard(state)?;
            out.value(&stats, || {
                println!("{}: {}", state.t("products"), stats.total_products);
                println!("{}: {}", state.t("users"), stats.total_users);
                println!("{}: {}", state.t("orders"), stats.total_orders);
                println!(
                    "{}: {}",
                    state.t("totalRevenue"),
                    state.config.format_money(stats.total_revenue)
                );
            })
        }
        AdminAction::Products { action } => match action {
            AdminProductAction::Add(args) => {
                out.products(&[admin::add_product(state, args.into())?])
            }
            AdminProductAction::Update {
                product_id,
                product,
            } => out.products(&[admin::update_product(state, &product_id, product.into())?]),
            AdminProductAction::Delete { product_id } => {
                out.products(&[admin::delete_product(state, &product_id)?])
            }
        },
        AdminAction::Users { action } => match action {
            AdminUserAction::List => {
                let users = admin::list_users(state)?;
                out.value(&users, || users.iter().for_each(|u| out.print_user(u)))
            }
            AdminUserAction::Update {
                user_id,
                name,
                email,
                role,
            } => {
                let edit = admin::UserEdit { name, email, role };
                out.user(&admin::update_user(state, &user_id, edit)?)
            }
            AdminUserAction::Delete { user_id } => out.user(&admin::delete_user(state, &user_id)?),
        },
        AdminAction::Orders { action } => match action {
            AdminOrderAction::List => out.orders(&admin::list_orders(state)?),
            AdminOrderAction::Status { order_id, status } => {
                out.order(&admin::update_order_status(state, &order_id, status)?)
            }
        },
    }
}

// =============================================================================
// Output
// =============================================================================

/// Prints command results as text or, with `--json`, as pretty JSON.
struct Output<'a> {
    json: bool,
    state: &'a AppState,
}

impl Output<'_> {
    fn value<T: Serialize>(&self, value: &T, text: impl FnOnce()) -> CliResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text();
        }
        Ok(())
    }

    fn message(&self, message: &str) -> CliResult<()> {
        self.value(&serde_json::json!({ "message": message }), || {
            println!("{message}")
        })
    }

    fn products(&self, products: &[Product]) -> CliResult<()> {
        self.value(&products, || {
            if products.is_empty() {
                println!("{}", self.state.t("noProductsFound"));
            }
            products.iter().for_each(|p| self.print_product(p));
        })
    }

    fn user(&self, user: &User) -> CliResult<()> {
        self.value(user, || self.print_user(user))
    }

    fn orders(&self, orders: &[Order]) -> CliResult<()> {
        self.value(&orders, || {
            if orders.is_empty() {
                println!("{}", self.state.t("noOrdersFound"));
            }
            orders.iter().for_each(|o| self.print_order(o));
        })
    }

    fn order(&self, order: &Order) -> CliResult<()> {
        self.value(order, || self.print_order(order))
    }

    fn print_product(&self, product: &Product) {
        let config = &self.state.config;
        let old_price = product
            .old_price
            .map(|p| format!(" (was {})", config.format_money(p)))
            .unwrap_or_default();
        let stock = if product.in_stock {
            String::new()
        } else {
            format!(" [{}]", self.state.t("outOfStock"))
        };
        println!(
            "{:>4}  {:<32} {:<10} {:.1}★  {}{}{}",
            product.id,
            product.name,
            product.product_type,
            product.rating,
            config.format_money(product.price),
            old_price,
            stock
        );
    }

    fn print_user(&self, user: &User) {
        println!(
            "{:>4}  {:<24} {:<28} {}",
            user.id,
            user.name,
            user.email,
            self.state.t(user.role.as_str())
        );
    }

    fn print_order(&self, order: &Order) {
        let state = self.state;
        println!(
            "{}  {}  {}  {}",
            order.id,
            order.date.format("%Y-%m-%d"),
            state.t(order.status.message_key()),
            state.config.format_money(order.total)
        );
        for item in &order.items {
            println!(
                "    {} x{}  {}",
                item.name,
                item.quantity,
                state.config.format_money(item.line_total())
            );
        }
        if let Some(address) = &order.address {
            println!("    {address}");
        }
        if let Some(tracking) = &order.tracking_info {
            println!(
                "    {} {} ({}%, {})",
                tracking.tracking_number,
                tracking.current_location,
                tracking.progress,
                tracking.estimated_delivery.format("%Y-%m-%d")
            );
        }
    }
}
