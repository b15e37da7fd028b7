use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;

use fashionai_common::Config;
use storefront_client::{NewUser, Product, StorefrontError, User, UserUpdate};

use super::{storefront, TokenArg};

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Log in and print an access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and print an access token
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to the part of the email before '@'
        #[arg(long)]
        username: Option<String>,
    },

    /// Show the current profile
    Me {
        #[command(flatten)]
        auth: TokenArg,
    },

    /// Update the current profile
    UpdateProfile {
        #[command(flatten)]
        auth: TokenArg,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },

    /// List products you created
    Products {
        #[command(flatten)]
        auth: TokenArg,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// Log out
    Logout {
        #[command(flatten)]
        auth: TokenArg,
    },
}

pub async fn run(command: AccountCommand, config: &Config) -> Result<()> {
    let client = storefront(config)?;

    match command {
        AccountCommand::Login { email, password } => {
            let token = client.login(&email, &password).await.map_err(session_hint)?;
            println!("{}", token.access_token);
        }
        AccountCommand::Register {
            email,
            password,
            username,
        } => {
            let mut user = NewUser::from_email(&email, &password);
            if let Some(username) = username {
                user.username = username;
            }
            let token = client.register(&user).await.context("registration failed")?;
            println!("{}", token.access_token);
        }
        AccountCommand::Me { auth } => {
            let user = client.me(&auth.token).await.map_err(session_hint)?;
            print_user(&user);
        }
        AccountCommand::UpdateProfile {
            auth,
            email,
            username,
            bio,
            link,
        } => {
            let update = UserUpdate {
                email,
                username,
                bio,
                personal_link: link,
                password: None,
            };
            let user = client
                .update_me(&auth.token, &update)
                .await
                .map_err(session_hint)?;
            print_user(&user);
        }
        AccountCommand::Products { auth, skip, limit } => {
            let products = client
                .user_products(&auth.token, skip, limit)
                .await
                .map_err(session_hint)?;
            if products.is_empty() {
                println!("{}", style("No products yet").dim());
            }
            for product in &products {
                print_product(product);
            }
        }
        AccountCommand::Logout { auth } => {
            let msg = client.logout(&auth.token).await.map_err(session_hint)?;
            println!("{}", msg.msg);
        }
    }

    Ok(())
}

fn session_hint(err: StorefrontError) -> anyhow::Error {
    match err {
        StorefrontError::SessionExpired { .. } => {
            anyhow::Error::new(err).context("your session has expired, log in again")
        }
        other => anyhow::Error::new(other),
    }
}

fn print_user(user: &User) {
    println!(
        "{} {}",
        style(user.username.as_deref().unwrap_or("(no username)")).bold(),
        style(&user.email).dim()
    );
    if let Some(bio) = &user.bio {
        println!("  {bio}");
    }
    if let Some(link) = &user.personal_link {
        println!("  {link}");
    }
    println!("  member since {}", user.created_at.format("%Y-%m-%d"));
}

pub(crate) fn print_product(product: &Product) {
    println!(
        "#{} {} {}",
        product.id,
        style(&product.product_type).bold(),
        style(&product.prompt).italic()
    );
    println!("  artwork: {}", product.generated_image_url);
    println!("  product: {}", product.product_image_url);
}
