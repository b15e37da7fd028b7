use std::path::PathBuf;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Subcommand;
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use fashionai_common::{Config, ProductType, STYLES};
use fashionai_studio::studio::IMAGES_PER_PROMPT;
use fashionai_studio::{GenerationRequest, ProductCatalog, Studio, StudioError, TemplateStatus};

use super::TokenArg;
use crate::cmd::account::print_product;

#[derive(Subcommand, Debug)]
pub enum StudioCommand {
    /// Show which product types can be rendered
    Catalog,

    /// Generate candidate artwork and save it to disk
    Generate {
        #[arg(long)]
        prompt: String,
        /// One of the studio styles, or any free-form style
        #[arg(long)]
        style: String,
        #[arg(long, default_value_t = IMAGES_PER_PROMPT)]
        count: usize,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Put artwork on a product mockup, optionally publishing it
    Create {
        /// T-Shirt, Hoodie, Wall Art, Mug, Sweatshirt, Pillow or Tote Bag
        #[arg(long)]
        product_type: ProductType,
        /// Artwork to use (PNG)
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        style: String,
        /// Name recorded in the render metadata
        #[arg(long, default_value = "currentUser")]
        user: String,
        /// Publish the finished product to the marketplace
        #[arg(long, requires = "token")]
        publish: bool,
        #[arg(long, env = "FASHIONAI_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

pub async fn run(command: StudioCommand, config: &Config) -> Result<()> {
    match command {
        StudioCommand::Catalog => {
            let catalog = match &config.product_catalog_path {
                Some(path) => ProductCatalog::from_json_file(path)?,
                None => ProductCatalog::builtin().as_ref().clone(),
            };
            print_catalog(&catalog);
            Ok(())
        }
        StudioCommand::Generate {
            prompt,
            style: image_style,
            count,
            out_dir,
        } => {
            if !STYLES.contains(&image_style.as_str()) {
                warn!(style = %image_style, "Not one of the studio styles, sending as-is");
            }
            let studio = Studio::from_config(config)?;
            let images = studio.generate_images(&prompt, &image_style, count).await?;

            tokio::fs::create_dir_all(&out_dir)
                .await
                .with_context(|| format!("creating {}", out_dir.display()))?;
            for (i, image) in images.iter().enumerate() {
                let path = out_dir.join(format!("generated-{}.png", i + 1));
                tokio::fs::write(&path, image)
                    .await
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("{}", path.display());
            }
            Ok(())
        }
        StudioCommand::Create {
            product_type,
            image,
            prompt,
            style: image_style,
            user,
            publish,
            token,
        } => {
            let source_image = tokio::fs::read(&image)
                .await
                .with_context(|| format!("reading {}", image.display()))?;
            let request = GenerationRequest {
                prompt,
                style: image_style,
                source_image: Bytes::from(source_image),
            };

            let studio = Studio::from_config(config)?;
            let cancel = cancel_on_ctrl_c();

            let output = studio
                .create_product(product_type, &request, &user, &cancel)
                .await
                .map_err(explain)?;
            for url in &output.product_image_urls {
                println!("{url}");
            }

            if publish {
                let auth = TokenArg {
                    token: token.context("--publish needs a token")?,
                };
                let product = studio
                    .publish(&auth.session(), product_type, &request.prompt, &output)
                    .await
                    .map_err(explain)?;
                println!("{}", style("Published to the marketplace").green());
                print_product(&product);
            }
            Ok(())
        }
    }
}

/// Cancel the returned token on Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling");
            trigger.cancel();
        }
    });
    cancel
}

fn explain(err: StudioError) -> anyhow::Error {
    let hint = match &err {
        StudioError::SessionExpired => "log in again and retry with the new token",
        StudioError::Pipeline(_) => "nothing was published; re-run the command to start over",
        _ => "nothing was published",
    };
    anyhow::Error::new(err).context(hint)
}

fn print_catalog(catalog: &ProductCatalog) {
    for product_type in ProductType::ALL {
        match catalog.status(product_type) {
            Some(TemplateStatus::Ready(template)) => println!(
                "{:<11} {} mockup={} slot={}",
                product_type.label(),
                style("ready").green(),
                template.mockup_id,
                template.smart_object_id
            ),
            Some(TemplateStatus::Unimplemented { .. }) => println!(
                "{:<11} {}",
                product_type.label(),
                style("missing template").yellow()
            ),
            None => println!("{:<11} {}", product_type.label(), style("not listed").dim()),
        }
    }
}
