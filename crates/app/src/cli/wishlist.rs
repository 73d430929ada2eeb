use std::io;

use clap::{Args, Subcommand};
use jiff::civil::Date;
use nab_market::{
    preferences::Preferences,
    products::ProductId,
    query::{ListingFilters, SortOrder},
};
use nab_market_app::context::AppContext;
use tracing::info;

use super::{report, today_or_now, write_products};

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// List saved products
    List(ListArgs),

    /// Save a product
    Add(IdArgs),

    /// Remove saved products
    Remove(RemoveArgs),

    /// Save a product, or remove it if already saved
    Toggle(IdArgs),

    /// Remove every saved product
    Clear,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Sort order; newest and oldest follow the date saved
    #[arg(long, default_value_t = SortOrder::Newest)]
    sort: SortOrder,

    /// Only show saved products matching this text
    #[arg(short, long)]
    search: Option<String>,

    /// Show posted dates as of this day instead of today
    #[arg(long)]
    today: Option<Date>,
}

#[derive(Debug, Args)]
struct IdArgs {
    /// Product id
    id: u32,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Product ids
    #[arg(required = true)]
    ids: Vec<u32>,
}

pub(crate) fn run(
    command: WishlistCommand,
    context: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let mut preferences = Preferences::load(&mut context.store);

    let message = match command.command {
        WishlistSubcommand::List(args) => {
            return list(&args, context, &preferences, out);
        }
        WishlistSubcommand::Add(IdArgs { id }) => {
            let product = context
                .catalog
                .require(ProductId(id))
                .map_err(|error| report(&error))?;

            if preferences
                .wishlist
                .add(product.id)
                .map_err(|error| report(&error))?
            {
                format!("saved {}", product.title)
            } else {
                format!("{} is already saved", product.title)
            }
        }
        WishlistSubcommand::Remove(RemoveArgs { ids }) => {
            let ids: Vec<ProductId> = ids.into_iter().map(ProductId).collect();
            let removed = preferences.wishlist.remove_many(&ids);

            format!("removed {removed} of {}", ids.len())
        }
        WishlistSubcommand::Toggle(IdArgs { id }) => {
            let product = context
                .catalog
                .require(ProductId(id))
                .map_err(|error| report(&error))?;

            if preferences
                .wishlist
                .toggle(product.id)
                .map_err(|error| report(&error))?
            {
                format!("saved {}", product.title)
            } else {
                format!("removed {}", product.title)
            }
        }
        WishlistSubcommand::Clear => {
            let ids = preferences.wishlist.ids().to_vec();
            let removed = preferences.wishlist.remove_many(&ids);

            format!("removed {removed}")
        }
    };

    preferences
        .save(&mut context.store)
        .map_err(|error| report(&error))?;

    info!(saved = preferences.wishlist.len(), "wishlist updated");

    writeln!(out, "{message}").map_err(|error| format!("failed to write output: {error}"))
}

fn list(
    args: &ListArgs,
    context: &AppContext,
    preferences: &Preferences,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let today = today_or_now(args.today);

    let mut filters = ListingFilters::new();
    if let Some(search) = &args.search {
        filters.set_search(search);
    }

    let products = preferences
        .wishlist
        .products(&context.catalog, &filters, args.sort, today);

    let heading = context.translations.text(preferences.language, "wishlist");

    writeln!(out, "{heading} ({})", products.len())
        .and_then(|()| {
            if products.is_empty() {
                Ok(())
            } else {
                write_products(out, &products, |_product| true, today)
            }
        })
        .map_err(|error| format!("failed to write wishlist: {error}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use nab_market::preferences::PreferencesStore;
    use nab_market_app::config::MarketConfig;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct WishlistCli {
        #[command(flatten)]
        command: WishlistCommand,
    }

    fn context(dir: &tempfile::TempDir) -> TestResult<AppContext> {
        Ok(AppContext::from_config(&MarketConfig {
            data_dir: dir.path().to_path_buf(),
            catalog: None,
            submit_delay_ms: 0,
            submit_timeout_ms: 1_000,
        })?)
    }

    fn try_exec(context: &mut AppContext, args: &[&str]) -> TestResult<Result<String, String>> {
        let cli =
            WishlistCli::try_parse_from(std::iter::once("wishlist").chain(args.iter().copied()))?;

        let mut out = Vec::new();
        let result = run(cli.command, context, &mut out);

        Ok(match result {
            Ok(()) => Ok(String::from_utf8(out)?),
            Err(error) => Err(error),
        })
    }

    fn exec(context: &mut AppContext, args: &[&str]) -> TestResult<String> {
        Ok(try_exec(context, args)?.map_err(io::Error::other)?)
    }

    #[test]
    fn add_toggle_and_remove() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        assert_eq!(exec(&mut context, &["add", "2"])?, "saved IKEA Standing Desk\n");
        assert_eq!(
            exec(&mut context, &["add", "2"])?,
            "IKEA Standing Desk is already saved\n"
        );

        exec(&mut context, &["toggle", "3"])?;

        assert_eq!(Preferences::load(&mut context.store).wishlist.len(), 2);

        assert_eq!(exec(&mut context, &["remove", "2", "7"])?, "removed 1 of 2\n");
        assert_eq!(
            Preferences::load(&mut context.store).wishlist.ids(),
            &[ProductId(3)]
        );

        Ok(())
    }

    #[test]
    fn unknown_products_cannot_be_saved() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        let result = try_exec(&mut context, &["add", "404"])?;

        assert!(result.is_err_and(|error| error.contains("404")));
        assert_eq!(context.store.get("nab-wishlist")?, None);

        Ok(())
    }

    #[test]
    fn list_shows_saved_products() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        exec(&mut context, &["add", "1"])?;
        exec(&mut context, &["add", "5"])?;

        let output = exec(
            &mut context,
            &["list", "--sort", "price-low", "--today", "2025-06-01"],
        )?;

        assert!(output.starts_with("Wishlist (2)"));

        let books = output
            .find("Programming Books")
            .ok_or_else(|| io::Error::other("missing books"))?;
        let macbook = output
            .find("MacBook")
            .ok_or_else(|| io::Error::other("missing macbook"))?;

        assert!(books < macbook);

        exec(&mut context, &["clear"])?;

        assert_eq!(exec(&mut context, &["list"])?, "Wishlist (0)\n");

        Ok(())
    }

    #[test]
    fn list_orders_by_date_saved_and_searches() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        exec(&mut context, &["add", "8"])?;
        exec(&mut context, &["add", "2"])?;
        exec(&mut context, &["add", "5"])?;

        let position = |output: &str, title: &str| {
            output
                .find(title)
                .ok_or_else(|| io::Error::other(format!("missing {title}")))
        };

        let newest = exec(&mut context, &["list", "--today", "2025-06-01"])?;

        assert!(position(&newest, "Programming Books")? < position(&newest, "IKEA")?);
        assert!(position(&newest, "IKEA")? < position(&newest, "iPhone")?);

        let oldest = exec(
            &mut context,
            &["list", "--sort", "oldest", "--today", "2025-06-01"],
        )?;

        assert!(position(&oldest, "iPhone")? < position(&oldest, "IKEA")?);

        let searched = exec(
            &mut context,
            &["list", "--search", "iphone", "--today", "2025-06-01"],
        )?;

        assert!(searched.starts_with("Wishlist (1)"));
        assert!(searched.contains("iPhone 15 Pro"));

        Ok(())
    }
}
