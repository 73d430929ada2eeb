use std::{error::Error, io};

use clap::{Parser, Subcommand};
use jiff::{Zoned, civil::Date};
use nab_market::{display, products::Product};
use nab_market_app::{config::AppConfig, context::AppContext, observability};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

mod categories;
mod prefs;
mod query;
mod sell;
mod show;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "nab-market", about = "NAB Market CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter and sort the catalog
    Query(query::QueryArgs),

    /// Show one product with related listings
    Show(show::ShowArgs),

    /// List categories with product counts
    Categories,

    /// Manage saved products
    Wishlist(wishlist::WishlistCommand),

    /// Show or change preferences
    Prefs(prefs::PrefsCommand),

    /// Create and publish a listing
    Sell(sell::SellArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init(&self.config.logging).map_err(|error| report(&error))?;

        let mut context = AppContext::from_config(&self.config.market)
            .map_err(|error| report(&error))?;

        let mut out = io::stdout().lock();

        match self.command {
            Commands::Query(args) => query::run(&args, &mut context, &mut out),
            Commands::Show(args) => show::run(&args, &mut context, &mut out),
            Commands::Categories => categories::run(&mut context, &mut out),
            Commands::Wishlist(command) => wishlist::run(command, &mut context, &mut out),
            Commands::Prefs(command) => prefs::run(command, &mut context, &mut out),
            Commands::Sell(args) => sell::run(&args, &mut context, &mut out).await,
        }
    }
}

/// Error message followed by each of its sources.
fn report(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

fn today_or_now(today: Option<Date>) -> Date {
    today.unwrap_or_else(|| Zoned::now().date())
}

/// Render products as a table, one row per product.
fn write_products(
    out: &mut impl io::Write,
    products: &[&Product],
    saved: impl Fn(&Product) -> bool,
    today: Date,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record([
        "ID",
        "",
        "Title",
        "Condition",
        "Category",
        "Location",
        "Posted",
        "Views",
        "Price",
    ]);

    for &product in products {
        builder.push_record([
            product.id.to_string(),
            if saved(product) { "♥" } else { "" }.to_string(),
            display::truncate(&product.title, 40),
            product.condition.label().to_string(),
            product.category.name().to_string(),
            product.seller.location.clone(),
            display::posted_ago(product.posted_date, today),
            product.views.to_string(),
            display::format_aud(&product.price),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(7..9), Alignment::right());

    writeln!(out, "{table}")
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use nab_market::{catalog::Catalog, fixtures::FixtureError};
    use nab_market_app::context::AppInitError;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn report_joins_sources() {
        let error = AppInitError::Catalog(FixtureError::DuplicateProduct(3));

        assert_eq!(
            report(&error),
            "failed to load product catalog: Duplicate product id: 3"
        );
    }

    #[test]
    fn products_table_lists_each_product() -> TestResult {
        let catalog = Catalog::demo()?;
        let products: Vec<&Product> = catalog.iter().take(2).collect();

        let mut out = Vec::new();
        write_products(&mut out, &products, |product| product.id.0 == 2, date(2025, 6, 1))?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("MacBook Pro"));
        assert!(output.contains("IKEA Standing Desk"));
        assert!(output.contains("$2,800"));
        assert!(output.contains("4d ago"));
        assert_eq!(output.matches('♥').count(), 1);

        Ok(())
    }
}
