use std::io;

use clap::Args;
use jiff::civil::Date;
use nab_market::{
    contact, display,
    preferences::Preferences,
    products::{Product, ProductId},
};
use nab_market_app::context::AppContext;

use super::{report, today_or_now, write_products};

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    /// Product id
    id: u32,

    /// Number of related products to list
    #[arg(long, default_value_t = 4)]
    related: usize,

    /// Show posted dates as of this day instead of today
    #[arg(long)]
    today: Option<Date>,
}

pub(crate) fn run(
    args: &ShowArgs,
    context: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let preferences = Preferences::load(&mut context.store);
    let today = today_or_now(args.today);
    let id = ProductId(args.id);

    let product = context.catalog.require(id).map_err(|error| report(&error))?;
    let related = context.catalog.related(id, args.related);

    write_detail(out, product, preferences.wishlist.contains(id), today)
        .and_then(|()| write_related(out, product, &related, &preferences, today))
        .map_err(|error| format!("failed to write product: {error}"))
}

fn write_related(
    out: &mut impl io::Write,
    product: &Product,
    related: &[&Product],
    preferences: &Preferences,
    today: Date,
) -> io::Result<()> {
    if related.is_empty() {
        return Ok(());
    }

    writeln!(out, "\nMore in {}", product.category.name())?;

    write_products(
        out,
        related,
        |other| preferences.wishlist.contains(other.id),
        today,
    )
}

fn write_detail(
    out: &mut impl io::Write,
    product: &Product,
    saved: bool,
    today: Date,
) -> io::Result<()> {
    let seller = &product.seller;

    writeln!(
        out,
        "{}{}",
        product.title,
        if saved { "  ♥ saved" } else { "" }
    )?;
    writeln!(out, "{}", display::format_aud(&product.price))?;
    writeln!(
        out,
        "{} · {}",
        product.condition.label(),
        product.condition.description()
    )?;
    writeln!(out, "{}", product.category.name())?;
    writeln!(out)?;
    writeln!(out, "{}", product.description)?;
    writeln!(out)?;

    if !product.tags.is_empty() {
        writeln!(out, "Tags: {}", product.tags)?;
    }

    writeln!(
        out,
        "Posted {} · {} views",
        display::posted_ago(product.posted_date, today),
        product.views
    )?;
    writeln!(out, "Photos: {}", product.images.len())?;
    writeln!(out)?;
    writeln!(
        out,
        "[{}] {} · {}",
        display::initials(&seller.name),
        seller.name,
        seller.department
    )?;
    writeln!(
        out,
        "{} · ★ {:.1} · replies {}",
        seller.location, seller.rating, seller.response_time
    )?;
    writeln!(out, "Contact: {}", contact::contact_seller(seller))
}
