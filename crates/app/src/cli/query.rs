use std::io;

use clap::Args;
use jiff::civil::Date;
use nab_market::{
    categories::Category,
    conditions::Condition,
    i18n::Language,
    limits::DEFAULT_MAX_PRICE,
    preferences::Preferences,
    products::Product,
    query::{self, DatePosted, ListingFilters, PriceRange, SortOrder},
};
use nab_market_app::context::AppContext;
use tracing::debug;

use super::{today_or_now, write_products};

#[derive(Debug, Args)]
pub(crate) struct QueryArgs {
    /// Category id (electronics, furniture, clothing, books, sports, home)
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,

    /// Lowest price in whole dollars
    #[arg(long)]
    min_price: Option<i64>,

    /// Highest price in whole dollars
    #[arg(long)]
    max_price: Option<i64>,

    /// Condition; repeat to match any of several
    #[arg(long = "condition", value_parser = parse_condition)]
    conditions: Vec<Condition>,

    /// Seller location; repeat to match any of several
    #[arg(long = "location")]
    locations: Vec<String>,

    /// Posted within: today, this-week, this-month or anytime
    #[arg(long)]
    posted: Option<DatePosted>,

    /// Text matched against title, description, seller and tags
    #[arg(short, long)]
    search: Option<String>,

    /// Sort order
    #[arg(long, default_value_t = SortOrder::Newest)]
    sort: SortOrder,

    /// Only featured products
    #[arg(long)]
    featured: bool,

    /// Evaluate posted dates as of this day instead of today
    #[arg(long)]
    today: Option<Date>,

    /// Language of headings; defaults to the saved preference
    #[arg(long)]
    lang: Option<Language>,
}

impl QueryArgs {
    fn filters(&self) -> ListingFilters {
        let mut filters = ListingFilters::new();

        if let Some(category) = self.category {
            filters.select_category(category);
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            filters.set_price_range(PriceRange::dollars(
                self.min_price.unwrap_or(0),
                self.max_price.unwrap_or(DEFAULT_MAX_PRICE),
            ));
        }

        filters.conditions.extend(self.conditions.iter().copied());
        filters.locations.extend(self.locations.iter().cloned());

        if let Some(bucket) = self.posted {
            filters.set_date_posted(bucket);
        }

        if let Some(search) = &self.search {
            filters.set_search(search);
        }

        filters
    }
}

pub(crate) fn parse_category(value: &str) -> Result<Category, String> {
    match Category::parse(value) {
        Category::Unknown => Err(format!("unknown category: {value}")),
        category => Ok(category),
    }
}

pub(crate) fn parse_condition(value: &str) -> Result<Condition, String> {
    match Condition::parse(value) {
        Condition::Unknown => Err(format!("unknown condition: {value}")),
        condition => Ok(condition),
    }
}

pub(crate) fn run(
    args: &QueryArgs,
    context: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let preferences = Preferences::load(&mut context.store);
    let language = args.lang.unwrap_or(preferences.language);
    let today = today_or_now(args.today);
    let filters = args.filters();

    debug!(
        active = filters.active_count(),
        sort = %args.sort,
        %today,
        "running listing query"
    );

    let results = match (args.featured, args.today) {
        (true, _) => query::compose_iter(context.catalog.featured(), &filters, args.sort, today),
        (false, Some(day)) => query::compose(&context.catalog, &filters, args.sort, day),
        (false, None) => query::compose_now(&context.catalog, &filters, args.sort),
    };

    write_results(out, context, language, &results, &preferences, today)
        .map_err(|error| format!("failed to write results: {error}"))
}

fn write_results(
    out: &mut impl io::Write,
    context: &AppContext,
    language: Language,
    results: &[&Product],
    preferences: &Preferences,
    today: Date,
) -> io::Result<()> {
    let count = results.len().to_string();
    let heading = context
        .translations
        .translate(language, "resultsFound", &[("count", &count)]);

    writeln!(out, "{heading}")?;

    if results.is_empty() {
        return Ok(());
    }

    write_products(
        out,
        results,
        |product| preferences.wishlist.contains(product.id),
        today,
    )
}
