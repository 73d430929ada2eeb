use std::io;

use nab_market::{catalog::CategorySummary, i18n::Translations, preferences::Preferences};
use nab_market_app::context::AppContext;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

pub(crate) fn run(context: &mut AppContext, out: &mut impl io::Write) -> Result<(), String> {
    let preferences = Preferences::load(&mut context.store);
    let summaries = context.catalog.category_summaries();

    write_categories(out, &summaries, &context.translations, &preferences)
        .map_err(|error| format!("failed to write categories: {error}"))
}

fn write_categories(
    out: &mut impl io::Write,
    summaries: &[CategorySummary],
    translations: &Translations,
    preferences: &Preferences,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Subcategories", "Products"]);

    for summary in summaries {
        let category = summary.category;
        let name = category.translation_key().map_or_else(
            || category.name().to_string(),
            |key| translations.text(preferences.language, key),
        );

        builder.push_record([
            category.id().to_string(),
            name,
            category.subcategories().join(", "),
            summary.count.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")
}
