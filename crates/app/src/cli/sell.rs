use std::{
    fs,
    future::Future,
    io,
    path::{Path, PathBuf},
};

use clap::Args;
use nab_market::{
    categories::Category,
    conditions::Condition,
    display,
    i18n::{Language, Translations},
    listings::{ImageUpload, Listing, ListingStep, ListingWizard, WizardError},
    preferences::Preferences,
};
use nab_market_app::{
    context::AppContext,
    seller::{SellerController, SubmitError},
};
use tracing::warn;

use super::{
    query::{parse_category, parse_condition},
    report,
};

#[derive(Debug, Args)]
pub(crate) struct SellArgs {
    /// Listing title
    #[arg(long, default_value = "")]
    title: String,

    /// Listing description
    #[arg(long, default_value = "")]
    description: String,

    /// Category id (electronics, furniture, clothing, books, sports, home)
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,

    /// Condition (like new, excellent, very good, good, fair)
    #[arg(long, value_parser = parse_condition)]
    condition: Option<Condition>,

    /// Photo file; repeat for up to five
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Asking price in dollars
    #[arg(long, default_value = "")]
    price: String,

    /// Open to exchange offers
    #[arg(long)]
    exchange: bool,

    /// What you would take in exchange
    #[arg(long, default_value = "")]
    exchange_for: String,

    /// Pickup location
    #[arg(long, default_value = "")]
    location: String,

    /// Tag; repeat for up to ten
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Accept the marketplace terms and conditions
    #[arg(long)]
    accept_terms: bool,
}

pub(crate) async fn run(
    args: &SellArgs,
    context: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let language = Preferences::load(&mut context.store).language;
    let mut controller = context.seller();

    let skipped = fill_draft(args, controller.wizard_mut()).map_err(|error| report(&error))?;

    write_lines(out, &skipped)?;

    walk_to_review(controller.wizard_mut(), out)?;

    let listing = controller
        .wizard()
        .draft()
        .to_listing()
        .map_err(|error| report(&error))?;

    write_review(out, &listing).map_err(|error| format!("failed to write review: {error}"))?;

    controller
        .wizard_mut()
        .accept_terms(args.accept_terms)
        .map_err(|error| report(&error))?;

    publish(
        &mut controller,
        &context.translations,
        language,
        interrupted(),
        out,
    )
    .await
}

/// Copy arguments into the draft. Returns a note for each image or tag that was skipped.
fn fill_draft(
    args: &SellArgs,
    wizard: &mut ListingWizard,
) -> Result<Vec<String>, WizardError> {
    let draft = wizard.draft_mut()?;
    let mut skipped = Vec::new();

    draft.set_title(&args.title);
    draft.set_description(&args.description);
    draft.set_category(args.category);
    draft.set_condition(args.condition);
    draft.set_price(&args.price);
    draft.set_exchange(args.exchange);
    draft.set_exchange_for(&args.exchange_for);
    draft.set_location(&args.location);

    for path in &args.images {
        let result = upload(path).and_then(|upload| {
            draft
                .add_image(upload)
                .map_err(|error| error.to_string())
        });

        if let Err(reason) = result {
            warn!(path = %path.display(), %reason, "skipping image");
            skipped.push(format!("skipped {}: {reason}", path.display()));
        }
    }

    for tag in &args.tags {
        if let Err(error) = draft.add_tag(tag) {
            warn!(%tag, %error, "skipping tag");
            skipped.push(format!("skipped tag {tag}: {error}"));
        }
    }

    Ok(skipped)
}

fn upload(path: &Path) -> Result<ImageUpload, String> {
    let metadata = fs::metadata(path).map_err(|error| error.to_string())?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ImageUpload::from_file_name(name, metadata.len()))
}

fn walk_to_review(wizard: &mut ListingWizard, out: &mut impl io::Write) -> Result<(), String> {
    while wizard.step() != ListingStep::Review {
        let step = wizard.step();

        wizard.next().map_err(|error| report(&error))?;

        writeln!(
            out,
            "✓ {}/{} {}",
            step.number(),
            ListingStep::ALL.len(),
            step.label()
        )
        .map_err(|error| format!("failed to write output: {error}"))?;
    }

    Ok(())
}

fn write_review(out: &mut impl io::Write, listing: &Listing) -> io::Result<()> {
    let price = listing
        .price
        .as_ref()
        .map_or_else(|| "Exchange only".to_string(), display::format_aud);

    writeln!(out)?;
    writeln!(out, "{}", listing.title)?;
    writeln!(out, "{price}")?;
    writeln!(
        out,
        "{} · {} · {}",
        listing.condition.label(),
        listing.category.name(),
        listing.location
    )?;

    if let Some(exchange_for) = &listing.exchange_for {
        writeln!(out, "Exchange for: {exchange_for}")?;
    }

    if !listing.tags.is_empty() {
        writeln!(out, "Tags: {}", listing.tags)?;
    }

    writeln!(out, "Photos: {}", listing.images.len())?;
    writeln!(out)
}

/// Submit the listing and print the outcome in `language`.
async fn publish<C>(
    controller: &mut SellerController,
    translations: &Translations,
    language: Language,
    cancel: C,
    out: &mut impl io::Write,
) -> Result<(), String>
where
    C: Future<Output = ()>,
{
    match controller.submit_until(cancel).await {
        Ok(uuid) => {
            let message = translations.text(language, "listingCreatedSuccess");

            writeln!(out, "{message}\nlisting id: {uuid}")
                .map_err(|error| format!("failed to write output: {error}"))
        }
        Err(SubmitError::Cancelled) => Err("submission cancelled".to_string()),
        Err(error @ (SubmitError::Failed(_) | SubmitError::TimedOut(_))) => {
            let reason = error.to_string();

            Err(translations.translate(language, "listingSubmitFailed", &[("reason", &reason)]))
        }
        Err(error) => Err(report(&error)),
    }
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn interrupted() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "cannot listen for interrupts");
        std::future::pending::<()>().await;
    }
}

fn write_lines(out: &mut impl io::Write, lines: &[String]) -> Result<(), String> {
    lines
        .iter()
        .try_for_each(|line| writeln!(out, "{line}"))
        .map_err(|error| format!("failed to write output: {error}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use nab_market::listings::WizardPhase;
    use nab_market_app::config::MarketConfig;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct SellCli {
        #[command(flatten)]
        args: SellArgs,
    }

    fn context_with_delay(dir: &tempfile::TempDir, delay_ms: u64) -> TestResult<AppContext> {
        Ok(AppContext::from_config(&MarketConfig {
            data_dir: dir.path().to_path_buf(),
            catalog: None,
            submit_delay_ms: delay_ms,
            submit_timeout_ms: delay_ms + 60_000,
        })?)
    }

    fn context(dir: &tempfile::TempDir) -> TestResult<AppContext> {
        context_with_delay(dir, 0)
    }

    fn photo(dir: &tempfile::TempDir, name: &str) -> TestResult<String> {
        let path = dir.path().join(name);
        fs::write(&path, [0_u8; 64])?;

        Ok(path.display().to_string())
    }

    fn parse(args: &[&str]) -> Result<SellArgs, clap::Error> {
        SellCli::try_parse_from(std::iter::once("sell").chain(args.iter().copied()))
            .map(|cli| cli.args)
    }

    #[tokio::test]
    async fn publishes_a_complete_listing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;
        let image = photo(&dir, "desk.jpg")?;

        let args = parse(&[
            "--title",
            "Standing Desk",
            "--description",
            "Electric, two motors",
            "--category",
            "furniture",
            "--condition",
            "excellent",
            "--image",
            &image,
            "--price",
            "350",
            "--location",
            "Sydney",
            "--tag",
            "Desk",
            "--accept-terms",
        ])?;

        let mut out = Vec::new();
        run(&args, &mut context, &mut out)
            .await
            .map_err(io::Error::other)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("✓ 1/4 Basic Info"));
        assert!(output.contains("✓ 3/4 Pricing"));
        assert!(output.contains("$350"));
        assert!(output.contains("Tags: desk"));
        assert!(output.contains("Listing created successfully!"));
        assert!(output.contains("listing id: "));

        Ok(())
    }

    #[tokio::test]
    async fn stops_at_the_first_incomplete_step() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        let args = parse(&[
            "--title",
            "Standing Desk",
            "--description",
            "Electric",
            "--category",
            "furniture",
            "--condition",
            "good",
            "--price",
            "350",
            "--location",
            "Sydney",
            "--accept-terms",
        ])?;

        let mut out = Vec::new();
        let result = run(&args, &mut context, &mut out).await;

        assert_eq!(
            result,
            Err(WizardError::StepIncomplete(ListingStep::Images).to_string())
        );

        Ok(())
    }

    #[test]
    fn unsupported_images_are_skipped() -> TestResult {
        let dir = tempfile::tempdir()?;
        let context = context(&dir)?;
        let notes = photo(&dir, "notes.txt")?;
        let image = photo(&dir, "bike.png")?;

        let args = parse(&[
            "--title",
            "Mountain Bike",
            "--description",
            "Trek",
            "--category",
            "sports",
            "--condition",
            "very good",
            "--image",
            &notes,
            "--image",
            &image,
            "--exchange",
            "--exchange-for",
            "Road bike",
            "--location",
            "Perth",
        ])?;

        let mut controller = context.seller();
        let skipped = fill_draft(&args, controller.wizard_mut())?;

        assert_eq!(skipped.len(), 1);
        assert!(skipped.iter().all(|note| note.contains("notes.txt")));
        assert_eq!(controller.wizard().draft().image_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn terms_are_required() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;
        let image = photo(&dir, "books.webp")?;

        let args = parse(&[
            "--title",
            "Programming Books",
            "--description",
            "Fifteen books",
            "--category",
            "books",
            "--condition",
            "good",
            "--image",
            &image,
            "--price",
            "120",
            "--location",
            "Melbourne",
        ])?;

        let mut out = Vec::new();
        let result = run(&args, &mut context, &mut out).await;

        assert_eq!(result, Err(WizardError::TermsNotAccepted.to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_submission_keeps_the_draft() -> TestResult {
        let dir = tempfile::tempdir()?;
        let context = context_with_delay(&dir, 60_000)?;
        let mut controller = context.seller();

        {
            let wizard = controller.wizard_mut();
            let draft = wizard.draft_mut()?;
            draft.set_title("Dining Table");
            draft.set_description("Solid wood");
            draft.set_category(Some(Category::Furniture));
            draft.set_condition(Some(Condition::Good));
            draft.add_image(ImageUpload::new("table.jpg", "image/jpeg", 1_024))?;
            draft.set_price("520");
            draft.set_location("Adelaide");
        }

        let mut out = Vec::new();
        walk_to_review(controller.wizard_mut(), &mut out).map_err(io::Error::other)?;
        controller.wizard_mut().accept_terms(true)?;

        let result = publish(
            &mut controller,
            &context.translations,
            Language::En,
            std::future::ready(()),
            &mut out,
        )
        .await;

        assert_eq!(result, Err("submission cancelled".to_string()));
        assert_eq!(
            controller.wizard().phase(),
            WizardPhase::Editing(ListingStep::Review)
        );

        Ok(())
    }
}
