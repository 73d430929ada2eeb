use std::{fmt::Write as _, io};

use clap::{Args, Subcommand, ValueEnum};
use nab_market::{
    i18n::Language,
    preferences::{Preferences, Session},
    theme::{self, Theme, ThemeSink},
};
use nab_market_app::context::AppContext;
use tracing::info;

use super::report;

#[derive(Debug, Args)]
pub(crate) struct PrefsCommand {
    #[command(subcommand)]
    command: PrefsSubcommand,
}

#[derive(Debug, Subcommand)]
enum PrefsSubcommand {
    /// Print saved preferences
    Show,

    /// Set the colour theme
    Theme {
        /// light, dark or toggle
        #[arg(value_enum)]
        choice: ThemeChoice,
    },

    /// Set the interface language
    Language {
        /// en, vi or hi
        language: Language,
    },

    /// Remember who is signed in
    Login(LoginArgs),

    /// Forget the signed-in user
    Logout,

    /// Print the CSS custom properties of the current theme
    Palette,

    /// Remove every saved preference
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Teams handle
    #[arg(long)]
    teams_id: String,
}

pub(crate) fn run(
    command: PrefsCommand,
    context: &mut AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let mut preferences = Preferences::load(&mut context.store);

    let message = match command.command {
        PrefsSubcommand::Show => describe(&preferences, context),
        PrefsSubcommand::Palette => css(preferences.theme),
        PrefsSubcommand::Reset => {
            Preferences::clear(&mut context.store).map_err(|error| report(&error))?;
            info!("preferences reset");

            "preferences reset".to_string()
        }
        command => {
            let message = update(&mut preferences, command);

            preferences
                .save(&mut context.store)
                .map_err(|error| report(&error))?;
            info!(theme = %preferences.theme, language = %preferences.language, "preferences saved");

            message
        }
    };

    writeln!(out, "{message}").map_err(|error| format!("failed to write output: {error}"))
}

fn update(preferences: &mut Preferences, command: PrefsSubcommand) -> String {
    match command {
        PrefsSubcommand::Theme { choice } => {
            preferences.theme = match choice {
                ThemeChoice::Light => Theme::Light,
                ThemeChoice::Dark => Theme::Dark,
                ThemeChoice::Toggle => preferences.theme.toggled(),
            };

            format!("theme: {}", preferences.theme)
        }
        PrefsSubcommand::Language { language } => {
            preferences.language = language;

            format!("language: {}", language.native_name())
        }
        PrefsSubcommand::Login(LoginArgs { name, teams_id }) => {
            let message = format!("signed in as {name}");
            preferences.session = Some(Session { name, teams_id });

            message
        }
        PrefsSubcommand::Logout => {
            preferences.session = None;

            "signed out".to_string()
        }
        PrefsSubcommand::Show | PrefsSubcommand::Palette | PrefsSubcommand::Reset => String::new(),
    }
}

fn describe(preferences: &Preferences, context: &AppContext) -> String {
    let session = preferences.session.as_ref().map_or_else(
        || "signed out".to_string(),
        |session| format!("{} ({})", session.name, session.teams_id),
    );

    format!(
        "theme: {}\nlanguage: {} ({})\nsession: {session}\nwishlist: {} saved\nstore: {}",
        preferences.theme,
        preferences.language.native_name(),
        preferences.language.code(),
        preferences.wishlist.len(),
        context.store.path().display(),
    )
}

/// Collects a theme as a `:root` CSS block.
#[derive(Debug, Default)]
struct CssSink {
    dark: bool,
    properties: String,
    meta: String,
}

impl ThemeSink for CssSink {
    fn set_dark_class(&mut self, dark: bool) {
        self.dark = dark;
    }

    fn set_property(&mut self, name: &str, value: &str) {
        let _written = writeln!(self.properties, "  {name}: {value};");
    }

    fn set_meta_theme_color(&mut self, color: &str) {
        color.clone_into(&mut self.meta);
    }
}

fn css(current: Theme) -> String {
    let mut sink = CssSink::default();
    theme::apply(current, &mut sink);

    let selector = if sink.dark { ":root.dark" } else { ":root" };

    format!(
        "{selector} {{\n{}}}\n/* theme-color: {} */",
        sink.properties, sink.meta
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use nab_market_app::config::MarketConfig;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct PrefsCli {
        #[command(flatten)]
        command: PrefsCommand,
    }

    fn context(dir: &tempfile::TempDir) -> TestResult<AppContext> {
        Ok(AppContext::from_config(&MarketConfig {
            data_dir: dir.path().to_path_buf(),
            catalog: None,
            submit_delay_ms: 0,
            submit_timeout_ms: 1_000,
        })?)
    }

    fn exec(context: &mut AppContext, args: &[&str]) -> TestResult<String> {
        let cli = PrefsCli::try_parse_from(std::iter::once("prefs").chain(args.iter().copied()))?;

        let mut out = Vec::new();
        run(cli.command, context, &mut out).map_err(io::Error::other)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn theme_toggles_and_persists() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        assert_eq!(exec(&mut context, &["theme", "toggle"])?, "theme: dark\n");
        assert_eq!(Preferences::load(&mut context.store).theme, Theme::Dark);
        assert_eq!(exec(&mut context, &["theme", "toggle"])?, "theme: light\n");

        Ok(())
    }

    #[test]
    fn language_and_session_show_up() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        exec(&mut context, &["language", "vi"])?;
        exec(
            &mut context,
            &["login", "--name", "Jane Doe", "--teams-id", "jane.doe@nab.com.au"],
        )?;

        let shown = exec(&mut context, &["show"])?;

        assert!(shown.contains("language: Tiếng Việt (vi)"));
        assert!(shown.contains("session: Jane Doe (jane.doe@nab.com.au)"));

        exec(&mut context, &["logout"])?;

        assert!(exec(&mut context, &["show"])?.contains("session: signed out"));

        Ok(())
    }

    #[test]
    fn reset_restores_defaults() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        exec(&mut context, &["theme", "dark"])?;
        exec(&mut context, &["reset"])?;

        assert_eq!(Preferences::load(&mut context.store), Preferences::default());

        Ok(())
    }

    #[test]
    fn palette_prints_css_properties() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut context = context(&dir)?;

        exec(&mut context, &["theme", "dark"])?;

        let css = exec(&mut context, &["palette"])?;

        assert!(css.starts_with(":root.dark {\n"));
        assert!(css.contains("  color-scheme: dark;\n"));
        assert!(css.contains("/* theme-color: "));

        Ok(())
    }

    #[test]
    fn unsupported_language_is_rejected() {
        assert!(PrefsCli::try_parse_from(["prefs", "language", "fr"]).is_err());
    }
}
