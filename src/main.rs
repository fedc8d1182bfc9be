use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use scholarship_checkout::application::checkout::{CheckoutPage, SubmissionOutcome};
use scholarship_checkout::application::summary::SummaryView;
use scholarship_checkout::config::{Config, PUBLISHABLE_KEY_VAR, PublishableKey};
use scholarship_checkout::domain::applicant::Applicant;
use scholarship_checkout::domain::application::ApplicationForm;
use scholarship_checkout::domain::payment::CardDetails;
use scholarship_checkout::infrastructure::http::HttpBackend;
use scholarship_checkout::infrastructure::stripe::StripeProvider;
use scholarship_checkout::interfaces::console::{
    ConsoleNavigator, ConsoleNotifier, describe_blocker, describe_outcome, render_summary,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scholarship to apply for
    scholarship_id: String,

    /// Read configuration from this env file instead of `./.env`
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Applicant display name (from the session)
    #[arg(long, env = "CHECKOUT_USER_NAME")]
    user_name: String,

    /// Applicant email (from the session)
    #[arg(long, env = "CHECKOUT_USER_EMAIL")]
    user_email: String,

    /// Applicant id (from the session)
    #[arg(long, env = "CHECKOUT_USER_ID")]
    user_id: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    address: String,

    /// Secondary school result
    #[arg(long, default_value = "")]
    ssc_result: String,

    /// Higher secondary school result
    #[arg(long, default_value = "")]
    hsc_result: String,

    #[arg(long)]
    study_gap: Option<String>,

    /// Card number. Without it only the order summary is shown.
    #[arg(long, requires_all = ["exp_month", "exp_year", "cvc"])]
    card_number: Option<String>,

    #[arg(long)]
    exp_month: Option<u8>,

    #[arg(long)]
    exp_year: Option<u16>,

    #[arg(long)]
    cvc: Option<String>,
}

impl Cli {
    fn form(&self) -> ApplicationForm {
        ApplicationForm {
            phone: self.phone.clone(),
            address: self.address.clone(),
            ssc_result: self.ssc_result.clone(),
            hsc_result: self.hsc_result.clone(),
            study_gap: self.study_gap.clone(),
        }
    }

    fn card(&self) -> Option<CardDetails> {
        Some(CardDetails {
            number: self.card_number.clone()?,
            exp_month: self.exp_month?,
            exp_year: self.exp_year?,
            cvc: self.cvc.clone()?,
        })
    }
}

fn load_config(env_file: Option<&PathBuf>) -> Result<Config> {
    match env_file {
        Some(path) => Config::from_env_and_file(path).into_diagnostic(),
        None => {
            match dotenvy::dotenv() {
                Ok(p) => tracing::info!(path = %p.display(), "Loaded .env file"),
                Err(e) => tracing::debug!("No .env file loaded: {e}"),
            };
            Ok(Config::from_env())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.env_file.as_ref())?;

    if config.publishable_key.is_placeholder() {
        tracing::warn!(
            "{PUBLISHABLE_KEY_VAR} is not set, using placeholder key '{}'. \
             Card payments are disabled.",
            PublishableKey::PLACEHOLDER
        );
    }

    let applicant = Applicant::new(&cli.user_name, &cli.user_email, &cli.user_id);
    let backend = HttpBackend::new(&config.api_base_url, config.api_token.clone());
    let provider = StripeProvider::new(&config.provider_base_url, config.publishable_key.clone());

    let mut page = CheckoutPage::new(
        applicant,
        Box::new(backend),
        Box::new(provider),
        Box::new(ConsoleNavigator),
        Box::new(ConsoleNotifier),
    );

    println!("{}", render_summary(&SummaryView::Loading));
    let view = page.load(&cli.scholarship_id).await;
    println!("{}", render_summary(view));
    if let SummaryView::Failed(reason) = view {
        return Err(miette!("{reason}"));
    }

    let Some(card) = cli.card() else {
        match page.submit_blocker() {
            None => println!("Ready to pay."),
            Some(blocked) => println!("Payment unavailable: {}.", describe_blocker(blocked)),
        }
        return Ok(());
    };

    let outcome = page.submit(&cli.form(), &card).await;
    match outcome {
        SubmissionOutcome::Paid { .. } => Ok(()),
        other => Err(miette!("{}", describe_outcome(&other))),
    }
}
