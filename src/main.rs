use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use vsl_funnel::config::{CliConfig, Command, LogFormat};
use vsl_funnel::utils::{logger, validation::Validate};
use vsl_funnel::web::{self, ConfirmationView, View};
use vsl_funnel::{
    CaptureForm, CapitalBand, FunnelConfig, FunnelError, HeadlessBrowser, LandingPage, LeadField,
    LeadSubmissionClient, SupabaseStore, ThumbnailResolver,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting vsl-funnel");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> vsl_funnel::Result<()> {
    let config = FunnelConfig::from_file(&cli.config)?;
    config.validate()?;
    tracing::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Check => {
            println!("✅ Configuration is valid");
            println!("   store:        {}/rest/v1/{}", config.store.url, config.store.table);
            println!("   video:        {:?}", config.video);
            println!("   form:         {:?}", config.form.variant);
            println!("   reveal:       {:?}", config.reveal);
            println!("   confirmation: {:?}", config.confirmation);
            Ok(())
        }
        Command::Submit {
            name,
            email,
            phone,
            capital,
        } => submit(&config, name, email, phone, capital).await,
        Command::Render { output } => render(&config, &output).await,
    }
}

async fn submit(
    config: &FunnelConfig,
    name: String,
    email: String,
    phone: String,
    capital: Option<CapitalBand>,
) -> vsl_funnel::Result<()> {
    let client = LeadSubmissionClient::new(SupabaseStore::new(&config.store)?);

    let mut form = CaptureForm::new(config.form.variant);
    form.update_field(LeadField::Name, name);
    form.update_field(LeadField::Email, email);
    form.update_field(LeadField::Phone, phone);
    if let Some(band) = capital {
        form.select_capital_band(band);
    }

    let Some(lead) = form.begin_submit() else {
        return Err(FunnelError::ValidationError {
            message: form.error_message().unwrap_or_default().to_string(),
        });
    };

    let outcome = client.submit(&lead).await;
    let error = outcome.as_ref().err().cloned();
    if form.finish_submit(outcome) {
        println!("✅ Lead submitted");
        if let Some((url, _)) = config.confirmation.redirect() {
            println!("➡️  Next step: {}", url);
        }
        return Ok(());
    }

    match error {
        Some(e) => Err(e.into()),
        None => Err(FunnelError::ConfigError {
            message: format!("Submission ended in unexpected state {:?}", form.state()),
        }),
    }
}

async fn render(config: &FunnelConfig, output: &std::path::Path) -> vsl_funnel::Result<()> {
    let resolver = ThumbnailResolver::new(Duration::from_secs(config.store.timeout_seconds))?;
    let thumbnail = resolver.resolve(&config.video).await;

    let client = Arc::new(LeadSubmissionClient::new(SupabaseStore::new(&config.store)?));
    let mut page = LandingPage::new(
        config.page_settings(thumbnail),
        client,
        HeadlessBrowser::default(),
    );

    let mut snapshots = web::landing_snapshots(&mut page);
    snapshots.push((
        "obrigado.html",
        View::Confirmation(ConfirmationView::from_policy(&config.confirmation)),
    ));

    tokio::fs::create_dir_all(output).await?;
    for (name, view) in &snapshots {
        let path = output.join(name);
        tokio::fs::write(&path, web::render(view)).await?;
        println!("Wrote {}", path.display());
    }
    println!("ℹ️  These are static previews of each page state; the live page needs the event runtime.");
    Ok(())
}
