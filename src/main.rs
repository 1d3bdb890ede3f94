//! purchase-costs CLI
//!
//! Recalculate derived cost fields for the purchase and sale item forms.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use purchase_costs::config::{AppConfig, load_config};
use purchase_costs::form::{CostController, FormState};
use purchase_costs::report::{CalcReport, format_calc, format_session};
use purchase_costs::session::{Session, replay};
use purchase_costs::tui::run::run;
use purchase_costs::tui::state::App;
use purchase_costs::types::{FieldId, FormKind, OutputFormat};

/// Log filter used when neither RUST_LOG nor the config sets one.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "purchase-costs")]
#[command(about = "Recalculate derived cost fields for purchase forms")]
#[command(version)]
struct Cli {
    /// Config file (default: user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recalculate once from the given field values
    Calc {
        /// Which form's rules to apply
        #[arg(long, value_enum)]
        form: Option<FormKindArg>,

        #[command(flatten)]
        values: FieldArgs,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormatArg>,
    },

    /// Replay a recorded input session
    Replay {
        /// Session file (JSON)
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormatArg>,
    },

    /// Edit a form interactively
    Form {
        /// Which form to open
        #[arg(long, value_enum)]
        form: Option<FormKindArg>,
    },

    /// Show the field contract of a form
    Fields {
        /// Which form to describe
        #[arg(long, value_enum)]
        form: Option<FormKindArg>,
    },
}

/// Raw field text; parsed leniently, so anything is accepted.
#[derive(clap::Args)]
struct FieldArgs {
    #[arg(long, allow_hyphen_values = true)]
    box_quantity: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    packages_per_box: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    items_per_package: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    cost_per_box: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    cost_per_package: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    cost_per_item: Option<String>,
}

impl FieldArgs {
    fn into_values(self) -> Vec<(FieldId, String)> {
        [
            (FieldId::BoxQuantity, self.box_quantity),
            (FieldId::PackagesPerBox, self.packages_per_box),
            (FieldId::ItemsPerPackage, self.items_per_package),
            (FieldId::CostPerBox, self.cost_per_box),
            (FieldId::CostPerPackage, self.cost_per_package),
            (FieldId::CostPerItem, self.cost_per_item),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormKindArg {
    Purchase,
    SaleItem,
}

impl From<FormKindArg> for FormKind {
    fn from(arg: FormKindArg) -> Self {
        match arg {
            FormKindArg::Purchase => FormKind::Purchase,
            FormKindArg::SaleItem => FormKind::SaleItem,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // The interactive form owns the terminal; no log output there
    if !matches!(cli.command, Commands::Form { .. }) {
        init_logging(&config);
    }

    let result = match cli.command {
        Commands::Calc { form, values, format } => cmd_calc(
            pick_form(form, &config),
            values,
            pick_format(format, &config),
        ),
        Commands::Replay { path, format } => cmd_replay(path, pick_format(format, &config)),
        Commands::Form { form } => cmd_form(pick_form(form, &config)),
        Commands::Fields { form } => cmd_fields(pick_form(form, &config)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Log to stderr so JSON on stdout stays clean.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = config.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn pick_form(arg: Option<FormKindArg>, config: &AppConfig) -> FormKind {
    arg.map(FormKind::from).unwrap_or(config.default_form)
}

fn pick_format(arg: Option<OutputFormatArg>, config: &AppConfig) -> OutputFormat {
    arg.map(OutputFormat::from).unwrap_or(config.format)
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_calc(kind: FormKind, values: FieldArgs, format: OutputFormat) -> Result<(), String> {
    let mut form = FormState::prefilled(kind, values.into_values());

    let recalculation = CostController::new(kind).recalculate(&mut form);
    let report = CalcReport {
        recalculation: &recalculation,
        fields: &form,
    };

    print!("{}", format_calc(&report, format));
    Ok(())
}

fn cmd_replay(path: PathBuf, format: OutputFormat) -> Result<(), String> {
    let session = Session::load(&path).map_err(|e| e.to_string())?;
    let outcome = replay(&session);

    print!("{}", format_session(&outcome, format));
    Ok(())
}

fn cmd_form(kind: FormKind) -> Result<(), String> {
    run(App::new(kind)).map_err(|e| e.to_string())
}

fn cmd_fields(kind: FormKind) -> Result<(), String> {
    let layout = kind.layout();
    let tracked = kind.tracked_fields();

    println!("{} form", kind);
    println!();
    println!("{:<20} {:<22} {:<8} {:<8}", "Field", "Id", "Tracked", "Present");
    for field in FieldId::ALL {
        println!(
            "{:<20} {:<22} {:<8} {:<8}",
            field.name(),
            field.html_id(),
            yes_no(tracked.contains(&field)),
            yes_no(layout.contains(&field)),
        );
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
