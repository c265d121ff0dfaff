use clap::{Parser, Subcommand};
use ps_core::{mock_bundle, mock_patients, Timings};
use ps_widget::{
    ClickTarget, EventOutcome, FrameMessage, HostEnvironment, Key, MountPoint, Overlay,
    PatientSearch, ResultsView, UiEvent, WidgetConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "patient-search")]
#[command(about = "Drive the patient search widget from a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the widget, run one search and close it
    Search {
        /// Search term
        term: String,
        /// Field to search (name, identifier, phone, email)
        #[arg(long, default_value = "name")]
        field: String,
        /// FHIR Patient endpoint; the built-in mock dataset is used when omitted
        #[arg(long)]
        endpoint: Option<String>,
        /// Behave as if running inside another frame and print parent messages
        #[arg(long)]
        embedded: bool,
        /// Print the results markup instead of a table
        #[arg(long)]
        html: bool,
        /// Select the row with this patient id after searching
        #[arg(long)]
        select: Option<String>,
    },
    /// List the mock dataset
    List,
    /// Print the mock dataset as a FHIR searchset bundle
    Bundle,
}

/// Host for a widget driven from a terminal. Parent-frame messages go to stdout as JSON.
struct TerminalHost {
    embedded: bool,
}

impl HostEnvironment for TerminalHost {
    fn is_embedded(&self) -> bool {
        self.embedded
    }

    fn post_to_parent(&self, message: &FrameMessage) {
        println!("parent <- {}", message.to_json());
    }

    fn resolve_mount_point(&self, _id: Option<&str>) -> MountPoint {
        MountPoint::DocumentRoot
    }

    fn attach_overlay(&self, mount: &MountPoint, _overlay: &Overlay) {
        tracing::debug!(?mount, "overlay attached");
    }

    fn detach_overlay(&self, mount: &MountPoint) {
        tracing::debug!(?mount, "overlay detached");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_search=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search {
            term,
            field,
            endpoint,
            embedded,
            html,
            select,
        }) => {
            let mut config = WidgetConfig::new()
                .with_timings(Timings::immediate())
                .on_select(|patient| {
                    println!(
                        "Selected: {} ({})",
                        patient.display_name(),
                        patient.external_identifier()
                    );
                });
            if let Some(endpoint) = endpoint {
                config = config.with_remote_endpoint(endpoint);
            }

            let mut widget = PatientSearch::new(config, TerminalHost { embedded })?;
            widget.show().await;
            widget.dispatch(UiEvent::FieldSelected(field)).await;
            widget.dispatch(UiEvent::TermInput(term)).await;
            widget.dispatch(UiEvent::InputKeyPress(Key::Enter)).await;

            if html {
                println!("{}", widget.overlay().results_markup());
            } else {
                print_view(widget.overlay().view());
            }

            match select {
                Some(id) => {
                    let outcome = widget.dispatch(UiEvent::Click(ClickTarget::Row(id.clone()))).await;
                    if outcome == EventOutcome::Ignored {
                        eprintln!("No displayed patient with id {}", id);
                    }
                }
                None => {
                    widget.dispatch(UiEvent::DocumentKeyDown(Key::Escape)).await;
                }
            }
            widget.destroy();
        }
        Some(Commands::List) => {
            for patient in mock_patients() {
                println!(
                    "ID: {}, Identifier: {}, Name: {}, Born: {}",
                    patient.id(),
                    patient.external_identifier(),
                    patient.display_name(),
                    patient.formatted_birth_date()
                );
            }
        }
        Some(Commands::Bundle) => {
            println!("{}", serde_json::to_string_pretty(&mock_bundle())?);
        }
        None => {
            println!("Use 'patient-search --help' for commands");
        }
    }

    Ok(())
}

fn print_view(view: &ResultsView) {
    if let Some(message) = view.message() {
        println!("{}", message);
        return;
    }
    println!(
        "{:<20} {:<12} {:<10} {:<26} {}",
        "Name", "Patient ID", "Phone", "Email", "Date of Birth"
    );
    for row in view.rows() {
        println!(
            "{:<20} {:<12} {:<10} {:<26} {}",
            row.name, row.identifier, row.phone, row.email, row.birth_date
        );
    }
    println!("\n{} patient(s); select with --select <id>:", view.rows().len());
    for row in view.rows() {
        println!("  {}  {}", row.patient_id, row.name);
    }
}
