use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use tribunal_ai::config::AppConfig;
use tribunal_ai::error::AppError;
use tribunal_ai::telemetry;
use tribunal_ai::workflows::arbitration::{
    case_router, ArbitrationCaseService, CaseId, ChatCompletionsGenerator, ComplianceStatus,
    CostAllocationReport, LogPublisher, MemoryCaseStore, NarrativeSource, Party, ResponsibleParty,
    Ruling, Synthesizer,
};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Arbitral Case Orchestrator",
    about = "Run the arbitration case-management service or demo reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Case-level reports for stakeholder demos
    Case {
        #[command(subcommand)]
        command: CaseCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum CaseCommand {
    /// Render a cost-allocation report for a seeded demonstration case
    Allocation(AllocationArgs),
}

#[derive(Args, Debug)]
struct AllocationArgs {
    /// Proposed final award value used for sealed-offer comparison
    #[arg(long)]
    final_award: Option<f64>,
    /// Assessment date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Optional procedural-order CSV to seed the timetable
    #[arg(long)]
    timetable_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Case {
            command: CaseCommand::Allocation(args),
        } => run_demo_allocation(args).await,
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn build_synthesizer(config: &AppConfig) -> Synthesizer {
    let Some(endpoint) = config.narrative.endpoint.clone() else {
        return Synthesizer::template_only();
    };

    match ChatCompletionsGenerator::new(
        endpoint,
        config.narrative.api_key.clone(),
        config.narrative.model.clone(),
        config.narrative.timeout,
    ) {
        Ok(generator) => Synthesizer::with_generator(Arc::new(generator)),
        Err(error) => {
            warn!(%error, "narrative client could not be built; using template strategy");
            Synthesizer::template_only()
        }
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let service = Arc::new(ArbitrationCaseService::new(
        Arc::new(MemoryCaseStore::default()),
        Arc::new(LogPublisher),
        build_synthesizer(&config),
    ));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(case_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "arbitral case orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_demo_allocation(args: AllocationArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = ArbitrationCaseService::new(
        Arc::new(MemoryCaseStore::default()),
        Arc::new(LogPublisher),
        Synthesizer::template_only(),
    );

    let case_id = CaseId("demo-001".to_string());
    seed_demo_case(&service, &case_id, today, args.timetable_csv.as_deref())?;

    let report = service
        .cost_allocation(&case_id, args.final_award, today)
        .await?;
    render_allocation_report(&report);
    Ok(())
}

type DemoService = ArbitrationCaseService<MemoryCaseStore, LogPublisher>;

fn seed_demo_case(
    service: &DemoService,
    case_id: &CaseId,
    today: NaiveDate,
    timetable_csv: Option<&std::path::Path>,
) -> Result<(), AppError> {
    service.open_case(case_id)?;

    match timetable_csv {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            service.import_timetable(case_id, file)?;
        }
        None => {
            let overdue = (today - Duration::days(10)).format("%Y-%m-%d").to_string();
            let upcoming = (today + Duration::days(20)).format("%Y-%m-%d").to_string();
            let event = service.add_timetable_event(
                case_id,
                "Statement of Defence".to_string(),
                overdue,
                ResponsibleParty::Claimant,
            )?;
            service.set_compliance_status(case_id, &event.id, ComplianceStatus::AwaitingCompliance)?;
            service.add_timetable_event(
                case_id,
                "Evidentiary Hearing".to_string(),
                upcoming,
                ResponsibleParty::All,
            )?;
        }
    }

    for n in 0..10 {
        let request = service.file_document_request(
            case_id,
            Party::Claimant,
            format!("Internal correspondence batch {}", n + 1),
            "Relevant to quantum of the delay claim".to_string(),
        )?;
        let (ruling, note) = if n < 8 {
            (Ruling::Denied, "Overly broad; proportionality not shown")
        } else {
            (Ruling::Allowed, "Narrow and material")
        };
        service.rule_on_request(case_id, &request.id, ruling, note.to_string())?;
    }

    for n in 0..5 {
        let request = service.file_document_request(
            case_id,
            Party::Respondent,
            format!("Site inspection records {}", n + 1),
            "Goes to the standard of performance".to_string(),
        )?;
        let (ruling, note) = if n == 0 {
            (Ruling::Denied, "Duplicative of the agreed bundle")
        } else {
            (Ruling::Allowed, "Material to the defence")
        };
        service.rule_on_request(case_id, &request.id, ruling, note.to_string())?;
    }

    service.record_sealed_offer(
        case_id,
        Party::Respondent,
        "3800000".to_string(),
        (today - Duration::days(90)).format("%Y-%m-%d").to_string(),
    )?;

    Ok(())
}

fn render_allocation_report(report: &CostAllocationReport) {
    println!("Cost allocation demo — case {}", report.case_id);
    println!("Assessed on {}", report.assessed_on);

    println!("\nConduct (document production)");
    for party in [&report.claimant, &report.respondent] {
        println!(
            "- {}: rejection rate {:.1}%, penalty {}",
            party.party.label(),
            party.conduct.ratio,
            if party.conduct.penalty_triggered {
                "triggered"
            } else {
                "not triggered"
            }
        );
    }

    println!("\nDelay deductions");
    for party in [&report.claimant, &report.respondent] {
        println!(
            "- {}: {:.1}%",
            party.party.label(),
            party.delay.total_percent
        );
        for line in &party.delay.log {
            println!("  - {line}");
        }
    }

    match report.final_award {
        Some(award) if report.reversal_triggers.is_empty() => {
            println!("\nSealed offers: none beaten at a final award of {award}");
        }
        Some(award) => {
            println!("\nSealed offers beaten at a final award of {award}");
            for trigger in &report.reversal_triggers {
                println!(
                    "- {} offered {} on {}",
                    trigger.party.label(),
                    trigger.offer_amount,
                    trigger.offer_date
                );
            }
        }
        None => println!("\nSealed offers: no final award supplied, not evaluated"),
    }

    println!(
        "\nNarrative ({})",
        match report.narrative.source {
            NarrativeSource::Generative => "generative",
            NarrativeSource::Template => "template",
        }
    );
    if let Some(note) = &report.narrative.fallback_note {
        println!("[degraded: {note}]");
    }
    println!("{}", report.narrative.text);
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
