use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frontdesk_core::constants::{
    APPOINTMENT_DATE_TIME_FORMAT, DEFAULT_SORT_ENV, PAGE_SIZE_ENV, SEED_ENV,
};
use frontdesk_core::{
    Appointment, AppointmentForm, AppointmentQuery, AppointmentType, Clinic, CoreConfig,
    FrontDesk, FrontDeskError, Patient, PatientForm, PatientId, SortKey,
    default_sort_from_env_value, format_date, format_time, format_wallet,
    page_size_from_env_value, seed_source_from_env_value,
};

#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(about = "Clinic front desk: patients and appointments")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List appointments, filtered, sorted and paginated
    Appointments {
        /// Match against patient name or id (case-insensitive)
        #[arg(long)]
        query: Option<String>,
        /// Clinic value, e.g. neurology
        #[arg(long)]
        clinic: Option<Clinic>,
        /// Sort key, e.g. date-latest or name-asc
        #[arg(long)]
        sort: Option<SortKey>,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Search patients by name or id
    Patients {
        /// Search text; omit to list everyone
        query: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List a patient's appointments
    PatientAppointments {
        /// Patient identifier, e.g. HOSP2938475
        patient_id: String,
    },
    /// Validate an intake form and register the patient
    RegisterPatient {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        middle_name: Option<String>,
        #[arg(long)]
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,
        /// Male, Female or Other
        #[arg(long)]
        gender: String,
        #[arg(long)]
        phone: String,
        /// Patient identifier; generated when omitted
        #[arg(long)]
        id: Option<String>,
    },
    /// Validate a booking and create the appointment
    Book {
        #[arg(long)]
        patient_id: String,
        /// Clinic value, e.g. cardiology
        #[arg(long)]
        clinic: Clinic,
        /// Appointment type, e.g. follow-up
        #[arg(long = "type")]
        appointment_type: AppointmentType,
        /// Date and time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: String,
    },
}

/// Resolve the core configuration from the process environment.
///
/// # Environment Variables
/// - `FRONTDESK_PAGE_SIZE`: appointments per page (default: 20)
/// - `FRONTDESK_DEFAULT_SORT`: sort key used when none is given (default: "date-latest")
/// - `FRONTDESK_SEED`: "builtin", "none" or a YAML file path (default: "builtin")
fn config_from_env() -> anyhow::Result<CoreConfig> {
    let page_size = page_size_from_env_value(std::env::var(PAGE_SIZE_ENV).ok())?;
    let default_sort = default_sort_from_env_value(std::env::var(DEFAULT_SORT_ENV).ok())?;
    let seed = seed_source_from_env_value(std::env::var(SEED_ENV).ok())?;
    Ok(CoreConfig::new(page_size, default_sort, seed)?)
}

fn print_appointment(position: usize, appointment: &Appointment) {
    let badge = appointment.status.badge();
    println!(
        "{:>3}. {} {:<26} {:<22} {:<12} {} {}  {:>10}  {} [{}]{}",
        position,
        appointment.id,
        appointment.patient.full_name(),
        appointment.clinic,
        appointment.appointment_type.label(),
        format_date(appointment.date_time),
        format_time(appointment.date_time),
        format_wallet(appointment.wallet_balance),
        appointment.status,
        badge.icon,
        if appointment.is_new { " (new)" } else { "" },
    );
}

fn print_patient(patient: &Patient) {
    println!(
        "{:<16} {:<28} {:>3}  {:<6} {}",
        patient.id,
        patient.full_name(),
        patient.age,
        patient.gender,
        patient.phone_number.as_deref().unwrap_or("-"),
    );
}

/// Entry point for the front desk CLI.
///
/// Every invocation works on a freshly seeded store; nothing is persisted between runs.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("frontdesk=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let cfg = Arc::new(config_from_env()?);
    tracing::debug!(
        "++ Front desk config: page_size={} default_sort={} seed={:?}",
        cfg.page_size(),
        cfg.default_sort(),
        cfg.seed()
    );
    let mut desk = FrontDesk::new(cfg)?;

    match cli.command {
        Some(Commands::Appointments {
            query,
            clinic,
            sort,
            page,
            json,
        }) => {
            let mut view = AppointmentQuery::new().text(query.unwrap_or_default());
            view.clinic = clinic;
            view.sort = sort;

            let page = desk.dashboard(&view, page);
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else if page.items.is_empty() {
                println!("No appointments found.");
            } else {
                for (offset, appointment) in page.items.iter().enumerate() {
                    print_appointment(page.first_index() + offset + 1, appointment);
                }
                println!(
                    "Page {} of {} ({} appointments)",
                    page.page, page.total_pages, page.total_items
                );
            }
        }
        Some(Commands::Patients { query, json }) => {
            let patients = desk
                .store()
                .search_patients(query.as_deref().unwrap_or_default());
            if json {
                println!("{}", serde_json::to_string_pretty(&patients)?);
            } else if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    print_patient(patient);
                }
            }
        }
        Some(Commands::PatientAppointments { patient_id }) => {
            let id = PatientId::parse(&patient_id)?;
            let patient = desk
                .store()
                .get_patient(&id)
                .with_context(|| format!("no patient with id {patient_id}"))?;
            println!("{}", patient.picker_label());

            let appointments = desk.store().patient_appointments(&id);
            if appointments.is_empty() {
                println!("No appointments found.");
            }
            for (index, appointment) in appointments.into_iter().enumerate() {
                print_appointment(index + 1, appointment);
            }
        }
        Some(Commands::RegisterPatient {
            first_name,
            middle_name,
            last_name,
            dob,
            gender,
            phone,
            id,
        }) => {
            let form = PatientForm {
                patient_id: id.unwrap_or_default(),
                first_name,
                middle_name: middle_name.unwrap_or_default(),
                last_name,
                date_of_birth: dob,
                gender,
                phone_number: phone,
                ..PatientForm::default()
            };

            match desk.register_patient(&form) {
                Ok(patient) => {
                    println!("Registered {}", patient.picker_label());
                    print_patient(&patient);
                }
                Err(FrontDeskError::PatientRejected(errors)) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    anyhow::bail!("patient form has {} error(s)", errors.len());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Some(Commands::Book {
            patient_id,
            clinic,
            appointment_type,
            at,
        }) => {
            let id = PatientId::parse(&patient_id)?;
            let patient = desk
                .store()
                .get_patient(&id)
                .cloned()
                .with_context(|| format!("no patient with id {patient_id}"))?;
            let date = NaiveDateTime::parse_from_str(at.trim(), APPOINTMENT_DATE_TIME_FORMAT)
                .with_context(|| format!("invalid appointment time '{at}', expected YYYY-MM-DDTHH:MM"))?;

            let form = AppointmentForm {
                patient: Some(patient),
                clinic: Some(clinic),
                appointment_type: Some(appointment_type),
                date: Some(date),
            };

            match desk.book_appointment(&form) {
                Ok(appointment) => {
                    println!("Booked appointment {}", appointment.id);
                    print_appointment(1, &appointment);
                }
                Err(FrontDeskError::AppointmentRejected(errors)) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    anyhow::bail!("booking has {} error(s)", errors.len());
                }
                Err(e) => return Err(e.into()),
            }
        }
        None => {
            println!("Use 'frontdesk --help' for commands");
        }
    }

    Ok(())
}
