//! MedAppt CLI
//!
//! Command-line client for a running MedAppt API:
//! - List doctors, patients and appointments
//! - Book appointments and change their status
//! - Show the dashboard and a doctor's free slots
//! - Generate a default config file

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use medappt::api::dto::{ListResponse, ScheduleResponse};
use medappt::catalog;
use medappt::forms::AppointmentForm;
use medappt::model::{Appointment, AppointmentStatus, DashboardSummary, Doctor, Patient};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medappt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clinic management: doctors, patients and appointments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show API and data service status
    Status,

    /// List doctors
    Doctors {
        /// Specialty id (e.g. cardiologia)
        #[arg(short, long)]
        specialty: Option<String>,
        /// Search name, specialty or email
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// List patients
    Patients {
        /// Search name, email or health insurance
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// List appointments
    Appointments {
        /// Only this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// scheduled, confirmed, completed or cancelled
        #[arg(short, long)]
        status: Option<AppointmentStatus>,
        #[arg(long)]
        doctor: Option<String>,
        #[arg(long)]
        patient: Option<String>,
        /// Search patient, doctor or specialty
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Book an appointment
    Book {
        #[arg(long)]
        patient: String,
        #[arg(long)]
        doctor: String,
        /// Specialty id of the doctor
        #[arg(long)]
        specialty: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Confirm a scheduled appointment
    Confirm { id: String },

    /// Cancel an appointment
    Cancel { id: String },

    /// Mark an appointment as completed
    Complete { id: String },

    /// Show a doctor's free slots
    Schedule {
        doctor: String,
        /// First date (default: today)
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long, default_value = "7")]
        days: u32,
    },

    /// Show dashboard counts
    Dashboard,

    /// List medical specialties
    Specialties,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let json = cli.format == "json";

    match cli.command {
        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("MedAppt v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    let data = &health["data_service"];
                    println!(
                        "Data service: {} ({})",
                        if data["reachable"].as_bool().unwrap_or(false) {
                            "reachable"
                        } else {
                            "unreachable"
                        },
                        data["backend"].as_str().unwrap_or("-")
                    );
                    if let Some(error) = data["error"].as_str() {
                        println!("  {}", error);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to MedAppt API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin medappt");
                    std::process::exit(1);
                }
            }
        }

        Commands::Doctors { specialty, search } => {
            let mut query = Vec::new();
            push_param(&mut query, "specialty", specialty);
            push_param(&mut query, "q", search);

            let list: ListResponse<Doctor> =
                get_json(&client, &cli.api_url, "/api/v1/doctors", &query).await?;
            if json {
                return print_json(&list);
            }

            println!("{:<24} {:<16} {:<30} {}", "Name", "Specialty", "Email", "ID");
            println!("{}", "-".repeat(90));
            for doctor in &list.items {
                println!(
                    "{:<24} {:<16} {:<30} {}",
                    doctor.name,
                    catalog::specialty_name(&doctor.specialty),
                    doctor.email,
                    doctor.id
                );
            }
            println!("\n{} doctor(s)", list.total);
        }

        Commands::Patients { search } => {
            let mut query = Vec::new();
            push_param(&mut query, "q", search);

            let list: ListResponse<Patient> =
                get_json(&client, &cli.api_url, "/api/v1/patients", &query).await?;
            if json {
                return print_json(&list);
            }

            println!("{:<24} {:<16} {:<30} {}", "Name", "CPF", "Email", "ID");
            println!("{}", "-".repeat(90));
            for patient in &list.items {
                println!(
                    "{:<24} {:<16} {:<30} {}",
                    patient.name,
                    patient.cpf.as_deref().unwrap_or("-"),
                    patient.email,
                    patient.id
                );
            }
            println!("\n{} patient(s)", list.total);
        }

        Commands::Appointments {
            date,
            status,
            doctor,
            patient,
            search,
        } => {
            let mut query = Vec::new();
            push_param(&mut query, "date", date.map(|d| d.to_string()));
            push_param(&mut query, "status", status.map(|s| s.as_str().to_string()));
            push_param(&mut query, "doctorId", doctor);
            push_param(&mut query, "patientId", patient);
            push_param(&mut query, "q", search);

            let list: ListResponse<Appointment> =
                get_json(&client, &cli.api_url, "/api/v1/appointments", &query).await?;
            if json {
                return print_json(&list);
            }
            print_appointments(&list.items);
        }

        Commands::Book {
            patient,
            doctor,
            specialty,
            date,
            time,
            reason,
        } => {
            let form = AppointmentForm {
                specialty,
                doctor_id: doctor,
                date,
                time,
                patient_id: patient,
                reason,
            };

            let response = client
                .post(format!("{}/api/v1/appointments", cli.api_url))
                .json(&form)
                .send()
                .await?;
            let appointment: Appointment = read_json(response).await?;
            println!(
                "Booked {} with {} on {} at {} ({})",
                appointment.patient_name,
                appointment.doctor_name,
                appointment.date.format("%d/%m/%Y"),
                appointment.time,
                appointment.id
            );
        }

        Commands::Confirm { id } => change_status(&client, &cli.api_url, &id, "confirm").await?,
        Commands::Cancel { id } => change_status(&client, &cli.api_url, &id, "cancel").await?,
        Commands::Complete { id } => change_status(&client, &cli.api_url, &id, "complete").await?,

        Commands::Schedule { doctor, from, days } => {
            let mut query = vec![("days".to_string(), days.to_string())];
            push_param(&mut query, "from", from.map(|d| d.to_string()));

            let path = format!("/api/v1/doctors/{}/schedule", doctor);
            let schedule: ScheduleResponse =
                get_json(&client, &cli.api_url, &path, &query).await?;
            if json {
                return print_json(&schedule);
            }

            if schedule.days.is_empty() {
                println!("No free slots in this period.");
            }
            for day in &schedule.days {
                println!("{}  {}", day.date.format("%a %d/%m"), day.times.join(" "));
            }
        }

        Commands::Dashboard => {
            let summary: DashboardSummary =
                get_json(&client, &cli.api_url, "/api/v1/dashboard/summary", &[]).await?;
            if json {
                return print_json(&summary);
            }

            println!("Appointments");
            println!("  Total:      {}", summary.total_appointments);
            println!("  Today:      {}", summary.today_appointments);
            println!("  Upcoming:   {}", summary.upcoming_appointments);
            println!("  Completed:  {}", summary.completed_appointments);
            println!("  Cancelled:  {}", summary.cancelled_appointments);
            println!();
            println!("Doctors:  {}", summary.total_doctors);
            println!("Patients: {}", summary.total_patients);
        }

        Commands::Specialties => {
            for specialty in catalog::SPECIALTIES {
                println!("{:<16} {}", specialty.id, specialty.name);
            }
        }

        Commands::Config { output } => {
            let config = medappt::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn push_param(query: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        query.push((key.to_string(), value));
    }
}

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    api_url: &str,
    path: &str,
    query: &[(String, String)],
) -> CliResult<T> {
    let response = client
        .get(format!("{}{}", api_url, path))
        .query(query)
        .send()
        .await?;
    read_json(response).await
}

/// Decode a success body, or print the API error and exit
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> CliResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body: serde_json::Value = response.json().await.unwrap_or_default();
    eprintln!(
        "Request failed ({}): {}",
        status,
        body["error"]["message"].as_str().unwrap_or("unknown error")
    );
    if let Some(fields) = body["error"]["fields"].as_object() {
        for (field, message) in fields {
            eprintln!("  {}: {}", field, message.as_str().unwrap_or("-"));
        }
    }
    std::process::exit(1);
}

async fn change_status(
    client: &reqwest::Client,
    api_url: &str,
    id: &str,
    action: &str,
) -> CliResult<()> {
    let response = client
        .post(format!("{}/api/v1/appointments/{}/{}", api_url, id, action))
        .send()
        .await?;
    let appointment: Appointment = read_json(response).await?;
    println!("{} is now {}", appointment.id, appointment.status.label());
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_appointments(appointments: &[Appointment]) {
    if appointments.is_empty() {
        println!("No appointments found");
        return;
    }

    println!(
        "{:<12} {:<6} {:<22} {:<22} {:<12} {}",
        "Date", "Time", "Patient", "Doctor", "Status", "ID"
    );
    println!("{}", "-".repeat(90));
    for a in appointments {
        println!(
            "{:<12} {:<6} {:<22} {:<22} {:<12} {}",
            a.date.format("%d/%m/%Y").to_string(),
            a.time,
            a.patient_name,
            a.doctor_name,
            a.status.label(),
            a.id
        );
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
