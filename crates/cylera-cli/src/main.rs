//! Cylera CLI - command line interface for the Cylera Partner API.
//!
//! Provides read-only access to device inventory, threats,
//! vulnerabilities and network information. Credentials come from the
//! environment (or a `.env` file written by `cylera init`); responses
//! are printed to stdout as formatted JSON.
//!
//! Exit codes:
//! - 0: success
//! - 1: API error or other runtime failure
//! - 2: argument validation error (clap handles this automatically)
//! - 3: configuration missing
//! - 4: authentication failed
//! - 5: network failure
//! - 6: resource not found

mod init;

use std::io;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cylera_core::inventory::{self, DeviceFilters};
use cylera_core::network::{self, SubnetFilters};
use cylera_core::risk::{self, VulnerabilityFilters};
use cylera_core::threat::{self, ThreatFilters};
use cylera_core::utilization::{self, ProcedureFilters};
use cylera_core::{Config, CyleraClient, CyleraError};

#[derive(Parser)]
#[command(
    name = "cylera",
    version,
    about = "Command line interface for the Cylera Partner API"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Pagination flags shared by every list command.
#[derive(Args)]
struct PageArgs {
    /// Page number for pagination (0-indexed)
    #[arg(long)]
    page: Option<u32>,

    /// Results per page (max 100)
    #[arg(long)]
    page_size: Option<u32>,
}

#[derive(Args)]
struct DevicesArgs {
    /// Complete AE Title
    #[arg(long)]
    aetitle: Option<String>,

    /// Device class (Medical, Infrastructure, etc.)
    #[arg(long = "class")]
    device_class: Option<String>,

    /// Complete hostname
    #[arg(long)]
    hostname: Option<String>,

    /// Partial or complete IP address
    #[arg(long)]
    ip_address: Option<String>,

    /// MAC address of device
    #[arg(long)]
    mac_address: Option<String>,

    /// Device model
    #[arg(long)]
    model: Option<String>,

    /// Operating system
    #[arg(long)]
    os: Option<String>,

    /// Complete serial number
    #[arg(long)]
    serial_number: Option<String>,

    /// [DEPRECATED] Seconds since last seen
    #[arg(long)]
    since_last_seen: Option<i64>,

    /// Device type (EEG, X-Ray, etc.)
    #[arg(long = "type")]
    device_type: Option<String>,

    /// Device vendor
    #[arg(long)]
    vendor: Option<String>,

    /// Epoch timestamp
    #[arg(long)]
    first_seen_before: Option<i64>,

    /// Epoch timestamp
    #[arg(long)]
    first_seen_after: Option<i64>,

    /// Epoch timestamp
    #[arg(long)]
    last_seen_before: Option<i64>,

    /// Epoch timestamp
    #[arg(long)]
    last_seen_after: Option<i64>,

    /// Attribute label filter
    #[arg(long)]
    attribute_label: Option<String>,

    #[command(flatten)]
    pagination: PageArgs,
}

impl DevicesArgs {
    fn into_filters(self) -> DeviceFilters {
        DeviceFilters {
            aetitle: self.aetitle,
            device_class: self.device_class,
            hostname: self.hostname,
            ip_address: self.ip_address,
            mac_address: self.mac_address,
            model: self.model,
            os: self.os,
            serial_number: self.serial_number,
            since_last_seen: self.since_last_seen,
            device_type: self.device_type,
            vendor: self.vendor,
            first_seen_before: self.first_seen_before,
            first_seen_after: self.first_seen_after,
            last_seen_before: self.last_seen_before,
            last_seen_after: self.last_seen_after,
            attribute_label: self.attribute_label,
            page: self.pagination.page,
            page_size: self.pagination.page_size,
        }
    }
}

#[derive(Args)]
struct ProceduresArgs {
    /// Procedure name (partial match)
    #[arg(long)]
    procedure_name: Option<String>,

    /// Accession number
    #[arg(long)]
    accession_number: Option<String>,

    /// Device UUID
    #[arg(long)]
    device_uuid: Option<String>,

    /// Date (YYYY/MM/DD)
    #[arg(long)]
    completed_after: Option<String>,

    #[command(flatten)]
    pagination: PageArgs,
}

impl ProceduresArgs {
    fn into_filters(self) -> ProcedureFilters {
        ProcedureFilters {
            procedure_name: self.procedure_name,
            accession_number: self.accession_number,
            device_uuid: self.device_uuid,
            completed_after: self.completed_after,
            page: self.pagination.page,
            page_size: self.pagination.page_size,
        }
    }
}

#[derive(Args)]
struct SubnetsArgs {
    /// CIDR range (partial match)
    #[arg(long)]
    cidr_range: Option<String>,

    /// Subnet description
    #[arg(long)]
    description: Option<String>,

    /// VLAN number
    #[arg(long)]
    vlan: Option<u32>,

    #[command(flatten)]
    pagination: PageArgs,
}

impl SubnetsArgs {
    fn into_filters(self) -> SubnetFilters {
        SubnetFilters {
            cidr_range: self.cidr_range,
            description: self.description,
            vlan: self.vlan,
            page: self.pagination.page,
            page_size: self.pagination.page_size,
        }
    }
}

#[derive(Args)]
struct VulnerabilitiesArgs {
    /// Confidence level
    #[arg(long, value_parser = ["LOW", "MEDIUM", "HIGH"])]
    confidence: Option<String>,

    /// Epoch timestamp filter
    #[arg(long)]
    detected_after: Option<i64>,

    /// MAC address of device
    #[arg(long)]
    mac_address: Option<String>,

    /// Vulnerability name (partial match)
    #[arg(long)]
    name: Option<String>,

    /// Severity level
    #[arg(long, value_parser = ["INFO", "LOW", "MEDIUM", "HIGH", "CRITICAL"])]
    severity: Option<String>,

    /// Status
    #[arg(long, value_parser = ["OPEN", "IN_PROGRESS", "RESOLVED", "SUPPRESSED"])]
    status: Option<String>,

    #[command(flatten)]
    pagination: PageArgs,
}

impl VulnerabilitiesArgs {
    fn into_filters(self) -> VulnerabilityFilters {
        VulnerabilityFilters {
            confidence: self.confidence,
            detected_after: self.detected_after,
            mac_address: self.mac_address,
            name: self.name,
            severity: self.severity,
            status: self.status,
            page: self.pagination.page,
            page_size: self.pagination.page_size,
        }
    }
}

#[derive(Args)]
struct ThreatsArgs {
    /// Epoch timestamp filter
    #[arg(long)]
    detected_after: Option<i64>,

    /// MAC address of device
    #[arg(long)]
    mac_address: Option<String>,

    /// Threat name (partial match)
    #[arg(long)]
    name: Option<String>,

    /// Severity level
    #[arg(long, value_parser = ["INFO", "LOW", "MEDIUM", "HIGH", "CRITICAL"])]
    severity: Option<String>,

    /// Status
    #[arg(long, value_parser = ["OPEN", "IN_PROGRESS", "RESOLVED", "SUPPRESSED"])]
    status: Option<String>,

    #[command(flatten)]
    pagination: PageArgs,
}

impl ThreatsArgs {
    fn into_filters(self) -> ThreatFilters {
        ThreatFilters {
            detected_after: self.detected_after,
            mac_address: self.mac_address,
            name: self.name,
            severity: self.severity,
            status: self.status,
            page: self.pagination.page,
            page_size: self.pagination.page_size,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Cylera CLI configuration interactively
    Init,

    /// Get details for a specific device by MAC address
    Device {
        /// MAC address of the device
        device_id: String,
    },

    /// Get a list of devices with optional filters
    Devices(DevicesArgs),

    /// Get attributes for a device by MAC address
    DeviceAttributes {
        /// MAC address of the device
        mac_address: String,
    },

    /// Get a list of medical procedures
    Procedures(ProceduresArgs),

    /// Get a list of network subnets
    Subnets(SubnetsArgs),

    /// Get mitigations for a specific vulnerability
    RiskMitigations {
        /// Name of the vulnerability
        vulnerability: String,
    },

    /// Get a list of vulnerabilities
    Vulnerabilities(VulnerabilitiesArgs),

    /// Get a list of detected threats
    Threats(ThreatsArgs),
}

/// Initialize the tracing subscriber for logging.
/// Use the RUST_LOG env var to control the log level (e.g. RUST_LOG=debug).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Print a JSON value to stdout, pretty-formatted.
fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Map an error to its process exit code (see the crate doc).
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CyleraError>() {
        Some(CyleraError::Config(_)) => 3,
        Some(CyleraError::Auth(_)) => 4,
        Some(CyleraError::Network(_)) => 5,
        Some(CyleraError::NotFound(_)) => 6,
        _ => 1,
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    if let Commands::Init = command {
        return init::run().await;
    }

    let config = Config::from_env()?;
    let client = CyleraClient::new(config)?;

    let result = match command {
        Commands::Init => unreachable!("handled above"),
        Commands::Device { device_id } => inventory::get_device(&client, &device_id).await?,
        Commands::Devices(args) => inventory::get_devices(&client, &args.into_filters()).await?,
        Commands::DeviceAttributes { mac_address } => {
            inventory::get_device_attributes(&client, &mac_address).await?
        }
        Commands::Procedures(args) => {
            utilization::get_procedures(&client, &args.into_filters()).await?
        }
        Commands::Subnets(args) => network::get_subnets(&client, &args.into_filters()).await?,
        Commands::RiskMitigations { vulnerability } => {
            risk::get_mitigations(&client, &vulnerability).await?
        }
        Commands::Vulnerabilities(args) => {
            risk::get_vulnerabilities(&client, &args.into_filters()).await?
        }
        Commands::Threats(args) => threat::get_threats(&client, &args.into_filters()).await?,
    };

    print_json(&result)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env from the working directory if present
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    debug!("Cylera CLI starting");

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn error_kinds_map_to_distinct_exit_codes() {
        let codes = [
            exit_code(&CyleraError::Config("x".into()).into()),
            exit_code(&CyleraError::Auth("x".into()).into()),
            exit_code(&CyleraError::NotFound("x".into()).into()),
            exit_code(&anyhow::anyhow!("something else")),
        ];
        assert_eq!(codes, [3, 4, 6, 1]);
    }

    #[test]
    fn devices_args_translate_into_filters() {
        let cli = Cli::try_parse_from([
            "cylera",
            "devices",
            "--vendor",
            "Philips",
            "--class",
            "Medical",
            "--page-size",
            "2",
        ])
        .unwrap();

        let Commands::Devices(args) = cli.command else {
            panic!("expected the devices subcommand");
        };
        let filters = args.into_filters();
        assert_eq!(filters.vendor.as_deref(), Some("Philips"));
        assert_eq!(filters.device_class.as_deref(), Some("Medical"));
        assert_eq!(filters.page_size, Some(2));
        assert_eq!(filters.page, None);
    }

    #[test]
    fn severity_values_are_restricted() {
        let result = Cli::try_parse_from(["cylera", "threats", "--severity", "EXTREME"]);
        assert!(result.is_err());
    }
}
