//! # Cleanlink CLI
//!
//! Command-line interface for the laundry print agent.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP agent the web app prints through
//! cleanlink serve --device /dev/rfcomm0 --token s3cret
//!
//! # List printer ports
//! cleanlink devices
//!
//! # Print a test page
//! cleanlink print --device COM10 --test
//!
//! # Print a saved request, or write its bytes to a file
//! cleanlink print --request order.json
//! cleanlink print --request order.json --output order.bin
//!
//! # Print from flags
//! cleanlink print --title "Laundry Co" --order-id 123 --body "2kg wash" --qr 123 --mode all
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cleanlink::{
    CleanlinkError, ModeResolver, PrintRequest, ReceiptComposer, UnknownModePolicy,
    composer::ReceiptText,
    protocol::barcode::qr::{QrErrorLevel, QrProfile},
    server::{self, AppState, ServerConfig},
    transport::{
        DeviceTransport, PortDiscovery, SerialPortDiscovery, SerialTransport,
        serial::DEFAULT_DEVICE,
    },
};

/// Cleanlink - thermal printer agent for laundry receipts and labels
#[derive(Parser, Debug)]
#[command(name = "cleanlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP print agent
    Serve {
        /// Address to listen on
        #[arg(long, env = "CLEANLINK_LISTEN", default_value = "0.0.0.0:3491")]
        listen: String,

        /// Printer device path
        #[arg(long, env = "CLEANLINK_DEVICE", default_value = DEFAULT_DEVICE)]
        device: String,

        /// Token print requests must carry (omit to disable the check)
        #[arg(long, env = "CLEANLINK_TOKEN")]
        token: Option<String>,

        /// Print unknown modes as "all" instead of rejecting them
        #[arg(long, env = "CLEANLINK_LENIENT_MODES")]
        lenient_modes: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// List candidate printer devices
    Devices,

    /// Compose a job and print it
    Print {
        /// Printer device path
        #[arg(long, env = "CLEANLINK_DEVICE", default_value = DEFAULT_DEVICE)]
        device: String,

        /// Print the built-in test page
        #[arg(long, conflicts_with = "request")]
        test: bool,

        /// Read the request from a JSON file
        #[arg(long, value_name = "FILE")]
        request: Option<PathBuf>,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        order_id: String,

        #[arg(long, default_value = "")]
        body: String,

        /// Barcode value (single barcode)
        #[arg(long, default_value = "")]
        qr: String,

        /// Layout: receipt-only, qr-only, all, label, separator
        #[arg(long, default_value = "")]
        mode: String,

        /// Write the bytes to a file instead of the device
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print unknown modes as "all" instead of rejecting them
        #[arg(long, env = "CLEANLINK_LENIENT_MODES")]
        lenient_modes: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// QR module size in dots (1-16)
    #[arg(long, env = "CLEANLINK_QR_SIZE", default_value_t = QrProfile::DEFAULT_MODULE_SIZE)]
    qr_size: u8,

    /// QR error correction level (l, m, q, h)
    #[arg(long, env = "CLEANLINK_QR_LEVEL", default_value = "m")]
    qr_level: QrErrorLevel,

    /// JSON file overriding the printed captions
    #[arg(long, env = "CLEANLINK_CAPTIONS", value_name = "FILE")]
    captions: Option<PathBuf>,
}

impl LayoutArgs {
    fn profile(&self) -> QrProfile {
        QrProfile::new(self.qr_size, self.qr_level)
    }

    fn text(&self) -> Result<ReceiptText, CleanlinkError> {
        match &self.captions {
            Some(path) => Ok(serde_json::from_slice(&std::fs::read(path)?)?),
            None => Ok(ReceiptText::default()),
        }
    }
}

fn unknown_mode_policy(lenient: bool) -> UnknownModePolicy {
    if lenient {
        UnknownModePolicy::FallBackToAll
    } else {
        UnknownModePolicy::Reject
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cleanlink=info,tower_http=info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CleanlinkError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            device,
            token,
            lenient_modes,
            layout,
        } => {
            let config = ServerConfig {
                device,
                listen_addr: listen,
                token: token.filter(|t| !t.is_empty()),
                unknown_modes: unknown_mode_policy(lenient_modes),
                qr: layout.profile(),
                text: layout.text()?,
            };

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(AppState::serial(config)))
        }

        Commands::Devices => {
            let devices = SerialPortDiscovery::new(SerialTransport::new()).discover()?;
            println!("Found {} printer(s):", devices.len());
            for (i, device) in devices.iter().enumerate() {
                println!("  [{}] {} ({})", i + 1, device.name, device.id);
            }
            Ok(())
        }

        Commands::Print {
            device,
            test,
            request,
            title,
            order_id,
            body,
            qr,
            mode,
            output,
            lenient_modes,
            layout,
        } => {
            let request = if test {
                PrintRequest::test_page()
            } else if let Some(path) = request {
                let json = std::fs::read(&path)?;
                serde_json::from_slice(&json)?
            } else {
                PrintRequest {
                    title,
                    order_id,
                    body: with_trailing_newline(body),
                    legacy_barcode_value: qr,
                    mode,
                    ..Default::default()
                }
            };

            let mode = ModeResolver::new(unknown_mode_policy(lenient_modes)).resolve(&request)?;
            let data = ReceiptComposer::new(layout.profile())
                .with_text(layout.text()?)
                .compose_bytes(&request, mode);
            if data.is_empty() {
                return Err(CleanlinkError::NothingToPrint(mode));
            }

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)?;
                    println!("Wrote {} bytes ({} mode) to {}", data.len(), mode, path.display());
                }
                None => {
                    println!("Printing {} job to {}...", mode, device);
                    SerialTransport::new().send(&device, &data)?;
                    println!("Printed successfully!");
                }
            }
            Ok(())
        }
    }
}

/// Bodies are printed verbatim; a body typed on the command line usually
/// lacks the newline the web client sends.
fn with_trailing_newline(mut body: String) -> String {
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    body
}
