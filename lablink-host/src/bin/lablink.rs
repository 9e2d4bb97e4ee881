//! Lablink command-line front end
//!
//! ```bash
//! # List available serial ports
//! lablink list-ports
//!
//! # Read analog channel 2 on COM3
//! lablink --port 3 get analog 2
//!
//! # Drive the servo on channel 10
//! lablink --port /dev/ttyACM0 set servo 10 90
//!
//! # Watch a joystick and button
//! lablink monitor --analog 2 --analog 26 --button 33
//! ```

use std::error::Error;
use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use lablink_core::{LabClient, LinkError};
use lablink_host::app::spawn_quit_listener;
use lablink_host::cli::{Cli, CliCommand};
use lablink_host::{
    init_logging, list_ports, run_app, HostConfig, HostError, MonitorApp, SerialTransport,
    StdClock,
};
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = HostConfig::load(cli.config.as_deref())?;
    config.apply_env()?;
    if let Some(port) = &cli.port {
        config.port.name = Some(port.clone());
    }

    init_logging(&config.log.level)?;

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {}", e);
        if e.link_error() == Some(LinkError::PortUnavailable) {
            eprintln!("Use `lablink list-ports` to see available ports");
        }
        return Err(e.into());
    }
    Ok(())
}

fn run(cli: Cli, config: HostConfig) -> Result<(), HostError> {
    if !cli.command.needs_port() {
        return print_ports();
    }

    let name = config.port.name.as_deref().ok_or(HostError::NoPort)?;
    let transport = SerialTransport::open(name, &config.port.line)?;
    let port_name = transport.name().to_string();
    let mut client = LabClient::connect(transport, StdClock::new(), config.link)?;
    info!(port = %port_name, "board connected");

    match cli.command {
        CliCommand::Get { io_type, channel } => {
            println!("{}", client.get(io_type, channel)?);
        }
        CliCommand::Set {
            io_type,
            channel,
            value,
        } => {
            client.set(io_type, channel, value)?;
            println!("ok");
        }
        CliCommand::Percent { channel } => {
            println!("{:.1}", client.get_analog_percent(channel)?);
        }
        CliCommand::Accel => {
            let accel = client.get_accel()?;
            println!("{:+.3} {:+.3} {:+.3}", accel.x, accel.y, accel.z);
        }
        CliCommand::Monitor(args) => {
            let stop = Arc::new(AtomicBool::new(false));
            spawn_quit_listener(stop.clone());

            let mut app = MonitorApp::new(client, args.options());
            let frames = run_app(&mut app, &mut io::stdout(), args.frame_period(), &stop)?;
            let stats = app.client().stats();
            info!(
                frames,
                port = %port_name,
                exchanges = stats.exchanges,
                timeouts = stats.timeouts,
                discarded = stats.discarded_lines,
                "monitor stopped"
            );
        }
        CliCommand::ListPorts => {}
    }

    Ok(())
}

fn print_ports() -> Result<(), HostError> {
    let ports = list_ports()?;
    println!("Available serial ports:");
    if ports.is_empty() {
        println!("  (none)");
    }
    for port in ports {
        println!("  {}", port);
    }
    Ok(())
}
