use brite::{Backend, BriteBuilder, BriteError, ValueSpec};

use clap::{Parser, Subcommand, ValueEnum};

/// Get and set display backlight brightness
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backlight device to target, defaults to the first one under
    /// /sys/class/backlight
    #[arg(long, value_name = "name")]
    device: Option<String>,

    /// How to apply brightness changes
    #[arg(long, value_enum, value_name = "backend")]
    backend: Option<BackendArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current brightness
    Get {
        #[arg(value_enum, default_value_t = Format::Percentage)]
        format: Format,
    },
    /// Set the brightness.
    ///
    /// VALUE is a raw value (200), a percentage (60%), or an increment or
    /// decrement in either unit (20+, 30-, 5%+, 10%-). The result is clamped
    /// to the device's range.
    Set {
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Percentage,
    Raw,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BackendArg {
    /// Ask logind to apply the value (no special permissions needed)
    Session,
    /// Write to the sysfs brightness file directly
    Direct,
}

impl From<BackendArg> for Backend {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::Session => Backend::Session,
            BackendArg::Direct => Backend::Direct,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), BriteError> {
    let mut builder = BriteBuilder::new();
    if let Some(device) = args.device.as_deref() {
        builder = builder.with_device(device);
    }
    if let Some(backend) = args.backend {
        builder = builder.with_backend(backend.into());
    }

    match args.command {
        Command::Get { format } => {
            let reading = builder.build().await?.read().await?;
            match format {
                Format::Percentage => println!("{}%", reading.percent()),
                Format::Raw => println!("{}", reading.current),
            }
        }
        Command::Set { value } => {
            // Parse before touching the device; a bad token must not reach it.
            let spec: ValueSpec = value.parse()?;
            builder.build().await?.set(&spec).await?;
        }
    }

    Ok(())
}
