use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ykpinonly")]
#[command(
    about = "Set a YubiKey with the factory-default PIN to PIN-protected pin-only mode",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Serial number of the YubiKey to provision (decimal, as printed on the key)
    pub serial: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .init();

    let serial = cli.serial.unwrap_or_default();
    ykpinonly::provision(&serial)
        .with_context(|| format!("failed to set YubiKey {} to PIN-protected mode", serial))?;

    info!("Done");
    Ok(())
}
