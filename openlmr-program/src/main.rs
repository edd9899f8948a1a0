mod config;
mod image;

use std::{fs, path::PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use config::ProgramConfig;
use dfu_libusb::{Dfu, DfuLibusb};
use log::info;
use openlmr_autozone::{
    active_zone, get_zone_data_for_index, initialize, is_valid, AutoZoneType, BAND_PLANS,
};
use openlmr_codeplug::{
    channel::{LmrBandwidth, LmrChannel},
    zone::LmrZone,
};
use tokio::time::{sleep, Duration};

#[derive(Debug, Clone, Parser)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List the built-in autozone band plans.
    Plans,
    /// List stored and virtual zones in zone list order.
    Zones,
    /// Print every channel an autozone generates.
    Channels {
        #[arg(value_parser = parse_zone_type)]
        zone_type: AutoZoneType,
    },
    /// Write the stored channels to a flash image file.
    Image {
        #[arg(long)]
        out: PathBuf,
    },
    /// Download the stored channels to a radio in DFU mode.
    Download {
        #[arg(long, default_value = "0483:df11", value_parser = parse_vid_pid)]
        device: (u16, u16),
    },
}

fn parse_zone_type(s: &str) -> Result<AutoZoneType, String> {
    s.parse().map_err(|_| format!("unknown autozone `{}`", s))
}

pub fn parse_vid_pid(s: &str) -> Result<(u16, u16)> {
    let (vid, pid) = s
        .split_once(':')
        .context("could not parse VID/PID (missing `:')")?;
    let vid = u16::from_str_radix(vid, 16).context("could not parse VID")?;
    let pid = u16::from_str_radix(pid, 16).context("could not parse PID")?;

    Ok((vid, pid))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match &args.command {
        Command::Plans => print_plans(),
        Command::Channels { zone_type } => print_channels(*zone_type)?,
        Command::Zones => print_zones(&load_config(&args)?),
        Command::Image { out } => {
            let config = load_config(&args)?;
            let flash = image::build_image(&config.codeplug).await?;
            fs::write(out, flash.image())
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(
                "wrote {} channels to {}",
                config.codeplug.channels.len(),
                out.display()
            );
        }
        Command::Download { device: (vid, pid) } => {
            let config = load_config(&args)?;
            let flash = image::build_image(&config.codeplug).await?;
            download(*vid, *pid, flash.image()).await?;
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<ProgramConfig> {
    let path = args.config.as_ref().context("--config is required")?;
    ProgramConfig::load(path)
}

fn print_plans() {
    println!(
        "{} of {} autozones enabled",
        openlmr_autozone::count_enabled(),
        BAND_PLANS.len()
    );
    for plan in &BAND_PLANS {
        println!(
            "{:<12} {:<8} {:>4} ch  {}..{} Hz  {}",
            plan.zone_type.as_str(),
            plan.name,
            plan.total_channels(),
            plan.start_frequency,
            plan.end_frequency,
            if plan.flags.enabled { "enabled" } else { "disabled" },
        );
    }
}

fn print_channels(zone_type: AutoZoneType) -> Result<()> {
    initialize(zone_type);
    if !is_valid() {
        bail!("autozone {} is not enabled", zone_type);
    }
    let plan = active_zone().plan().map_err(|err| anyhow!("{}", err))?;

    let mut channel = LmrChannel::default();
    for index in 0..plan.total_channels() {
        if !openlmr_autozone::get_channel_data(index, &mut channel) {
            continue;
        }
        println!(
            "{:>4}  {:<14} rx {:>11}  tx {:>11}  {:?} {}  {}",
            index,
            channel.name,
            channel.freq,
            channel.transmit_freq(),
            channel.mode,
            match channel.bandwidth {
                LmrBandwidth::Narrow => "narrow",
                LmrBandwidth::Wide => "wide",
            },
            match (channel.rxonly, channel.power_limit) {
                (true, _) => "rx only".to_string(),
                (false, Some(limit)) => format!("{} mW", limit.milliwatts()),
                (false, None) => "full power".to_string(),
            },
        );
    }
    Ok(())
}

fn print_zones(config: &ProgramConfig) {
    let slots = config.zone_slots();
    let mut zone = LmrZone::default();
    for slot in 0..slots.len() {
        if let Some(stored) = config.codeplug.zones.get(slot) {
            println!("{:>3}  {:<12} {:>4} ch", slot, stored.name, stored.channel_count());
        } else if get_zone_data_for_index(&slots[..], slot, &mut zone) {
            println!(
                "{:>3}  {:<12} {:>4} ch  (auto)",
                slot,
                zone.name,
                zone.channel_count()
            );
        }
    }
}

async fn download(vid: u16, pid: u16, image: &[u8]) -> Result<()> {
    let context = rusb::Context::new().context("could not create USB context")?;

    let mut device: Dfu<rusb::Context> =
        DfuLibusb::open(&context, vid, pid, 0, 0).context("could not open device")?;

    sleep(Duration::from_millis(100)).await;

    device.usb_reset().context("could not reset device")?;

    sleep(Duration::from_millis(100)).await;

    println!("Downloading to device");
    device.download_from_slice(image).context("download failed")?;
    Ok(())
}
