use std::path::Path;

use assetr_common::config::Config;
use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::{CanonicalDeviceRecord, ConversionStatus};
use assetr_core::adapters::json_file::InventoryDocument;
use assetr_core::adapters::memory_sink::MemoryAssetSink;
use assetr_core::conversion::{AssetOverrides, BatchReport, ConversionCoordinator};
use assetr_core::query;
use assetr_core::selection::Selection;
use assetr_core::working_set::WorkingSet;
use colored::*;
use tracing::{info, warn};

use crate::commands::{ConvertArgs, load_working_set};
use crate::mprint;
use crate::terminal::{colors, print};

pub async fn convert(args: ConvertArgs, cfg: &Config) -> anyhow::Result<()> {
    let mut set = load_working_set(&args.file, cfg).await?;

    // the sink checks new assets against the ones already in the document
    let sink = MemoryAssetSink::with_assets(set.assets().to_vec());
    let coordinator = ConversionCoordinator::with_config(Box::new(sink), cfg);
    let overrides = overrides_from(&args);

    if let [device_id] = args.ids.as_slice() {
        let asset = coordinator.convert(&mut set, device_id, Some(&overrides)).await?;
        print_created(&asset);
        return persist(set, &args).await;
    }

    if args.name.is_some() {
        warn!("--name only applies to a single device and is ignored");
    }

    let mut selection = select(&set, &args);
    if selection.is_empty() {
        print::no_results("devices");
        return Ok(());
    }

    let report = coordinator
        .convert_batch(&mut set, &mut selection, Some(&overrides))
        .await;
    print_report(&report, cfg);

    if report.success_count > 0 {
        persist(set, &args).await?;
    }
    if !report.is_clean() {
        anyhow::bail!(
            "{} of {} conversions failed",
            report.failure_count,
            report.success_count + report.failure_count
        );
    }
    Ok(())
}

fn overrides_from(args: &ConvertArgs) -> AssetOverrides {
    AssetOverrides {
        name: args.name.clone(),
        description: args.description.clone(),
        is_managed: None,
        labels: None,
        location: args.location.clone(),
        department: args.department.clone(),
    }
}

/// Explicit ids are taken as given, so unknown ones are reported per item.
/// Otherwise every new device matching the query is picked.
fn select(set: &WorkingSet, args: &ConvertArgs) -> Selection {
    if !args.ids.is_empty() {
        return args.ids.iter().map(String::as_str).collect();
    }

    let records = set.device_records();
    let visible: Vec<&CanonicalDeviceRecord> = query::filter(&records, args.matching.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|record| record.status == ConversionStatus::New)
        .collect();

    let mut selection = Selection::new();
    selection.select_all(visible);
    selection
}

async fn persist(set: WorkingSet, args: &ConvertArgs) -> anyhow::Result<()> {
    if args.dry_run {
        info!("dry run, inventory left untouched");
        return Ok(());
    }

    let path: &Path = args.output.as_deref().unwrap_or(&args.file);
    InventoryDocument::from(set).save(path).await?;
    print::print_status(format!("Inventory written to {}", path.display()));
    Ok(())
}

fn print_created(asset: &AssetRecord) {
    print::print_status(format!(
        "{} {} {} {}",
        "Created".green().bold(),
        asset.name.color(colors::PRIMARY),
        asset.primary_ip.color(colors::IPV4_ADDR),
        format!("({})", asset.id).color(colors::SEPARATOR)
    ));
}

fn print_report(report: &BatchReport, cfg: &Config) {
    if cfg.quiet < 2 {
        for asset in &report.created {
            print_created(asset);
        }
        for err in &report.errors {
            print::print_status(format!(
                "{} {} {}",
                "Failed".red().bold(),
                err.item_id.color(colors::ACCENT),
                err.message
            ));
        }
    }

    let converted: ColoredString = report.success_count.to_string().bold().green();
    let failed: ColoredString = match report.failure_count {
        0 => "0".normal(),
        n => n.to_string().bold().red(),
    };
    let output = format!("Converted {converted} devices, {failed} failed");

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            print::print_status(output);
        }
    }
}
