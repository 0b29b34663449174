use std::time::Instant;

use assetr_common::config::Config;
use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::CanonicalDeviceRecord;
use assetr_core::query::{self, Entity, QueryExpression, SortSpec};
use colored::*;
use serde::Serialize;
use tracing::warn;

use crate::commands::{ListArgs, load_working_set};
use crate::mprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print};

/// How a record type is drawn in the terminal.
trait Listing: Entity + Serialize {
    fn title(&self) -> String;
    fn details(&self) -> Vec<Detail>;
    fn line(&self) -> String;
}

impl Listing for CanonicalDeviceRecord {
    fn title(&self) -> String {
        format::device_title(self)
    }

    fn details(&self) -> Vec<Detail> {
        format::device_details(self)
    }

    fn line(&self) -> String {
        format::device_line(self)
    }
}

impl Listing for AssetRecord {
    fn title(&self) -> String {
        self.name.clone()
    }

    fn details(&self) -> Vec<Detail> {
        format::asset_details(self)
    }

    fn line(&self) -> String {
        format::asset_line(self)
    }
}

pub async fn devices(args: ListArgs, cfg: &Config) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let set = load_working_set(&args.file, cfg).await?;
    let records = set.device_records();
    show(&records, &args, cfg, start_time)
}

pub async fn assets(args: ListArgs, cfg: &Config) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let set = load_working_set(&args.file, cfg).await?;
    show(set.assets(), &args, cfg, start_time)
}

fn show<T: Listing>(records: &[T], args: &ListArgs, cfg: &Config, start_time: Instant) -> anyhow::Result<()> {
    warn_on_unknown_fields::<T>(args);

    let sort = args.sort.as_ref().map(|key| {
        let spec = SortSpec::ascending(key.as_str());
        if args.desc { spec.toggled() } else { spec }
    });
    let matched: Vec<&T> = query::search(records, &args.query, sort.as_ref());

    if args.json {
        print::print(&serde_json::to_string_pretty(&matched)?);
        return Ok(());
    }

    let noun = format!("{}s", T::KIND);
    if matched.is_empty() {
        print::no_results(&noun);
        return Ok(());
    }

    for (idx, record) in matched.iter().enumerate() {
        match cfg.quiet {
            0 | 1 => {
                print::tree_head(idx, &record.title());
                print::as_tree_one_level(record.details());
                if idx + 1 != matched.len() {
                    mprint!();
                }
            }
            _ => print::print(&record.line()),
        }
    }

    print_summary(matched.len(), records.len(), &noun, start_time, cfg);
    Ok(())
}

fn warn_on_unknown_fields<T: Entity>(args: &ListArgs) {
    if let QueryExpression::FieldQuery { field, .. } = query::parse(&args.query) {
        if T::registry().get(&field).is_none() {
            warn!("'{field}' is not a {} field, nothing will match", T::KIND);
        }
    }
    if let Some(key) = &args.sort {
        if T::registry().get(key).is_none() {
            warn!("cannot sort by unknown field '{key}', keeping original order");
        }
    }
}

fn print_summary(shown: usize, total: usize, noun: &str, start_time: Instant, cfg: &Config) {
    let shown: ColoredString = shown.to_string().bold().green();
    let elapsed: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Showing {shown} of {total} {noun} in {elapsed}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        1 => {
            mprint!();
            print::print_status(output.to_string());
        }
        _ => {}
    }
}
