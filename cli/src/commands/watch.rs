use std::path::PathBuf;
use std::sync::Arc;

use assetr_common::config::Config;
use assetr_common::inventory::scan::ScanStatus;
use assetr_core::adapters::json_file::JsonScanStatusFile;
use assetr_core::polling::{PollOutcome, ScanPoller};
use colored::*;
use tokio::sync::mpsc;

use crate::terminal::{colors, print, spinner};

pub async fn watch(status_file: PathBuf, cfg: &Config) -> anyhow::Result<()> {
    let poller = ScanPoller::from_config(Arc::new(JsonScanStatusFile::new(status_file)), cfg);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = poller.spawn(tx);

    let spinner = spinner::start_spinner("Waiting for scan status...".to_string());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Some(status) => spinner.set_message(describe(&status)),
                None => break,
            },
            _ = &mut ctrl_c => {
                handle.cancel();
                break;
            }
        }
    }
    drop(spinner);

    match handle.join().await? {
        PollOutcome::Idle(status) => {
            let hosts = status
                .hosts_found
                .map(|n| format!(", {} hosts found", n.to_string().bold().green()))
                .unwrap_or_default();
            print::print_status(format!("{}{hosts}", "No scan running".green().bold()));
        }
        PollOutcome::Cancelled => {
            print::print_status("Stopped watching; the scan may still be running");
        }
    }
    if cfg.quiet == 0 {
        print::fat_separator();
    }
    Ok(())
}

fn describe(status: &ScanStatus) -> String {
    let id = status.scan_id.as_deref().unwrap_or("scan");
    let mut msg = format!("{} running", id.color(colors::PRIMARY));
    if let Some(progress) = status.progress {
        msg.push_str(&format!(" {}", format!("{progress:.0}%").bold().yellow()));
    }
    if let Some(hosts) = status.hosts_found {
        msg.push_str(&format!(", {} hosts so far", hosts.to_string().green().bold()));
    }
    msg
}
