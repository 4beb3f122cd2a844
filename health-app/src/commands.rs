// SPDX-License-Identifier: GPL-3.0-only

//! Subcommand implementations wiring the panel to the UDisks2 client.

use anyhow::{Result, bail};
use futures::StreamExt;
use health_panel::{PanelMessage, PanelState, TestAction, TestCommand, update, view};
use health_types::{DriveSummary, SelfTestKind};
use health_udisks::HealthOps;
use zbus::Connection;

use crate::config::Config;
use crate::render::render_block;

pub async fn list(connection: &Connection, json: bool) -> Result<()> {
    let drives = health_udisks::list_drives(connection).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&drives)?);
        return Ok(());
    }

    if drives.is_empty() {
        println!("No drives found");
        return Ok(());
    }

    print_summary_table(&drives);
    Ok(())
}

fn print_summary_table(drives: &[DriveSummary]) {
    let device_width = drives
        .iter()
        .map(|d| d.device.len())
        .max()
        .unwrap_or(0)
        .max("DEVICE".len());
    let model_width = drives
        .iter()
        .map(|d| d.model.len())
        .max()
        .unwrap_or(0)
        .max("MODEL".len());

    println!(
        "{:<device_width$}  {:<model_width$}  {:<10}  SERIAL",
        "DEVICE", "MODEL", "CLASS"
    );
    for drive in drives {
        let class = match drive.class {
            Some(health_types::DeviceClass::Rotational) => "rotational",
            Some(health_types::DeviceClass::SolidState) => "solid-state",
            None => "-",
        };
        println!(
            "{:<device_width$}  {:<model_width$}  {:<10}  {}",
            drive.device, drive.model, class, drive.serial
        );
    }
}

pub async fn show(
    connection: &Connection,
    config: &Config,
    device: &str,
    refresh: bool,
    json: bool,
) -> Result<()> {
    let drive_path = health_udisks::drive_object_path_for_device(connection, device).await?;

    if refresh || config.refresh_on_show {
        health_udisks::refresh_smart(connection, &drive_path).await?;
    }

    let record = health_udisks::read_health_record(connection, &drive_path).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let state = PanelState::with_record(record);
    print!("{}", render_block(&view(&state, &config.display_options())));
    Ok(())
}

pub async fn watch(connection: &Connection, config: &Config, device: &str) -> Result<()> {
    let drive_path = health_udisks::drive_object_path_for_device(connection, device).await?;
    let options = config.display_options();

    let mut state = PanelState::with_record(
        health_udisks::read_health_record(connection, &drive_path).await?,
    );
    print!("{}", render_block(&view(&state, &options)));

    let mut stream = health_udisks::record_stream(connection, drive_path).await?;
    while let Some(record) = stream.next().await {
        update(&mut state, PanelMessage::RecordUpdated(record));
        println!();
        print!("{}", render_block(&view(&state, &options)));
    }

    Ok(())
}

pub async fn test_start(ops: &dyn HealthOps, device: &str, kind: SelfTestKind) -> Result<()> {
    let action = match kind {
        SelfTestKind::Short => TestAction::RunShort,
        SelfTestKind::Extended => TestAction::RunExtended,
        SelfTestKind::Conveyance => TestAction::RunConveyance,
    };
    run_action(ops, device, action).await
}

pub async fn test_abort(ops: &dyn HealthOps, device: &str) -> Result<()> {
    run_action(ops, device, TestAction::Abort).await
}

/// Drive the controller with the chosen action against the current record,
/// then execute whatever command it produces. A gated-out action exits with
/// the controller's notice text.
async fn run_action(ops: &dyn HealthOps, device: &str, action: TestAction) -> Result<()> {
    let record = ops.read_record(device).await?;

    let mut state = PanelState::with_record(record);
    let Some(command) = update(&mut state, PanelMessage::ActionSelected(action)) else {
        let reason = state
            .notices
            .last()
            .map(|n| n.text.clone())
            .unwrap_or_else(|| "Action not available".to_string());
        bail!("{reason}");
    };

    let result = match command {
        TestCommand::Start(kind) => ops.start_selftest(device, kind).await,
        TestCommand::Abort => ops.abort_selftest(device).await,
    };

    if let Err(e) = result {
        update(
            &mut state,
            PanelMessage::CommandFinished {
                command,
                error: Some(e.to_string()),
            },
        );
        let notice = state
            .notices
            .last()
            .map(|n| n.text.clone())
            .unwrap_or_else(|| e.to_string());
        bail!("{notice}");
    }

    println!("{} requested for {}", command.describe(), device);
    Ok(())
}
