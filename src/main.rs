// SPDX-License-Identifier: MPL-2.0
//! Demo: a spreadsheet upload posting a loading toast that turns into an
//! auto-dismissing success toast, printed as a renderer would see it.

use notification_store::config::{self, Config, StoreSettings};
use notification_store::diagnostics::{
    generate_default_filename, BufferCapacity, DiagnosticsCollector,
};
use notification_store::error::{Error, Result};
use notification_store::notifications::{
    Kind, NewNotification, NotificationPatch, Progress, Snapshot, Store,
};
use std::path::PathBuf;
use std::time::Duration;

const HELP: &str = "\
notification_store demo

USAGE:
  notification_store [OPTIONS]

OPTIONS:
  --config <path>       Read settings from this TOML file
  --duration-ms <n>     Auto-dismiss delay of the final toast [default: 10000]
  --work-ms <n>         Simulated upload time [default: 2000]
  --diagnostics <path>  Write the JSON diagnostics report here
  --save-diagnostics    Write the report to a timestamped file in the current directory
  -h, --help            Print help
";

const UPLOAD_STEPS: usize = 4;

struct Args {
    config: Option<PathBuf>,
    duration_ms: u64,
    work_ms: u64,
    diagnostics: Option<PathBuf>,
}

/// Falls back to defaults when the default config file cannot be read.
fn config_or_default(loaded: Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        eprintln!("Failed to load config, using defaults: {err}");
        Config::default()
    })
}

/// Picks where the diagnostics report goes, if anywhere. An explicit path wins.
fn diagnostics_target(explicit: Option<PathBuf>, save_default: bool) -> Option<PathBuf> {
    explicit.or_else(|| save_default.then(|| PathBuf::from(generate_default_filename())))
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let save_default = args.contains("--save-diagnostics");
    let parsed = Args {
        config: args.opt_value_from_str("--config")?,
        duration_ms: args.opt_value_from_str("--duration-ms")?.unwrap_or(10_000),
        work_ms: args.opt_value_from_str("--work-ms")?.unwrap_or(2_000),
        diagnostics: diagnostics_target(args.opt_value_from_str("--diagnostics")?, save_default),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        return Err(Error::Cli(format!("unexpected arguments: {remaining:?}")));
    }
    if parsed.duration_ms == 0 {
        return Err(Error::Cli("--duration-ms must be positive".to_string()));
    }
    Ok(Some(parsed))
}

fn print_snapshot(snapshot: &Snapshot) {
    if snapshot.is_empty() {
        println!("(no notifications)");
        return;
    }
    for notification in snapshot.iter() {
        let mut line = format!(
            "{} [{}] {}",
            notification.id(),
            notification.kind(),
            notification.title()
        );
        if let Some(message) = notification.message() {
            line.push_str(": ");
            line.push_str(message);
        }
        if let Some(progress) = notification.progress() {
            line.push_str(&format!(" ({:.0}%)", progress.value()));
        }
        if notification.dismissible() {
            line.push_str(" [x]");
        }
        println!("{line}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config_or_default(config::load()),
    };
    let settings = StoreSettings::from_config(&config);
    let mut collector =
        DiagnosticsCollector::new(BufferCapacity::new(settings.diagnostics_buffer_capacity()));
    let store = Store::builder()
        .settings(settings)
        .diagnostics(collector.handle())
        .build();

    let mut updates = store.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            print_snapshot(&snapshot);
            if snapshot.is_empty() {
                break;
            }
        }
    });

    let id = store.add(
        NewNotification::loading("Procesando archivo")
            .message("Cargando x.xlsx...")
            .dismissible(false)
            .persistent(),
    );

    let step = Duration::from_millis(args.work_ms) / UPLOAD_STEPS as u32;
    for done in 1..=UPLOAD_STEPS {
        tokio::time::sleep(step).await;
        store.set_progress(id, Progress::from_ratio(done, UPLOAD_STEPS));
    }

    store.update(
        id,
        NotificationPatch::resolve(Kind::Success, "Carga completada")
            .message("10 creados, 0 errores")
            .clear_progress()
            .dismissible(true)
            .duration(Duration::from_millis(args.duration_ms)),
    );

    if let Err(err) = renderer.await {
        eprintln!("Renderer task failed: {err}");
    }

    collector.process_pending();
    eprintln!("Recorded {} diagnostic events", collector.len());
    if let Some(path) = args.diagnostics {
        let written = collector.export_to_file(&path)?;
        eprintln!("Diagnostics written to: {:?}", written);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_diagnostics_path_wins() {
        let path = PathBuf::from("out/report.json");
        assert_eq!(diagnostics_target(Some(path.clone()), true), Some(path));
    }

    #[test]
    fn save_flag_falls_back_to_generated_filename() {
        let target = diagnostics_target(None, true).expect("target chosen");
        let name = target.to_string_lossy();
        assert!(name.starts_with("notification_store_diagnostics_"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let loaded = Err(Error::Io("permission denied".to_string()));
        assert_eq!(config_or_default(loaded), Config::default());
    }

    #[test]
    fn readable_config_is_kept() {
        let config = Config {
            max_visible: Some(5),
            ..Config::default()
        };
        assert_eq!(config_or_default(Ok(config.clone())), config);
    }

    #[test]
    fn no_diagnostics_without_path_or_flag() {
        assert_eq!(diagnostics_target(None, false), None);
    }
}
