use crate::{fs, Config};

use notify_debouncer_full::{
    new_debouncer,
    notify::{Event, EventKind, RecursiveMode},
    DebounceEventResult,
};
use std::sync::mpsc;
use std::time::Duration;

const DEBOUNCE_TIMEOUT: Duration = Duration::from_millis(500);

/// Rebuilds the shader directory whenever a source file changes.
///
/// Blocks until the watcher goes away. Failing rebuilds are logged and
/// watching continues.
pub fn watch(config: &Config) -> Result<(), anyhow::Error> {
    let (tx, rx) = mpsc::channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(DEBOUNCE_TIMEOUT, None, tx)?;
    debouncer.watch(&config.shader_dir, RecursiveMode::Recursive)?;
    log::info!("watching {} for changes", config.shader_dir.display());

    for result in rx {
        match result {
            Ok(events) => {
                if !events.iter().any(|event| is_source_change(event)) {
                    continue;
                }
                log::debug!("sources changed, rebuilding");
                if let Err(err) = crate::sync(config) {
                    log::error!("Error while rebuilding shaders: {err}");
                    log::error!("{err:#?}");
                }
            }
            Err(errors) => {
                for err in errors {
                    log::warn!("Error while watching shaders: {err}");
                }
            }
        }
    }
    Ok(())
}

/// Whether `event` touches a shader source, as opposed to our own output.
pub fn is_source_change(event: &Event) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant_kind && event.paths.iter().any(|path| !fs::is_spirv(path))
}
