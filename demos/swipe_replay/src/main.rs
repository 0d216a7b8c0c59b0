use std::path::PathBuf;

use anyhow::{Context, bail};
use serde::Deserialize;
use tabswipe::{EngineConfig, FnFactory, TabContentEngine};
use tabswipe_core::{ContentError, FlowDirection, InputEvent, LayoutContext, PointerAction, Vec2};
use web_time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);
const DEFAULT_SCRIPT: &str = include_str!("../script.json");

#[derive(Deserialize)]
struct Script {
    slots: usize,
    slot_width: f32,
    #[serde(default)]
    flow: FlowDirection,
    #[serde(default)]
    hidden: Vec<usize>,
    /// Tabs every `SelectionChanging` listener refuses.
    #[serde(default)]
    veto: Vec<usize>,
    #[serde(default)]
    config: EngineConfig,
    events: Vec<ScriptEvent>,
}

#[derive(Deserialize)]
struct ScriptEvent {
    action: PointerAction,
    x: f32,
    at_ms: u64,
}

fn load_script() -> anyhow::Result<Script> {
    let (source, text) = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => ("built-in script".to_owned(), DEFAULT_SCRIPT.to_owned()),
    };
    let script: Script =
        serde_json::from_str(&text).with_context(|| format!("parsing {source}"))?;
    log::info!("replaying {source}: {} events", script.events.len());
    Ok(script)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let script = load_script()?;
    if script.events.windows(2).any(|w| w[1].at_ms < w[0].at_ms) {
        bail!("script events must be ordered by at_ms");
    }

    let factory = FnFactory(|i: usize| {
        log::info!("building content for tab {i}");
        Ok::<_, ContentError>(format!("tab {i}"))
    });
    let mut tabs = TabContentEngine::new(factory, script.slots, script.config)
        .context("engine configuration")?
        .with_layout(LayoutContext::new(script.slot_width, script.flow));
    for &i in &script.hidden {
        tabs.set_slot_visible(i, false);
    }

    let veto = script.veto.clone();
    tabs.on_selection_changing(move |ev| {
        if veto.contains(&ev.proposed_index) {
            log::info!("vetoed {} -> {}", ev.old_index, ev.proposed_index);
            ev.cancel = true;
        }
    });
    tabs.on_selection_changed(|ev| {
        log::info!(
            "selected {:?} -> {} ({:?})",
            ev.old_index,
            ev.new_index,
            ev.new_content
        );
    });

    let start = Instant::now();
    let mut clock = start;
    for event in &script.events {
        let at = start + Duration::from_millis(event.at_ms);
        while clock + FRAME < at {
            clock += FRAME;
            if tabs.tick(clock) {
                log::debug!("frame {:?}: x={:.1}", clock - start, tabs.translation_x());
            }
        }
        clock = at;
        tabs.dispatch(InputEvent::new(event.action, Vec2::new(event.x, 0.0), at));
        log::info!(
            "{:?} at {:.1} ({} ms): x={:.1} phase={:?} direction={:?}",
            event.action,
            event.x,
            event.at_ms,
            tabs.translation_x(),
            tabs.phase(),
            tabs.direction()
        );
    }

    // Let the last settle run out, bounded in case of a runaway spring.
    for _ in 0..600 {
        clock += FRAME;
        if !tabs.tick(clock) {
            break;
        }
    }

    println!(
        "selected={:?} translation={:.1} materialized={}/{}",
        tabs.selected_index(),
        tabs.translation_x(),
        tabs.materialized_count(),
        tabs.slot_count()
    );
    Ok(())
}
