use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset};
use owo_colors::OwoColorize;
use timeblock_core::store::TimeblockStore;
use timeblock_core::{Timeblock, TimeblockEditor};
use tracing::info;

use crate::render::{OutputFormat, print_blocks};

pub fn run(
    store: &TimeblockStore,
    editor: &TimeblockEditor,
    selection: &[DateTime<FixedOffset>],
    format: OutputFormat,
) -> Result<()> {
    let incoming = incoming_blocks(editor, selection);
    if incoming.is_empty() {
        bail!("Selection covers no time. Pick an end after the start.");
    }

    let existing = store.load()?;
    let merged = editor.add_timeblocks(&existing, &incoming);
    store.save(&merged)?;

    info!(added = incoming.len(), stored = merged.len(), "added timeblocks");

    if format == OutputFormat::Text {
        println!(
            "{}",
            format!("  Added {} block(s), {} stored", incoming.len(), merged.len()).green()
        );
    }
    print_blocks(&merged, format)
}

/// A lone instant adds the slot it starts; a start/end pair expands per day.
fn incoming_blocks(editor: &TimeblockEditor, selection: &[DateTime<FixedOffset>]) -> Vec<Timeblock> {
    match selection {
        [only] => editor.slot_at(only),
        _ => editor.build_timeblocks_from_range(selection),
    }
}
