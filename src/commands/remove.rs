use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use owo_colors::OwoColorize;
use timeblock_core::TimeblockEditor;
use timeblock_core::store::TimeblockStore;
use tracing::info;

use crate::render::{OutputFormat, print_blocks};

pub fn run(
    store: &TimeblockStore,
    editor: &TimeblockEditor,
    selection: &[DateTime<FixedOffset>],
    by_day: bool,
    offset: Option<FixedOffset>,
    format: OutputFormat,
) -> Result<()> {
    let existing = store.load()?;

    #[allow(deprecated)]
    let kept = if by_day {
        editor.remove_timeblocks(&existing, selection)
    } else {
        editor.time_matrix_remove_timeblocks(&existing, &slot_selection(editor, selection), offset)
    };
    store.save(&kept)?;

    info!(before = existing.len(), after = kept.len(), by_day, "removed selection");

    if format == OutputFormat::Text {
        let message = if kept == existing {
            "  Nothing to remove".dimmed().to_string()
        } else {
            format!("  Removed selection, {} block(s) left", kept.len())
                .yellow()
                .to_string()
        };
        println!("{message}");
    }
    print_blocks(&kept, format)
}

/// A lone instant stands for the slot it starts, as with `add`.
fn slot_selection(editor: &TimeblockEditor, selection: &[DateTime<FixedOffset>]) -> Vec<DateTime<FixedOffset>> {
    match selection {
        [only] => vec![*only, *only + editor.pad()],
        _ => selection.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeblock_core::Timeblock;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn store_with(blocks: &[Timeblock]) -> (tempfile::TempDir, TimeblockStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TimeblockStore::new(dir.path().join("blocks.json"));
        store.save(blocks).unwrap();
        (dir, store)
    }

    #[test]
    fn removes_window_from_store() {
        let (_dir, store) =
            store_with(&[Timeblock::parse("2024-01-02", "08:00:00+00", "12:00:00+00").unwrap()]);

        run(
            &store,
            &TimeblockEditor::new(),
            &[at("2024-01-02T10:00:00Z"), at("2024-01-02T13:45:00Z")],
            false,
            None,
            OutputFormat::Json,
        )
        .unwrap();

        assert_eq!(
            store.load().unwrap(),
            vec![Timeblock::parse("2024-01-02", "08:00:00+00", "10:00:00+00").unwrap()]
        );
    }

    #[test]
    fn single_instant_removes_its_slot() {
        let (_dir, store) =
            store_with(&[Timeblock::parse("2024-01-02", "09:00:00+00", "10:00:00+00").unwrap()]);

        run(
            &store,
            &TimeblockEditor::new(),
            &[at("2024-01-02T09:30:00Z")],
            false,
            None,
            OutputFormat::Json,
        )
        .unwrap();

        assert_eq!(
            store.load().unwrap(),
            vec![
                Timeblock::parse("2024-01-02", "09:00:00+00", "09:30:00+00").unwrap(),
                Timeblock::parse("2024-01-02", "09:45:00+00", "10:00:00+00").unwrap(),
            ]
        );
    }

    #[test]
    fn window_ends_at_selected_clock() {
        let (_dir, store) =
            store_with(&[Timeblock::parse("2024-01-02", "13:00:00+00", "16:00:00+00").unwrap()]);

        run(
            &store,
            &TimeblockEditor::new(),
            &[at("2024-01-02T10:00:00Z"), at("2024-01-02T14:00:00Z")],
            false,
            None,
            OutputFormat::Json,
        )
        .unwrap();

        assert_eq!(
            store.load().unwrap(),
            vec![Timeblock::parse("2024-01-02", "14:00:00+00", "16:00:00+00").unwrap()]
        );
    }

    #[test]
    fn by_day_uses_day_span() {
        let (_dir, store) =
            store_with(&[Timeblock::parse("2024-01-02", "08:00:00+00", "12:00:00+00").unwrap()]);

        run(
            &store,
            &TimeblockEditor::new(),
            &[at("2024-01-02T10:00:00Z"), at("2024-01-02T10:45:00Z")],
            true,
            None,
            OutputFormat::Json,
        )
        .unwrap();

        assert_eq!(
            store.load().unwrap(),
            vec![
                Timeblock::parse("2024-01-02", "08:00:00+00", "10:00:00+00").unwrap(),
                Timeblock::parse("2024-01-02", "11:00:00+00", "12:00:00+00").unwrap(),
            ]
        );
    }
}
