use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use timeblock_core::TimeblockEditor;

use crate::render::{OutputFormat, print_blocks};

pub fn run(
    editor: &TimeblockEditor,
    selection: &[DateTime<FixedOffset>],
    format: OutputFormat,
) -> Result<()> {
    let blocks = editor.build_timeblocks_from_range(selection);
    print_blocks(&blocks, format)
}
