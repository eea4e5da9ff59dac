use anyhow::Result;
use timeblock_core::store::TimeblockStore;

use crate::render::{OutputFormat, print_blocks};

pub fn run(store: &TimeblockStore, format: OutputFormat) -> Result<()> {
    let blocks = store.load()?;
    print_blocks(&blocks, format)
}
