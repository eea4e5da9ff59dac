/// Minutes a drag selection is rounded up by, so that the last picked slot
/// is included in full (one quarter-hour slot in the picker grid).
pub const SELECTION_PAD_MINUTES: i64 = 15;

/// File name of the global configuration, under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "timeblock";

/// Default location of the timeblock record file.
pub const DEFAULT_STORE_PATH: &str = "~/.timeblocks.json";
