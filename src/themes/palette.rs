use super::SegmentColor;

// Default palette, one entry per provider role.

pub const COLOR_SHELL_LEVEL: SegmentColor = SegmentColor::new(251, 240);
pub const COLOR_SUDO_ROOT: SegmentColor = SegmentColor::new(15, 196);
pub const COLOR_CMD_FAILED: SegmentColor = SegmentColor::new(15, 161);
pub const COLOR_NODEJS: SegmentColor = SegmentColor::new(255, 12);
pub const COLOR_PYTHON: SegmentColor = SegmentColor::new(255, 36);
pub const COLOR_GOLANG: SegmentColor = SegmentColor::new(255, 18);
pub const COLOR_DOCKER: SegmentColor = SegmentColor::new(189, 56);
pub const COLOR_READONLY_DIR: SegmentColor = SegmentColor::new(254, 124);
pub const COLOR_KERNEL: SegmentColor = SegmentColor::new(255, 25);
pub const COLOR_OFFLINE: SegmentColor = SegmentColor::new(255, 124);
pub const COLOR_VIRTUAL_ENV: SegmentColor = SegmentColor::new(0, 35);
pub const COLOR_TIME: SegmentColor = SegmentColor::new(250, 238);
pub const COLOR_GIT_CLEAN: SegmentColor = SegmentColor::new(0, 148);
pub const COLOR_GIT_DIRTY: SegmentColor = SegmentColor::new(15, 167);
pub const COLOR_HOME_DIR: SegmentColor = SegmentColor::new(15, 31);
pub const COLOR_PATH_DIR: SegmentColor = SegmentColor::new(250, 237);
pub const COLOR_LAST_DIR: SegmentColor = SegmentColor::new(254, 237);
pub const COLOR_DIR_SEP: SegmentColor = SegmentColor::new(244, 237);
pub const COLOR_SSH: SegmentColor = SegmentColor::new(254, 166);
pub const COLOR_USERNAME: SegmentColor = SegmentColor::new(254, 166);
