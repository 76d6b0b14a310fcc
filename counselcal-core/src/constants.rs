//! Shared constants.

/// Zero date the spreadsheet anchors time-only serials to.
pub const SHEET_EPOCH_DATE: &str = "1899-12-30";

/// UTC offset in hours applied to time-only serials when none is configured (KST).
pub const DEFAULT_TZ_OFFSET_HOURS: i64 = 9;
