// src/commands/format.rs
//! Rendering shared by the listing commands.

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::fs::FsStat;

pub const DEFAULT_DIR_MODE: u32 = 0o755;
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Ten-character permission string, e.g. `drwxr-xr-x`.
pub fn format_mode(mode: Option<u32>, is_dir: bool) -> String {
    let mode = mode.unwrap_or(if is_dir { DEFAULT_DIR_MODE } else { DEFAULT_FILE_MODE });
    let file_type = if is_dir { 'd' } else { '-' };

    let perms = [
        if mode & 0o400 != 0 { 'r' } else { '-' },
        if mode & 0o200 != 0 { 'w' } else { '-' },
        if mode & 0o100 != 0 { 'x' } else { '-' },
        if mode & 0o040 != 0 { 'r' } else { '-' },
        if mode & 0o020 != 0 { 'w' } else { '-' },
        if mode & 0o010 != 0 { 'x' } else { '-' },
        if mode & 0o004 != 0 { 'r' } else { '-' },
        if mode & 0o002 != 0 { 'w' } else { '-' },
        if mode & 0o001 != 0 { 'x' } else { '-' },
    ];

    format!("{}{}", file_type, perms.iter().collect::<String>())
}

/// `Mon DD HH:MM` in the local timezone.
pub fn format_time(mtime: SystemTime) -> String {
    format_time_in(mtime, &Local)
}

/// Shown for timestamps chrono cannot represent.
const UNKNOWN_TIME: &str = "??? ?? ??:??";

pub fn format_time_in<Tz: TimeZone>(mtime: SystemTime, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match to_datetime(mtime) {
        Some(dt) => dt.with_timezone(tz).format("%b %e %H:%M").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

fn to_datetime(mtime: SystemTime) -> Option<DateTime<Utc>> {
    let (secs, nanos) = match mtime.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => (-secs, 0),
                n => (-secs - 1, 1_000_000_000 - n),
            }
        }
    };
    DateTime::<Utc>::from_timestamp(secs, nanos)
}

/// Directory names get a trailing `/`.
pub fn display_name(name: &str, is_dir: bool) -> String {
    if is_dir {
        format!("{}/", name)
    } else {
        name.to_string()
    }
}

/// One `ls -l` line, without the trailing newline.
pub fn format_long_line(stat: &FsStat, name: &str) -> String {
    format_long_line_with(stat, name, format_time(stat.mtime))
}

fn format_long_line_with(stat: &FsStat, name: &str, time: String) -> String {
    format!(
        "{} 1 {:>8} {} {}",
        format_mode(stat.mode, stat.is_directory),
        stat.size,
        time,
        display_name(name, stat.is_directory)
    )
}
