//! Daily-note reader: turns a directory of `YYYY-MM-DD.md` files into
//! snapshots for the carry-over tracker.

use std::path::Path;

use daybook_core::DailyAgendaSnapshot;
use time::macros::format_description;
use time::{Date, Duration};

use crate::error::{Result, StoreError};

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<Date> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| StoreError::InvalidDate(s.to_string()))
}

/// Read the notes dated within `lookback_days` days ending with `today`,
/// most recent first. Files whose stem is not a date are skipped.
pub fn read_snapshots(
    dir: &Path,
    today: Date,
    lookback_days: u32,
) -> Result<Vec<DailyAgendaSnapshot>> {
    if !dir.is_dir() {
        return Err(StoreError::MissingNotesDir(dir.to_path_buf()));
    }
    if lookback_days == 0 {
        return Ok(Vec::new());
    }
    // A window reaching past the calendar's start reads everything.
    let earliest = today
        .checked_sub(Duration::days(i64::from(lookback_days) - 1))
        .unwrap_or(Date::MIN);

    let mut dated = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Ok(date) = parse_date(stem) else {
            tracing::debug!(file = %path.display(), "skipping note without a date name");
            continue;
        };
        if date < earliest || date > today {
            continue;
        }
        dated.push((date, stem.to_string(), path));
    }

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut snapshots = Vec::with_capacity(dated.len());
    for (_, stem, path) in dated {
        let content = std::fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        snapshots.push(DailyAgendaSnapshot::from_content(stem, content));
    }
    tracing::debug!(count = snapshots.len(), dir = %dir.display(), "read daily notes");
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn reads_window_most_recent_first() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        write(dir, "2024-01-01.md", "- [ ] old\n");
        write(dir, "2024-01-05.md", "- [ ] a\n");
        write(dir, "2024-01-04.md", "- [ ] b\n- [x] c\n");
        write(dir, "2024-01-07.md", "- [ ] future\n");
        write(dir, "README.md", "not a note");
        write(dir, "2024-01-03.txt", "wrong extension");

        let today = parse_date("2024-01-06").unwrap();
        let snaps = read_snapshots(dir, today, 3).unwrap();
        let dates: Vec<&str> = snaps.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-05", "2024-01-04"]);
        assert_eq!(snaps[1].tasks.len(), 2);
    }

    #[test]
    fn zero_lookback_reads_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "2024-01-05.md", "- [ ] a\n");
        let today = parse_date("2024-01-05").unwrap();
        assert!(read_snapshots(tmp.path(), today, 0).unwrap().is_empty());
        assert_eq!(read_snapshots(tmp.path(), today, 1).unwrap().len(), 1);
    }

    #[test]
    fn huge_lookback_reads_everything() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "1999-12-31.md", "- [ ] a\n");
        write(tmp.path(), "2024-01-05.md", "- [ ] b\n");
        let today = parse_date("2024-01-05").unwrap();
        let snaps = read_snapshots(tmp.path(), today, u32::MAX).unwrap();
        let dates: Vec<&str> = snaps.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-05", "1999-12-31"]);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let today = parse_date("2024-01-05").unwrap();
        let err = read_snapshots(&tmp.path().join("nope"), today, 7).unwrap_err();
        assert!(matches!(err, StoreError::MissingNotesDir(_)));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(matches!(parse_date("soon"), Err(StoreError::InvalidDate(_))));
    }
}
