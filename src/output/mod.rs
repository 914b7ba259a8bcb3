//! Output formatting for CLI display
//!
//! This module renders list rows and favorite records for the terminal.
//! In quiet mode only tab-separated `id<TAB>title` lines are produced.

use colored::Colorize;

use crate::favorites::FavoriteRecord;
use crate::list::{ListMode, PhotoRow};

/// Marker shown next to favorited photos
pub const FAVORITE_MARK: &str = "★";
/// Marker shown next to other photos
pub const PLAIN_MARK: &str = "☆";

/// Format a list row with its favorite mark
#[must_use]
pub fn photo_row(row: &PhotoRow, quiet: bool) -> String {
    let photo = &row.photo;
    if quiet {
        return format!("{}\t{}", photo.id, photo.title);
    }

    let mark = if row.is_favorite {
        FAVORITE_MARK.yellow().to_string()
    } else {
        PLAIN_MARK.dimmed().to_string()
    };
    let thumbnail = photo
        .thumbnail_url
        .as_ref()
        .map_or_else(|| "(no image)".to_string(), ToString::to_string);

    format!(
        "  {mark} {:>5}  {}  {}",
        photo.id,
        photo.title,
        format!("[album {}] {thumbnail}", photo.album_id).dimmed()
    )
}

/// Heading for a list, e.g. `Photo List (25 of 50)`
#[must_use]
pub fn list_header(mode: ListMode, shown: usize, loaded: usize) -> String {
    if shown == loaded {
        format!("{} ({loaded})", mode.title()).bold().to_string()
    } else {
        format!("{} ({shown} of {loaded})", mode.title()).bold().to_string()
    }
}

/// Format a stored favorite with the date it was added
#[must_use]
pub fn favorite_record(record: &FavoriteRecord, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", record.id, record.title);
    }
    let added = record
        .favorited_at()
        .map_or_else(|| "unknown".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string());
    format!("  {} {:>5}  {}  {}", FAVORITE_MARK.yellow(), record.id, record.title, format!("added {added}").dimmed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::Photo;

    #[test]
    fn test_quiet_row() {
        let row = PhotoRow::new(Photo::new(1, 7, "officia porro"), true);
        assert_eq!(photo_row(&row, true), "7\tofficia porro");
    }

    #[test]
    fn test_row_shows_mark_and_title() {
        let row = PhotoRow::new(Photo::new(1, 7, "officia porro"), true);
        let line = photo_row(&row, false);
        assert!(line.contains(FAVORITE_MARK));
        assert!(line.contains("officia porro"));
        assert!(line.contains("(no image)"));

        let row = PhotoRow::new(
            Photo::new(2, 8, "natus").with_urls(None, Some("https://dummyimage.com/150/d32776")),
            false,
        );
        let line = photo_row(&row, false);
        assert!(line.contains(PLAIN_MARK));
        assert!(line.contains("https://dummyimage.com/150/d32776"));
    }

    #[test]
    fn test_list_header() {
        assert!(list_header(ListMode::All, 25, 25).contains("Photo List (25)"));
        assert!(list_header(ListMode::Favorite, 2, 5).contains("Photo List (Favorite) (2 of 5)"));
    }

    #[test]
    fn test_favorite_record_date() {
        let record = FavoriteRecord {
            album_id: 1,
            id: 3,
            title: "qui".into(),
            url: None,
            thumbnail_url: None,
            favorited_at: 0,
        };
        assert!(favorite_record(&record, false).contains("added 1970-01-01 00:00"));
        assert_eq!(favorite_record(&record, true), "3\tqui");
    }
}
