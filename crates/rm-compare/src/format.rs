//! Episode display helpers

use regex::Regex;
use std::sync::OnceLock;

fn code_regex() -> &'static Regex {
    static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
    CODE_REGEX.get_or_init(|| Regex::new(r"^S([0-9]+)E([0-9]+)$").unwrap())
}

fn season_regex() -> &'static Regex {
    static SEASON_REGEX: OnceLock<Regex> = OnceLock::new();
    SEASON_REGEX.get_or_init(|| Regex::new(r"S([0-9]+)").unwrap())
}

/// Season digits of an episode code as written ("S01E05" gives "01")
pub(crate) fn season_digits(code: &str) -> Option<&str> {
    season_regex()
        .captures(code)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Season number of an episode code ("S03E07" gives 3)
pub fn season_number(code: &str) -> Option<u32> {
    season_digits(code)?.parse().ok()
}

/// Episode code for display
///
/// Well-formed codes (`S01E01`) are returned unchanged. Lowercase or
/// unpadded codes are normalized, anything else is passed through.
pub fn format_episode_code(code: &str) -> String {
    let trimmed = code.trim();
    let upper = trimmed.to_ascii_uppercase();

    match code_regex().captures(&upper) {
        Some(captures) => {
            let season: Option<u32> = captures[1].parse().ok();
            let episode: Option<u32> = captures[2].parse().ok();
            match (season, episode) {
                (Some(season), Some(episode)) => format!("S{:02}E{:02}", season, episode),
                _ => code.to_string(),
            }
        }
        None => code.to_string(),
    }
}

/// Air date for display; the API already sends a human readable date
pub fn format_air_date(air_date: &str) -> String {
    air_date.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_number() {
        assert_eq!(season_number("S01E01"), Some(1));
        assert_eq!(season_number("S05E10"), Some(5));
        assert_eq!(season_number("Pilot"), None);
    }

    #[test]
    fn test_season_digits_keep_padding() {
        assert_eq!(season_digits("S01E01"), Some("01"));
    }

    #[test]
    fn test_valid_code_is_unchanged() {
        assert_eq!(format_episode_code("S01E01"), "S01E01");
        assert_eq!(format_episode_code("S04E10"), "S04E10");
    }

    #[test]
    fn test_code_is_normalized() {
        assert_eq!(format_episode_code("s1e2"), "S01E02");
        assert_eq!(format_episode_code(" S03E07 "), "S03E07");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(format_episode_code("Special"), "Special");
        assert_eq!(format_episode_code(""), "");
    }

    #[test]
    fn test_air_date_is_unchanged() {
        assert_eq!(format_air_date("December 2, 2013"), "December 2, 2013");
        assert_eq!(format_air_date(""), "");
    }
}
