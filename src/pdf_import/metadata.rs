use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use serde::Serialize;

use super::ImportOptions;

const ARTIST_PREFIX_PATTERN: &str = r"(?i)^(por |by |de |composición de:)";
const METADATA_KEYWORD_PATTERN: &str = r"(?i)^(capo|tono|key|traste|afinación)";
const CAPO_PATTERN: &str = r"(?i)^(capo|capo en traste|transportar|transporte|traste)\s*:?\s*(\d+)";
const KEY_PATTERN: &str = r"(?i)^(tono|tonalidad|key)\s*:?\s*([A-G](?:#|b)?m?)";
const TUNING_PATTERN: &str = r"(?i)E\s*A\s*D\s*G\s*B\s*E";

static ARTIST_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
static METADATA_KEYWORD_REGEX: OnceLock<Regex> = OnceLock::new();
static CAPO_REGEX: OnceLock<Regex> = OnceLock::new();
static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
static TUNING_REGEX: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid regex pattern"))
}

/// Song details found outside the body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SongMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub capo: Option<i32>,
}

fn strip_artist_prefix(line: &str) -> &str {
    let prefix = regex(&ARTIST_PREFIX_REGEX, ARTIST_PREFIX_PATTERN);
    match prefix.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

fn is_tuning_banner(line: &str) -> bool {
    regex(&TUNING_REGEX, TUNING_PATTERN).is_match(line) || line.to_lowercase().contains("afinación")
}

/// Pull title, artist, key and capo out of the lines.
///
/// Returns the details and the lines left for the body. Lines that only
/// repeat the title or artist are dropped too, as are tuning banners.
pub(super) fn strip_metadata<'a>(
    lines: &'a [String],
    title: Option<&str>,
    options: &ImportOptions,
) -> (SongMetadata, Vec<&'a str>) {
    let title = title.map(str::trim).filter(|title| !title.is_empty());
    let mut metadata = SongMetadata {
        title: title.map(str::to_string),
        ..SongMetadata::default()
    };
    let mut removed = vec![false; lines.len()];

    let title_index = title.and_then(|title| lines.iter().position(|line| line.trim().contains(title)));
    if let Some(index) = title_index {
        removed[index] = true;
    }

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || removed[index] {
            continue;
        }

        if let Some(title_index) = title_index.filter(|_| metadata.artist.is_none()) {
            let in_window = index > title_index && index <= title_index + options.artist_window;
            if in_window
                && !regex(&METADATA_KEYWORD_REGEX, METADATA_KEYWORD_PATTERN).is_match(trimmed)
                && regex(&ARTIST_PREFIX_REGEX, ARTIST_PREFIX_PATTERN).is_match(trimmed)
            {
                let artist = strip_artist_prefix(trimmed);
                debug!("artist line {}: {:?}", index, artist);
                metadata.artist = Some(artist.to_string());
                removed[index] = true;
                continue;
            }
        }

        if let Some(caps) = regex(&CAPO_REGEX, CAPO_PATTERN).captures(trimmed) {
            if let Some(capo) = caps.get(2).and_then(|m| m.as_str().parse().ok()) {
                debug!("capo line {}: {}", index, capo);
                metadata.capo = Some(capo);
                removed[index] = true;
                continue;
            }
        }

        if let Some(key) = regex(&KEY_REGEX, KEY_PATTERN).captures(trimmed).and_then(|caps| caps.get(2)) {
            debug!("key line {}: {}", index, key.as_str());
            metadata.key = Some(key.as_str().to_string());
            removed[index] = true;
            continue;
        }

        let lower = trimmed.to_lowercase();
        let echoes_title = title.map_or(false, |title| lower == title.to_lowercase());
        let echoes_artist = metadata
            .artist
            .as_ref()
            .map_or(false, |artist| strip_artist_prefix(&lower) == artist.to_lowercase());
        if echoes_title || echoes_artist {
            debug!("dropping repeated title/artist line {}", index);
            removed[index] = true;
            continue;
        }

        if is_tuning_banner(trimmed) {
            debug!("dropping tuning line {}", index);
            removed[index] = true;
        }
    }

    let body = lines
        .iter()
        .zip(&removed)
        .filter(|(_, removed)| !**removed)
        .map(|(line, _)| line.as_str())
        .collect();
    (metadata, body)
}
