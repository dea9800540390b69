use std::collections::BTreeMap;

use super::{ImportOptions, TextItem, MAX_GAP_SPACES};

/// Tallest run of a page, the first one on ties
pub fn largest_text(items: &[TextItem]) -> Option<&TextItem> {
    let mut largest: Option<&TextItem> = None;
    for item in items {
        let height = largest.map_or(0.0, |l| l.height);
        if item.height > height {
            largest = Some(item);
        }
    }
    largest
}

/// Average width of one character over the runs of a line.
///
/// Falls back to the configured width when the runs report no usable width.
fn average_char_width(items: &[&TextItem], options: &ImportOptions) -> f64 {
    let (width, chars) = items
        .iter()
        .filter(|item| !item.text.is_empty())
        .fold((0.0, 0usize), |(width, chars), item| {
            (width + item.width, chars + item.text.chars().count())
        });
    let average = width / chars as f64;
    if chars > 0 && average.is_finite() && average > 0.0 {
        average
    } else {
        options.fallback_char_width
    }
}

/// Join the runs of one line left to right, turning gaps into spaces
fn join_line(items: &[&TextItem], options: &ImportOptions) -> String {
    let char_width = average_char_width(items, options);
    let mut line = String::new();
    let mut last_end = 0.0;
    for item in items {
        if last_end > 0.0 && item.x > last_end {
            let gap = item.x - last_end;
            if gap > char_width * options.min_gap_ratio {
                let spaces = ((gap / char_width).round() as usize).clamp(1, MAX_GAP_SPACES);
                line.push_str(&" ".repeat(spaces));
            }
        }
        line.push_str(&item.text);
        last_end = item.x + item.width;
    }
    line
}

/// Rebuild the text lines of a page, top to bottom.
///
/// Runs whose `y` rounds to the same multiple of the Y tolerance form one
/// line; within a line they are ordered by `x`.
pub fn reconstruct_lines(items: &[TextItem], options: &ImportOptions) -> Vec<String> {
    let mut rows: BTreeMap<i64, Vec<&TextItem>> = BTreeMap::new();
    for item in items {
        let bucket = (item.y / options.y_tolerance).round() as i64;
        rows.entry(bucket).or_default().push(item);
    }

    rows.into_values()
        .rev()
        .map(|mut row| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            join_line(&row, options)
        })
        .collect()
}
