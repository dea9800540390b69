use super::*;
use pretty_assertions::assert_eq;

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|line| line.to_string()).collect()
}

fn defaults() -> ImportOptions {
    ImportOptions::default()
}

#[test]
fn test_reconstruct_lines_groups_by_y() {
    let items = vec![
        TextItem::new("Hello", 10.0, 700.0, 25.0, 12.0),
        TextItem::new("Next", 10.0, 680.0, 20.0, 12.0),
        TextItem::new("world", 40.0, 701.0, 25.0, 12.0),
    ];
    assert_eq!(reconstruct_lines(&items, &defaults()), vec!["Hello world", "Next"]);
}

#[test]
fn test_reconstruct_lines_orders_by_x() {
    let items = vec![
        TextItem::new("world", 40.0, 500.0, 25.0, 12.0),
        TextItem::new("Hello", 10.0, 500.0, 25.0, 12.0),
    ];
    assert_eq!(reconstruct_lines(&items, &defaults()), vec!["Hello world"]);
}

#[test]
fn test_reconstruct_lines_gap_width() {
    // 5 units per character, a 25 unit gap is five spaces
    let items = vec![
        TextItem::new("C", 10.0, 400.0, 5.0, 10.0),
        TextItem::new("G", 40.0, 400.0, 5.0, 10.0),
    ];
    assert_eq!(reconstruct_lines(&items, &defaults()), vec!["C     G"]);
}

#[test]
fn test_reconstruct_lines_ignores_tiny_gaps() {
    let items = vec![
        TextItem::new("Hel", 10.0, 400.0, 15.0, 10.0),
        TextItem::new("lo", 25.5, 400.0, 10.0, 10.0),
    ];
    assert_eq!(reconstruct_lines(&items, &defaults()), vec!["Hello"]);
}

#[test]
fn test_reconstruct_lines_zero_width_runs() {
    // No usable width: the fallback width gives 30 / 4 = 7.5, rounded to 8
    let items = vec![
        TextItem::new("C", 10.0, 400.0, 0.0, 10.0),
        TextItem::new("G", 40.0, 400.0, 0.0, 10.0),
    ];
    assert_eq!(reconstruct_lines(&items, &defaults()), vec!["C        G"]);
}

#[test]
fn test_reconstruct_lines_caps_gap_spaces() {
    let items = vec![
        TextItem::new("C", 10.0, 400.0, 1e-300, 10.0),
        TextItem::new("G", 40.0, 400.0, 1e-300, 10.0),
    ];
    let lines = reconstruct_lines(&items, &defaults());
    assert_eq!(lines, vec![format!("C{}G", " ".repeat(MAX_GAP_SPACES))]);
}

#[test]
fn test_import_pages_with_zero_widths() {
    let page = PageText {
        items: vec![
            TextItem::new("Title", 10.0, 700.0, 0.0, 20.0),
            TextItem::new("Am", 10.0, 680.0, 0.0, 10.0),
            TextItem::new("la la", 10.0, 660.0, 0.0, 10.0),
        ],
    };
    let song = import_pages(&[page], &defaults());
    assert_eq!(song.content, "{title: Title}\n\n[Am]la la");
}

#[test]
fn test_pages_from_yaml() {
    let yaml = "- items:\n    - {text: G, x: 10, y: 400, width: 5, height: 10}\n";
    let pages = pages_from_yaml(yaml).unwrap();
    assert_eq!(pages[0].items[0], TextItem::new("G", 10.0, 400.0, 5.0, 10.0));

    let err = pages_from_yaml("- items: nope\n").unwrap_err();
    assert!(matches!(err, ChordSheetError::PageText(_)));
    assert!(err.to_string().starts_with("Invalid page text: "));
}

#[test]
fn test_reconstruct_lines_empty_page() {
    assert!(reconstruct_lines(&[], &defaults()).is_empty());
}

#[test]
fn test_largest_text_first_wins() {
    let items = vec![
        TextItem::new("small", 0.0, 0.0, 10.0, 8.0),
        TextItem::new("Title", 0.0, 0.0, 10.0, 20.0),
        TextItem::new("Other", 0.0, 0.0, 10.0, 20.0),
    ];
    assert_eq!(largest_text(&items).map(|item| item.text.as_str()), Some("Title"));
    assert!(largest_text(&[]).is_none());
}

#[test]
fn test_is_chord() {
    let options = defaults();
    for chord in ["C", "Am", "F#m7", "Bbmaj7", "G/B", "C7(9)", "Dsus4", "Am7/E", "am"] {
        assert!(is_chord(chord, &options), "{}", chord);
    }
    for word in ["Hello", "day", "C(add9)(11)", "Em7b5", "H7"] {
        assert!(!is_chord(word, &options), "{}", word);
    }
}

#[test]
fn test_is_chord_line() {
    let options = defaults();
    assert!(is_chord_line("C   G   Am   F", &options));
    assert!(is_chord_line("C G Am word", &options));
    assert!(!is_chord_line("Let it be", &options));
    assert!(!is_chord_line("Esta es una línea de letra", &options));
    assert!(!is_chord_line("A day", &options));
    assert!(!is_chord_line("   ", &options));
}

#[test]
fn test_chord_line_ratio_is_tunable() {
    let options = ImportOptions {
        chord_line_ratio: 0.4,
        ..ImportOptions::default()
    };
    assert!(is_chord_line("A day", &options));
}

#[test]
fn test_separate_concatenated_chords() {
    assert_eq!(separate_concatenated_chords("AmGC"), "Am G C");
    assert_eq!(separate_concatenated_chords("Cmaj7Dm7G7"), "Cmaj7 Dm7 G7");
    assert_eq!(separate_concatenated_chords("C7(9)F/A"), "C7(9) F/A");
    assert_eq!(separate_concatenated_chords("Hello"), "Hello");
    assert_eq!(separate_concatenated_chords("Amazing"), "Amazing");
    assert_eq!(separate_concatenated_chords("C G"), "C G");
}

#[test]
fn test_section_heading() {
    let options = defaults();
    assert_eq!(section_heading("[Coro]", &options).as_deref(), Some("Coro"));
    assert_eq!(section_heading("Intro:", &options).as_deref(), Some("Intro"));
    assert_eq!(section_heading("  CHORUS 2 ", &options).as_deref(), Some("CHORUS 2"));
    assert_eq!(section_heading("Primeira parte", &options).as_deref(), Some("Primeira parte"));
    assert_eq!(section_heading("Chords:", &options).as_deref(), Some("Chords"));
    assert_eq!(section_heading("[Bridge]", &options).as_deref(), Some("Bridge"));
    assert_eq!(section_heading("Hello", &options), None);
    assert_eq!(section_heading("Verse one is about a very long story", &options), None);
}

#[test]
fn test_merge_aligns_chords_to_words() {
    assert_eq!(
        merge_chord_line("C       G", "Hello there world", &defaults()),
        "[C]Hello [G]there world"
    );
}

#[test]
fn test_merge_shared_position() {
    assert_eq!(merge_chord_line("C G", "Hi there", &defaults()), "[C][G]Hi there");
}

#[test]
fn test_merge_trailing_chord() {
    let chord_line = format!("{}D", " ".repeat(20));
    assert_eq!(merge_chord_line(&chord_line, "short line", &defaults()), "short line [D]");
    assert_eq!(merge_chord_line(&chord_line, "line ", &defaults()), "line [D]");
}

#[test]
fn test_merge_chord_over_last_word() {
    let chord_line = format!("{}D", " ".repeat(9));
    assert_eq!(merge_chord_line(&chord_line, "short line", &defaults()), "short [D]line");
}

#[test]
fn test_merge_counts_characters_not_bytes() {
    let chord_line = format!("{}G", " ".repeat(10));
    assert_eq!(merge_chord_line(&chord_line, "Canção a b", &defaults()), "Canção a [G]b");
}

#[test]
fn test_merge_without_words_or_chords() {
    assert_eq!(merge_chord_line("C   G", "   ", &defaults()), "[C] [G]");
    assert_eq!(merge_chord_line("xyz", "la la", &defaults()), "la la");
}

#[test]
fn test_import_full_sheet() {
    let sheet = lines(&[
        "Cielito Lindo",
        "por Quirino Mendoza",
        "Tono: D",
        "Capo: 2",
        "Afinación: E A D G B E",
        "",
        "Intro:",
        "D  A7  D",
        "",
        "[Coro]",
        "D           A7",
        "Ay ay ay ay canta y no llores",
        "Cielito Lindo",
        "Acordes",
        "D A7 G",
    ]);
    let song = import_lines(&sheet, Some("Cielito Lindo"), &defaults());

    assert_eq!(song.title.as_deref(), Some("Cielito Lindo"));
    assert_eq!(song.artist.as_deref(), Some("Quirino Mendoza"));
    assert_eq!(song.key.as_deref(), Some("D"));
    assert_eq!(song.capo, Some(2));
    assert_eq!(
        song.content,
        "{title: Cielito Lindo}\n{artist: Quirino Mendoza}\n{key: D}\n{capo: 2}\n\n\
         # Intro\n[D] [A7] [D]\n\n# Coro\n[D]Ay ay ay ay [A7]canta y no llores"
    );
}

#[test]
fn test_import_without_metadata() {
    let song = import_lines(&lines(&["G C", "hello world"]), None, &defaults());
    assert_eq!(song.content, "[G][C]hello world");
    assert_eq!(
        song,
        ImportedSong {
            content: "[G][C]hello world".to_string(),
            ..ImportedSong::default()
        }
    );
}

#[test]
fn test_import_zero_capo_not_written() {
    let song = import_lines(&lines(&["Capo: 0", "la la"]), None, &defaults());
    assert_eq!(song.capo, Some(0));
    assert_eq!(song.content, "la la");
}

#[test]
fn test_import_concatenated_chords() {
    let song = import_lines(&lines(&["AmGC", "la la la"]), None, &defaults());
    assert_eq!(song.content, "[Am]la [G][C]la la");
}

#[test]
fn test_import_consecutive_chord_lines() {
    let song = import_lines(&lines(&["C G", "Am F", "words here"]), None, &defaults());
    assert_eq!(song.content, "[C] [G]\n[Am]words [F]here");
}

#[test]
fn test_import_artist_needs_prefix_near_title() {
    let song = import_lines(&lines(&["Song", "Some Band", "lyrics"]), Some("Song"), &defaults());
    assert_eq!(song.artist, None);
    assert_eq!(song.content, "{title: Song}\n\nSome Band\nlyrics");

    let song = import_lines(&lines(&["Song", "", "", "by Someone"]), Some("Song"), &defaults());
    assert_eq!(song.artist, None);
    assert_eq!(song.content, "{title: Song}\n\nby Someone");
}

#[test]
fn test_import_long_acordes_line_is_a_heading() {
    let song = import_lines(&lines(&["Acordes usados na música", "la"]), None, &defaults());
    assert_eq!(song.content, "# Acordes usados na música\nla");
}

#[test]
fn test_import_pages() {
    let first = PageText {
        items: vec![
            TextItem::new("My Song", 50.0, 780.0, 70.0, 24.0),
            TextItem::new("by Me", 50.0, 760.0, 25.0, 12.0),
            TextItem::new("G", 50.0, 740.0, 5.0, 10.0),
            TextItem::new("C", 80.0, 740.0, 5.0, 10.0),
            TextItem::new("Sing a song", 50.0, 728.0, 55.0, 10.0),
        ],
    };
    let second = PageText {
        items: vec![TextItem::new("Huge", 50.0, 780.0, 40.0, 40.0)],
    };

    let song = import_pages(&[first, second], &defaults());
    assert_eq!(song.title.as_deref(), Some("My Song"));
    assert_eq!(song.artist.as_deref(), Some("Me"));
    assert_eq!(
        song.content,
        "{title: My Song}\n{artist: Me}\n\n[G]Sing [C]a song\nHuge"
    );
}

#[test]
fn test_import_options_yaml() {
    let options = ImportOptions::from_yaml("chord-line-ratio: 0.5\nmax-heading-len: 12\n").unwrap();
    assert_eq!(options.chord_line_ratio, 0.5);
    assert_eq!(options.max_heading_len, 12);
    assert_eq!(options.y_tolerance, Y_TOLERANCE);

    let err = ImportOptions::from_yaml("chord-line-ratio: lots\n").unwrap_err();
    assert!(matches!(err, ChordSheetError::Library(_)));
}

#[test]
fn test_import_is_repeatable() {
    let sheet = lines(&["Title", "by X", "C  G", "one two"]);
    let first = import_lines(&sheet, Some("Title"), &defaults());
    let second = import_lines(&sheet, Some("Title"), &defaults());
    assert_eq!(first, second);
}
