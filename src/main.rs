use std::env;
use std::fs;
use std::process;

use chordsheet::{pdf_import, ChordLibrary, ChordOrder, ChordShape, ChordSheetError, ImportOptions, Notation};

const USAGE: &str = "Usage: chordsheet parse <song.cho>
       chordsheet transpose <semitones> <song.cho> [--flats]
       chordsheet chords <song.cho> [--sorted]
       chordsheet name \"<shape>\" [--flats] [--key <key>] [--library <chords.yaml>]
       chordsheet import <pages.yaml> [--options <options.yaml>]";

fn usage() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(1);
        }
    }
}

/// Value following a `--flag`, if the flag is present
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .map(|i| args.get(i + 1).map(String::as_str).unwrap_or_else(|| usage()))
}

fn notation(args: &[String]) -> Notation {
    if args.iter().any(|arg| arg == "--flats") {
        Notation::Flats
    } else {
        Notation::Sharps
    }
}

fn run(args: &[String]) -> Result<String, ChordSheetError> {
    let command = args.first().map(String::as_str).unwrap_or_else(|| usage());
    let rest = &args[1..];

    match (command, rest.first()) {
        ("parse", Some(path)) => {
            let song = chordsheet::parse(&read_file(path));
            Ok(serde_yaml::to_string(&song)?)
        }
        ("transpose", Some(semitones)) => {
            let semitones: i32 = semitones
                .parse()
                .map_err(|_| ChordSheetError::InvalidArgument(format!("'{}' is not a number of semitones", semitones)))?;
            let path = rest.get(1).unwrap_or_else(|| usage());
            Ok(chordsheet::transpose_chordpro(&read_file(path), semitones, notation(rest)))
        }
        ("chords", Some(path)) => {
            let order = if rest.iter().any(|arg| arg == "--sorted") {
                ChordOrder::Sorted
            } else {
                ChordOrder::FirstSeen
            };
            Ok(chordsheet::extract_unique(&read_file(path), order).join("\n"))
        }
        ("name", Some(shape)) => {
            let shape: ChordShape = shape.parse()?;
            let library = match flag_value(rest, "--library") {
                Some(path) => ChordLibrary::from_yaml(&read_file(path))?,
                None => ChordLibrary::new(),
            };
            let name = library.name_for_shape(&shape, notation(rest), flag_value(rest, "--key"));
            Ok(name.unwrap_or_else(|| "(no sounded strings)".to_string()))
        }
        ("import", Some(path)) => {
            let pages = pdf_import::pages_from_yaml(&read_file(path))?;
            let options = match flag_value(rest, "--options") {
                Some(path) => ImportOptions::from_yaml(&read_file(path))?,
                None => ImportOptions::default(),
            };
            Ok(chordsheet::import_pages(&pages, &options).content)
        }
        _ => usage(),
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match run(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
