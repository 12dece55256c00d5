// wordindex-cli: shared utilities for CLI tools.

pub mod dot;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use wordindex::{Document, WordIndex};

/// Document extension searched for when `--extension` is not given.
pub const DEFAULT_EXTENSION: &str = "html";

/// Index file written into the scanned directory.
pub const DEFAULT_INDEX_FILE: &str = "index.txt";

/// Environment variable holding the default worker count.
pub const WORKERS_ENV: &str = "WORDINDEX_WORKERS";

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Remove every occurrence of a boolean flag.
///
/// Returns `(present, remaining_args)`.
pub fn take_flag(args: &[String], names: &[&str]) -> (bool, Vec<String>) {
    let mut present = false;
    let mut remaining = Vec::new();
    for arg in args {
        if names.contains(&arg.as_str()) {
            present = true;
        } else {
            remaining.push(arg.clone());
        }
    }
    (present, remaining)
}

/// Remove a `--long=VALUE`, `--long VALUE` or `-s VALUE` option.
///
/// The last occurrence wins. Returns `(value, remaining_args)`.
pub fn take_option(
    args: &[String],
    long: &str,
    short: Option<&str>,
) -> Result<(Option<String>, Vec<String>), String> {
    let prefix = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || short.is_some_and(|s| arg == s) {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

fn parse_workers(value: &str, origin: &str) -> Result<usize, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid worker count {value:?} in {origin}"))
}

// ---------------------------------------------------------------------------
// Scan options
// ---------------------------------------------------------------------------

/// Options of the `wordindex` tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extension (without the dot) of the documents to index.
    pub extension: String,
    /// Name of the index file, relative to the scanned directory.
    pub output: String,
    /// Also write `nfa.dot` and `dfa.dot`.
    pub dot: bool,
    /// Worker threads; 0 uses every CPU, 1 scans on the calling thread.
    pub workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            output: DEFAULT_INDEX_FILE.to_string(),
            dot: false,
            workers: 0,
        }
    }
}

impl ScanOptions {
    /// Parse options from `args`, falling back to [`WORKERS_ENV`] for the
    /// worker count. Returns the options and the positional arguments.
    pub fn from_args(args: &[String]) -> Result<(Self, Vec<String>), String> {
        let env = std::env::var(WORKERS_ENV).ok();
        Self::parse(args, env.as_deref())
    }

    /// Like [`from_args`](Self::from_args) with the environment value given
    /// explicitly. Flags take precedence over the environment.
    pub fn parse(args: &[String], env_workers: Option<&str>) -> Result<(Self, Vec<String>), String> {
        let mut options = Self::default();

        if let Some(value) = env_workers {
            options.workers = parse_workers(value, WORKERS_ENV)?;
        }

        let (dot, args) = take_flag(args, &["--dot"]);
        options.dot = dot;

        let (workers, args) = take_option(&args, "--workers", Some("-j"))?;
        if let Some(value) = workers {
            options.workers = parse_workers(&value, "--workers")?;
        }

        let (extension, args) = take_option(&args, "--extension", Some("-e"))?;
        if let Some(value) = extension {
            let value = value.trim_start_matches('.');
            if value.is_empty() {
                return Err("--extension must not be empty".to_string());
            }
            options.extension = value.to_string();
        }

        let (output, args) = take_option(&args, "--output", Some("-o"))?;
        if let Some(value) = output {
            options.output = value;
        }

        if let Some(unknown) = args.iter().find(|a| a.starts_with('-') && a.len() > 1) {
            return Err(format!("unknown option {unknown}"));
        }

        Ok((options, args))
    }
}

// ---------------------------------------------------------------------------
// Input and output files
// ---------------------------------------------------------------------------

/// Locate the word list: taken as given if it exists, otherwise relative to
/// `dir`. Only `.txt` files are accepted.
pub fn resolve_word_list(dir: &Path, file: &str) -> Result<PathBuf, String> {
    let given = PathBuf::from(file);
    if given.extension().is_none_or(|ext| ext != "txt") {
        return Err(format!("invalid word list {file}: expected a .txt file"));
    }
    if given.is_file() {
        return Ok(given);
    }
    let in_dir = dir.join(file);
    if in_dir.is_file() {
        return Ok(in_dir);
    }
    Err(format!("word list {file} not found"))
}

/// Read one word per line. Surrounding whitespace (line terminators
/// included) is trimmed and blank lines are skipped.
pub fn read_words_from<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

pub fn read_words(path: &Path) -> Result<Vec<String>, String> {
    let file =
        File::open(path).map_err(|e| format!("failed to open {}: {}", path.display(), e))?;
    read_words_from(BufReader::new(file))
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))
}

/// Every file under `dir` (recursively) with the given extension, sorted.
///
/// Documents are named by their path relative to `dir`, with `/` as the
/// separator.
pub fn find_documents(dir: &Path, extension: &str) -> Result<Vec<Document>, String> {
    let pattern = format!("**/*.{extension}");
    let walker = globwalk::GlobWalkerBuilder::new(dir, &pattern)
        .file_type(globwalk::FileType::FILE)
        .build()
        .map_err(|e| format!("invalid document pattern {pattern}: {e}"))?;

    let mut documents = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| format!("failed to list {}: {}", dir.display(), e))?;
        let path = entry.path().to_path_buf();
        let name = document_name(dir, &path);
        documents.push(Document::new(name, path));
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(documents)
}

/// Path of `path` relative to `dir`, `/`-separated.
pub fn document_name(dir: &Path, path: &Path) -> String {
    let relative = match path.strip_prefix(dir) {
        Ok(relative) => relative.to_path_buf(),
        // The walker may report canonical paths
        Err(_) => std::fs::canonicalize(dir)
            .ok()
            .and_then(|canonical| path.strip_prefix(canonical).ok().map(Path::to_path_buf))
            .unwrap_or_else(|| path.to_path_buf()),
    };
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn write_index(path: &Path, index: &WordIndex) -> Result<(), String> {
    let file =
        File::create(path).map_err(|e| format!("failed to create {}: {}", path.display(), e))?;
    index
        .write_to(BufWriter::new(file))
        .map_err(|e| format!("failed to write {}: {}", path.display(), e))
}

/// Initialise logging from `RUST_LOG`, showing warnings by default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn take_option_forms() {
        let (value, rest) = take_option(&args(&["a", "--workers=3", "b"]), "--workers", None).unwrap();
        assert_eq!(value.as_deref(), Some("3"));
        assert_eq!(rest, args(&["a", "b"]));

        let (value, rest) = take_option(&args(&["-j", "2", "a"]), "--workers", Some("-j")).unwrap();
        assert_eq!(value.as_deref(), Some("2"));
        assert_eq!(rest, args(&["a"]));

        assert!(take_option(&args(&["--workers"]), "--workers", None).is_err());
    }

    #[test]
    fn scan_options_defaults() {
        let (options, rest) = ScanOptions::parse(&args(&["dir", "words.txt"]), None).unwrap();
        assert_eq!(options, ScanOptions::default());
        assert_eq!(rest, args(&["dir", "words.txt"]));
    }

    #[test]
    fn scan_options_flags_override_env() {
        let (options, _) = ScanOptions::parse(&args(&["d", "w.txt"]), Some("3")).unwrap();
        assert_eq!(options.workers, 3);

        let argv = args(&["--dot", "d", "--workers", "2", "-e", ".htm", "-o", "out.txt", "w.txt"]);
        let (options, rest) = ScanOptions::parse(&argv, Some("3")).unwrap();
        assert_eq!(
            options,
            ScanOptions {
                extension: "htm".to_string(),
                output: "out.txt".to_string(),
                dot: true,
                workers: 2,
            }
        );
        assert_eq!(rest, args(&["d", "w.txt"]));
    }

    #[test]
    fn scan_options_errors() {
        assert!(ScanOptions::parse(&args(&["--workers", "many"]), None).is_err());
        assert!(ScanOptions::parse(&args(&[]), Some("x")).is_err());
        assert!(ScanOptions::parse(&args(&["--bogus"]), None).is_err());
        assert!(ScanOptions::parse(&args(&["--extension", "."]), None).is_err());
    }

    #[test]
    fn words_skip_blank_lines() {
        let words = read_words_from("cat\r\n\ndog\n  \nbird".as_bytes()).unwrap();
        assert_eq!(words, args(&["cat", "dog", "bird"]));
    }

    #[test]
    fn words_are_trimmed() {
        let words = read_words_from("cat \n\tdog\t\r\n bird \n".as_bytes()).unwrap();
        assert_eq!(words, args(&["cat", "dog", "bird"]));
        assert!(wordindex::Indexer::new(&words).is_ok());
    }

    #[test]
    fn word_list_must_be_txt() {
        assert!(resolve_word_list(Path::new("."), "words.csv").is_err());
        assert!(resolve_word_list(Path::new("."), "words").is_err());
    }

    #[test]
    fn documents_are_found_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::fs::create_dir_all(dir.join("sub/deeper")).unwrap();
        std::fs::create_dir_all(dir.join("folder.html")).unwrap();
        std::fs::write(dir.join("b.html"), "").unwrap();
        std::fs::write(dir.join("a.html"), "").unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();
        std::fs::write(dir.join("sub/deeper/c.html"), "").unwrap();

        let found = find_documents(dir, "html").unwrap();
        let names: Vec<&str> = found.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.html", "b.html", "sub/deeper/c.html"]);
        assert!(found.iter().all(|d| d.path.is_file()));

        let found = find_documents(dir, "txt").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "notes.txt");
    }

    #[test]
    fn document_names_are_relative() {
        let dir = Path::new("/data/site");
        assert_eq!(
            document_name(dir, Path::new("/data/site/blog/post.html")),
            "blog/post.html"
        );
    }
}
