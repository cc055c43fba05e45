//! Command-line parsing for the interactive prompt.

use atlas_core::CountryFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleSort,
    Filter(CountryFilter),
    /// Page number exactly as typed, so 1-based.
    Page(usize),
    Help,
    Quit,
}

/// Parse one non-empty input line. The error string is the hint shown to
/// the user.
pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_ascii_lowercase();
    let arg = words.next();

    match head.as_str() {
        "sort" | "s" => Ok(Command::ToggleSort),
        "filter" | "f" => match arg.map(str::to_ascii_lowercase).as_deref() {
            Some("all") | Some("none") => Ok(Command::Filter(CountryFilter::All)),
            Some("oceania") => Ok(Command::Filter(CountryFilter::Oceania)),
            Some("small") => Ok(Command::Filter(CountryFilter::SmallerThanLithuania)),
            Some(other) => Err(format!(
                "unknown filter `{other}`; expected all, oceania or small"
            )),
            None => Err("filter takes an argument: all, oceania or small".to_string()),
        },
        "page" | "p" => match arg.map(str::parse::<usize>) {
            Some(Ok(page)) if page >= 1 => Ok(Command::Page(page)),
            Some(_) => Err("page numbers start at 1".to_string()),
            None => Err("page takes a number, e.g. `page 2`".to_string()),
        },
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`; try `help`")),
    }
}
