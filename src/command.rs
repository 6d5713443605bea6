//! Command-line parsing for the browser prompt.
//!
//! Keywords are case-sensitive. Exact keywords are matched before prefixed
//! forms; commands that take an argument need a space and a non-empty
//! argument, otherwise the line is unknown.

/// Help text printed for unrecognised input.
pub const USAGE: &str = "Unknown command. Use: search <term>, ddg <query>, xkcd [num], hn, quote, \
joke, weather <place>, define <word>, price <symbols>, stock <symbols>, time [zone], ip, cat, \
advice, reload, or quit.";

/// A parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Empty or whitespace-only input.
    Blank,
    /// Set the encyclopedia term (spaces become underscores) and show it.
    Search(String),
    /// Show the current encyclopedia term again.
    Reload,
    Quit,
    /// Instant answer; also becomes the current term.
    Ddg(String),
    /// Numbered comic, or the latest.
    Xkcd(Option<u32>),
    Hn,
    Quote,
    Joke,
    Cat,
    Advice,
    Ip,
    Weather(String),
    Define(String),
    /// Raw ticker list, split by the adapter.
    Price(String),
    /// Raw symbol list, split by the adapter.
    Stock(String),
    /// Time in a zone, or in the zone resolved from this machine's IP.
    Time(Option<String>),
    /// Anything else, trimmed.
    Unknown(String),
}

impl Command {
    /// Parse one line of input.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Blank;
        }

        match line {
            "reload" => return Self::Reload,
            "quit" => return Self::Quit,
            "hn" => return Self::Hn,
            "quote" => return Self::Quote,
            "joke" => return Self::Joke,
            "cat" => return Self::Cat,
            "advice" => return Self::Advice,
            "ip" => return Self::Ip,
            "time" => return Self::Time(None),
            _ => {}
        }

        if let Some(term) = argument(line, "search ") {
            return Self::Search(term.replace(' ', "_"));
        }
        if let Some(query) = argument(line, "ddg ") {
            return Self::Ddg(query.to_string());
        }
        if let Some(place) = argument(line, "weather ") {
            return Self::Weather(place.to_string());
        }
        if let Some(word) = argument(line, "define ") {
            return Self::Define(word.to_string());
        }
        if let Some(symbols) = argument(line, "price ") {
            return Self::Price(symbols.to_string());
        }
        if let Some(symbols) = argument(line, "stock ") {
            return Self::Stock(symbols.to_string());
        }
        if let Some(zone) = argument(line, "time ") {
            return Self::Time(Some(zone.to_string()));
        }
        if line.starts_with("xkcd") {
            return Self::Xkcd(comic_number(line));
        }

        Self::Unknown(line.to_string())
    }
}

/// The trimmed text after `prefix`, if any.
fn argument<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(prefix)?.trim();
    (!rest.is_empty()).then_some(rest)
}

/// `xkcd <digits>` selects a comic; any other shape, or comic 0, means the latest.
fn comic_number(line: &str) -> Option<u32> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [_, number] if number.chars().all(|c| c.is_ascii_digit()) => {
            number.parse().ok().filter(|&n| n != 0)
        }
        _ => None,
    }
}
