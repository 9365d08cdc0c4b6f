#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Merge,
    NamesMatch,
    Check,
    DictionaryList,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "merge" => Command::Merge,
            "names.match" => Command::NamesMatch,
            "check" => Command::Check,
            "dictionary.list" => Command::DictionaryList,
            _ => Command::Unknown,
        }
    }
}
