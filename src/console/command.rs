//! Parsing of interactive command lines

use crate::core::types::Address;

/// One operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Clear,
    Print,
    Regions,
    Reload,
    Dump { address: Address, length: usize },
    SetWidth(String),
    Find(String),
    Write { index: usize, value: String },
    /// Known verb with unusable arguments
    Invalid(String),
}

pub const HELP: &str = "\
help,h                 show this help
quit,q                 exit
clear,c                clear scan results
print,p                print scan results
pmap,regions           print scannable regions
reload                 re-enumerate regions
mem <addr> <len>       dump <len> raw bytes at hex <addr>
set,s <bits>           set scan width (8,16,32,64), default 32
find,f <value>         scan, or narrow existing results
write,w <idx> <value>  write value to result <idx> (trailing f or '.' writes a float)
";

impl Command {
    /// Parses one input line; `None` for a blank line
    ///
    /// Unknown verbs and wrong argument counts map to [`Command::Help`].
    pub fn parse(line: &str) -> Option<Command> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        let command = match fields.as_slice() {
            [] => return None,
            ["help" | "h"] => Command::Help,
            ["quit" | "q"] => Command::Quit,
            ["clear" | "c"] => Command::Clear,
            ["print" | "p"] => Command::Print,
            ["pmap" | "regions"] => Command::Regions,
            ["reload"] => Command::Reload,
            ["set" | "s", bits] => Command::SetWidth(bits.to_string()),
            ["find" | "f", value] => Command::Find(value.to_string()),
            ["write" | "w", index, value] => match index.parse() {
                Ok(index) => Command::Write {
                    index,
                    value: value.to_string(),
                },
                Err(_) => Command::Invalid(format!("invalid result index '{index}'")),
            },
            ["mem", address, length] => match (Address::parse_hex(address), length.parse()) {
                (Ok(address), Ok(length)) => Command::Dump { address, length },
                (Err(e), _) => Command::Invalid(e.to_string()),
                (_, Err(_)) => Command::Invalid(format!("invalid length '{length}'")),
            },
            _ => Command::Help,
        };

        Some(command)
    }
}
