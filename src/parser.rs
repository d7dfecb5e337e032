use pest::iterators::Pairs;
use pest::Parser;
use thiserror::Error;

#[derive(pest_derive::Parser)]
#[grammar = "shell.pest"]
struct ShellParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("{0}")]
    Fatal(String),
}

/// A tokenized command: `argv[0]` is the command name, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    argv: Vec<String>,
}

impl CommandLine {
    pub fn new(argv: Vec<String>) -> Option<Self> {
        match argv.first() {
            Some(name) if !name.is_empty() => Some(Self { argv }),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

/// Whitespace-delimited words of a line. Cloning restarts the walk from the
/// clone point.
#[derive(Clone)]
pub struct Words<'a> {
    pairs: Pairs<'a, Rule>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.pairs
            .by_ref()
            .find(|pair| pair.as_rule() == Rule::word)
            .map(|pair| pair.as_str())
    }
}

pub fn words(line: &str) -> Result<Words<'_>, ParseError> {
    let pairs = ShellParser::parse(Rule::line, line)
        .map_err(|err| ParseError::Fatal(err.to_string()))?;
    Ok(Words { pairs })
}

pub fn parse(line: &str) -> Result<CommandLine, ParseError> {
    let argv = words(line)?.map(str::to_owned).collect();
    CommandLine::new(argv).ok_or(ParseError::Empty)
}
