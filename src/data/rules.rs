use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::AppResult;

#[derive(Debug, Deserialize)]
struct RuleRow {
    antecedent: String,
}

/// Left-hand side of an association rule as stored in the rules table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Antecedent {
    /// A single item, or a value that could not be read as a collection
    Single(String),
    /// An encoded collection such as `['milk', 'bread']`
    Items(Vec<String>),
}

impl Antecedent {
    /// Parses a stored antecedent.
    ///
    /// A bracketed list, tuple or set of quoted strings becomes `Items`.
    /// Everything else, including collections that fail to parse, falls back
    /// to `Single` holding the trimmed raw text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        match parse_collection(trimmed) {
            Some(items) => Antecedent::Items(items),
            None => Antecedent::Single(trimmed.to_string()),
        }
    }

    pub fn items(&self) -> &[String] {
        match self {
            Antecedent::Single(item) => std::slice::from_ref(item),
            Antecedent::Items(items) => items,
        }
    }
}

/// An association rule; only the antecedent is relevant here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub antecedent: Antecedent,
}

impl Rule {
    pub fn new(antecedent: &str) -> Self {
        Self {
            antecedent: Antecedent::parse(antecedent),
        }
    }
}

/// Reads every rule of the rules table. Columns other than `antecedent` are ignored.
pub fn load_rules(path: &Path) -> AppResult<Vec<Rule>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    rules_from_csv(reader)
}

pub fn rules_from_reader<R: Read>(reader: R) -> AppResult<Vec<Rule>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    rules_from_csv(reader)
}

fn rules_from_csv<R: Read>(mut reader: csv::Reader<R>) -> AppResult<Vec<Rule>> {
    let mut rules = Vec::new();
    for row in reader.deserialize::<RuleRow>() {
        let row = row?;
        rules.push(Rule::new(&row.antecedent));
    }
    Ok(rules)
}

fn closing_bracket(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        _ => None,
    }
}

/// `['a', "b",]` style literal. `None` when the text is not a well-formed
/// collection of quoted strings.
fn parse_collection(text: &str) -> Option<Vec<String>> {
    let open = text.chars().next()?;
    let close = closing_bracket(open)?;
    let inner = text.strip_prefix(open)?.strip_suffix(close)?;

    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let quote = match chars.next() {
            None => break,
            Some(c @ ('\'' | '"')) => c,
            Some(_) => return None,
        };

        let mut item = String::new();
        loop {
            match chars.next()? {
                '\\' => item.push(chars.next()?),
                c if c == quote => break,
                c => item.push(c),
            }
        }
        items.push(item);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(items)
}
