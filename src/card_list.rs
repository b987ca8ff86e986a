use std::fs::File;
use std::io::{BufRead, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use log::info;
use serde::Serialize;

use crate::cards::{card_query::CardQuery, price_result::PriceResult};
use crate::error::{PriceCheckError, Result};

const NAME_COLUMNS: [&str; 2] = ["name", "card"];
const SET_COLUMNS: [&str; 4] = ["set", "set_code", "set code", "edition"];
const NUMBER_COLUMNS: [&str; 3] = ["number", "collector_number", "collector number"];
const COUNT_COLUMNS: [&str; 3] = ["count", "quantity", "qty"];

/// Reads the card list csv. Any missing column or bad value fails the whole list.
pub fn read_card_list(path: &str) -> Result<Vec<CardQuery>> {
    let file = File::open(path)?;
    let cards = read_card_list_from_reader(file)?;
    info!("Read {} cards from {}", cards.len(), path);
    Ok(cards)
}

pub fn read_card_list_from_reader<R: Read>(reader: R) -> Result<Vec<CardQuery>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let name_idx = required_column(&headers, &NAME_COLUMNS)?;
    let set_idx = required_column(&headers, &SET_COLUMNS)?;
    let number_idx = required_column(&headers, &NUMBER_COLUMNS)?;
    let count_idx = find_column(&headers, &COUNT_COLUMNS);

    let mut cards = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(i as u64 + 2);
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let name = cell(name_idx);
        if name.is_empty() {
            return Err(malformed(line, NAME_COLUMNS[0], "card name is empty"));
        }
        let set_code = cell(set_idx);
        if set_code.is_empty() {
            return Err(malformed(line, SET_COLUMNS[0], "set code is empty"));
        }
        let number = parse_number(cell(number_idx))
            .map_err(|reason| malformed(line, NUMBER_COLUMNS[0], &reason))?;
        let count = match count_idx {
            Some(idx) => parse_count(cell(idx))
                .map_err(|reason| malformed(line, COUNT_COLUMNS[0], &reason))?,
            None => 1,
        };

        cards.push(CardQuery::new(name, set_code, number, count));
    }
    Ok(cards)
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.contains(&header.trim().to_lowercase().as_str()))
}

fn required_column(headers: &StringRecord, names: &[&str]) -> Result<usize> {
    find_column(headers, names).ok_or_else(|| malformed(1, names[0], "missing required column"))
}

fn malformed(line: u64, field: &str, reason: &str) -> PriceCheckError {
    PriceCheckError::MalformedInput {
        line,
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Empty means the card has no collector number
fn parse_number(text: &str) -> std::result::Result<Option<u32>, String> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<u32>()
        .map(Some)
        .map_err(|_| format!("'{}' is not a collector number", text))
}

/// Empty means one copy
fn parse_count(text: &str) -> std::result::Result<u32, String> {
    if text.is_empty() {
        return Ok(1);
    }
    match text.parse::<u32>() {
        Ok(count) if count >= 1 => Ok(count),
        Ok(_) => Err("count must be at least 1".to_string()),
        Err(_) => Err(format!("'{}' is not a number", text)),
    }
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks for cards one by one until a blank name (or end of input)
pub fn read_interactive<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<Vec<CardQuery>> {
    let mut cards = Vec::new();
    loop {
        let name = match prompt(&mut input, &mut output, "Card name (blank to finish): ")? {
            Some(name) if !name.is_empty() => name,
            _ => break,
        };

        let set_code = loop {
            match prompt(&mut input, &mut output, "Set code: ")? {
                Some(code) if !code.is_empty() => break code,
                Some(_) => writeln!(output, "A set code is required")?,
                None => return Ok(cards),
            }
        };

        let number = loop {
            let text = prompt(&mut input, &mut output, "Collector number (blank for none): ")?
                .unwrap_or_default();
            match parse_number(&text) {
                Ok(number) => break number,
                Err(reason) => writeln!(output, "{}", reason)?,
            }
        };

        let count = loop {
            let text =
                prompt(&mut input, &mut output, "Count (blank for 1): ")?.unwrap_or_default();
            match parse_count(&text) {
                Ok(count) => break count,
                Err(reason) => writeln!(output, "{}", reason)?,
            }
        };

        cards.push(CardQuery::new(&name, &set_code, number, count));
    }
    Ok(cards)
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    set: &'a str,
    number: Option<u32>,
    count: u32,
    unit_price: String,
    total: String,
    found: bool,
}

impl<'a> From<&'a PriceResult> for ExportRow<'a> {
    fn from(result: &'a PriceResult) -> Self {
        ExportRow {
            name: &result.query.name,
            set: &result.query.set_code,
            number: result.query.number,
            count: result.query.count,
            unit_price: format!("{:.2}", result.unit_price.amount),
            total: format!("{:.2}", result.total().amount),
            found: result.found,
        }
    }
}

pub fn write_results_to_writer<W: Write>(writer: W, results: &[PriceResult]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for result in results {
        wtr.serialize(ExportRow::from(result))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_results(path: &str, results: &[PriceResult]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_results_to_writer(File::create(path)?, results)?;
    info!("Saved {} prices to {}", results.len(), path);
    Ok(())
}
