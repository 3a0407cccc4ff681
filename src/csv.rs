use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::hardware::HardwareEvent;
use crate::model::ParseError;
use crate::{Amount, Coin, Command, Product};

/// Errors that can occur when reading a command script
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open command script: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized command '{command}'")]
    UnrecognizedCommand { line: usize, command: String },

    #[error("line {line}: {command} missing item")]
    MissingItem { line: usize, command: String },

    #[error("line {line}: {source}")]
    Item { line: usize, source: ParseError },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    command: String,
    item: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    event: &'a str,
    item: &'a str,
    amount: String,
}

impl InputRow {
    fn item(&self, line: usize) -> Result<&str, CsvError> {
        self.item
            .as_deref()
            .filter(|item| !item.is_empty())
            .ok_or_else(|| CsvError::MissingItem {
                line,
                command: self.command.clone(),
            })
    }

    fn coin(&self, line: usize) -> Result<Coin, CsvError> {
        self.item(line)?
            .parse()
            .map_err(|source| CsvError::Item { line, source })
    }

    fn product(&self, line: usize) -> Result<Product, CsvError> {
        self.item(line)?
            .parse()
            .map_err(|source| CsvError::Item { line, source })
    }
}

/// Read commands from a csv script with a `command,item` header
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            match row.command.to_ascii_lowercase().as_str() {
                "load" => Ok(Command::Load(row.coin(line)?)),
                "insert" => Ok(Command::Insert(row.coin(line)?)),
                "purchase" => Ok(Command::Purchase(row.product(line)?)),
                "return" => Ok(Command::Return),
                _ => Err(CsvError::UnrecognizedCommand {
                    line,
                    command: row.command,
                }),
            }
        }))
}

/// Write hardware events followed by the remaining credit in csv format
pub fn write_events<W: io::Write>(
    writer: W,
    events: &[HardwareEvent],
    credit: Amount,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for event in events {
        let row = match event {
            HardwareEvent::Dispense(product) => OutputRow {
                event: "dispense",
                item: product.name(),
                amount: product.price().to_string(),
            },
            HardwareEvent::ReturnCoin(coin) => OutputRow {
                event: "return_coin",
                item: coin.name(),
                amount: coin.value().to_string(),
            },
        };
        writer.serialize(&row)?;
    }

    writer.serialize(OutputRow {
        event: "credit",
        item: "",
        amount: credit.to_string(),
    })?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn read_all(content: &str) -> Vec<Result<Command, CsvError>> {
        let file = write_csv(content);
        read_commands(file.path()).unwrap().collect()
    }

    #[test]
    fn read_every_command() {
        let results = read_all(
            "command,item\nload,dime\ninsert,quarter\npurchase,gum\nreturn,\n",
        );
        let commands: Vec<_> = results.into_iter().map(Result::unwrap).collect();

        assert_eq!(
            commands,
            vec![
                Command::Load(Coin::Dime),
                Command::Insert(Coin::Quarter),
                Command::Purchase(Product::Gum),
                Command::Return,
            ]
        );
    }

    #[test]
    fn read_return_without_item_column() {
        let results = read_all("command,item\nreturn\n");
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Ok(Command::Return)));
    }

    #[test]
    fn read_with_whitespace_and_case() {
        let results = read_all("command, item\nInsert, Penny\n");
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Ok(Command::Insert(Coin::Penny))));
    }

    #[test]
    fn read_returns_error_for_unknown_command() {
        let results = read_all("command,item\nkick,\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedCommand { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_missing_item() {
        let results = read_all("command,item\ninsert,quarter\ninsert,\n");
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::MissingItem { line: 3, .. }));
    }

    #[test]
    fn read_returns_error_for_unknown_coin() {
        let results = read_all("command,item\ninsert,doubloon\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(
            err,
            CsvError::Item {
                line: 2,
                source: ParseError::UnknownCoin(_)
            }
        ));
    }

    #[test]
    fn read_returns_error_for_unknown_product() {
        let results = read_all("command,item\npurchase,caviar\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(
            err,
            CsvError::Item {
                line: 2,
                source: ParseError::UnknownProduct(_)
            }
        ));
    }

    #[test]
    fn read_missing_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_commands(dir.path().join("missing.csv"));
        assert!(matches!(result, Err(CsvError::Open(_))));
    }

    #[test]
    fn write_events_then_credit() {
        let mut out = Vec::new();
        let events = [
            HardwareEvent::Dispense(Product::Gum),
            HardwareEvent::ReturnCoin(Coin::Dime),
        ];

        write_events(&mut out, &events, Amount::from_cents(35)).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "event,item,amount\ndispense,gum,0.15\nreturn_coin,dime,0.10\ncredit,,0.35\n"
        );
    }
}
