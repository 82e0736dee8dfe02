//! Client-side contact import.
//!
//! The header row names the fields (case-insensitive). `groups` holds a
//! `;`-separated list. Rows without a WhatsApp id are dropped.

use serde_json::Value;
use thiserror::Error;

use crate::types::Contact;

const CSV_EXTENSION: &str = ".csv";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Please select a CSV file")]
    NotCsv,

    #[error("Failed to parse CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("No valid contacts found in CSV")]
    NoValidRows,
}

pub fn check_file_name(name: &str) -> Result<(), ImportError> {
    if name.to_lowercase().ends_with(CSV_EXTENSION) {
        Ok(())
    } else {
        Err(ImportError::NotCsv)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Column {
    WaId,
    DisplayName,
    Phone,
    Groups,
    Other(String),
}

impl Column {
    fn from_header(header: &str) -> Self {
        let header = header.trim().to_lowercase();
        match header.as_str() {
            "waid" | "wa_id" => Column::WaId,
            "displayname" | "display_name" => Column::DisplayName,
            "phone" => Column::Phone,
            "groups" => Column::Groups,
            _ => Column::Other(header),
        }
    }
}

pub fn parse_contacts(text: &str) -> Result<Vec<Contact>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns = reader.headers()?.iter().map(Column::from_header).collect::<Vec<_>>();

    let mut contacts = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut contact = Contact::default();
        for (column, value) in columns.iter().zip(record.iter()) {
            if value.is_empty() {
                continue;
            }
            match column {
                Column::WaId => contact.wa_id = value.to_string(),
                Column::DisplayName => contact.display_name = Some(value.to_string()),
                Column::Phone => contact.phone = Some(value.to_string()),
                Column::Groups => contact.groups = split_groups(value),
                Column::Other(name) => {
                    contact.extra.insert(name.clone(), Value::String(value.to_string()));
                }
            }
        }
        if !contact.wa_id.is_empty() {
            contacts.push(contact);
        }
    }

    if contacts.is_empty() {
        return Err(ImportError::NoValidRows);
    }
    Ok(contacts)
}

fn split_groups(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn single_row_with_groups() {
        let contacts = parse_contacts("waId,displayName,groups\n123,Alice,a;b\n").unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(
            serde_json::to_value(&contacts[0]).unwrap(),
            json!({"waId": "123", "displayName": "Alice", "groups": ["a", "b"]})
        );
    }

    #[test]
    fn rows_without_id_are_dropped() {
        let text = "WAID, Phone ,groups\n\n,555,x\n 777 , 15551234567 , a ; ;b \n";
        let contacts = parse_contacts(text).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].wa_id, "777");
        assert_eq!(contacts[0].phone.as_deref(), Some("15551234567"));
        assert_eq!(contacts[0].groups, vec!["a", "b"]);
    }

    #[test]
    fn unknown_columns_pass_through() {
        let contacts = parse_contacts("waid,City\n1,Oslo\n2\n").unwrap();
        assert_eq!(contacts[0].extra["city"], "Oslo");
        assert!(contacts[1].extra.is_empty());
    }

    #[test]
    fn zero_valid_rows_is_an_error() {
        assert!(matches!(parse_contacts("waId,displayName\n,Nobody\n"), Err(ImportError::NoValidRows)));
        assert!(matches!(parse_contacts("waId\n"), Err(ImportError::NoValidRows)));
    }

    #[test]
    fn extension_check() {
        assert!(check_file_name("contacts.CSV").is_ok());
        assert!(matches!(check_file_name("contacts.xlsx"), Err(ImportError::NotCsv)));
    }
}
