//! Frequency tables over cabin columns

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::core::error::{suggest_correction, Error, Result};
use crate::core::record::CabinRecord;

/// Columns a frequency table can be built over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ServiceLevel,
    AreaName,
    DntCabin,
    OwnerName,
    DntKey,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::ServiceLevel,
        Column::AreaName,
        Column::DntCabin,
        Column::OwnerName,
        Column::DntKey,
    ];

    /// Column name as it appears in the CSV header
    pub fn name(self) -> &'static str {
        match self {
            Column::ServiceLevel => "serviceLevel",
            Column::AreaName => "areaName",
            Column::DntCabin => "dntCabin",
            Column::OwnerName => "ownername",
            Column::DntKey => "dntKey",
        }
    }

    fn value(self, record: &CabinRecord) -> String {
        match self {
            Column::ServiceLevel => record.service_level.clone(),
            Column::AreaName => record.area_name.clone(),
            Column::DntCabin => format_bool(record.dnt_cabin).to_string(),
            Column::OwnerName => record.owner_name.clone(),
            Column::DntKey => record.dnt_key.clone(),
        }
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(column) = Column::ALL.into_iter().find(|c| c.name() == s) {
            return Ok(column);
        }
        let names: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
        Err(Error::UnknownColumn {
            name: s.to_string(),
            suggestion: suggest_correction(s, &names),
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Booleans are written the way the CSV listing spells them
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Sort direction of a count table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Distinct values of one column with their number of occurrences
#[derive(Debug, Clone, PartialEq)]
pub struct CountTable {
    pub column: Column,
    pub rows: Vec<(String, usize)>,
}

impl CountTable {
    /// Counts distinct values of `column`; ties keep first-appearance order
    pub fn build(records: &[CabinRecord], column: Column, order: SortOrder) -> Self {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut rows: Vec<(String, usize)> = Vec::new();

        for record in records {
            let value = column.value(record);
            match positions.get(&value) {
                Some(&pos) => rows[pos].1 += 1,
                None => {
                    positions.insert(value.clone(), rows.len());
                    rows.push((value, 1));
                }
            }
        }

        match order {
            SortOrder::Descending => rows.sort_by_key(|(_, count)| Reverse(*count)),
            SortOrder::Ascending => rows.sort_by_key(|(_, count)| *count),
        }

        Self { column, rows }
    }

    /// Keeps only the first `n` rows
    pub fn head(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for CountTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value_width = self
            .rows
            .iter()
            .map(|(value, _)| value.chars().count())
            .max()
            .unwrap_or(0)
            .max("Value".len());

        writeln!(f, "{:<value_width$}  Count", "Value")?;
        for (value, count) in &self.rows {
            writeln!(f, "{:<value_width$}  {:>5}", value, count)?;
        }
        Ok(())
    }
}
