//! The normalized cabin table the exporters and reports consume

use crate::core::filter;
use crate::core::page::Edge;
use crate::core::record::CabinRecord;
use crate::core::report::{Column, CountTable, SortOrder};

/// Ordered collection of cabin records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CabinTable {
    records: Vec<CabinRecord>,
}

impl CabinTable {
    /// Normalizes every edge, numbering rows in input order
    pub fn from_edges(edges: &[Edge]) -> Self {
        let records = edges
            .iter()
            .enumerate()
            .map(|(index, edge)| CabinRecord::from_edge(index, edge))
            .collect();
        Self { records }
    }

    pub fn from_records(records: Vec<CabinRecord>) -> Self {
        Self { records }
    }

    /// Drops cabins without overnight stay
    pub fn retain_overnight(self) -> Self {
        Self {
            records: filter::retain_overnight(self.records),
        }
    }

    /// Records ordered by area name; ties keep table order
    pub fn sorted_by_area(&self) -> Vec<&CabinRecord> {
        let mut sorted: Vec<&CabinRecord> = self.records.iter().collect();
        sorted.sort_by_key(area_key);
        sorted
    }

    pub fn value_counts(&self, column: Column, order: SortOrder) -> CountTable {
        CountTable::build(&self.records, column, order)
    }

    pub fn records(&self) -> &[CabinRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn area_key<'a>(record: &&'a CabinRecord) -> &'a str {
    &record.area_name
}
