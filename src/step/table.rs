// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Data tables attached to scenario steps.

use std::collections::HashMap;

/// A data table from a scenario step.
///
/// The first row is the header; every following row maps header cells to
/// its own cells via [`Table::hashes()`]. Rows keep their source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a new [`Table`] from raw rows, header first.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Returns the raw rows, including the header row.
    #[must_use]
    pub fn raw(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the header row, if the table has one.
    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Returns the rows without the header row.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Converts the table into an ordered sequence of row mappings from
    /// column header to cell text.
    ///
    /// Rows shorter than the header produce mappings without the missing
    /// columns; extra cells beyond the header are dropped.
    #[must_use]
    pub fn hashes(&self) -> Vec<HashMap<String, String>> {
        let Some(headers) = self.headers() else {
            return Vec::new();
        };
        self.rows[1..]
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(h, c)| (h.clone(), c.clone()))
                    .collect()
            })
            .collect()
    }

    /// Returns the number of data rows (excluding the header).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Returns `true` if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Vec<&str>>> for Table {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(str::to_owned).collect())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Table {
        Table::from(vec![
            vec!["username", "password", "status"],
            vec!["alice", "secret123", "active"],
            vec!["bob", "hunter2", "locked"],
        ])
    }

    #[test]
    fn hashes_map_headers_to_cells_in_row_order() {
        let hashes = users().hashes();
        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes[0].get("username"), Some(&"alice".to_owned()));
        assert_eq!(hashes[1].get("status"), Some(&"locked".to_owned()));
    }

    #[test]
    fn rows_exclude_the_header() {
        let table = users();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][0], "alice");
        assert_eq!(table.headers().unwrap()[2], "status");
    }

    #[test]
    fn empty_table_has_no_hashes() {
        let table = Table::default();
        assert!(table.is_empty());
        assert!(table.hashes().is_empty());
        assert!(table.headers().is_none());
    }

    #[test]
    fn short_rows_omit_missing_columns() {
        let table = Table::from(vec![vec!["a", "b"], vec!["1"]]);
        let hashes = table.hashes();
        assert_eq!(hashes[0].get("a"), Some(&"1".to_owned()));
        assert_eq!(hashes[0].get("b"), None);
    }
}
