use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, io::Write};

/// Read-only copy of a predictor's internal table, for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableSnapshot {
    /// predictor keeps no table
    Stateless,
    /// address -> state, sorted by address
    PerAddress(BTreeMap<u64, u8>),
    /// index -> state
    Indexed(Vec<u8>),
}

impl TableSnapshot {
    pub fn len(&self) -> usize {
        match self {
            TableSnapshot::Stateless => 0,
            TableSnapshot::PerAddress(table) => table.len(),
            TableSnapshot::Indexed(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_table(&self) -> bool {
        !matches!(self, TableSnapshot::Stateless)
    }

    /// Dump one line per entry:
    /// `Address: {address}, Value: {value}` or `Index: {index}, Value: {value}`
    pub fn write_text<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            TableSnapshot::Stateless => {}
            TableSnapshot::PerAddress(table) => {
                for (address, value) in table {
                    writeln!(writer, "Address: {}, Value: {}", address, value)?;
                }
            }
            TableSnapshot::Indexed(table) => {
                for (index, value) in table.iter().enumerate() {
                    writeln!(writer, "Index: {}, Value: {}", index, value)?;
                }
            }
        }
        Ok(())
    }
}
