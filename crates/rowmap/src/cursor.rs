use crate::{descriptor::normalize_column_label, driver::ResultSet, Model, Result, TypeDescriptor};

/// Streams materialized instances of `M` out of a query's result cursor.
///
/// The column map is built once, at construction: result columns are walked
/// in physical order, each label is normalized, and only labels whose
/// normalized name resolved in the descriptor are kept. A column with no
/// matching field is silently dropped; a field with no column is left at
/// its default value.
///
/// Advancing the cursor is a side effect on the shared result set, so a
/// `Cursor` must not be shared across concurrent callers.
pub struct Cursor<M: Model> {
    rows: ResultSet,
    descriptor: TypeDescriptor<M>,
    // physical column index -> normalized field name
    columns: Vec<(usize, String)>,
}

impl<M: Model> Cursor<M> {
    pub fn new(rows: ResultSet, descriptor: TypeDescriptor<M>) -> Self {
        let columns = rows
            .columns()
            .iter()
            .enumerate()
            .filter_map(|(index, label)| {
                let field_name = normalize_column_label(label);
                descriptor
                    .field_exists(&field_name)
                    .then_some((index, field_name))
            })
            .collect();

        Self {
            rows,
            descriptor,
            columns,
        }
    }

    /// Advance the cursor, materializing the next row if one is available.
    pub fn next(&mut self) -> Result<Option<M>> {
        let Some(mut row) = self.rows.next() else {
            return Ok(None);
        };

        let mut obj = self.descriptor.new_object();

        for (index, field_name) in &self.columns {
            let Some(slot) = row.get_mut(*index) else {
                continue;
            };
            let value = std::mem::take(slot);
            self.descriptor.set_field_value(field_name, &mut obj, value)?;
        }

        Ok(Some(obj))
    }

    /// Reports whether another row is available, advancing past it without
    /// materializing it.
    ///
    /// Used for cardinality checks: a surplus row is an error regardless of
    /// whether it would have mapped cleanly, so it is never routed through
    /// the mutators.
    pub fn has_next(&mut self) -> bool {
        self.rows.next().is_some()
    }

    /// Drain the remaining rows in cursor order.
    pub fn collect(mut self) -> Result<Vec<M>> {
        let mut ret = vec![];

        while let Some(obj) = self.next()? {
            ret.push(obj);
        }

        Ok(ret)
    }
}
