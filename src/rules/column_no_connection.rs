//! rules::column_no_connection

use super::Rule;
use crate::core::graph::GraphContext;
use crate::engine::health::ValidationMessage;

/// Warns for every column whose connection list is empty.
pub struct ColumnNoConnection;

impl Rule for ColumnNoConnection {
    fn code(&self) -> &'static str {
        "column_no_connection"
    }

    fn check(&self, ctx: &GraphContext<'_>) -> Vec<ValidationMessage> {
        ctx.model()
            .columns()
            .filter(|column| !column.is_connected())
            .map(|column| {
                ValidationMessage::warning(
                    self.code(),
                    &format!("{}.{}", column.source, column.name),
                    format!(
                        "Column '{}' in source '{}' has no connection to any target",
                        column.name, column.source
                    ),
                )
            })
            .collect()
    }
}
