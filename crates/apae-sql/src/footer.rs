//! Verification queries to run after the insert.

use std::fmt::Write;

use apae_model::{Column, TargetTable};

use crate::comment::{push_banner, push_comment};

/// Status codes of the destination schema.
const STATUS_ACTIVE: i64 = 1;
const STATUS_INACTIVE: i64 = 2;

/// Queries checking what the insert produced.
///
/// Each query is emitted only when the table carries the columns it reads.
pub fn render_verification(table: &TargetTable, inserted: usize) -> String {
    let mut out = String::new();
    push_banner(&mut out, "POST-INSERT CHECKS");
    let name = table.name();
    let has = |column: Column| table.position(column).is_some();

    if has(Column::Status) && has(Column::Name) && has(Column::Id) {
        out.push('\n');
        push_comment(&mut out, "Inserted records");
        let _ = write!(
            out,
            "SELECT\n    \
             COUNT(*) AS total_inseridos,\n    \
             SUM(CASE WHEN {status} = {STATUS_ACTIVE} THEN 1 ELSE 0 END) AS ativos,\n    \
             SUM(CASE WHEN {status} = {STATUS_INACTIVE} THEN 1 ELSE 0 END) AS inativos\n\
             FROM {name}\n\
             WHERE {nome} IN (\n    \
             SELECT {nome} FROM {name}\n    \
             ORDER BY {id} DESC\n    \
             LIMIT {inserted}\n\
             );\n",
            status = Column::Status,
            nome = Column::Name,
            id = Column::Id,
        );
    }
    if has(Column::DocumentNumber) {
        out.push('\n');
        push_comment(&mut out, "Records without document number");
        let column = Column::DocumentNumber;
        let _ = write!(
            out,
            "SELECT COUNT(*) AS sem_{column}\nFROM {name}\nWHERE {column} IS NULL OR {column} = '';\n"
        );
    }
    if has(Column::BirthDate) {
        out.push('\n');
        push_comment(&mut out, "Records without birth date");
        let column = Column::BirthDate;
        let _ = write!(
            out,
            "SELECT COUNT(*) AS sem_{column}\nFROM {name}\nWHERE {column} IS NULL;\n"
        );
    }
    out
}
