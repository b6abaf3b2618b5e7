//! Rules table and menu text for a move set.

use super::moves::MoveSet;
use super::resolver::resolve;
use crate::protocol::Outcome;

/// Outcome grid: row `i`, column `j` is the result of playing move `i` against move `j`
pub fn rules_table(moves: &MoveSet) -> Vec<Vec<Outcome>> {
    moves
        .iter()
        .map(|row| moves.iter().map(|col| resolve(moves, row, col)).collect())
        .collect()
}

/// Render the rules table as a boxed ASCII table
pub fn render_rules_table(moves: &MoveSet) -> String {
    let grid = rules_table(moves);

    let mut header = vec![String::new()];
    header.extend(moves.labels().iter().cloned());
    let rows: Vec<Vec<String>> = moves
        .labels()
        .iter()
        .zip(&grid)
        .map(|(label, outcomes)| {
            let mut row = vec![label.clone()];
            row.extend(outcomes.iter().map(|o| o.cell().to_string()));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(&rows)
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = format!(
        ".{}.",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("-")
    );
    let separator = format!(
        "|{}|",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("|")
    );
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {:<width$} ", cell, width = *w))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let inner = border.chars().count() - 2;
    let mut out = vec![
        border.clone(),
        format!("|{:^width$}|", "Game Rules", width = inner),
        separator.clone(),
        line(&header[..]),
        separator,
    ];
    out.extend(rows.iter().map(|row| line(&row[..])));
    out.push(border.replace('.', "'"));
    out.join("\n")
}

/// Menu listing the moves and the control commands
pub fn menu_lines(moves: &MoveSet) -> Vec<String> {
    let mut lines = vec!["Available moves:".to_string()];
    lines.extend(
        moves
            .iter()
            .map(|mv| format!("{} - {}", mv.number(), moves.label(mv))),
    );
    lines.push("0 - exit".to_string());
    lines.push("? - help".to_string());
    lines
}
