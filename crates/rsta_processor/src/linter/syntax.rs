/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Style checks on raw markup source.

use super::SyntaxError;

pub const LINE_TOO_LONG: &str = "D001";
pub const TRAILING_WHITESPACE: &str = "D002";
pub const TAB_INDENT: &str = "D003";
pub const CARRIAGE_RETURN: &str = "D004";
pub const NO_FINAL_NEWLINE: &str = "D005";
/// Diagnostics reported by the markup front-end.
pub const INVALID_MARKUP: &str = "D000";

/// Run the line-based checks over `content`.
///
/// Lines with no inner whitespace (long URLs, paths) cannot be wrapped and are
/// exempt from the length check.
pub fn check(content: &str, max_line_length: usize) -> Vec<SyntaxError> {
    let mut errors = Vec::new();

    for (idx, raw) in content.split('\n').enumerate() {
        let line = idx + 1;
        if raw.contains('\r') {
            errors.push(SyntaxError::new(line, CARRIAGE_RETURN, "Found literal carriage return"));
        }
        let text = raw.trim_end_matches('\r');

        if text.chars().count() > max_line_length && text.trim().contains(char::is_whitespace) {
            errors.push(SyntaxError::new(line, LINE_TOO_LONG, "Line too long"));
        }
        if text.ends_with([' ', '\t']) {
            errors.push(SyntaxError::new(line, TRAILING_WHITESPACE, "Trailing whitespace"));
        }
        let indent: String = text.chars().take_while(|c| c.is_whitespace()).collect();
        if indent.contains('\t') {
            errors.push(SyntaxError::new(line, TAB_INDENT, "Tabulation used for indentation"));
        }
    }

    if !content.is_empty() && !content.ends_with('\n') {
        let last = content.split('\n').count();
        errors.push(SyntaxError::new(last, NO_FINAL_NEWLINE, "No newline at end of file"));
    }

    errors
}
