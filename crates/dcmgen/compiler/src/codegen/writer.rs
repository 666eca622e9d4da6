// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! MATLAB script writer utilities

/// Width of banner comment lines, including the `%` delimiters
pub const BANNER_WIDTH: usize = 70;

/// Indentation of continuation lines in bracketed lists (`DCM.U.name = [`)
const CONTINUATION_INDENT: usize = 14;

/// A line-oriented writer for MATLAB source
#[derive(Debug, Clone, Default)]
pub struct ScriptWriter {
    buffer: String,
    lines: usize,
}

impl ScriptWriter {
    /// Create a new script writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines written so far
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Take ownership of the script
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Write a single line
    pub fn line(&mut self, line: impl AsRef<str>) {
        self.buffer.push_str(line.as_ref());
        self.buffer.push('\n');
        self.lines += 1;
    }

    /// Write an empty line
    pub fn blank(&mut self) {
        self.line("");
    }

    /// Write a statement followed by a trailing `%` comment
    pub fn commented(&mut self, statement: impl AsRef<str>, comment: impl AsRef<str>) {
        self.line(format!("{} % {}", statement.as_ref(), comment.as_ref()));
    }

    /// Write a full-width rule: `% ------ %`
    pub fn rule(&mut self) {
        self.line(format!("% {} %", "-".repeat(BANNER_WIDTH - 4)));
    }

    /// Write a section banner: `% --- Title ------ %`
    pub fn section(&mut self, title: &str) {
        let head = format!("% --- {} ", title);
        let fill = BANNER_WIDTH.saturating_sub(head.chars().count() + 2);
        self.line(format!("{}{} %", head, "-".repeat(fill)));
    }

    /// Write `lhs = [first ...` with one continuation line per further item
    ///
    /// A single item is written on one line: `lhs = [item];`.
    pub fn bracketed_list(&mut self, lhs: &str, items: &[String]) {
        let prefix = format!("{} = [", lhs);
        match items {
            [] => self.line(format!("{}];", prefix)),
            [only] => self.line(format!("{}{}];", prefix, only)),
            [first, rest @ ..] => {
                let indent = " ".repeat(CONTINUATION_INDENT.max(prefix.len()));
                self.line(format!("{}{} ...", prefix, first));
                for (i, item) in rest.iter().enumerate() {
                    if i + 1 == rest.len() {
                        self.line(format!("{}{}];", indent, item));
                    } else {
                        self.line(format!("{}{} ...", indent, item));
                    }
                }
            }
        }
    }
}

/// Quote a MATLAB character vector, doubling embedded quotes
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render a `fullfile(...)` call over quoted path components
pub fn fullfile<S: AsRef<str>>(parts: &[S]) -> String {
    let quoted: Vec<String> = parts.iter().map(|part| quote(part.as_ref())).collect();
    format!("fullfile({})", quoted.join(", "))
}
