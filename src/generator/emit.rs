//! Generated-source printer and test-method emission
//!
//! The printer is a plain accumulating buffer with indentation tracking;
//! the whole generated file is assembled in memory and flushed exactly
//! once by the orchestrator.

/// Indentation-tracking text buffer for the generated source file.
pub struct Printer {
    output: String,
    indent_level: usize,
    at_line_start: bool,
}

const INDENT_WIDTH: usize = 4;

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Get the accumulated output.
    pub fn finish(self) -> String {
        self.output
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write a string (with auto-indent at line start).
    pub fn print(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if self.at_line_start {
            self.output.push_str(&" ".repeat(self.indent_level * INDENT_WIDTH));
            self.at_line_start = false;
        }
        self.output.push_str(s);
    }

    /// Write a string and newline.
    pub fn println(&mut self, s: &str) {
        self.print(s);
        self.newline();
    }

    /// Write just a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }
}

/// Escape a string for embedding as a Java string literal.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Append one generated test method.
///
/// The method shape is fixed: a public no-argument method that hands the
/// original file path to the harness primitive `invokeBoxMethod`, which
/// lives in the external base test class. `test_name` must already be
/// unique and a valid identifier fragment.
pub fn emit_test_method(p: &mut Printer, test_name: &str, file_path: &str) {
    p.println(&format!("public void test{}() throws Exception {{", test_name));
    p.indent();
    p.println(&format!("invokeBoxMethod(\"{}\");", escape_string(file_path)));
    p.dedent();
    p.println("}");
    p.newline();
}
