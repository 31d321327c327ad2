//! Code generator configuration

use std::fmt;
use std::str::FromStr;

/// How member accesses are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComputedMode {
    /// Keep each access as parsed (`a.b`, `a[b]`).
    #[default]
    Default,
    /// Write every named access in bracket form (`a.b` becomes `a["b"]`).
    OnComputed,
    /// Write string-keyed bracket accesses in dot form when the key is a plain identifier (`a["b"]` becomes `a.b`).
    OffComputed,
}

impl ComputedMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ComputedMode::Default => "default",
            ComputedMode::OnComputed => "on",
            ComputedMode::OffComputed => "off",
        }
    }
}

impl fmt::Display for ComputedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComputedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ComputedMode::Default),
            "on" | "onComputed" => Ok(ComputedMode::OnComputed),
            "off" | "offComputed" => Ok(ComputedMode::OffComputed),
            other => Err(format!("unknown computed mode `{other}` (expected default, on or off)")),
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Spaces around operators, one statement per line, indented blocks
    pub format: bool,
    /// Member access style
    pub computed_mode: ComputedMode,
    /// Wrap every expression statement in parentheses
    pub bracket_expression_statements: bool,
    /// Spaces per indentation level (format mode only)
    pub indent_width: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            format: false,
            computed_mode: ComputedMode::Default,
            bracket_expression_statements: false,
            indent_width: 4,
        }
    }
}

impl GeneratorOptions {
    /// Create options with default settings (compact output)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    pub fn with_computed_mode(mut self, mode: ComputedMode) -> Self {
        self.computed_mode = mode;
        self
    }

    pub fn with_bracket_expression_statements(mut self, bracket: bool) -> Self {
        self.bracket_expression_statements = bracket;
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_compact() {
        let options = GeneratorOptions::default();
        assert!(!options.format);
        assert_eq!(options.computed_mode, ComputedMode::Default);
        assert!(!options.bracket_expression_statements);
        assert_eq!(options.indent_width, 4);
    }

    #[test]
    fn test_builder_chain() {
        let options = GeneratorOptions::new()
            .with_format(true)
            .with_computed_mode(ComputedMode::OnComputed)
            .with_bracket_expression_statements(true)
            .with_indent_width(2);
        assert!(options.format);
        assert_eq!(options.computed_mode, ComputedMode::OnComputed);
        assert!(options.bracket_expression_statements);
        assert_eq!(options.indent_width, 2);
    }

    #[test]
    fn test_computed_mode_parsing() {
        assert_eq!("default".parse::<ComputedMode>(), Ok(ComputedMode::Default));
        assert_eq!("on".parse::<ComputedMode>(), Ok(ComputedMode::OnComputed));
        assert_eq!("offComputed".parse::<ComputedMode>(), Ok(ComputedMode::OffComputed));
        assert!("sideways".parse::<ComputedMode>().is_err());
        assert_eq!(ComputedMode::OffComputed.to_string(), "off");
    }
}
