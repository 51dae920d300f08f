//! Starter-code templates per language.

use indexmap::IndexMap;

/// Language selected when the application starts.
pub const DEFAULT_LANGUAGE: &str = "python";

const PYTHON_TEMPLATE: &str = "# Write your Python code here\nprint(\"Hello, World!\")\n";

const JAVASCRIPT_TEMPLATE: &str =
    "// Write your JavaScript code here\nconsole.log(\"Hello, World!\");\n";

const JAVA_TEMPLATE: &str = "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello, World!\");\n    }\n}\n";

/// Ordered map from language to the editor's starter text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTemplates {
    templates: IndexMap<String, String>,
}

impl Default for CodeTemplates {
    fn default() -> Self {
        let templates = [
            ("python", PYTHON_TEMPLATE),
            ("javascript", JAVASCRIPT_TEMPLATE),
            ("java", JAVA_TEMPLATE),
        ]
        .into_iter()
        .map(|(lang, text)| (lang.to_string(), text.to_string()))
        .collect();
        Self { templates }
    }
}

impl CodeTemplates {
    /// Default templates with `overrides` merged on top.
    #[must_use]
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut templates = Self::default();
        for (lang, text) in overrides {
            templates.templates.insert(lang.into(), text.into());
        }
        templates
    }

    /// Template for `language`, or `""` when none is configured.
    #[must_use]
    pub fn get(&self, language: &str) -> &str {
        self.templates.get(language).map_or("", String::as_str)
    }

    /// Returns `true` if `text` is blank or exactly equals a template, i.e.
    /// the learner has not typed anything of their own.
    #[must_use]
    pub fn is_unmodified(&self, text: &str) -> bool {
        text.trim().is_empty() || self.templates.values().any(|t| t == text)
    }

    /// Configured languages in order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates() {
        let templates = CodeTemplates::default();
        assert_eq!(
            templates.get("python"),
            "# Write your Python code here\nprint(\"Hello, World!\")\n"
        );
        assert!(templates.get("javascript").contains("console.log"));
        assert!(templates.get("java").starts_with("public class Main {"));
        assert_eq!(
            templates.languages().collect::<Vec<_>>(),
            vec!["python", "javascript", "java"]
        );
    }

    #[test]
    fn test_unknown_language_template_is_empty() {
        assert_eq!(CodeTemplates::default().get("rust"), "");
    }

    #[test]
    fn test_is_unmodified() {
        let templates = CodeTemplates::default();

        assert!(templates.is_unmodified(""));
        assert!(templates.is_unmodified("   \n\t"));
        assert!(templates.is_unmodified(templates.get("java")));
        assert!(!templates.is_unmodified("print(42)\n"));
        assert!(!templates.is_unmodified(&format!("{}x = 1\n", templates.get("python"))));
    }

    #[test]
    fn test_template_lookalikes_are_modified() {
        let templates = CodeTemplates::default();
        let python = templates.get("python");

        assert!(!templates.is_unmodified(python.trim_end()));
        assert!(!templates.is_unmodified(&format!("{python}\n\n   ")));
        assert!(!templates.is_unmodified(&format!("  {python}")));
    }

    #[test]
    fn test_overrides_replace_and_extend() {
        let templates =
            CodeTemplates::with_overrides([("python", "pass\n"), ("rust", "fn main() {}\n")]);

        assert_eq!(templates.get("python"), "pass\n");
        assert_eq!(templates.get("rust"), "fn main() {}\n");
        assert!(templates.get("java").contains("class Main"));
        assert!(templates.is_unmodified("fn main() {}\n"));
    }
}
