use crate::app::models::GlobalAccess;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const FLAT_CONFIG_FILE: &str = "eslint.config.js";

/// Everything the generated `eslint.config.js` needs.
#[derive(Debug, Clone)]
pub struct FlatConfigInput<'a> {
    pub base_config: &'a str,
    pub ignores: &'a [String],
    pub rules: &'a Map<String, Value>,
    pub globals: &'a BTreeMap<String, GlobalAccess>,
    /// Environment names that were expanded into `globals`.
    pub expanded_envs: &'a [String],
}

const NORMALIZE_BLOCK: &str = r#"const normalizedMwtsConfig = mwtsConfig.map(config => {
  const parserOptions = config?.languageOptions?.parserOptions;
  if (!parserOptions || !parserOptions.project) {
    return config;
  }
  const projects = Array.isArray(parserOptions.project)
    ? parserOptions.project
    : [parserOptions.project];

  return {
    ...config,
    languageOptions: {
      ...config.languageOptions,
      parserOptions: {
        ...parserOptions,
        project: projects.map(projectPath =>
          path.resolve(__dirname, projectPath)
        ),
        tsconfigRootDir: __dirname,
      },
    },
  };
});
"#;

pub struct FlatConfigGenerator;

impl FlatConfigGenerator {
    pub fn generate(input: &FlatConfigInput) -> String {
        let mut out = String::new();

        out.push_str("const path = require('path');\n");
        out.push_str(&format!(
            "const mwtsConfig = require({});\n\n",
            quote(input.base_config)
        ));
        out.push_str(NORMALIZE_BLOCK);
        out.push('\n');

        if !input.expanded_envs.is_empty() {
            out.push_str(&format!(
                "// Globals expanded from legacy env: {}\n",
                input.expanded_envs.join(", ")
            ));
        }

        out.push_str("module.exports = [\n");
        out.push_str("  {\n");
        out.push_str(&format!("    ignores: {},\n", Self::ignore_list(input.ignores)));
        out.push_str("  },\n");
        out.push_str("  ...normalizedMwtsConfig,\n");
        out.push_str("  {\n");
        out.push_str("    languageOptions: {\n");
        out.push_str(&format!(
            "      globals: {},\n",
            indent_json(&Self::globals_object(input.globals), 6)
        ));
        out.push_str("    },\n");
        out.push_str(&format!(
            "    rules: {},\n",
            indent_json(&Value::Object(input.rules.clone()), 4)
        ));
        out.push_str("  },\n");
        out.push_str("];\n");
        out
    }

    /// Single-quoted JS array literal.
    pub fn ignore_list(patterns: &[String]) -> String {
        let quoted: Vec<String> = patterns.iter().map(|p| quote(p)).collect();
        format!("[{}]", quoted.join(", "))
    }

    fn globals_object(globals: &BTreeMap<String, GlobalAccess>) -> Value {
        let map: Map<String, Value> = globals
            .iter()
            .map(|(name, access)| (name.clone(), Value::String(access.as_str().to_string())))
            .collect();
        Value::Object(map)
    }
}

/// Single-quoted JS string literal. Line terminators and other control
/// characters are escaped so the literal always stays on one line.
fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Pretty JSON whose continuation lines are shifted right by `indent` spaces.
fn indent_json(value: &Value, indent: usize) -> String {
    let pretty = match value {
        Value::Object(map) if map.is_empty() => return "{}".to_string(),
        _ => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    };
    let pad = " ".repeat(indent);
    pretty
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ignore_list_escapes_quotes() {
        let list = FlatConfigGenerator::ignore_list(&strings(&["dist/", "it's", r"a\b"]));
        assert_eq!(list, r"['dist/', 'it\'s', 'a\\b']");
    }

    #[test]
    fn test_ignore_list_escapes_line_terminators_and_controls() {
        let list = FlatConfigGenerator::ignore_list(&strings(&[
            "a\nb",
            "c\rd",
            "e\u{2028}f\u{2029}g",
            "tab\there",
            "bell\u{7}",
        ]));
        assert_eq!(
            list,
            r"['a\nb', 'c\rd', 'e\u2028f\u2029g', 'tab\there', 'bell\u0007']"
        );
        assert!(!list.contains('\n'));
        assert!(!list.contains('\r'));
    }

    #[test]
    fn test_base_config_specifier_is_escaped() {
        let source = FlatConfigGenerator::generate(&FlatConfigInput {
            base_config: "it's\nhere",
            ignores: &[],
            rules: &Map::new(),
            globals: &BTreeMap::new(),
            expanded_envs: &[],
        });
        assert!(source.contains(r"const mwtsConfig = require('it\'s\nhere');"));
    }

    #[test]
    fn test_generated_source_layout() {
        let ignores = strings(&["dist/", "**/node_modules/", "site"]);
        let rules = json!({"no-control-regex": "off"}).as_object().unwrap().clone();
        let mut globals = BTreeMap::new();
        globals.insert("describe".to_string(), GlobalAccess::Readonly);
        let envs = strings(&["jest"]);

        let source = FlatConfigGenerator::generate(&FlatConfigInput {
            base_config: "mwts/eslint.config.js",
            ignores: &ignores,
            rules: &rules,
            globals: &globals,
            expanded_envs: &envs,
        });

        assert!(source.contains("require('mwts/eslint.config.js')"));
        assert!(source.contains("    ignores: ['dist/', '**/node_modules/', 'site'],\n"));
        assert!(source.contains("const normalizedMwtsConfig ="));
        assert!(source.contains("path.resolve(__dirname, projectPath)"));
        assert!(source.contains("tsconfigRootDir: __dirname"));
        assert!(source.contains("// Globals expanded from legacy env: jest\n"));
        assert!(source.contains("      globals: {\n        \"describe\": \"readonly\"\n      },\n"));
        assert!(source.contains("    rules: {\n      \"no-control-regex\": \"off\"\n    },\n"));
        assert!(source.ends_with("];\n"));
    }

    #[test]
    fn test_empty_overrides_still_emit_block() {
        let source = FlatConfigGenerator::generate(&FlatConfigInput {
            base_config: "mwts/eslint.config.js",
            ignores: &[],
            rules: &Map::new(),
            globals: &BTreeMap::new(),
            expanded_envs: &[],
        });
        assert!(source.contains("    ignores: [],\n"));
        assert!(source.contains("      globals: {},\n"));
        assert!(source.contains("    rules: {},\n"));
        assert!(!source.contains("legacy env"));
    }
}
