//! Entry template used when writing in the editor

use crate::domain::chakra::Chakra;
use crate::error::{LightsError, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

const ENTRY_TEMPLATE: &str = "# {DATE}\n\n<!-- {CHAKRA}: {PROMPT} -->\n\n";

/// Editor scaffolding for a new entry
#[derive(Debug)]
pub struct Template {
    content: String,
}

impl Template {
    pub fn builtin() -> Self {
        Template {
            content: ENTRY_TEMPLATE.to_string(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LightsError::Template(format!("Failed to read template file: {}", e)))?;

        Ok(Template { content })
    }

    /// Substitute date, prompt and chakra placeholders
    pub fn render(&self, date: NaiveDate, chakra: Chakra, prompt: &str) -> String {
        self.content
            .replace("{DATE}", &date.format("%B %d, %Y").to_string())
            .replace("{ISO_DATE}", &date.format("%Y-%m-%d").to_string())
            .replace("{DAY_NAME}", &date.format("%A").to_string())
            .replace("{CHAKRA}", chakra.info().name)
            .replace("{PROMPT}", prompt)
    }
}

/// Load `.lights/templates/entry.md` if present, else the built-in template
pub fn load_template(repo_root: &Path) -> Result<Template> {
    let custom_path = repo_root
        .join(".lights")
        .join("templates")
        .join("entry.md");

    if custom_path.exists() {
        Template::from_file(&custom_path)
    } else {
        Ok(Template::builtin())
    }
}

/// Remove the HTML comments the template uses for guidance
pub fn strip_guidance(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start..].find("-->") {
            Some(end) => rest = &rest[start + end + 3..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    }

    #[test]
    fn test_builtin_render() {
        let out = Template::builtin().render(date(), Chakra::Heart, "Who cared for you?");
        assert!(out.starts_with("# January 17, 2025"));
        assert!(out.contains("Heart: Who cared for you?"));
    }

    #[test]
    fn test_custom_template_placeholders() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".lights").join("templates");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("entry.md"), "{DAY_NAME} {ISO_DATE}\n> {PROMPT}\n").unwrap();

        let template = load_template(temp.path()).unwrap();
        let out = template.render(date(), Chakra::Root, "Where is home?");
        assert_eq!(out, "Friday 2025-01-17\n> Where is home?\n");
    }

    #[test]
    fn test_missing_custom_template_uses_builtin() {
        let temp = TempDir::new().unwrap();
        let out = load_template(temp.path())
            .unwrap()
            .render(date(), Chakra::Crown, "p");
        assert!(out.contains("Crown: p"));
    }

    #[test]
    fn test_strip_guidance() {
        assert_eq!(strip_guidance("# Day\n<!-- hint -->\nText"), "# Day\n\nText");
        assert_eq!(strip_guidance("a <!-- open"), "a ");
        assert_eq!(strip_guidance("plain"), "plain");
    }
}
