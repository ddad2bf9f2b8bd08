//! Filename prefix templates.
//!
//! Tokens are plain textual substitutions. `%width%`, `%height%` and `%date%`
//! are resolved once per batch; `%batch_num%` is resolved per image.

pub const WIDTH_TOKEN: &str = "%width%";
pub const HEIGHT_TOKEN: &str = "%height%";
pub const DATE_TOKEN: &str = "%date%";
pub const BATCH_NUM_TOKEN: &str = "%batch_num%";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
    raw: String,
}

/// A template with its batch-wide tokens already substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTemplate {
    resolved: String,
}

impl FilenameTemplate {
    pub fn new(raw: impl Into<String>) -> Self {
        FilenameTemplate { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn resolve_batch(&self, width: u32, height: u32, date: &str) -> BatchTemplate {
        let resolved = self
            .raw
            .replace(WIDTH_TOKEN, &width.to_string())
            .replace(HEIGHT_TOKEN, &height.to_string())
            .replace(DATE_TOKEN, date);
        BatchTemplate { resolved }
    }
}

impl BatchTemplate {
    pub fn as_str(&self) -> &str {
        &self.resolved
    }

    pub fn prefix_for(&self, batch_index: usize) -> String {
        self.resolved.replace(BATCH_NUM_TOKEN, &batch_index.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_dimensions_and_batch_number() {
        let template = FilenameTemplate::new("pic_%width%x%height%_%batch_num%");
        let batch = template.resolve_batch(512, 768, "20240101");
        assert_eq!(batch.prefix_for(2), "pic_512x768_2");
    }

    #[test]
    fn replaces_every_occurrence() {
        let template = FilenameTemplate::new("%date%/%date%_%batch_num%_%batch_num%");
        let batch = template.resolve_batch(1, 1, "20261018");
        assert_eq!(batch.prefix_for(7), "20261018/20261018_7_7");
    }

    #[test]
    fn literal_text_and_empty_templates_pass_through() {
        assert_eq!(FilenameTemplate::new("ComfyUI").resolve_batch(8, 8, "d").prefix_for(0), "ComfyUI");
        assert_eq!(FilenameTemplate::new("").resolve_batch(8, 8, "d").prefix_for(3), "");
    }

    #[test]
    fn batch_token_survives_batch_resolution() {
        let batch = FilenameTemplate::new("x_%batch_num%").resolve_batch(4, 4, "d");
        assert_eq!(batch.as_str(), "x_%batch_num%");
    }
}
