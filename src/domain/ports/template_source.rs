//! TemplateSource port - named template resources
//!
//! Templates are opaque text. The engine only substitutes documented
//! `${key}` placeholders; it never interprets any other syntax.

/// Lookup of template text by file name (e.g. `zoo.cfg`)
pub trait TemplateSource: Send + Sync {
    fn template(&self, name: &str) -> Option<String>;
}

/// Source with no templates at all; built-in renderings are used
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

impl TemplateSource for NoTemplates {
    fn template(&self, _name: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_source_trait_is_object_safe() {
        fn _assert_object_safe(_: &dyn TemplateSource) {}
    }

    #[test]
    fn no_templates_returns_none() {
        assert!(NoTemplates.template("zoo.cfg").is_none());
    }
}
