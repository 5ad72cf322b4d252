//! Property tests for `${key}` substitution.

use proptest::prelude::*;

use elkform::domain::services::{substitute, TemplateVars};

fn vars() -> TemplateVars {
    let mut vars = TemplateVars::new();
    vars.insert("cluster", "logs".to_string());
    vars
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Text without placeholders passes through unchanged.
    #[test]
    fn property_plain_text_is_identity(text in "[^$]{0,200}") {
        prop_assert_eq!(substitute(&text, &vars()), text);
    }

    /// PROPERTY: Substitution never panics on arbitrary input.
    #[test]
    fn property_substitute_never_panics(text in "(?s).{0,256}") {
        let _ = substitute(&text, &vars());
    }

    /// PROPERTY: Every known placeholder is replaced.
    #[test]
    fn property_known_placeholders_are_replaced(
        before in "[a-z ]{0,20}",
        after in "[a-z ]{0,20}",
    ) {
        let text = format!("{}${{cluster}}{}", before, after);
        prop_assert_eq!(substitute(&text, &vars()), format!("{}logs{}", before, after));
    }
}
