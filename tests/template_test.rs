use mason::config::Placeholders;
use mason::template::{classify, is_template_name, strip_marker, substitute};
use std::path::Path;

fn vars(pairs: &[(&str, &str)]) -> Placeholders {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_substitute_basic() {
    let vars = vars(&[("PROJECT_NAME", "demo-app"), ("PORT_BACKEND", "8000")]);
    let result = substitute("name={{PROJECT_NAME}} port={{PORT_BACKEND}}", &vars);
    assert_eq!(result, "name=demo-app port=8000");
}

#[test]
fn test_substitute_without_placeholders_is_identity() {
    let vars = vars(&[("PROJECT_NAME", "demo-app")]);
    let content = "plain text, no tokens { } {{ half";
    assert_eq!(substitute(content, &vars), content);
}

#[test]
fn test_substitute_unknown_key_passes_through() {
    let vars = vars(&[("PROJECT_NAME", "demo-app")]);
    let result = substitute("{{PROJECT_NAME}} and {{NOT_A_KEY}}", &vars);
    assert_eq!(result, "demo-app and {{NOT_A_KEY}}");
}

#[test]
fn test_substitute_no_recursive_expansion() {
    let vars = vars(&[("A", "contains {{B}} literally"), ("B", "nope")]);
    let result = substitute("value: {{A}}", &vars);
    assert_eq!(result, "value: contains {{B}} literally");
}

#[test]
fn test_substitute_repeated_key() {
    let vars = vars(&[("X", "1")]);
    assert_eq!(substitute("{{X}}{{X}}{{X}}", &vars), "111");
}

#[test]
fn test_substitute_no_whitespace_tolerance() {
    let vars = vars(&[("KEY", "value")]);
    assert_eq!(substitute("{{ KEY }}", &vars), "{{ KEY }}");
}

#[test]
fn test_substitute_multiline_value() {
    let vars = vars(&[("ENV", "\n      - A=1\n      - B=2")]);
    assert_eq!(substitute("env:{{ENV}}", &vars), "env:\n      - A=1\n      - B=2");
}

#[test]
fn test_substitute_overlapping_braces() {
    let vars = vars(&[("KEY", "v")]);
    assert_eq!(substitute("{{{KEY}}}", &vars), "{v}");
    assert_eq!(substitute("{{ {{KEY}}", &vars), "{{ v");
}

#[test]
fn test_is_template_name() {
    assert!(is_template_name("config.yml.template"));
    assert!(is_template_name("CLAUDE.md.template"));
    assert!(is_template_name("settings.template.json"));
    assert!(!is_template_name("README.md"));
    assert!(!is_template_name("template.md"));
}

#[test]
fn test_strip_marker() {
    assert_eq!(strip_marker("config.yml.template"), "config.yml");
    assert_eq!(strip_marker("settings.template.json"), "settings.json");
    assert_eq!(strip_marker("README.md"), "README.md");
}

#[test]
fn test_classify() {
    let (target, is_template) = classify(Path::new("docs/SETUP.md.template"));
    assert_eq!(target, "docs/SETUP.md");
    assert!(is_template);

    let (target, is_template) = classify(Path::new("docs/SETUP.md"));
    assert_eq!(target, "docs/SETUP.md");
    assert!(!is_template);
}
