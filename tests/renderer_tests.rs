#[cfg(test)]
mod tests {
    use config_render::error::Error;
    use config_render::renderer::{MiniJinjaRenderer, RenderOptions, TemplateRenderer};
    use serde_json::json;
    use test_log::test;

    fn test_template(template: &str, expected: &str) {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer.render(template, &json!({}), None).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_case_filters() {
        test_template("{{ 'hello world' | camel_case }}", "helloWorld");
        test_template("{{ 'hello world' | kebab_case }}", "hello-world");
        test_template("{{ 'hello world' | pascal_case }}", "HelloWorld");
        test_template("{{ 'hello world' | screaming_snake_case }}", "HELLO_WORLD");
        test_template("{{ 'hello world' | snake_case }}", "hello_world");
        test_template("{{ 'hello world' | train_case }}", "Hello-World");
    }

    fn test_match(value: &str, pattern: &str, expected: bool) {
        let template =
            format!("{{% if '{value}' | regex('{pattern}') %}}yes{{% else %}}no{{% endif %}}");
        test_template(&template, if expected { "yes" } else { "no" });
    }

    #[test]
    fn test_regex_filter() {
        test_match("hello world", "^hello", true);
        test_match("goodbye world", "^hello.*", false);
        test_match("Hello World", "(?i)hello", true);
        test_match("a+b=c", r"\\+", true);
    }

    #[test]
    fn test_builtin_filters_are_available() {
        test_template("{{ {'a': 1} | tojson }}", r#"{"a":1}"#);
        test_template("{{ 'a b' | urlencode }}", "a%20b");
        test_template("{{ [3, 1, 2] | sort | join(',') }}", "1,2,3");
    }

    #[test]
    fn test_output_is_not_escaped() {
        test_template("{{ '<upstream & backend>' }}", "<upstream & backend>");
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        test_template("listen 80;\n", "listen 80;\n");
    }

    #[test]
    fn test_to_yaml_filter() {
        let renderer = MiniJinjaRenderer::new();
        let result = renderer
            .render("{{ servers | to_yaml }}", &json!({"servers": ["a", "b"]}), None)
            .unwrap();
        assert_eq!(result, "- a\n- b");
    }

    #[test]
    fn test_required_filter_fails_on_missing_value() {
        let renderer = MiniJinjaRenderer::new();
        let result =
            renderer.render("{{ token | required('token must be set') }}", &json!({}), None);
        match result {
            Err(Error::MinijinjaError(e)) => assert!(e.to_string().contains("token must be set")),
            other => panic!("Expected a render error, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_mode() {
        let strict =
            MiniJinjaRenderer::with_options(&RenderOptions { strict: true, search_root: None });
        assert!(strict.render("{{ missing }}", &json!({}), None).is_err());
        test_template("[{{ missing }}]", "[]");
    }

    #[test]
    fn test_registered_templates_can_be_imported() {
        let mut renderer = MiniJinjaRenderer::new();
        renderer
            .add_template("macros.j2", "{% macro kv(k, v) %}{{ k }} = {{ v }}{% endmacro %}")
            .unwrap();
        let result = renderer
            .render(
                "{% from 'macros.j2' import kv %}{{ kv('port', port) }}",
                &json!({"port": 80}),
                None,
            )
            .unwrap();
        assert_eq!(result, "port = 80");
    }
}
