pub const TUTOR_USER: &str = include_str!("../data/prompts/tutor_user.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is a single pass over the template: placeholder-looking text
/// inside a value is left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let key = &rest[start + 2..start + 2 + len];
        result.push_str(&rest[..start]);
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + len + 2]),
        }
        rest = &rest[start + 2 + len + 2..];
    }

    result.push_str(rest);
    result
}
