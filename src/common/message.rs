use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Message template interpolation for validation errors.
///
/// Placeholders are `{name}`. Replacement runs in a single pass, so a value
/// that itself looks like a placeholder is never expanded again. Placeholders
/// without a param are left in place.
pub struct Message;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(\w+)\}").unwrap())
}

impl Message {
    /// Replaces placeholders with params.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitmask_fields::common::message::Message;
    /// use std::collections::HashMap;
    ///
    /// let mut params = HashMap::new();
    /// params.insert("names".to_string(), "spam, deleted".to_string());
    ///
    /// let result = Message::interpolate("Only \"{names}\" fields can be modified", &params);
    /// assert_eq!(result, "Only \"spam, deleted\" fields can be modified");
    /// ```
    ///
    /// Values are not expanded again:
    ///
    /// ```
    /// use bitmask_fields::common::message::Message;
    /// use std::collections::HashMap;
    ///
    /// let mut params = HashMap::new();
    /// params.insert("a".to_string(), "{b}".to_string());
    /// params.insert("b".to_string(), "final".to_string());
    ///
    /// assert_eq!(Message::interpolate("{a}", &params), "{b}");
    /// ```
    pub fn interpolate(template: &str, params: &HashMap<String, String>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut last_match = 0;

        for cap in placeholder_re().captures_iter(template) {
            let Some(m) = cap.get(0) else { continue };
            result.push_str(&template[last_match..m.start()]);

            match params.get(&cap[1]) {
                Some(value) => result.push_str(value),
                None => result.push_str(m.as_str()),
            }

            last_match = m.end();
        }

        result.push_str(&template[last_match..]);
        result
    }
}
