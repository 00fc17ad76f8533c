use crate::extract::in_stripped_subtree;
use scraper::{Html, Selector};
use serde::Serialize;

/// One `<form>` and its input controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormRecord {
    pub action: String,
    pub method: String,
    pub inputs: Vec<FormInput>,
}

/// One `<input>`, `<textarea>`, or `<select>` inside a form
///
/// `input_type` falls back to the tag name when the element carries no `type`
/// attribute, so textareas and selects are identifiable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormInput {
    #[serde(rename = "type")]
    pub input_type: String,
    pub name: String,
    pub placeholder: String,
    pub value: String,
    pub required: bool,
}

/// Extracts all form records from the document
pub fn extract_forms(document: &Html) -> Vec<FormRecord> {
    let (Ok(form_selector), Ok(input_selector)) = (
        Selector::parse("form"),
        Selector::parse("input, textarea, select"),
    ) else {
        return Vec::new();
    };

    document
        .select(&form_selector)
        .filter(|el| !in_stripped_subtree(el))
        .map(|form| {
            let inputs = form
                .select(&input_selector)
                .map(|input| {
                    let attr = |name: &str| input.value().attr(name).unwrap_or("").to_string();

                    FormInput {
                        input_type: input
                            .value()
                            .attr("type")
                            .unwrap_or_else(|| input.value().name())
                            .to_string(),
                        name: attr("name"),
                        placeholder: attr("placeholder"),
                        value: attr("value"),
                        required: input.value().attr("required").is_some(),
                    }
                })
                .collect();

            FormRecord {
                action: form.value().attr("action").unwrap_or("").to_string(),
                method: form.value().attr("method").unwrap_or("get").to_string(),
                inputs,
            }
        })
        .collect()
}
