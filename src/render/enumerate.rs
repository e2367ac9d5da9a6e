//! Enumeration presentation sub-protocol
//!
//! A second-order dispatch inside the type behavior: any type declaring an
//! ordered list of enumerated values can render as a single-choice list, a
//! radio group, or a checkbox. An explicit per-field hint picks the encoding;
//! hints that do not apply to the value shape fall back silently to the
//! list-style default.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::TypeRenderArgs;
use crate::render::fragment::{AttrList, Element, Fragment};
use crate::render::{Renderer, value_text};
use crate::schema::EnumValue;
use crate::utils::logging;

/// UI hint key requesting a specific enumeration encoding
pub const PRESENTATION_HINT: &str = "presentation";

/// The supported enumeration encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumPresentation {
    /// Single-choice list, the default
    Select,
    /// One radio input per value
    Radio,
    /// A single checkbox, boolean-valued enumerations only
    Checkbox,
}

impl EnumPresentation {
    /// Parse a presentation hint value
    #[must_use]
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "select" => Some(Self::Select),
            "radio" => Some(Self::Radio),
            "checkbox" => Some(Self::Checkbox),
            _ => None,
        }
    }
}

/// Whether every raw value is boolean-shaped text
///
/// The checkbox encoding only applies to these.
#[must_use]
pub fn is_boolean_enumeration(values: &[EnumValue]) -> bool {
    !values.is_empty()
        && values
            .iter()
            .all(|value| value.value == "true" || value.value == "false")
}

/// Render an enumerated type with the effective presentation
///
/// Honors the field's presentation hint when it parses and applies;
/// otherwise falls through to the select-style default. Selection is by
/// textual value equality against the supplied default, required flags are
/// carried onto the control, and value declaration order is display order.
pub fn render_enumeration(
    renderer: &Renderer<'_>,
    args: &TypeRenderArgs<'_>,
    values: &[EnumValue],
) -> Result<Fragment> {
    let warn = renderer.config().warn_on_hint_fallback;
    let presentation = match args.field.hint(PRESENTATION_HINT) {
        Some(hint) => match EnumPresentation::from_hint(hint) {
            Some(EnumPresentation::Checkbox) if !is_boolean_enumeration(values) => {
                logging::log_hint_fallback(args.field.name(), hint, warn);
                EnumPresentation::Select
            }
            Some(presentation) => presentation,
            None => {
                logging::log_hint_fallback(args.field.name(), hint, warn);
                EnumPresentation::Select
            }
        },
        None => EnumPresentation::Select,
    };

    let name = renderer.control_name(args.name_prefix, args.field);
    let default = args.default.map(value_text);
    let required = args.field.is_required();

    // The encoding owns the control's type attribute; an inherited attrs
    // default must not override it.
    let mut options = args.options.clone();
    options.remove("type");

    Ok(match presentation {
        EnumPresentation::Select => {
            render_select(&name, values, default.as_deref(), required, &options)
        }
        EnumPresentation::Radio => {
            render_radio_group(&name, values, default.as_deref(), required, &options)
        }
        EnumPresentation::Checkbox => {
            render_checkbox(&name, default.as_deref(), required, &options)
        }
    })
}

fn render_select(
    name: &str,
    values: &[EnumValue],
    default: Option<&str>,
    required: bool,
    options: &AttrList,
) -> Fragment {
    let mut select = Element::new("select")
        .with_attrs(options)
        .with_attr("name", name);
    if required {
        select = select.with_attr("required", "");
    }
    for value in values {
        let mut option = Element::new("option").with_attr("value", &value.value);
        if default == Some(value.value.as_str()) {
            option = option.with_attr("selected", "");
        }
        select = select.with_child(option.with_text(&value.label));
    }
    select.into()
}

fn render_radio_group(
    name: &str,
    values: &[EnumValue],
    default: Option<&str>,
    required: bool,
    options: &AttrList,
) -> Fragment {
    let mut group = Vec::with_capacity(values.len());
    for value in values {
        let mut input = Element::new("input")
            .with_attrs(options)
            .with_attr("type", "radio")
            .with_attr("name", name)
            .with_attr("value", &value.value);
        if default == Some(value.value.as_str()) {
            input = input.with_attr("checked", "");
        }
        if required {
            input = input.with_attr("required", "");
        }
        group.push(
            Element::new("label")
                .with_child(input.void())
                .with_text(&value.label)
                .into(),
        );
    }
    Fragment::Group(group)
}

fn render_checkbox(
    name: &str,
    default: Option<&str>,
    required: bool,
    options: &AttrList,
) -> Fragment {
    let mut input = Element::new("input")
        .with_attrs(options)
        .with_attr("type", "checkbox")
        .with_attr("name", name)
        .with_attr("value", "true");
    if default == Some("true") {
        input = input.with_attr("checked", "");
    }
    if required {
        input = input.with_attr("required", "");
    }
    input.void().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hint() {
        assert_eq!(EnumPresentation::from_hint("radio"), Some(EnumPresentation::Radio));
        assert_eq!(EnumPresentation::from_hint("carousel"), None);
    }

    #[test]
    fn test_is_boolean_enumeration() {
        let boolean = vec![EnumValue::new("true", "Yes"), EnumValue::new("false", "No")];
        assert!(is_boolean_enumeration(&boolean));

        let status = vec![EnumValue::new("draft", "Draft"), EnumValue::new("live", "Live")];
        assert!(!is_boolean_enumeration(&status));

        assert!(!is_boolean_enumeration(&[]));
    }

    #[test]
    fn test_select_marks_default_and_required() {
        let values = vec![
            EnumValue::new("draft", "Draft"),
            EnumValue::new("live", "Live"),
        ];
        let markup = render_select("status", &values, Some("live"), true, &AttrList::new())
            .to_markup();
        assert_eq!(
            markup,
            "<select name=\"status\" required>\
             <option value=\"draft\">Draft</option>\
             <option value=\"live\" selected>Live</option>\
             </select>"
        );
    }

    #[test]
    fn test_radio_group_preserves_declaration_order() {
        let values = vec![
            EnumValue::new("a", "First"),
            EnumValue::new("b", "Second"),
        ];
        let markup =
            render_radio_group("pick", &values, Some("b"), false, &AttrList::new()).to_markup();
        assert_eq!(
            markup,
            "<label><input type=\"radio\" name=\"pick\" value=\"a\"/>First</label>\
             <label><input type=\"radio\" name=\"pick\" value=\"b\" checked/>Second</label>"
        );
    }

    #[test]
    fn test_checkbox_checked_by_text_equality() {
        let markup = render_checkbox("done", Some("true"), false, &AttrList::new()).to_markup();
        assert_eq!(
            markup,
            "<input type=\"checkbox\" name=\"done\" value=\"true\" checked/>"
        );
    }
}
