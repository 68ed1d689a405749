//! Field and form adapter contracts
//!
//! The engine never touches a DOM. Hosts describe their forms through
//! [`FormAdapter`] and [`FieldAdapter`]; [`crate::memory`] has in-memory
//! implementations for tests and server-side validation.

use async_trait::async_trait;

use crate::error::DecodeError;

/// Input kind, mirroring the HTML `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Tel,
    Url,
    Search,
    Date,
    Time,
    Color,
    Hidden,
    Checkbox,
    Radio,
    File,
    Select,
    SelectMultiple,
    Textarea,
    Submit,
    Button,
    Reset,
    Image,
}

impl FieldKind {
    /// Parse an HTML type name; unknown types behave like text inputs
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().as_str() {
            "email" => FieldKind::Email,
            "password" => FieldKind::Password,
            "number" | "range" => FieldKind::Number,
            "tel" => FieldKind::Tel,
            "url" => FieldKind::Url,
            "search" => FieldKind::Search,
            "date" => FieldKind::Date,
            "time" => FieldKind::Time,
            "color" => FieldKind::Color,
            "hidden" => FieldKind::Hidden,
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            "file" => FieldKind::File,
            "select" | "select-one" => FieldKind::Select,
            "select-multiple" => FieldKind::SelectMultiple,
            "textarea" => FieldKind::Textarea,
            "submit" => FieldKind::Submit,
            "button" => FieldKind::Button,
            "reset" => FieldKind::Reset,
            "image" => FieldKind::Image,
            _ => FieldKind::Text,
        }
    }

    /// Buttons and image inputs carry no data
    pub fn is_control(self) -> bool {
        matches!(
            self,
            FieldKind::Submit | FieldKind::Button | FieldKind::Reset | FieldKind::Image
        )
    }

    /// Checkboxes and radios: validated as a same-named group
    pub fn is_checkable(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }
}

/// A file selected in a file input
#[async_trait(?Send)]
pub trait FileHandle {
    fn name(&self) -> &str;

    /// Size in bytes
    fn size(&self) -> u64;

    fn mime_type(&self) -> &str;

    /// Decode the file as an image and report `(width, height)` in pixels
    async fn decode_image_dimensions(&self) -> Result<(u32, u32), DecodeError>;
}

/// One form control as seen by the engine
pub trait FieldAdapter {
    /// Identity unique within the form (radios in a group share a name, not an id)
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn kind(&self) -> FieldKind;

    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    /// Configured attribute value, `None` when absent
    fn attribute(&self, name: &str) -> Option<String>;

    fn is_checked(&self) -> bool {
        false
    }

    /// Number of selected options (multi-selects)
    fn selected_count(&self) -> usize {
        0
    }

    fn files(&self) -> Vec<&dyn FileHandle> {
        Vec::new()
    }
}

/// A form: an identity plus its fields in document order
pub trait FormAdapter {
    fn id(&self) -> &str;

    fn fields(&self) -> Vec<&dyn FieldAdapter>;

    /// Look a field up by name, falling back to id
    fn field(&self, name: &str) -> Option<&dyn FieldAdapter> {
        let fields = self.fields();
        fields
            .iter()
            .find(|f| f.name() == name)
            .or_else(|| fields.iter().find(|f| f.id() == name))
            .copied()
    }

    /// Every field sharing `name` (checkbox and radio groups)
    fn group(&self, name: &str) -> Vec<&dyn FieldAdapter> {
        self.fields()
            .into_iter()
            .filter(|f| f.name() == name)
            .collect()
    }
}

/// The value a field contributes to the form
///
/// Checkable fields report the value of the first checked member of their
/// group, or an empty string when nothing in the group is checked.
pub fn effective_value(form: &dyn FormAdapter, field: &dyn FieldAdapter) -> String {
    if !field.kind().is_checkable() {
        return field.value();
    }
    form.group(field.name())
        .into_iter()
        .find(|member| member.is_checked())
        .map(|member| member.value())
        .unwrap_or_default()
}

/// Display label for messages: `data-label`-style attribute, else the name
pub fn field_label(field: &dyn FieldAdapter, label_attribute: &str) -> String {
    field
        .attribute(label_attribute)
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| field.name().to_string())
}
