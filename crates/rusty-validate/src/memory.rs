//! In-memory form adapters
//!
//! Headless implementations of [`FormAdapter`], [`FieldAdapter`] and
//! [`FileHandle`], built with chained constructors. Values and check state
//! use interior mutability so modifiers and hosts can update them through a
//! shared reference.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::DecodeError;
use crate::field::{FieldAdapter, FieldKind, FileHandle, FormAdapter};

/// A selected file held in memory
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    mime_type: String,
    size: u64,
    dimensions: Option<(u32, u32)>,
    stalled: bool,
}

impl MemoryFile {
    /// A non-image file
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            dimensions: None,
            stalled: false,
        }
    }

    /// An image that decodes to `width` x `height`
    pub fn image(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            dimensions: Some((width, height)),
            ..Self::new(name, mime_type, size)
        }
    }

    /// Decoding never completes
    pub fn stalled(mut self) -> Self {
        self.stalled = true;
        self
    }
}

#[async_trait(?Send)]
impl FileHandle for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn decode_image_dimensions(&self) -> Result<(u32, u32), DecodeError> {
        if self.stalled {
            futures::future::pending::<()>().await;
        }
        match self.dimensions {
            Some(dimensions) => Ok(dimensions),
            None if self.mime_type.starts_with("image/") => Err(DecodeError::Corrupt {
                name: self.name.clone(),
                reason: "no image data".to_string(),
            }),
            None => Err(DecodeError::NotAnImage(self.name.clone())),
        }
    }
}

/// A form control held in memory
#[derive(Debug)]
pub struct MemoryField {
    id: String,
    name: String,
    kind: FieldKind,
    value: RefCell<String>,
    attributes: HashMap<String, String>,
    checked: Cell<bool>,
    selected: Cell<usize>,
    files: Vec<MemoryFile>,
}

impl MemoryField {
    /// New empty field; the id defaults to the name
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            kind,
            value: RefCell::new(String::new()),
            attributes: HashMap::new(),
            checked: Cell::new(false),
            selected: Cell::new(0),
            files: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.value.replace(value.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Shorthand for the rule list attribute
    pub fn with_rules(self, rules: &str) -> Self {
        self.with_attr("data-validators", rules)
    }

    pub fn checked(self, checked: bool) -> Self {
        self.checked.set(checked);
        self
    }

    pub fn with_selected(self, count: usize) -> Self {
        self.selected.set(count);
        self
    }

    pub fn with_file(mut self, file: MemoryFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    pub fn set_selected(&self, count: usize) {
        self.selected.set(count);
    }
}

impl FieldAdapter for MemoryField {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        self.value.replace(value.to_string());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn is_checked(&self) -> bool {
        self.checked.get()
    }

    fn selected_count(&self) -> usize {
        self.selected.get()
    }

    fn files(&self) -> Vec<&dyn FileHandle> {
        self.files.iter().map(|f| f as &dyn FileHandle).collect()
    }
}

/// A form held in memory
#[derive(Debug, Default)]
pub struct MemoryForm {
    id: String,
    fields: Vec<MemoryField>,
}

impl MemoryForm {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: MemoryField) -> Self {
        self.fields.push(field);
        self
    }

    /// Field by id, for hosts and tests that need the concrete type
    pub fn get(&self, id: &str) -> Option<&MemoryField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

impl FormAdapter for MemoryForm {
    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> Vec<&dyn FieldAdapter> {
        self.fields.iter().map(|f| f as &dyn FieldAdapter).collect()
    }
}
