//! Transient text typed into the entry form.

/// Named inputs of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Distance,
}

impl FormField {
    /// Resolve an input by its form name (`date` or `distance`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Self::Date),
            "distance" => Some(Self::Distance),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Distance => "distance",
        }
    }
}

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub date: String,
    pub distance: String,
}

impl EntryForm {
    /// Replace one field, leaving the other untouched.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Distance => &self.distance,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Date => &mut self.date,
            FormField::Distance => &mut self.distance,
        }
    }

    pub fn clear(&mut self) {
        self.date.clear();
        self.distance.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.distance.is_empty()
    }
}
