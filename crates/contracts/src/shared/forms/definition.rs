use super::field::FieldTemplate;

/// Static declaration of one entity's form
#[derive(Debug, Clone, PartialEq)]
pub struct EntityFormDef {
    pub entity_name: String,
    /// Field that uniquely identifies a stored record
    pub id_field: String,
    /// Field shown when this entity is offered as a foreign-key option
    pub label_field: String,
    /// May other forms create this entity inline
    pub allow_inline_create: bool,
    pub fields: Vec<FieldTemplate>,
}

impl EntityFormDef {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            id_field: "id".to_string(),
            label_field: "id".to_string(),
            allow_inline_create: false,
            fields: Vec::new(),
        }
    }

    pub fn label_field(mut self, name: impl Into<String>) -> Self {
        self.label_field = name.into();
        self
    }

    pub fn inline_create(mut self, allowed: bool) -> Self {
        self.allow_inline_create = allowed;
        self
    }

    pub fn field(mut self, template: FieldTemplate) -> Self {
        self.fields.push(template);
        self
    }
}
