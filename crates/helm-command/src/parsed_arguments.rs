use helm_core::Snowflake;

/// A coerced argument value, or an explicit marker for an optional argument
/// that was omitted or failed coercion. Handlers index by position; there is
/// never a missing slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Absent,
    String(String),
    Integer(i64),
    Boolean(bool),
    User(Snowflake),
    Channel(Snowflake),
    Role(Snowflake),
    Mentionable(Snowflake),
    Number(f64),
}

impl ArgumentValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Positional argument values for one invocation. Built once by the coercer
/// and consumed exactly once by the dispatched handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgumentSet {
    values: Vec<ArgumentValue>,
}

impl ParsedArgumentSet {
    pub fn new(values: Vec<ArgumentValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> &ArgumentValue {
        self.values.get(position).unwrap_or(&ArgumentValue::Absent)
    }

    pub fn string(&self, position: usize) -> Option<&str> {
        match self.get(position) {
            ArgumentValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, position: usize) -> Option<i64> {
        match self.get(position) {
            ArgumentValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean(&self, position: usize) -> Option<bool> {
        match self.get(position) {
            ArgumentValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn user(&self, position: usize) -> Option<Snowflake> {
        match self.get(position) {
            ArgumentValue::User(id) => Some(*id),
            _ => None,
        }
    }

    pub fn channel(&self, position: usize) -> Option<Snowflake> {
        match self.get(position) {
            ArgumentValue::Channel(id) => Some(*id),
            _ => None,
        }
    }

    pub fn role(&self, position: usize) -> Option<Snowflake> {
        match self.get(position) {
            ArgumentValue::Role(id) => Some(*id),
            _ => None,
        }
    }

    pub fn mentionable(&self, position: usize) -> Option<Snowflake> {
        match self.get(position) {
            ArgumentValue::Mentionable(id) => Some(*id),
            _ => None,
        }
    }

    pub fn number(&self, position: usize) -> Option<f64> {
        match self.get(position) {
            ArgumentValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}
