use crate::record::StatusTokens;

/// One attribute as delivered by the tokenizer. Bare attributes (`<input disabled>`)
/// carry no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// Attributes of a start tag, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and tokenizer adapters.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, Some(value.into()));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.push(Attribute {
            name: name.into(),
            value,
        });
    }

    /// True when the attribute is present, with or without a value.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Value of the first attribute with this name. `None` when the attribute
    /// is absent or bare.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(|attr| attr.value.as_deref())
    }

    /// Class tokens, or `None` when there is no `class` attribute at all.
    /// A bare or empty `class` yields an empty token set.
    pub fn class_tokens(&self) -> Option<StatusTokens> {
        self.find("class")
            .map(|attr| StatusTokens::from_class(attr.value.as_deref().unwrap_or("")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    fn find(&self, name: &str) -> Option<&Attribute> {
        self.0
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }
}

/// Markup events consumed by the tag scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Start { name: String, attrs: Attributes },
    End { name: String },
    Text(String),
}

impl TagEvent {
    pub fn start(name: impl Into<String>, attrs: Attributes) -> Self {
        TagEvent::Start {
            name: name.into(),
            attrs,
        }
    }

    pub fn end(name: impl Into<String>) -> Self {
        TagEvent::End { name: name.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        TagEvent::Text(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Attributes;

    #[test]
    fn presence_is_distinct_from_value() {
        let mut attrs = Attributes::new().with("title", "$5");
        attrs.push("disabled", None);

        assert!(attrs.contains("disabled"));
        assert_eq!(attrs.get("disabled"), None);
        assert_eq!(attrs.get("TITLE"), Some("$5"));
        assert!(!attrs.contains("class"));
        assert_eq!(attrs.class_tokens(), None);
    }

    #[test]
    fn bare_class_is_present_but_empty() {
        let mut attrs = Attributes::new();
        attrs.push("class", None);
        let tokens = attrs.class_tokens().expect("class present");
        assert!(tokens.is_empty());
    }
}
