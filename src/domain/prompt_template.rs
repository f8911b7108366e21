use std::collections::BTreeSet;

/// A prompt with named `{slot}` placeholders. `{{` and `}}` render as literal
/// braces. The set of slots must equal the declared input variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
    input_variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptTemplateError {
    #[error("unclosed placeholder starting at byte {0}")]
    UnclosedSlot(usize),
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClosingBrace(usize),
    #[error("empty placeholder at byte {0}")]
    EmptySlot(usize),
    #[error("placeholder {{{0}}} is not a declared input variable")]
    UndeclaredVariable(String),
    #[error("input variable '{0}' does not appear in the template")]
    UnusedVariable(String),
    #[error("no value supplied for '{0}'")]
    MissingValue(String),
}

impl PromptTemplate {
    pub fn new(
        template: &str,
        input_variables: Vec<String>,
    ) -> Result<Self, PromptTemplateError> {
        let segments = parse(template)?;

        let slots: BTreeSet<&str> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Slot(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect();

        if let Some(undeclared) = slots
            .iter()
            .copied()
            .find(|slot| !input_variables.iter().any(|v| v == slot))
        {
            return Err(PromptTemplateError::UndeclaredVariable(
                undeclared.to_string(),
            ));
        }

        if let Some(unused) = input_variables
            .iter()
            .find(|v| !slots.contains(v.as_str()))
        {
            return Err(PromptTemplateError::UnusedVariable(unused.clone()));
        }

        Ok(Self {
            segments,
            input_variables,
        })
    }

    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, PromptTemplateError> {
        let mut rendered = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Slot(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| PromptTemplateError::MissingValue(name.clone()))?;
                    rendered.push_str(value);
                }
            }
        }

        Ok(rendered)
    }
}

fn parse(template: &str) -> Result<Vec<Segment>, PromptTemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                chars.next();
                literal.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => return Err(PromptTemplateError::UnclosedSlot(pos)),
                        Some((_, ch)) => name.push(ch),
                    }
                }
                if name.is_empty() {
                    return Err(PromptTemplateError::EmptySlot(pos));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Slot(name));
            }
            '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                chars.next();
                literal.push('}');
            }
            '}' => return Err(PromptTemplateError::UnmatchedClosingBrace(pos)),
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}
