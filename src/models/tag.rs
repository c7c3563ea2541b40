use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pastel colors offered when creating a tag
pub const TAG_COLOR_PALETTE: [&str; 7] =
    ["#FFCCCC", "#CCE5FF", "#FFF2CC", "#E5CCFF", "#CCFFCC", "#FFE5CC", "#F0F0F0"];

pub const DEFAULT_TAG_COLOR: &str = "#CCE5FF";
pub const DEFAULT_TAG_PRIORITY: u8 = 3;
pub const MIN_TAG_PRIORITY: u8 = 1;
pub const MAX_TAG_PRIORITY: u8 = 5;

/// A user-defined classification label.
///
/// This is also the persisted shape: the registry stores a JSON array of these
/// records with exactly the fields `id`, `name`, `color`, `priority` and `rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Informational ranking in `[1, 5]`, never applied to thread priority
    pub priority: u8,
    /// Matching rules such as `contains:urgent`, stored but not evaluated
    pub rules: Vec<String>,
}

impl Tag {
    pub fn new(id: &str, name: &str, color: &str, priority: u8, rules: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            priority,
            rules: rules.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Case-insensitive name comparison used by lookups
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// User input for a new tag, validated before it becomes a [`Tag`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDraft {
    pub name: String,
    pub color: Option<String>,
    pub priority: Option<u8>,
    pub rules: Vec<String>,
}

impl TagDraft {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    /// Check the draft without consuming it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The trimmed name is empty
    /// - The priority is outside `[1, 5]`
    /// - Any rule is not a valid `<field>:<substring>` expression
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Tag name cannot be empty");
        }

        if let Some(priority) = self.priority {
            validate_priority(priority)?;
        }

        for rule in &self.rules {
            TagRule::parse(rule)?;
        }

        Ok(())
    }

    /// Validate and turn the draft into a tag with a fresh id
    pub fn into_tag(self) -> Result<Tag> {
        self.into_tag_with_id(&Uuid::new_v4().to_string())
    }

    /// Validate and turn the draft into a tag carrying an existing id
    pub fn into_tag_with_id(self, id: &str) -> Result<Tag> {
        self.validate()?;

        Ok(Tag {
            id: id.to_string(),
            name: self.name.trim().to_string(),
            color: self.color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
            priority: self.priority.unwrap_or(DEFAULT_TAG_PRIORITY),
            rules: self.rules,
        })
    }
}

/// Partial edit of an existing tag
///
/// Only the supplied fields are validated, so a stored tag carrying a rule the
/// parser no longer accepts can still have its color or priority changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub priority: Option<u8>,
    /// Replaces all rules when present
    pub rules: Option<Vec<String>>,
}

impl TagPatch {
    /// Validate the supplied fields and overlay them on `tag`
    pub fn apply_to(self, tag: &Tag) -> Result<Tag> {
        let mut updated = tag.clone();

        if let Some(name) = self.name {
            let name = name.trim();
            if name.is_empty() {
                bail!("Tag name cannot be empty");
            }
            updated.name = name.to_string();
        }

        if let Some(color) = self.color {
            updated.color = color;
        }

        if let Some(priority) = self.priority {
            validate_priority(priority)?;
            updated.priority = priority;
        }

        if let Some(rules) = self.rules {
            for rule in &rules {
                TagRule::parse(rule)?;
            }
            updated.rules = rules;
        }

        Ok(updated)
    }
}

pub fn validate_priority(priority: u8) -> Result<()> {
    if !(MIN_TAG_PRIORITY..=MAX_TAG_PRIORITY).contains(&priority) {
        bail!(
            "Tag priority must be between {} and {} (got {})",
            MIN_TAG_PRIORITY,
            MAX_TAG_PRIORITY,
            priority
        );
    }
    Ok(())
}

/// Field a rule inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    /// Message content contains the substring (case-insensitive)
    Contains,
}

/// Parsed form of a stored `<field>:<substring>` rule expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub field: RuleField,
    pub pattern: String,
}

impl TagRule {
    /// Parse a rule expression such as `contains:urgent`
    ///
    /// The field name is case-insensitive. Surrounding double quotes around the
    /// pattern are stripped so `contains:"follow up"` keeps its space.
    pub fn parse(input: &str) -> Result<Self> {
        let (field, pattern) = input
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid rule '{}': expected <field>:<substring>", input))?;

        let field = match field.trim().to_lowercase().as_str() {
            "contains" => RuleField::Contains,
            "" => bail!("Invalid rule '{}': empty field name", input),
            other => bail!("Unknown rule field '{}' in '{}'. Valid fields: contains", other, input),
        };

        let pattern = pattern.trim();
        let pattern = pattern
            .strip_prefix('"')
            .and_then(|p| p.strip_suffix('"'))
            .unwrap_or(pattern);

        if pattern.is_empty() {
            bail!("Invalid rule '{}': empty substring", input);
        }

        Ok(Self { field, pattern: pattern.to_string() })
    }
}
