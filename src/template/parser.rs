//! Template parsing: find delimiters, strip them and lay out tags and base text.
//!
//! Parsing is pure. [`Session::load`](super::Session::load) applies the result
//! to a document.

use std::collections::HashSet;
use std::ops::Range;

use super::error::ConfigurationError;
use super::settings::TemplateSettings;
use crate::editable::Position;

/// One delimiter occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDescriptor {
    pub name: String,
    pub multiline: bool,
    /// Char offset of the tag's zero-width anchor in the stripped text
    pub offset: usize,
    /// Char range of the delimiter in the raw template
    pub source: Range<usize>,
    /// Position of the delimiter in the raw template
    pub position: Position,
}

/// Read-only text between tags, in stripped char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseSegment {
    pub range: Range<usize>,
    pub inclusive_left: bool,
    pub inclusive_right: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    /// Template text with every delimiter removed
    pub text: String,
    /// Tags in source order
    pub tags: Vec<TagDescriptor>,
    /// Non-empty base segments in source order
    pub segments: Vec<BaseSegment>,
}

/// Parse a raw template.
///
/// Fails on a repeated tag name, or on a tag that directly follows the previous
/// one with no base text in between. A first tag at the document start is fine.
pub fn parse(
    template: &str,
    settings: &TemplateSettings,
) -> Result<ParsedTemplate, ConfigurationError> {
    let regex = settings.delimiter.regex();
    let mut text = String::with_capacity(template.len());
    let mut tags: Vec<TagDescriptor> = Vec::new();
    let mut segments = Vec::new();
    let mut seen = HashSet::new();

    // Char offsets of the current line start
    let mut raw_line_start = 0;
    let mut stripped_line_start = 0;
    let mut last_tag_end = 0;

    for (line_no, line) in template.split('\n').enumerate() {
        if line_no > 0 {
            text.push('\n');
            raw_line_start += 1;
            stripped_line_start += 1;
        }

        let mut removed = 0;
        let mut copied_to = 0;
        for caps in regex.captures_iter(line) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let name = caps.get(1).map_or("", |m| m.as_str());
            let raw_column = line[..whole.start()].chars().count();
            let match_len = whole.as_str().chars().count();
            let offset = stripped_line_start + raw_column - removed;
            let position = Position::new(line_no, raw_column);

            if !seen.insert(name) {
                tracing::warn!("duplicate tag '{}' at {}", name, position);
                return Err(ConfigurationError::DuplicateTag {
                    name: name.to_string(),
                    position,
                });
            }
            if !tags.is_empty() && offset == last_tag_end {
                tracing::warn!("tag '{}' at {} touches the previous tag", name, position);
                return Err(ConfigurationError::AdjacentTags {
                    name: name.to_string(),
                    position,
                });
            }

            if offset > last_tag_end {
                segments.push(BaseSegment {
                    range: last_tag_end..offset,
                    inclusive_left: tags.is_empty(),
                    inclusive_right: false,
                });
            }

            text.push_str(&line[copied_to..whole.start()]);
            copied_to = whole.end();
            removed += match_len;

            let raw_start = raw_line_start + raw_column;
            tags.push(TagDescriptor {
                name: name.to_string(),
                multiline: settings.is_multiline(name),
                offset,
                source: raw_start..raw_start + match_len,
                position,
            });
            last_tag_end = offset;
        }
        text.push_str(&line[copied_to..]);

        let line_len = line.chars().count();
        raw_line_start += line_len;
        stripped_line_start += line_len - removed;
    }

    if stripped_line_start > last_tag_end {
        segments.push(BaseSegment {
            range: last_tag_end..stripped_line_start,
            inclusive_left: tags.is_empty(),
            inclusive_right: true,
        });
    }

    tracing::debug!(
        "parsed template: {} tag(s), {} base segment(s)",
        tags.len(),
        segments.len()
    );

    Ok(ParsedTemplate {
        text,
        tags,
        segments,
    })
}
