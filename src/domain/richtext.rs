use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref TOKEN_PATTERN: Regex =
        Regex::new(r"#[A-Za-z0-9_]+|@[A-Za-z0-9_]+").unwrap();
}

use crate::domain::entity::{Attachment, EventInfo, GeoPoint, Poll, UserId};

/// A node in the composer's rich-text tree.
///
/// Mentions carry the stored target id from autocomplete, not the display
/// text; hashtags carry the tag text including the leading `#`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Text(String),
    Hashtag(String),
    Mention { target: UserId, display: String },
    Paragraph(Vec<Node>),
}

/// The composer document: an ordered sequence of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.render().trim().is_empty()
    }

    /// Render the document back to plain text, as sent in the submit payload.
    pub fn render(&self) -> String {
        fn walk(node: &Node, out: &mut String) {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Hashtag(tag) => out.push_str(tag),
                Node::Mention { display, .. } => {
                    out.push('@');
                    out.push_str(display);
                }
                Node::Paragraph(children) => {
                    for child in children {
                        walk(child, out);
                    }
                    out.push('\n');
                }
            }
        }

        let mut out = String::new();
        for node in &self.nodes {
            walk(node, &mut out);
        }
        out
    }

    /// Walk the tree depth-first, left-to-right, and collect hashtag strings
    /// and mention target ids in document order. Duplicates are kept: a tag
    /// used twice appears twice.
    pub fn extract(&self) -> (Vec<String>, Vec<UserId>) {
        fn walk(node: &Node, hashtags: &mut Vec<String>, mentions: &mut Vec<UserId>) {
            match node {
                Node::Text(_) => {}
                Node::Hashtag(tag) => hashtags.push(tag.clone()),
                Node::Mention { target, .. } => mentions.push(target.clone()),
                Node::Paragraph(children) => {
                    for child in children {
                        walk(child, hashtags, mentions);
                    }
                }
            }
        }

        let mut hashtags = Vec::new();
        let mut mentions = Vec::new();
        for node in &self.nodes {
            walk(node, &mut hashtags, &mut mentions);
        }
        (hashtags, mentions)
    }
}

/// Split a line of typed text into `Text` and `Hashtag` nodes. Mentions are
/// not recognized here; they are inserted as `Node::Mention` by the
/// autocomplete flow, which knows the target id.
pub fn tokenize_line(line: &str) -> Vec<Node> {
    tokenize_line_with_mentions(line, &std::collections::HashMap::new())
}

/// Like `tokenize_line`, but additionally turns `@handle` tokens into
/// `Node::Mention` when the handle is present in the autocomplete table.
/// The table maps display handles to the stored target ids; an `@word` with
/// no table entry stays plain text.
pub fn tokenize_line_with_mentions(
    line: &str,
    mentions: &std::collections::HashMap<String, UserId>,
) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last_end = 0;
    for found in TOKEN_PATTERN.find_iter(line) {
        let token = found.as_str();
        let node = if token.starts_with('#') {
            Some(Node::Hashtag(token.to_owned()))
        } else {
            let handle = &token[1..];
            mentions.get(handle).map(|target| Node::Mention {
                target: target.clone(),
                display: handle.to_owned(),
            })
        };

        match node {
            Some(node) => {
                if found.start() > last_end {
                    nodes.push(Node::Text(line[last_end..found.start()].to_owned()));
                }
                nodes.push(node);
                last_end = found.end();
            }
            // Unknown @word: leave it for the trailing Text run
            None => {}
        }
    }
    if last_end < line.len() {
        nodes.push(Node::Text(line[last_end..].to_owned()));
    }
    nodes
}

/// Who can see a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub enum Audience {
    #[default]
    Public,
    Followers,
    Private,
}

/// Everything the composer submits in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPayload {
    pub content: String,
    pub hashtags: Vec<String>,
    pub mentions: Vec<UserId>,
    pub attachments: Vec<Attachment>,
    pub audience: Audience,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl SubmitPayload {
    /// Build the payload from a document at submit time.
    pub fn from_document(
        document: &Document,
        attachments: Vec<Attachment>,
        audience: Audience,
    ) -> Self {
        let (hashtags, mentions) = document.extract();
        Self {
            content: document.render(),
            hashtags,
            mentions,
            attachments,
            audience,
            poll: None,
            event: None,
            location: None,
        }
    }
}
