use std::collections::HashMap;

use crate::core::cmd::Cmd;
use crate::core::msg::composer::ComposerMsg;
use crate::domain::entity::{Attachment, EventInfo, GeoPoint, Poll, UserId};
use crate::domain::richtext::{tokenize_line_with_mentions, Audience, Document, Node, SubmitPayload};

/// Post composer state.
///
/// The editor widget owns the raw text; this state mirrors it line by line
/// and keeps the autocomplete table that maps typed handles to stored user
/// ids. The rich-text document is derived on demand, never stored.
#[derive(Debug, Clone, Default)]
pub struct ComposerState {
    pub lines: Vec<String>,
    pub mention_table: HashMap<String, UserId>,
    pub attachments: Vec<Attachment>,
    pub audience: Audience,
    pub poll: Option<Poll>,
    pub event: Option<EventInfo>,
    pub location: Option<GeoPoint>,
    pub is_submitting: bool,
}

impl ComposerState {
    /// Build the rich-text document from the current lines. Each line becomes
    /// a paragraph; `@handle` tokens become mention nodes only when the handle
    /// went through autocomplete and is present in the table.
    pub fn document(&self) -> Document {
        let nodes = self
            .lines
            .iter()
            .map(|line| Node::Paragraph(tokenize_line_with_mentions(line, &self.mention_table)))
            .collect();
        Document::new(nodes)
    }

    pub fn is_empty(&self) -> bool {
        self.document().is_empty()
    }

    /// The `@prefix` under the cursor, if the draft currently ends with one.
    /// Autocomplete only completes the token being typed, never earlier text.
    pub fn mention_prefix(&self) -> Option<&str> {
        let line = self.lines.last()?;
        let token = line.rsplit(char::is_whitespace).next()?;
        let handle = token.strip_prefix('@')?;
        (!handle.is_empty()).then_some(handle)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Composer-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: ComposerMsg) -> Vec<Cmd> {
        match msg {
            ComposerMsg::ContentChanged(lines) => {
                self.lines = lines;
                vec![]
            }

            ComposerMsg::InsertMention { target, display } => {
                self.mention_table.insert(display.clone(), target);
                // The widget inserts the text too; mirror it here so the
                // document stays consistent even before the next edit event
                match self.lines.last_mut() {
                    Some(line) => {
                        line.push('@');
                        line.push_str(&display);
                        line.push(' ');
                    }
                    None => self.lines.push(format!("@{display} ")),
                }
                vec![]
            }

            ComposerMsg::RequestMentionSuggestions => match self.mention_prefix() {
                Some(prefix) => vec![Cmd::SearchUsers {
                    query: prefix.to_owned(),
                }],
                None => vec![],
            },

            ComposerMsg::MentionSuggestionsLoaded(users) => {
                // The draft may have moved on since the search went out; only
                // complete when it still ends with a matching prefix
                let prefix = match self.mention_prefix() {
                    Some(prefix) => prefix.to_owned(),
                    None => return vec![],
                };
                match users.into_iter().find(|user| user.handle.starts_with(&prefix)) {
                    Some(user) => {
                        if let Some(line) = self.lines.last_mut() {
                            line.truncate(line.len() - prefix.len() - 1);
                        }
                        self.update(ComposerMsg::InsertMention {
                            target: user.id,
                            display: user.handle,
                        })
                    }
                    None => vec![],
                }
            }

            ComposerMsg::CycleAudience => {
                self.audience = match self.audience {
                    Audience::Public => Audience::Followers,
                    Audience::Followers => Audience::Private,
                    Audience::Private => Audience::Public,
                };
                vec![]
            }

            ComposerMsg::SetAudience(audience) => {
                self.audience = audience;
                vec![]
            }

            ComposerMsg::AttachImage(url) => {
                self.attachments.push(Attachment::Image { url });
                vec![]
            }

            ComposerMsg::AttachVideo(url) => {
                self.attachments.push(Attachment::Video { url });
                vec![]
            }

            ComposerMsg::SetPoll(poll) => {
                self.poll = Some(poll);
                vec![]
            }

            ComposerMsg::SetEvent(event) => {
                self.event = Some(event);
                vec![]
            }

            ComposerMsg::SetLocation(point) => {
                self.location = Some(point);
                vec![]
            }

            ComposerMsg::Submit => {
                if self.is_submitting || self.is_empty() {
                    return vec![];
                }
                self.is_submitting = true;

                let mut payload = SubmitPayload::from_document(
                    &self.document(),
                    self.attachments.clone(),
                    self.audience,
                );
                payload.poll = self.poll.clone();
                payload.event = self.event.clone();
                payload.location = self.location.clone();
                vec![Cmd::SubmitPost { payload }]
            }

            ComposerMsg::SubmitSucceeded => {
                self.clear();
                vec![]
            }

            ComposerMsg::SubmitFailed(error) => {
                // Keep the draft; the user can retry
                self.is_submitting = false;
                vec![Cmd::LogError {
                    message: format!("post submission failed: {error}"),
                }]
            }

            ComposerMsg::Discard => {
                self.clear();
                vec![]
            }
        }
    }
}
