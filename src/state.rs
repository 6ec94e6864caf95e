// Session state held by the controller: active tab, pending input, the
// two message channels, the last created alias and the copy notification.

use std::time::{Duration, Instant};

/// Which alias tab is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    #[default]
    Redirect,
    Delete,
    Edit,
}

impl OperationMode {
    pub const ALL: [OperationMode; 3] = [
        OperationMode::Redirect,
        OperationMode::Delete,
        OperationMode::Edit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OperationMode::Redirect => "Redirect",
            OperationMode::Delete => "Delete",
            OperationMode::Edit => "Edit",
        }
    }
}

/// Identifies one text field of [`PendingInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    CreateAlias,
    RedirectAlias,
    DeleteAlias,
    EditCurrent,
    EditNew,
}

/// Free-text fields as typed by the user. The first two belong to the
/// create form, the rest to the tab that shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub url: String,
    pub create_alias: String,
    pub redirect_alias: String,
    pub delete_alias: String,
    pub edit_current: String,
    pub edit_new: String,
}

impl PendingInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Url => &self.url,
            Field::CreateAlias => &self.create_alias,
            Field::RedirectAlias => &self.redirect_alias,
            Field::DeleteAlias => &self.delete_alias,
            Field::EditCurrent => &self.edit_current,
            Field::EditNew => &self.edit_new,
        }
    }

    pub(crate) fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Url => &mut self.url,
            Field::CreateAlias => &mut self.create_alias,
            Field::RedirectAlias => &mut self.redirect_alias,
            Field::DeleteAlias => &mut self.delete_alias,
            Field::EditCurrent => &mut self.edit_current,
            Field::EditNew => &mut self.edit_new,
        }
    }

    /// Clears every tab-owned field. The create form is left alone.
    pub(crate) fn clear_tabs(&mut self) {
        self.redirect_alias.clear();
        self.delete_alias.clear();
        self.edit_current.clear();
        self.edit_new.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Error,
    Notice,
}

/// A message area. Setting a message always makes it active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorChannel {
    active: bool,
    message: String,
    tone: Tone,
}

impl ErrorChannel {
    pub(crate) fn set(&mut self, message: impl Into<String>, tone: Tone) {
        self.message = message.into();
        self.tone = tone;
        self.active = true;
    }

    /// Hides the channel. The last message is kept but no longer shown.
    pub(crate) fn dismiss(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// The message if the channel is currently shown.
    pub fn visible(&self) -> Option<&str> {
        self.active.then_some(self.message.as_str())
    }
}

/// Transient "copied" flag, modelled as a deadline. Re-arming replaces the
/// previous deadline, which cancels the earlier revert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    until: Option<Instant>,
}

impl CopyFeedback {
    pub(crate) fn arm(&mut self, now: Instant, delay: Duration) {
        self.until = Some(now + delay);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}

/// Result of the last successful create. Lives only for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub long_url: String,
    pub alias: Option<String>,
}

impl AliasRecord {
    /// Text shown (and copied) in the success block.
    pub fn display(&self) -> &str {
        self.alias.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) mode: OperationMode,
    pub(crate) input: PendingInput,
    pub(crate) create_channel: ErrorChannel,
    pub(crate) shared_channel: ErrorChannel,
    pub(crate) record: Option<AliasRecord>,
    pub(crate) show_success: bool,
    pub(crate) copy: CopyFeedback,
}

impl SessionState {
    pub fn snapshot(&self, now: Instant) -> Snapshot {
        Snapshot {
            mode: self.mode,
            input: self.input.clone(),
            create_channel: self.create_channel.clone(),
            shared_channel: self.shared_channel.clone(),
            success: if self.show_success { self.record.clone() } else { None },
            copied: self.copy.is_active(now),
        }
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub mode: OperationMode,
    pub input: PendingInput,
    pub create_channel: ErrorChannel,
    pub shared_channel: ErrorChannel,
    /// `Some` while the success block is open.
    pub success: Option<AliasRecord>,
    pub copied: bool,
}

impl Snapshot {
    pub fn show_success(&self) -> bool {
        self.success.is_some()
    }
}
