use thiserror::Error;

use crate::model::Role;

/// How long the confirmation banner stays up.
pub const CONFIRMATION_MS: u64 = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReviewMode {
	#[default]
	None,
	Assign,
	Flag,
}

impl ReviewMode {
	pub fn title(self) -> &'static str {
		match self {
			ReviewMode::None => "",
			ReviewMode::Assign => "Assign Task",
			ReviewMode::Flag => "Flag Issue",
		}
	}

	pub fn placeholder(self) -> &'static str {
		match self {
			ReviewMode::Assign => "Add instructions...",
			_ => "Describe the issue...",
		}
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
	#[error("no assign or flag action is open")]
	NotOpen,
	#[error("a note is required")]
	EmptyNote,
}

/// Draft of an assign/flag action in the detail footer. Confirming only
/// shows a banner; nothing is sent anywhere.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewDraft {
	pub mode: ReviewMode,
	pub assignee: Role,
	pub note: String,
	pub confirmed: bool,
}

impl Default for ReviewDraft {
	fn default() -> Self {
		Self {
			mode: ReviewMode::None,
			assignee: Role::Cra,
			note: String::new(),
			confirmed: false,
		}
	}
}

impl ReviewDraft {
	pub fn open(&mut self, mode: ReviewMode) {
		self.mode = mode;
		self.confirmed = false;
	}

	pub fn can_confirm(&self) -> bool {
		self.mode != ReviewMode::None && !self.note.trim().is_empty()
	}

	pub fn confirm(&mut self) -> Result<(), ReviewError> {
		if self.mode == ReviewMode::None {
			return Err(ReviewError::NotOpen);
		}
		if self.note.trim().is_empty() {
			return Err(ReviewError::EmptyNote);
		}
		self.confirmed = true;
		Ok(())
	}

	/// Back to the default footer once the banner has been shown.
	pub fn dismiss(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn confirm_needs_open_mode_and_note() {
		let mut draft = ReviewDraft::default();
		draft.note = "check site".into();
		assert_eq!(draft.confirm(), Err(ReviewError::NotOpen));

		draft.open(ReviewMode::Flag);
		draft.note = "   ".into();
		assert!(!draft.can_confirm());
		assert_eq!(draft.confirm(), Err(ReviewError::EmptyNote));

		draft.note = "Ranges missing".into();
		assert!(draft.can_confirm());
		assert_eq!(draft.confirm(), Ok(()));
		assert!(draft.confirmed);
	}

	#[test]
	fn dismiss_resets_everything() {
		let mut draft = ReviewDraft::default();
		draft.open(ReviewMode::Assign);
		draft.assignee = Role::Safety;
		draft.note = "escalate".into();
		draft.confirm().unwrap();
		draft.dismiss();
		assert_eq!(draft, ReviewDraft::default());
	}
}
