//! Read-mutate-commit for one essay.
//!
//! Each operation holds the session lock for its whole cycle: fetch the
//! current text through the [`Reconciler`], compute the new text, commit it.
//! Two triggers fired back to back therefore run one after the other, and
//! the second always sees the first one's commit.

use std::sync::{Mutex, MutexGuard};

use relative_path::{RelativePath, RelativePathBuf};

use crate::{
    editing::{self, EditError, Outcome},
    export,
    io::{IoError, Storage},
    markup::Markup,
    notes::{self, SourceNote},
    parsing::{self, Block, GroupedBlocks, Section},
    reconcile::Reconciler,
};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Structural editing of the essay at `essay`.
pub struct EssaySession<S: Storage> {
    reconciler: Mutex<Reconciler<S>>,
    markup: Markup,
    essay: RelativePathBuf,
}

impl<S: Storage> EssaySession<S> {
    pub fn new(reconciler: Reconciler<S>, markup: Markup, essay: RelativePathBuf) -> Self {
        Self {
            reconciler: Mutex::new(reconciler),
            markup,
            essay,
        }
    }

    pub fn essay(&self) -> &RelativePath {
        &self.essay
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    /// Gives the host access to open, close and save buffers. Runs under the
    /// session lock like any edit.
    pub fn with_reconciler<T>(&self, f: impl FnOnce(&mut Reconciler<S>) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn text(&self) -> Result<String, SessionError> {
        Ok(self.lock().current_text(&self.essay)?)
    }

    pub fn sections(&self) -> Result<Vec<Section>, SessionError> {
        Ok(parsing::parse_sections(&self.text()?, &self.markup))
    }

    pub fn blocks(&self) -> Result<Vec<Block>, SessionError> {
        Ok(parsing::parse_blocks(&self.text()?, &self.markup))
    }

    pub fn groups(&self) -> Result<GroupedBlocks, SessionError> {
        Ok(parsing::group_blocks(&self.blocks()?))
    }

    pub fn move_block(&self, from: usize, to: usize) -> Result<bool, SessionError> {
        self.apply(|text, markup| Ok(editing::move_block(text, from, to, markup)))
    }

    pub fn move_group(&self, from: usize, to: usize) -> Result<bool, SessionError> {
        self.apply(|text, markup| Ok(editing::move_group(text, from, to, markup)))
    }

    pub fn move_section(&self, from: usize, to: usize) -> Result<bool, SessionError> {
        self.apply(|text, markup| Ok(editing::move_section(text, from, to, markup)))
    }

    pub fn remove_block(&self, index: usize) -> Result<bool, SessionError> {
        self.apply(|text, markup| Ok(editing::remove_block(text, index, markup)))
    }

    pub fn remove_section(&self, index: usize) -> Result<bool, SessionError> {
        self.apply(|text, markup| Ok(editing::remove_section(text, index, markup)))
    }

    pub fn add_section(&self, title: &str) -> Result<bool, SessionError> {
        self.apply(|text, markup| changed(text, editing::insert_section(text, title, markup)?))
    }

    /// Reads the note at `note_path` and pulls it in as a new section.
    pub fn pull_in_note(&self, note_path: &RelativePath) -> Result<bool, SessionError> {
        let mut reconciler = self.lock();
        let raw = reconciler.current_text(note_path)?;
        let note = SourceNote::from_path(note_path, raw)?;
        Self::apply_locked(&mut reconciler, &self.essay, |text| {
            changed(text, editing::insert_note(text, &note, &self.markup)?)
        })
    }

    pub fn quote_selection(&self, source: &str, selection: &str) -> Result<bool, SessionError> {
        self.apply(|text, markup| {
            changed(text, editing::insert_quote(text, source, selection, markup)?)
        })
    }

    /// Embeds a previously extracted note back into the essay.
    pub fn pull_back_extracted(&self, name: &str) -> Result<bool, SessionError> {
        self.apply(|text, markup| changed(text, editing::insert_placeholder(text, name, markup)?))
    }

    /// Copies section `index` into a new note under `folder` and records a
    /// back-reference in the pinned section. The section stays in the essay.
    ///
    /// Returns the new note's path, or `None` for a stale index. An empty
    /// body or an existing destination fails before anything is written. If
    /// the essay commit fails, the new note is removed again.
    pub fn extract_section(
        &self,
        index: usize,
        folder: &RelativePath,
    ) -> Result<Option<RelativePathBuf>, SessionError> {
        let mut reconciler = self.lock();
        let text = reconciler.current_text(&self.essay)?;
        let Some(extraction) = editing::extract_section(&text, index, &self.markup)? else {
            return Ok(None);
        };

        let name = notes::note_name(&extraction.title)?;
        let destination = folder.join(format!("{name}.md"));
        if reconciler.storage().exists(&destination) {
            return Err(EditError::DestinationExists(destination).into());
        }

        reconciler
            .storage()
            .create(&destination, &format!("{}\n", extraction.body))?;
        log::info!("extracted section '{}' to {destination}", extraction.title);

        let updated = editing::add_reference(&text, &name, &self.markup);
        if updated != text {
            if let Err(err) = reconciler.commit(&self.essay, &updated) {
                log::warn!("commit failed, removing extracted note {destination}");
                if let Err(cleanup) = reconciler.storage().remove(&destination) {
                    log::warn!("could not remove {destination}: {cleanup}");
                }
                return Err(err.into());
            }
        }
        Ok(Some(destination))
    }

    pub fn export(&self, include_headings: bool) -> Result<String, SessionError> {
        Ok(export::render_export(
            &self.text()?,
            include_headings,
            &self.markup,
        ))
    }

    fn lock(&self) -> MutexGuard<'_, Reconciler<S>> {
        // A panic mid-edit never commits, so the guarded state is still sound.
        self.reconciler
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply(
        &self,
        edit: impl FnOnce(&str, &Markup) -> Result<Outcome, SessionError>,
    ) -> Result<bool, SessionError> {
        let mut reconciler = self.lock();
        Self::apply_locked(&mut reconciler, &self.essay, |text| edit(text, &self.markup))
    }

    fn apply_locked(
        reconciler: &mut Reconciler<S>,
        essay: &RelativePath,
        edit: impl FnOnce(&str) -> Result<Outcome, SessionError>,
    ) -> Result<bool, SessionError> {
        let text = reconciler.current_text(essay)?;
        match edit(&text)? {
            Outcome::Changed(updated) => {
                reconciler.commit(essay, &updated)?;
                Ok(true)
            }
            Outcome::Unchanged => Ok(false),
        }
    }
}

fn changed(before: &str, after: String) -> Result<Outcome, SessionError> {
    if after == before {
        Ok(Outcome::Unchanged)
    } else {
        Ok(Outcome::Changed(after))
    }
}
