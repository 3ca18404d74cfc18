use signview_item::{Page, ReviewTx, render_into};
use signview_nav::FlatIndex;
use signview_tx::Transaction;
use tracing::{debug, warn};

use crate::{Outcome, ReviewError, ReviewSettings, Summary, SummaryPage};

pub const INTRO_TEXT: &str = "Review message to\nsign on Neo N3\nnetwork";
pub const SIGN_PROMPT: &str = "Sign message on\nNeo N3 network?";
pub const HOLD_TO_SIGN: &str = "Hold to sign";
pub const REJECT_LINK: &str = "Reject message";
pub const REJECT_QUESTION: &str = "Reject message?";
pub const CONFIRM_REJECT: &str = "Yes, reject";
pub const CANCEL_REJECT: &str = "Go back to message";

/// Where a touch review is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Opening page, before any pair is shown.
    Intro,
    /// Paging through pairs. The page after the last pair holds to sign.
    Pages,
    /// Asking whether to reject. Going back returns to the previous stage.
    ConfirmReject,
}

/// Touch-driven host: pages are requested by absolute index.
///
/// Indices `0..static_count()` are summary pages, the rest are signer items
/// rendered on demand into a single slot.
#[derive(Debug)]
pub struct IndexFlow<'tx> {
    review: ReviewTx<'tx>,
    pages: Vec<SummaryPage>,
    items: FlatIndex,
    slot: Page,
    stage: Stage,
    resume: Stage,
    outcome: Option<Outcome>,
}

impl<'tx> IndexFlow<'tx> {
    pub fn new(tx: &'tx Transaction, settings: &ReviewSettings) -> Result<Self, ReviewError> {
        Self::build(tx, settings).inspect_err(|error| warn!(%error, "review refused"))
    }

    fn build(tx: &'tx Transaction, settings: &ReviewSettings) -> Result<Self, ReviewError> {
        if settings.blocks(tx) {
            return Err(ReviewError::ScriptsNotAllowed);
        }

        let review = ReviewTx::admit(tx)?;
        let items = FlatIndex::build(&review)?;
        let summary = Summary::build(tx)?;
        let pages: Vec<SummaryPage> = summary.index_pages().cloned().collect();

        debug!(
            static_count = pages.len(),
            dynamic_count = items.len(),
            "built index review"
        );

        Ok(Self {
            review,
            pages,
            items,
            slot: Page::new(),
            stage: Stage::Intro,
            resume: Stage::Intro,
            outcome: None,
        })
    }

    pub fn static_count(&self) -> usize {
        self.pages.len()
    }

    pub fn dynamic_count(&self) -> usize {
        self.items.len()
    }

    pub fn len(&self) -> usize {
        self.static_count() + self.dynamic_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Title and text of page `index`, or `None` past the end.
    ///
    /// Signer pages share one slot, so the returned strings only live until
    /// the next call.
    pub fn pair(&mut self, index: usize) -> Option<(&str, &str)> {
        if let Some(page) = self.pages.get(index) {
            return Some((page.title, page.text.as_str()));
        }

        let item = self.items.get(index - self.pages.len()).ok()?;
        render_into(item, self.review.transaction(), &mut self.slot);
        Some((self.slot.title.as_str(), self.slot.text.as_str()))
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Leave the intro and show the first pair.
    pub fn start(&mut self) {
        if !self.is_finished() && self.stage == Stage::Intro {
            self.stage = Stage::Pages;
        }
    }

    /// Sign. Only the pages stage has the hold-to-sign page.
    pub fn approve(&mut self) -> Option<Outcome> {
        if !self.is_finished() && self.stage == Stage::Pages {
            self.finish(Outcome::Approved);
        }
        self.outcome
    }

    /// Ask whether to reject. Nothing is decided until `confirm_reject`.
    pub fn reject(&mut self) {
        if self.is_finished() || self.stage == Stage::ConfirmReject {
            return;
        }
        self.resume = self.stage;
        self.stage = Stage::ConfirmReject;
    }

    pub fn confirm_reject(&mut self) -> Option<Outcome> {
        if !self.is_finished() && self.stage == Stage::ConfirmReject {
            self.finish(Outcome::Rejected);
        }
        self.outcome
    }

    /// Back to the message from the reject question.
    pub fn cancel_reject(&mut self) {
        if !self.is_finished() && self.stage == Stage::ConfirmReject {
            self.stage = self.resume;
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!(?outcome, "index review finished");
        self.outcome = Some(outcome);
    }
}
