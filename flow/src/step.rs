use signview_item::{Page, ReviewTx, render_into};
use signview_nav::{CursorState, Direction};
use signview_tx::Transaction;
use tracing::{debug, warn};

use crate::{Outcome, ReviewError, ReviewSettings, Summary, SummaryPage};

pub const NO_ARBITRARY_SCRIPT_TITLE: &str = "Error";
pub const NO_ARBITRARY_SCRIPT_TEXT: &str =
    "Arbitrary contract scripts are not allowed. Go to Settings to enable signing of such transactions";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    Review,
    Summary(usize),
    NoArbitraryScript,
    Abort,
    /// Never shown. Landing here pulls the next signer page in or falls back.
    UpperDelimiter,
    /// The shared page every signer item is rendered into.
    Generic,
    /// Never shown. See `UpperDelimiter`.
    LowerDelimiter,
    Approve,
    Reject,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Approve,
    Reject,
    Abort,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Approve => "Approve",
            Action::Reject => "Reject",
            Action::Abort => "Understood, abort..",
        }
    }

    pub fn outcome(self) -> Outcome {
        match self {
            Action::Approve => Outcome::Approved,
            Action::Reject | Action::Abort => Outcome::Rejected,
        }
    }
}

/// What the device displays for the current step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen<'a> {
    Info { title: &'a str, text: &'a str },
    Confirm(Action),
}

/// Whether the host is showing fixed steps or the signer segment.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Segment {
    #[default]
    Static,
    Dynamic,
}

/// Button-driven host: a fixed step list with the signer segment spliced in
/// between two delimiter steps.
#[derive(Debug)]
pub struct StepFlow<'tx> {
    review: Option<ReviewTx<'tx>>,
    steps: Vec<Step>,
    pages: Vec<SummaryPage>,
    position: usize,
    segment: Segment,
    cursor: CursorState,
    generic: Page,
    outcome: Option<Outcome>,
}

impl<'tx> StepFlow<'tx> {
    pub fn new(tx: &'tx Transaction, settings: &ReviewSettings) -> Result<Self, ReviewError> {
        if settings.blocks(tx) {
            warn!("arbitrary contract script with scripts disabled, showing error");
            return Ok(Self::with_steps(
                None,
                vec![Step::NoArbitraryScript, Step::Abort],
                Vec::new(),
            ));
        }

        let review = ReviewTx::admit(tx).inspect_err(|error| warn!(%error, "review refused"))?;
        let summary = Summary::build(tx).inspect_err(|error| warn!(%error, "review refused"))?;
        let pages: Vec<SummaryPage> = summary.step_pages().cloned().collect();

        let mut steps = Vec::with_capacity(pages.len() + 6);
        steps.push(Step::Review);
        steps.extend((0..pages.len()).map(Step::Summary));
        steps.extend([
            Step::UpperDelimiter,
            Step::Generic,
            Step::LowerDelimiter,
            Step::Approve,
            Step::Reject,
        ]);

        debug!(
            steps = steps.len(),
            items = review.total_items(),
            "built step review"
        );

        Ok(Self::with_steps(Some(review), steps, pages))
    }

    fn with_steps(
        review: Option<ReviewTx<'tx>>,
        steps: Vec<Step>,
        pages: Vec<SummaryPage>,
    ) -> Self {
        Self {
            review,
            steps,
            pages,
            position: 0,
            segment: Segment::Static,
            cursor: CursorState::new(),
            generic: Page::new(),
            outcome: None,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn step(&self) -> Step {
        self.steps[self.position]
    }

    /// True on the first step. The whole signer segment shares one step, so
    /// position alone does not tell whether `prev` would move.
    pub fn at_start(&self) -> bool {
        self.position == 0
    }

    /// True on the last step, where `next` does nothing.
    pub fn at_end(&self) -> bool {
        self.position + 1 >= self.steps.len()
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn current(&self) -> Screen<'_> {
        match self.step() {
            Step::Review => Screen::Info {
                title: "Review",
                text: "Transaction",
            },
            Step::Summary(index) => {
                let page = &self.pages[index];
                Screen::Info {
                    title: page.title,
                    text: page.text.as_str(),
                }
            }
            Step::NoArbitraryScript => Screen::Info {
                title: NO_ARBITRARY_SCRIPT_TITLE,
                text: NO_ARBITRARY_SCRIPT_TEXT,
            },
            Step::Generic => Screen::Info {
                title: self.generic.title.as_str(),
                text: self.generic.text.as_str(),
            },
            Step::Abort => Screen::Confirm(Action::Abort),
            Step::Approve => Screen::Confirm(Action::Approve),
            Step::Reject => Screen::Confirm(Action::Reject),
            Step::UpperDelimiter | Step::LowerDelimiter => {
                debug_assert!(false, "delimiter step is never shown");
                Screen::Info { title: "", text: "" }
            }
        }
    }

    /// Move to the next step. Does nothing on the last step.
    pub fn next(&mut self) {
        if self.is_finished() || self.at_end() {
            return;
        }
        self.land(self.position + 1);
    }

    /// Move to the previous step. Does nothing on the first step.
    pub fn prev(&mut self) {
        if self.is_finished() || self.at_start() {
            return;
        }
        self.land(self.position - 1);
    }

    /// Confirm the current step, ending the session if it is an action.
    pub fn select(&mut self) -> Option<Outcome> {
        if self.is_finished() {
            return self.outcome;
        }
        if let Screen::Confirm(action) = self.current() {
            self.finish(action.outcome());
        }
        self.outcome
    }

    pub fn reject(&mut self) -> Outcome {
        self.finish(Outcome::Rejected);
        Outcome::Rejected
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!(?outcome, "step review finished");
        self.outcome = Some(outcome);
    }

    fn land(&mut self, target: usize) {
        match self.steps[target] {
            Step::UpperDelimiter => self.on_upper_delimiter(target),
            Step::LowerDelimiter => self.on_lower_delimiter(target),
            _ => self.position = target,
        }
    }

    fn on_upper_delimiter(&mut self, upper: usize) {
        let generic = upper + 1;
        let lower = upper + 2;
        match self.segment {
            // Coming forward from the summary.
            Segment::Static => {
                if self.fetch(Direction::Forward) {
                    self.segment = Segment::Dynamic;
                    self.position = generic;
                } else {
                    self.position = lower + 1;
                }
            }
            // Coming back from a signer page.
            Segment::Dynamic => {
                if self.fetch(Direction::Backward) {
                    self.position = generic;
                } else {
                    self.segment = Segment::Static;
                    self.position = upper - 1;
                }
            }
        }
    }

    fn on_lower_delimiter(&mut self, lower: usize) {
        let generic = lower - 1;
        let upper = lower - 2;
        match self.segment {
            // Coming forward from a signer page.
            Segment::Dynamic => {
                if self.fetch(Direction::Forward) {
                    self.position = generic;
                } else {
                    self.segment = Segment::Static;
                    self.position = lower + 1;
                }
            }
            // Coming back from approve.
            Segment::Static => {
                if self.fetch(Direction::Backward) {
                    self.segment = Segment::Dynamic;
                    self.position = generic;
                } else {
                    self.position = upper - 1;
                }
            }
        }
    }

    /// Advance the cursor and render what it lands on into the generic page.
    fn fetch(&mut self, direction: Direction) -> bool {
        let Some(review) = self.review else {
            return false;
        };
        match self.cursor.advance(&review, direction) {
            Some(item) => {
                render_into(item, review.transaction(), &mut self.generic);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{transaction, transfer};
    use signview_tx::TransactionKind;

    fn info(flow: &StepFlow<'_>) -> (String, String) {
        match flow.current() {
            Screen::Info { title, text } => (title.to_owned(), text.to_owned()),
            Screen::Confirm(action) => (action.label().to_owned(), String::new()),
        }
    }

    fn walk_next(flow: &mut StepFlow<'_>) -> Vec<(String, String)> {
        let mut seen = vec![info(flow)];
        while !flow.at_end() {
            flow.next();
            seen.push(info(flow));
        }
        seen
    }

    #[test]
    fn walks_summary_then_signers_then_actions() {
        let tx = transfer(&[(1, 0), (0, 1)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();

        let seen = walk_next(&mut flow);
        let titles: Vec<_> = seen.iter().map(|(title, _)| title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Review",
                "Destination addr",
                "Token amount",
                "Target network",
                "System fee",
                "Network fee",
                "Total fees",
                "Valid until height",
                "Signer",
                "Account",
                "Scope",
                "Contract 1 of 1",
                "Signer",
                "Account",
                "Scope",
                "Group 1 of 1",
                "Approve",
                "Reject",
            ]
        );
        assert_eq!(seen[8].1, "1 of 2");
        assert_eq!(seen[10].1, "By Entry,Contracts");
        assert_eq!(seen[12].1, "2 of 2");
        assert_eq!(flow.step(), Step::Reject);
    }

    #[test]
    fn walking_back_reverses() {
        let tx = transfer(&[(2, 1), (0, 0), (1, 2)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();

        let mut forward = walk_next(&mut flow);
        let mut backward = vec![info(&flow)];
        while !flow.at_start() {
            flow.prev();
            backward.push(info(&flow));
        }

        forward.reverse();
        assert_eq!(backward, forward);
        assert_eq!(flow.step(), Step::Review);
        assert_eq!(flow.segment(), Segment::Static);
    }

    #[test]
    fn signer_pages_share_one_step() {
        let tx = transfer(&[(1, 0), (0, 1)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();
        while flow.step() != Step::Generic {
            flow.next();
        }

        let generic = flow.position();
        for _ in 0..7 {
            assert!(!flow.at_end());
            flow.next();
            assert_eq!(flow.position(), generic);
            assert_eq!(flow.segment(), Segment::Dynamic);
        }
        assert_eq!(info(&flow).0, "Group 1 of 1");

        flow.next();
        assert_eq!(flow.step(), Step::Approve);
    }

    #[test]
    fn no_item_cap_on_step_host() {
        let tx = transfer(&[(16, 16); 16]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();

        let seen = walk_next(&mut flow);
        // Review, seven summary pages, 560 signer pages, approve, reject.
        assert_eq!(seen.len(), 1 + 7 + 560 + 2);
        assert_eq!(seen[seen.len() - 3].0, "Group 16 of 16");
        assert_eq!(flow.step(), Step::Reject);
    }

    #[test]
    fn bounce_at_segment_edges() {
        let tx = transfer(&[(0, 0)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();
        while flow.step() != Step::Generic {
            flow.next();
        }
        assert_eq!(info(&flow).0, "Signer");

        // Back out of the segment and straight in again.
        flow.prev();
        assert_eq!(info(&flow).0, "Valid until height");
        assert_eq!(flow.segment(), Segment::Static);
        flow.next();
        assert_eq!(info(&flow).0, "Signer");
        assert_eq!(flow.segment(), Segment::Dynamic);

        flow.next();
        flow.next();
        assert_eq!(info(&flow).0, "Scope");
        flow.next();
        assert_eq!(flow.step(), Step::Approve);
        flow.prev();
        assert_eq!(info(&flow).0, "Scope");
        flow.next();
        assert_eq!(flow.step(), Step::Approve);
    }

    #[test]
    fn first_and_last_steps_stay_put() {
        let tx = transfer(&[(0, 0)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();
        flow.prev();
        assert_eq!(flow.step(), Step::Review);

        walk_next(&mut flow);
        assert_eq!(flow.step(), Step::Reject);
        flow.next();
        assert_eq!(flow.step(), Step::Reject);
    }

    #[test]
    fn select_approve() {
        let tx = transfer(&[(0, 0)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();
        assert_eq!(flow.select(), None);
        while flow.step() != Step::Approve {
            flow.next();
        }
        assert_eq!(flow.select(), Some(Outcome::Approved));
        assert!(flow.is_finished());

        flow.next();
        assert_eq!(flow.step(), Step::Approve);
    }

    #[test]
    fn select_reject() {
        let tx = transfer(&[(0, 0)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();
        walk_next(&mut flow);
        assert_eq!(flow.select(), Some(Outcome::Rejected));
    }

    #[test]
    fn script_gate() {
        let tx = transaction(TransactionKind::Script, &[(0, 0)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();

        assert_eq!(flow.steps(), [Step::NoArbitraryScript, Step::Abort]);
        assert_eq!(
            flow.current(),
            Screen::Info {
                title: NO_ARBITRARY_SCRIPT_TITLE,
                text: NO_ARBITRARY_SCRIPT_TEXT,
            }
        );
        flow.next();
        assert_eq!(flow.current(), Screen::Confirm(Action::Abort));
        assert_eq!(Action::Abort.label(), "Understood, abort..");
        assert_eq!(flow.select(), Some(Outcome::Rejected));
    }

    #[test]
    fn scripts_allowed() {
        let tx = transaction(TransactionKind::Script, &[(0, 0)]);
        let settings = ReviewSettings {
            scripts_allowed: true,
        };
        let mut flow = StepFlow::new(&tx, &settings).unwrap();
        flow.next();
        assert_eq!(info(&flow).0, "Target network");
    }

    #[test]
    fn refuses_no_signers() {
        let tx = transfer(&[]);
        assert!(matches!(
            StepFlow::new(&tx, &ReviewSettings::default()),
            Err(ReviewError::Admission(_))
        ));
    }

    #[test]
    fn reject_anywhere() {
        let tx = transfer(&[(0, 0)]);
        let mut flow = StepFlow::new(&tx, &ReviewSettings::default()).unwrap();
        flow.next();
        assert_eq!(flow.reject(), Outcome::Rejected);
        assert_eq!(flow.outcome(), Some(Outcome::Rejected));
    }
}
