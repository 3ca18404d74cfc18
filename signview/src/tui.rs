use std::io;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    CompletedFrame, DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Wrap},
};
use signview_flow::{
    Action, CANCEL_REJECT, CONFIRM_REJECT, HOLD_TO_SIGN, INTRO_TEXT, IndexFlow, Outcome,
    REJECT_LINK, REJECT_QUESTION, SIGN_PROMPT, Screen, Stage, StepFlow,
};
use thiserror::Error;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

#[derive(Error, Debug)]
pub enum TuiError {
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A review running on one of the simulated devices.
///
/// On the index host `page` runs to `flow.len()`, one past the last pair,
/// which is the hold-to-sign page.
pub enum Session<'tx> {
    Step(StepFlow<'tx>),
    Index { flow: IndexFlow<'tx>, page: usize },
}

impl<'tx> Session<'tx> {
    pub fn step(flow: StepFlow<'tx>) -> Self {
        Session::Step(flow)
    }

    pub fn index(flow: IndexFlow<'tx>) -> Self {
        Session::Index { flow, page: 0 }
    }

    fn handle_event(&mut self, event: Event) -> Option<Outcome> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        if modifiers != KeyModifiers::NONE {
            return None;
        }

        match self {
            Session::Step(flow) => match code {
                KeyCode::Char('q') | KeyCode::Esc => Some(flow.reject()),
                KeyCode::Left | KeyCode::Char('h') => {
                    flow.prev();
                    None
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    flow.next();
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => flow.select(),
                _ => None,
            },
            Session::Index { flow, page } => match flow.stage() {
                Stage::Intro => match code {
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        flow.start();
                        None
                    }
                    KeyCode::Char('q' | 'r') | KeyCode::Esc => {
                        flow.reject();
                        None
                    }
                    _ => None,
                },
                Stage::Pages => match code {
                    KeyCode::Left | KeyCode::Char('h') => {
                        *page = page.saturating_sub(1);
                        None
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        if *page < flow.len() {
                            *page += 1;
                        }
                        None
                    }
                    KeyCode::Char('a') if *page == flow.len() => flow.approve(),
                    KeyCode::Char('q' | 'r') | KeyCode::Esc => {
                        flow.reject();
                        None
                    }
                    _ => None,
                },
                Stage::ConfirmReject => match code {
                    KeyCode::Char('y') => flow.confirm_reject(),
                    KeyCode::Char('n') | KeyCode::Esc => {
                        flow.cancel_reject();
                        None
                    }
                    _ => None,
                },
            },
        }
    }

    /// End the session as rejected without asking.
    fn abandon(&mut self) -> Outcome {
        match self {
            Session::Step(flow) => flow.reject(),
            Session::Index { flow, .. } => {
                flow.reject();
                flow.confirm_reject().unwrap_or(Outcome::Rejected)
            }
        }
    }

    fn host_label(&self) -> &'static str {
        match self {
            Session::Step(_) => "step",
            Session::Index { .. } => "index",
        }
    }

    fn progress(&self) -> String {
        match self {
            Session::Step(flow) => {
                format!("step {} of {}", flow.position() + 1, flow.steps().len())
            }
            Session::Index { flow, page } => match flow.stage() {
                Stage::Intro => "intro".to_owned(),
                Stage::Pages => format!("page {} of {}", page + 1, flow.len() + 1),
                Stage::ConfirmReject => "reject?".to_owned(),
            },
        }
    }

    fn help(&self) -> &'static str {
        match self {
            Session::Step(_) => "Left/Right move  Enter select  q reject",
            Session::Index { flow, .. } => match flow.stage() {
                Stage::Intro => "Enter review  r reject",
                Stage::Pages => "Left/Right move  a sign (last page)  r reject",
                Stage::ConfirmReject => "y reject  n go back",
            },
        }
    }
}

/// Run the device simulator until the session ends.
pub async fn review(mut session: Session<'_>) -> Result<Outcome, TuiError> {
    let mut terminal = TerminalSession::init();
    let mut events = read_events();

    loop {
        terminal.draw(|frame| draw_ui(frame, &mut session))?;

        // Input thread gone: nothing can approve any more.
        let Some(event) = events.recv().await else {
            return Ok(session.abandon());
        };
        if let Some(outcome) = session.handle_event(event) {
            return Ok(outcome);
        }
    }
}

struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    fn init() -> Self {
        let terminal = ratatui::init();
        Self { terminal }
    }

    pub fn draw<F>(&mut self, render_callback: F) -> Result<CompletedFrame<'_>, TuiError>
    where
        F: FnOnce(&mut Frame),
    {
        Ok(self.terminal.draw(render_callback)?)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

fn read_events() -> UnboundedReceiver<Event> {
    let (event_tx, event_rx) = unbounded_channel();

    std::thread::spawn(move || {
        loop {
            if let Ok(event) = crossterm::event::read() {
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        }
    });

    event_rx
}

fn draw_ui(frame: &mut Frame, session: &mut Session<'_>) {
    let outer = Block::bordered().title_top(format!("signview ({} host)", session.host_label()));
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(outer.inner(frame.area()));

    frame.render_widget(outer, frame.area());
    draw_progress(frame, layout[0], session);
    draw_screen(frame, layout[1], session);
    draw_help(frame, layout[2], session);
}

fn draw_progress(frame: &mut Frame, area: Rect, session: &Session<'_>) {
    let widget = Paragraph::new(Line::from(Span::styled(
        session.progress(),
        Style::default().fg(Color::Yellow),
    )));
    frame.render_widget(widget, area);
}

fn draw_screen(frame: &mut Frame, area: Rect, session: &mut Session<'_>) {
    let lines = match session {
        Session::Step(flow) => match flow.current() {
            Screen::Info { title, text } => info_lines(title, text),
            Screen::Confirm(action) => confirm_lines(action),
        },
        Session::Index { flow, page } => match flow.stage() {
            Stage::Intro => prompt_lines(INTRO_TEXT, &[REJECT_LINK]),
            Stage::Pages => match flow.pair(*page) {
                Some((title, text)) => info_lines(title, text),
                None => prompt_lines(SIGN_PROMPT, &[HOLD_TO_SIGN, REJECT_LINK]),
            },
            Stage::ConfirmReject => {
                prompt_lines(REJECT_QUESTION, &[CONFIRM_REJECT, CANCEL_REJECT])
            }
        },
    };

    let widget = Paragraph::new(Text::from(lines))
        .block(Block::bordered())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn info_lines(title: &str, text: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title.to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(text.to_owned()),
    ]
}

fn prompt_lines(prompt: &str, choices: &[&str]) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = prompt
        .lines()
        .map(|line| Line::from(line.to_owned()))
        .collect();
    lines.push(Line::default());
    lines.extend(choices.iter().map(|choice| {
        Line::from(Span::styled(
            (*choice).to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    }));
    lines
}

fn confirm_lines(action: Action) -> Vec<Line<'static>> {
    let color = match action {
        Action::Approve => Color::Green,
        Action::Reject | Action::Abort => Color::Red,
    };
    vec![Line::from(Span::styled(
        action.label(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))]
}

fn draw_help(frame: &mut Frame, area: Rect, session: &Session<'_>) {
    let widget = Paragraph::new(Line::from(Span::styled(
        session.help(),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Left);
    frame.render_widget(widget, area);
}
