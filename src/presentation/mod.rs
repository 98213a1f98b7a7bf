//! Boundary between the navigation core and whatever paints it.
//!
//! A [`Presenter`] receives display-ready data; raw UI events come back in as
//! [`UiEvent`] values and are routed into the engine by [`dispatch`].

use crate::markup::{self, ExternalLink};
use crate::navigation::{audit_display_lines, NavigationEngine, Session, StepView};
use crate::rules::{PopupContent, StepButton, Target};
use std::io;

pub mod script;
pub mod text;

pub use script::{parse_walk_command, parse_walk_script, WalkCommand};
pub use text::TextPresenter;

pub trait Presenter {
    fn render_step(
        &mut self,
        view: &StepView<'_>,
        choices: &[StepButton],
        links: &[LinkChoice],
    ) -> io::Result<()>;
    fn render_audit(&mut self, lines: &[String]) -> io::Result<()>;
    fn render_popup(&mut self, popup: &PopupContent, links: &[LinkChoice]) -> io::Result<()>;
    fn render_guidance(&mut self, url: &str) -> io::Result<()>;
    fn render_external_link(&mut self, link: &ExternalLink) -> io::Result<()>;
    fn render_notice(&mut self, message: &str) -> io::Result<()>;
    fn render_error(&mut self, message: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Activate(StepButton),
    ExternalLinkOpened(ExternalLink),
    PopupRequested(String),
    GuidanceRequested,
    ResetRequested,
}

/// An external link as listed to the user, numbered from 1 across the step
/// body and any open popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkChoice {
    pub number: usize,
    pub link: ExternalLink,
}

pub fn init_error_message(err: &dyn std::fmt::Display) -> String {
    format!("Init error: {err}")
}

pub fn choices(view: &StepView<'_>) -> Vec<StepButton> {
    let mut choices = view.buttons.clone();
    let fragments = [Some(view.instruction()), view.description()];
    for html in fragments.into_iter().flatten() {
        for anchor in markup::embedded_anchors(html) {
            match Target::parse(&anchor.target) {
                Ok(target) => choices.push(StepButton::new(anchor.label, target)),
                Err(err) => tracing::warn!(
                    step_id = %view.id(),
                    target = %anchor.target,
                    %err,
                    "skipping embedded anchor"
                ),
            }
        }
    }
    choices
}

pub fn step_links(view: &StepView<'_>) -> Vec<ExternalLink> {
    let mut links = markup::external_links(view.instruction());
    if let Some(description) = view.description() {
        links.extend(markup::external_links(description));
    }
    links
}

fn number_links(links: Vec<ExternalLink>, first: usize) -> Vec<LinkChoice> {
    links
        .into_iter()
        .enumerate()
        .map(|(offset, link)| LinkChoice {
            number: first + offset,
            link,
        })
        .collect()
}

pub fn visible_links(view: &StepView<'_>, popup: Option<&PopupContent>) -> Vec<LinkChoice> {
    let mut links = step_links(view);
    if let Some(popup) = popup {
        links.extend(markup::external_links(&popup.body));
    }
    number_links(links, 1)
}

/// Matches `token` against the listed links by number, then by label.
pub fn resolve_link<'l>(links: &'l [LinkChoice], token: &str) -> Option<&'l ExternalLink> {
    let token = token.trim();
    if let Ok(number) = token.parse::<usize>() {
        return links
            .iter()
            .find(|choice| choice.number == number)
            .map(|choice| &choice.link);
    }
    links
        .iter()
        .find(|choice| choice.link.label.eq_ignore_ascii_case(token))
        .map(|choice| &choice.link)
}

pub fn render_current<P: Presenter>(
    engine: &NavigationEngine<'_>,
    session: &Session,
    presenter: &mut P,
) -> io::Result<()> {
    let view = engine.current_view(session);
    let links = visible_links(&view, None);
    presenter.render_step(&view, &choices(&view), &links)?;
    presenter.render_audit(&audit_display_lines(session.audit()))
}

pub fn dispatch<P: Presenter>(
    engine: &NavigationEngine<'_>,
    session: &mut Session,
    event: UiEvent,
    presenter: &mut P,
) -> io::Result<()> {
    match event {
        UiEvent::Activate(button) => {
            engine.activate(session, &button);
            render_current(engine, session, presenter)
        }
        UiEvent::ExternalLinkOpened(link) => {
            engine.open_external_link(session, &link.label);
            presenter.render_external_link(&link)?;
            presenter.render_audit(&audit_display_lines(session.audit()))
        }
        UiEvent::PopupRequested(key) => match engine.popup(&key) {
            Some(popup) => {
                let first = step_links(&engine.current_view(session)).len() + 1;
                let links = number_links(markup::external_links(&popup.body), first);
                presenter.render_popup(popup, &links)
            }
            None => Ok(()),
        },
        UiEvent::GuidanceRequested => match engine.open_guidance(session) {
            Ok(url) => {
                presenter.render_guidance(url)?;
                presenter.render_audit(&audit_display_lines(session.audit()))
            }
            Err(err) => presenter.render_notice(&err.to_string()),
        },
        UiEvent::ResetRequested => {
            engine.reset(session);
            render_current(engine, session, presenter)
        }
    }
}
