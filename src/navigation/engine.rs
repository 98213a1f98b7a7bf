use super::{AuditEntry, NavigationError, Session};
use crate::rules::{PopupContent, Rules, Step, StepButton, StepId, Target};

const BACK_AUDIT_LABEL: &str = "Back";
const GUIDANCE_AUDIT_LABEL: &str = "Opened guidance";
const EXTERNAL_LINK_AUDIT_PREFIX: &str = "Opened external link: ";
const EXTERNAL_LINK_FALLBACK_LABEL: &str = "link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView<'a> {
    pub step: &'a Step,
    pub has_back: bool,
    pub buttons: Vec<StepButton>,
    pub guidance_url: Option<&'a str>,
}

impl<'a> StepView<'a> {
    pub fn id(&self) -> &'a StepId {
        &self.step.id
    }

    pub fn title(&self) -> &'a str {
        &self.step.title
    }

    pub fn instruction(&self) -> &'a str {
        &self.step.instruction
    }

    pub fn description(&self) -> Option<&'a str> {
        self.step.description.as_deref()
    }

    pub fn has_guidance_link(&self) -> bool {
        self.guidance_url.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    Forward { from: StepId, to: StepId },
    Back { from: StepId, to: StepId },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<'a> {
    pub view: StepView<'a>,
    pub effect: NavEffect,
    pub event: AuditEntry,
}

#[derive(Debug, Clone, Copy)]
pub struct NavigationEngine<'a> {
    rules: &'a Rules,
    start: &'a Step,
}

impl<'a> NavigationEngine<'a> {
    pub fn new(rules: &'a Rules) -> Result<Self, NavigationError> {
        let start = rules.start_step().ok_or(NavigationError::MissingStart)?;
        Ok(Self { rules, start })
    }

    pub fn rules(&self) -> &'a Rules {
        self.rules
    }

    fn resolve(&self, session: &Session) -> &'a Step {
        self.rules
            .step(session.current_id().as_str())
            .unwrap_or(self.start)
    }

    pub fn current_view(&self, session: &Session) -> StepView<'a> {
        let step = self.resolve(session);
        let has_back = !session.current_id().is_start();
        let mut buttons = Vec::with_capacity(step.buttons.len() + 1);
        if has_back {
            buttons.push(StepButton::back());
        }
        buttons.extend(step.buttons.iter().cloned());
        StepView {
            step,
            has_back,
            buttons,
            guidance_url: self.rules.guidance_url(step.id.as_str()),
        }
    }

    pub fn activate(&self, session: &mut Session, button: &StepButton) -> Transition<'a> {
        let title = &self.resolve(session).title;
        match &button.next {
            Target::Reset => {
                let event = session.record(title, &button.label);
                session.clear();
                tracing::debug!(label = %button.label, "session reset by control target");
                Transition {
                    view: self.current_view(session),
                    effect: NavEffect::Reset,
                    event,
                }
            }
            Target::Back => {
                let event = session.record(title, BACK_AUDIT_LABEL);
                let from = session.retreat();
                let to = session.current_id().clone();
                tracing::debug!(%from, %to, "navigated back");
                Transition {
                    view: self.current_view(session),
                    effect: NavEffect::Back { from, to },
                    event,
                }
            }
            Target::Step(next) => {
                let event = session.record(title, &button.label);
                let from = session.advance(next.clone());
                if self.rules.step(next.as_str()).is_none() {
                    tracing::warn!(%from, to = %next, "navigated to an undeclared step; showing start");
                } else {
                    tracing::debug!(%from, to = %next, label = %button.label, "navigated forward");
                }
                Transition {
                    view: self.current_view(session),
                    effect: NavEffect::Forward {
                        from,
                        to: next.clone(),
                    },
                    event,
                }
            }
        }
    }

    pub fn open_guidance(&self, session: &mut Session) -> Result<&'a str, NavigationError> {
        let step = self.resolve(session);
        let Some(url) = self.rules.guidance_url(step.id.as_str()) else {
            tracing::warn!(step_id = %step.id, "guidance requested for a step without a link");
            return Err(NavigationError::NoGuidanceLink {
                step_id: step.id.to_string(),
            });
        };
        session.record(&step.title, GUIDANCE_AUDIT_LABEL);
        Ok(url)
    }

    pub fn open_external_link(&self, session: &mut Session, label_text: &str) -> AuditEntry {
        let label = if label_text.trim().is_empty() {
            EXTERNAL_LINK_FALLBACK_LABEL
        } else {
            label_text
        };
        let title = &self.resolve(session).title;
        session.record(title, &format!("{EXTERNAL_LINK_AUDIT_PREFIX}{label}"))
    }

    pub fn popup(&self, key: &str) -> Option<&'a PopupContent> {
        let popup = self.rules.popup(key);
        if popup.is_none() {
            tracing::debug!(key, "popup requested for an undeclared key");
        }
        popup
    }

    pub fn reset(&self, session: &mut Session) -> StepView<'a> {
        session.clear();
        self.current_view(session)
    }
}
