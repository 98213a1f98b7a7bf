use super::CliError;
use crate::navigation::{audit_display_lines, NavigationEngine, Session};
use crate::presentation::{
    choices, dispatch, init_error_message, parse_walk_command, parse_walk_script,
    render_current, resolve_link, visible_links, Presenter, UiEvent, WalkCommand,
};
use crate::rules::{PopupContent, Rules, StepButton};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "guideflow", about = "Walk a guidance rules document in the terminal")]
pub struct WalkArgs {
    /// Rules document to walk; the bundled document is used when omitted.
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Comma-separated commands to run instead of reading stdin.
    #[arg(long)]
    pub script: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkFlow {
    Continue,
    Quit,
}

pub fn load_rules<P: Presenter>(args: &WalkArgs, presenter: &mut P) -> Result<Rules, CliError> {
    let loaded = match args.rules.as_deref() {
        Some(path) => Rules::from_path(path),
        None => Rules::bundled(),
    };
    match loaded {
        Ok(rules) => Ok(rules),
        Err(err) => {
            presenter.render_error(&init_error_message(&err))?;
            Err(err.into())
        }
    }
}

/// One terminal walk: the session plus the popup currently shown, whose links
/// stay selectable until the step changes.
pub struct Walk<'r> {
    engine: NavigationEngine<'r>,
    session: Session,
    open_popup: Option<&'r PopupContent>,
}

impl<'r> Walk<'r> {
    pub fn new(engine: NavigationEngine<'r>) -> Self {
        Self {
            engine,
            session: Session::new(),
            open_popup: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn command_event(&self, command: WalkCommand) -> Result<Option<UiEvent>, String> {
        let view = self.engine.current_view(&self.session);
        let event = match command {
            WalkCommand::Choose(index) => {
                let available = choices(&view);
                let button = available.get(index.get() - 1).cloned().ok_or_else(|| {
                    format!(
                        "no choice {index}; this step offers {} choice(s)",
                        available.len()
                    )
                })?;
                UiEvent::Activate(button)
            }
            WalkCommand::Back => UiEvent::Activate(StepButton::back()),
            WalkCommand::Reset => UiEvent::ResetRequested,
            WalkCommand::Guide => UiEvent::GuidanceRequested,
            WalkCommand::Popup(key) => UiEvent::PopupRequested(key),
            WalkCommand::Link(token) => {
                let links = visible_links(&view, self.open_popup);
                let link = resolve_link(&links, &token).cloned().ok_or_else(|| {
                    format!("no link `{token}`; {} link(s) are shown", links.len())
                })?;
                UiEvent::ExternalLinkOpened(link)
            }
            WalkCommand::Audit | WalkCommand::Quit => return Ok(None),
        };
        Ok(Some(event))
    }

    pub fn apply<P: Presenter>(
        &mut self,
        command: WalkCommand,
        presenter: &mut P,
    ) -> Result<WalkFlow, CliError> {
        match command {
            WalkCommand::Quit => return Ok(WalkFlow::Quit),
            WalkCommand::Audit => {
                presenter.render_audit(&audit_display_lines(self.session.audit()))?;
                return Ok(WalkFlow::Continue);
            }
            _ => {}
        }
        match self.command_event(command) {
            Ok(Some(event)) => {
                match &event {
                    UiEvent::PopupRequested(key) => self.open_popup = self.engine.popup(key),
                    UiEvent::Activate(_) | UiEvent::ResetRequested => self.open_popup = None,
                    UiEvent::ExternalLinkOpened(_) | UiEvent::GuidanceRequested => {}
                }
                dispatch(&self.engine, &mut self.session, event, presenter)?;
            }
            Ok(None) => {}
            Err(message) => presenter.render_notice(&message)?,
        }
        Ok(WalkFlow::Continue)
    }

    pub fn run_script<P: Presenter>(
        &mut self,
        script: &str,
        presenter: &mut P,
    ) -> Result<(), CliError> {
        let commands = parse_walk_script(script).map_err(CliError::Script)?;
        for command in commands {
            if self.apply(command, presenter)? == WalkFlow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn run_lines<R: BufRead, P: Presenter>(
        &mut self,
        input: R,
        presenter: &mut P,
    ) -> Result<(), CliError> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let flow = match parse_walk_command(&line) {
                Ok(command) => self.apply(command, presenter)?,
                Err(message) => {
                    presenter.render_notice(&message)?;
                    WalkFlow::Continue
                }
            };
            if flow == WalkFlow::Quit {
                break;
            }
        }
        Ok(())
    }
}

pub fn run_walk<R: BufRead, P: Presenter>(
    args: &WalkArgs,
    input: R,
    presenter: &mut P,
) -> Result<Session, CliError> {
    let rules = load_rules(args, presenter)?;
    let engine = NavigationEngine::new(&rules)?;
    let mut walk = Walk::new(engine);
    render_current(&engine, walk.session(), presenter)?;
    match args.script.as_deref() {
        Some(script) => walk.run_script(script, presenter)?,
        None => walk.run_lines(input, presenter)?,
    }
    Ok(walk.into_session())
}
