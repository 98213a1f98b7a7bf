use super::{LinkChoice, Presenter};
use crate::markup::{to_plain_text, ExternalLink};
use crate::navigation::StepView;
use crate::rules::{PopupContent, StepButton};
use std::io::{self, Write};

pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, html: &str) -> io::Result<()> {
        let text = to_plain_text(html);
        if !text.is_empty() {
            writeln!(self.out, "{text}")?;
        }
        Ok(())
    }

    fn write_links(&mut self, links: &[LinkChoice]) -> io::Result<()> {
        for choice in links {
            writeln!(
                self.out,
                "  [link {}] {} <{}>",
                choice.number, choice.link.label, choice.link.href
            )?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render_step(
        &mut self,
        view: &StepView<'_>,
        choices: &[StepButton],
        links: &[LinkChoice],
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", view.title())?;
        self.write_block(view.instruction())?;
        if let Some(description) = view.description() {
            self.write_block(description)?;
        }
        if view.has_guidance_link() {
            writeln!(self.out, "[guidance available: type `guide`]")?;
        }
        for (index, choice) in choices.iter().enumerate() {
            writeln!(self.out, "  {}) {}", index + 1, choice.label)?;
        }
        self.write_links(links)
    }

    fn render_audit(&mut self, lines: &[String]) -> io::Result<()> {
        writeln!(self.out, "Audit:")?;
        for line in lines {
            writeln!(self.out, "  - {line}")?;
        }
        Ok(())
    }

    fn render_popup(&mut self, popup: &PopupContent, links: &[LinkChoice]) -> io::Result<()> {
        writeln!(self.out, "-- {} --", popup.title)?;
        self.write_block(&popup.body)?;
        self.write_links(links)?;
        writeln!(self.out, "--")
    }

    fn render_guidance(&mut self, url: &str) -> io::Result<()> {
        writeln!(self.out, "Guidance: {url}")
    }

    fn render_external_link(&mut self, link: &ExternalLink) -> io::Result<()> {
        writeln!(self.out, "Link: {} <{}>", link.label, link.href)
    }

    fn render_notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "! {message}")
    }

    fn render_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "ERROR: {message}")
    }
}
