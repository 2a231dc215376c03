//! HTML page rendering
//!
//! One minijinja template renders every state of the page: the empty form,
//! the form with a result card, and an error notice (load or prediction
//! failure) that replaces the form entirely.

use minijinja::{context, Environment};

use crate::error::{Error, Result};
use crate::form::{layout, FormSubmission};
use crate::presentation::ResultCard;

const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Compiled page templates
pub struct Pages {
    env: Environment<'static>,
}

impl std::fmt::Debug for Pages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pages").finish_non_exhaustive()
    }
}

impl Pages {
    /// Compile the bundled templates
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("page.html", PAGE_TEMPLATE)
            .map_err(|e| Error::Render(format!("Invalid template syntax: {e}")))?;
        Ok(Self { env })
    }

    /// The form filled with `values`, plus the result card when present
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] on template failure.
    pub fn form(
        &self,
        values: &FormSubmission,
        result: Option<&ResultCard>,
        accuracy: Option<&str>,
    ) -> Result<String> {
        self.render(context!(
            sections => layout(values),
            result => result,
            accuracy => accuracy,
        ))
    }

    /// The load-failure notice; no form is rendered
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] on template failure.
    pub fn load_failure(&self, message: &str) -> Result<String> {
        self.error(&format!("Error loading model: {message}"))
    }

    /// An error notice in place of the form
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] on template failure.
    pub fn error(&self, message: &str) -> Result<String> {
        self.render(context!(error => message))
    }

    fn render(&self, ctx: minijinja::Value) -> Result<String> {
        self.env
            .get_template("page.html")
            .and_then(|t| t.render(ctx))
            .map_err(|e| Error::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::SeverityClass;

    #[test]
    fn test_default_form_renders_all_sections() {
        let pages = Pages::new().expect("test");
        let html = pages.form(&FormSubmission::default(), None, None).expect("test");
        assert!(html.contains("Physical Metrics"));
        assert!(html.contains("Dietary Habits"));
        assert!(html.contains("Lifestyle &amp; Personal History"));
        assert!(html.contains("GENERATE AI ASSESSMENT"));
        assert!(html.contains("name=\"MTRANS\""));
        assert!(!html.contains("result-card\""));
    }

    #[test]
    fn test_selected_option_follows_value() {
        let pages = Pages::new().expect("test");
        let html = pages.form(&FormSubmission::default(), None, None).expect("test");
        assert!(html.contains("<option value=\"Public_Transportation\" selected>"));
        assert!(html.contains("<option value=\"Male\" selected>"));
    }

    #[test]
    fn test_result_card_rendered_with_color() {
        let pages = Pages::new().expect("test");
        let card = ResultCard::new(SeverityClass::ObesityTypeIII, Some(0.9622));
        let html = pages
            .form(&FormSubmission::default(), Some(&card), card.accuracy.as_deref())
            .expect("test");
        assert!(html.contains("Predicted Class: Obesity Type III"));
        assert!(html.contains("border-left-color: #7B1FA2;"));
        assert!(html.contains("96.22%"));
        assert!(html.contains("What does this mean?"));
    }

    #[test]
    fn test_load_failure_hides_form() {
        let pages = Pages::new().expect("test");
        let html = pages.load_failure("Model file not found: x.json").expect("test");
        assert!(html.contains("Error loading model: Model file not found"));
        assert!(!html.contains("<form"));
    }
}
