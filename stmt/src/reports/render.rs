//! Render command report.

use super::output::{Output, Report};

/// A rendered construction expression.
#[derive(Debug)]
pub struct RenderReport {
    /// Static type of the expression.
    pub ty: String,
    /// Emitted source text.
    pub text: String,
}

impl Report for RenderReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&self.text);
    }
}
