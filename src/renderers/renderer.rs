// Copyright @yucwang 2021

use crate::core::scene::Scene;
use crate::math::bitmap::Bitmap;
use crate::renderers::progressive::{RenderError, RenderSummary};

pub trait Renderer {
    /// Renders `scene`, blocking until the last checkpoint has been handled.
    fn render_scene(&self, scene: &Scene) -> Result<RenderSummary, RenderError>;
    /// Normalized copy of everything accumulated so far.
    fn result(&self) -> Option<Bitmap>;
}
