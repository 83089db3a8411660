//! Showing annotated images to the user

use crate::error::Result;
use image::RgbImage;
use log::info;

/// Title of the result window
pub const WINDOW_TITLE: &str = "Detected Barcode";

/// Something that can present an image and wait for the user
pub trait Viewer {
    /// Present `image`; returns once the user dismisses it
    fn show(&mut self, title: &str, image: &RgbImage) -> Result<()>;

    /// Whether [`Viewer::show`] waits for user input
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Viewer that only logs, for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessViewer;

impl Viewer for HeadlessViewer {
    fn show(&mut self, title: &str, image: &RgbImage) -> Result<()> {
        info!(
            "display disabled, not showing {:?} ({}x{})",
            title,
            image.width(),
            image.height()
        );
        Ok(())
    }
}

/// Native window viewer. Blocks until the window is closed or Escape is pressed.
#[cfg(feature = "display-window")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowViewer;

#[cfg(feature = "display-window")]
impl Viewer for WindowViewer {
    fn show(&mut self, title: &str, image: &RgbImage) -> Result<()> {
        let rgba = image::DynamicImage::ImageRgb8(image.clone()).to_rgba8();
        imageproc::window::display_image(title, &rgba, image.width(), image.height());
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// The best viewer this build supports, or the headless one when `headless`
pub fn default_viewer(headless: bool) -> Box<dyn Viewer> {
    #[cfg(feature = "display-window")]
    if !headless {
        return Box::new(WindowViewer);
    }
    if !headless {
        info!("built without the display-window feature, annotated image will not be shown");
    }
    Box::new(HeadlessViewer)
}

impl<V: Viewer + ?Sized> Viewer for Box<V> {
    fn show(&mut self, title: &str, image: &RgbImage) -> Result<()> {
        (**self).show(title, image)
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }
}
