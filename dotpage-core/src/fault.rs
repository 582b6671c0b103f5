//! Unrecoverable faults
//!
//! A fault puts an error code on the panel and sounds the alarm until the
//! board is power-cycled. There is no recovery path.

use core::fmt::Write;

use dotpage_display::{DisplaySurface, LABEL_FONT_5X7};
use heapless::String;

use crate::traits::{play, Annunciator, StorageError, ALARM};

/// Fault kinds, each with the code shown on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Card or filesystem did not come up
    StorageInit,
    /// Root directory could not be opened
    RootListing,
    /// Root directory listing failed part way
    CatalogEnumeration,
    /// A catalogued page could not be opened or read
    PageOpen,
}

impl Fault {
    /// Numeric code shown under "ERR"
    pub fn code(self) -> u8 {
        match self {
            Fault::StorageInit => 1,
            Fault::RootListing => 2,
            Fault::CatalogEnumeration => 3,
            Fault::PageOpen => 4,
        }
    }

    /// Map a storage error raised while building the catalog
    pub fn from_listing(err: StorageError) -> Self {
        match err {
            StorageError::OpenRoot => Fault::RootListing,
            _ => Fault::CatalogEnumeration,
        }
    }
}

/// Draw the fault screen
pub fn render_fault<D: DisplaySurface + ?Sized>(display: &mut D, fault: Fault) {
    let mut code: String<3> = String::new();
    let _ = write!(code, "{}", fault.code());

    display.clear_screen();
    display.draw_string(0, 1, "ERR", &LABEL_FONT_5X7);
    display.draw_string(0, 17, &code, &LABEL_FONT_5X7);
}

/// Show `fault` and sound the alarm forever
pub fn halt<D, A>(display: &mut D, annunciator: &mut A, fault: Fault) -> !
where
    D: DisplaySurface + ?Sized,
    A: Annunciator + ?Sized,
{
    render_fault(display, fault);
    loop {
        play(annunciator, &ALARM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotpage_display::Framebuffer;

    #[test]
    fn test_codes() {
        assert_eq!(Fault::StorageInit.code(), 1);
        assert_eq!(Fault::RootListing.code(), 2);
        assert_eq!(Fault::CatalogEnumeration.code(), 3);
        assert_eq!(Fault::PageOpen.code(), 4);
    }

    #[test]
    fn test_listing_errors() {
        assert_eq!(Fault::from_listing(StorageError::OpenRoot), Fault::RootListing);
        assert_eq!(
            Fault::from_listing(StorageError::Enumerate),
            Fault::CatalogEnumeration
        );
    }

    #[test]
    fn test_render_fault_screen() {
        let mut fb = Framebuffer::new();
        fb.draw_string(0, 0, "junk", &LABEL_FONT_5X7);
        render_fault(&mut fb, Fault::PageOpen);

        let mut expected = Framebuffer::new();
        expected.draw_string(0, 1, "ERR", &LABEL_FONT_5X7);
        expected.draw_string(0, 17, "4", &LABEL_FONT_5X7);
        assert_eq!(fb, expected);
    }

    #[test]
    fn test_every_fault_screen_shows_its_code() {
        for (fault, text) in [
            (Fault::StorageInit, "1"),
            (Fault::RootListing, "2"),
            (Fault::CatalogEnumeration, "3"),
            (Fault::PageOpen, "4"),
        ] {
            let mut fb = Framebuffer::new();
            render_fault(&mut fb, fault);

            let mut expected = Framebuffer::new();
            expected.draw_string(0, 1, "ERR", &LABEL_FONT_5X7);
            expected.draw_string(0, 17, text, &LABEL_FONT_5X7);
            assert_eq!(fb, expected);
        }
    }
}
