//! The page shown to every terminal after the handshake.

use minitel_core::videotex::ROWS;
use minitel_core::{Color, GridError, TextAttributes, VideotexPage, ZoneAttributes};

pub const TITLE: &str = "MINITEL";

/// Builds the welcome page.  `peer` is shown on the status row when known.
pub fn page(peer: Option<&str>) -> Result<VideotexPage, GridError> {
    let mut page = VideotexPage::new();

    let banner = ZoneAttributes {
        background: Color::Blue,
        ..ZoneAttributes::default()
    };
    page.draw_box(2, 1, 4, 40, banner)?;
    page.set_text(
        TITLE,
        4,
        21 - TITLE.len(),
        Some(TextAttributes {
            color: Color::Yellow,
            double_height: true,
            double_width: true,
            ..TextAttributes::default()
        }),
    )?;

    page.draw_frame(8, 5, 9, 32)?;
    page.set_text("Bienvenue sur le serveur.", 10, 8, None)?;
    page.set_text("Tapez sur une touche,", 12, 8, None)?;
    page.set_text("elle sera décodée ici.", 13, 8, None)?;
    page.set_text(
        "Connexion/Fin pour quitter",
        15,
        8,
        Some(TextAttributes {
            color: Color::Cyan,
            ..TextAttributes::default()
        }),
    )?;

    page.draw_horizontal_rule(ROWS - 2)?;
    if let Some(peer) = peer {
        page.set_text(&format!("Session {peer}"), ROWS - 1, 2, None)?;
    }
    Ok(page)
}
